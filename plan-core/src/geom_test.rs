#![allow(clippy::float_cmp)]

use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn translate_shifts_every_point() {
    let pts = translate_geom(&[Point::new(1.0, 2.0), Point::new(-3.0, 0.5)], 10.0, -2.0);
    assert_eq!(pts, vec![Point::new(11.0, 0.0), Point::new(7.0, -1.5)]);
}

#[test]
fn polyline_length_sums_segments() {
    let pts = [Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(3.0, 10.0)];
    assert!(approx(polyline_length(&pts), 11.0));
}

#[test]
fn point_along_uses_arc_length_not_chord() {
    // L-shaped route: 10 right then 30 down. Arc midpoint is 20 along, i.e. 10 into the vertical leg.
    let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 30.0)];
    let (p, angle) = point_along(&pts, 0.5).unwrap();
    assert!(approx(p.x, 10.0));
    assert!(approx(p.y, 10.0));
    assert!(approx(angle, std::f64::consts::FRAC_PI_2));
}

#[test]
fn point_along_empty_is_none() {
    assert!(point_along(&[], 0.5).is_none());
}

#[test]
fn dedup_removes_zero_legs() {
    let pts = dedup_points(vec![
        Point::new(1.0, 1.0),
        Point::new(1.0, 1.0),
        Point::new(5.0, 1.0),
    ]);
    assert_eq!(pts.len(), 2);
}
