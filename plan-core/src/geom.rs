use serde::{Deserialize, Serialize};

/// Basic two dimensional point, used for both world units and pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Angle of the vector `self -> other` in radians.
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

/// Shift every point by `(dx, dy)`.
pub fn translate_geom(pts: &[Point], dx: f64, dy: f64) -> Vec<Point> {
    pts.iter().map(|p| p.offset(dx, dy)).collect()
}

pub fn polyline_length(pts: &[Point]) -> f64 {
    pts.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Point at `fraction` (0..=1) of the polyline's arc length, together with the
/// direction (radians) of the segment it falls on.
pub fn point_along(pts: &[Point], fraction: f64) -> Option<(Point, f64)> {
    let first = *pts.first()?;
    if pts.len() == 1 {
        return Some((first, 0.0));
    }
    let total = polyline_length(pts);
    if total <= 0.0 {
        return Some((first, 0.0));
    }
    let target = total * fraction.clamp(0.0, 1.0);
    let mut walked = 0.0;
    for w in pts.windows(2) {
        let seg = w[0].distance(w[1]);
        if seg > 0.0 && walked + seg >= target {
            let t = (target - walked) / seg;
            let p = Point {
                x: w[0].x + (w[1].x - w[0].x) * t,
                y: w[0].y + (w[1].y - w[0].y) * t,
            };
            return Some((p, w[0].angle_to(w[1])));
        }
        walked += seg;
    }
    let n = pts.len();
    Some((pts[n - 1], pts[n - 2].angle_to(pts[n - 1])))
}

/// Drop consecutive duplicates so routed polylines never carry zero-length legs.
pub fn dedup_points(pts: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(pts.len());
    for p in pts {
        if out.last().is_some_and(|q| q.distance(p) < 1e-9) {
            continue;
        }
        out.push(p);
    }
    out
}

#[cfg(test)]
#[path = "geom_test.rs"]
mod tests;
