//! Dimension ("quote") lines: stroke, end decorations and the length label.

use plan_core::geom::{point_along, polyline_length};
use plan_core::model::{EndStyle, LabelPosition, Quote};
use plan_core::{MapObject, Point};

use super::{DrawContext, arrowhead, color, opacity, width_or};
use crate::consts::{
    LABEL_COLOR, MIN_STROKE_PX, PILL_FILL, PILL_PAD_EM, QUOTE_ARROW_SIZE, QUOTE_COLOR, QUOTE_DASH,
    QUOTE_DOT_RADIUS, QUOTE_FONT_SIZE, QUOTE_LABEL_LATERAL_FACTOR, QUOTE_LABEL_SIDE_EM,
    QUOTE_LABEL_STROKE_GAP, QUOTE_MAX_SCALE, QUOTE_MIN_SCALE, QUOTE_WIDTH,
};
use crate::surface::{Placement, Stroke, Surface, TextStyle, text_width};

pub(super) fn draw(
    surface: &mut Surface,
    ctx: &DrawContext<'_>,
    obj: &MapObject,
    quote: &Quote,
    points: &[Point],
) {
    let pts: Vec<Point> = points.iter().map(|p| ctx.transform.to_px(*p)).collect();
    let n = pts.len();
    if n < 2 {
        return;
    }
    let k = ctx.transform.unit();
    let scale = obj
        .scale
        .filter(|s| s.is_finite())
        .unwrap_or(1.0)
        .clamp(QUOTE_MIN_SCALE, QUOTE_MAX_SCALE);
    let line_color = color(obj.stroke_color.as_deref(), QUOTE_COLOR);
    let width = (width_or(obj.stroke_width, QUOTE_WIDTH) * k).max(MIN_STROKE_PX);

    let mut stroke = Stroke::solid(line_color, width);
    if quote.dashed {
        stroke = stroke.dashed([QUOTE_DASH[0] * k, QUOTE_DASH[1] * k]);
    }

    surface.begin_group(None, opacity(obj));
    surface.path(&pts, false, Some(&stroke), None);

    match quote.end_style {
        EndStyle::Arrows => {
            let size = QUOTE_ARROW_SIZE * k * scale;
            let head = arrowhead(pts[0], pts[1].angle_to(pts[0]), size);
            surface.path(&head, true, None, Some(line_color));
            let tail = arrowhead(pts[n - 1], pts[n - 2].angle_to(pts[n - 1]), size);
            surface.path(&tail, true, None, Some(line_color));
        }
        EndStyle::Dots => {
            let r = QUOTE_DOT_RADIUS * k * scale;
            surface.circle(pts[0], r, Some(line_color), None);
            surface.circle(pts[n - 1], r, Some(line_color), None);
        }
    }

    let label = length_label(polyline_length(points), ctx.meters_per_unit);
    let font = quote.font_size.filter(|s| s.is_finite() && *s > 0.0).unwrap_or(QUOTE_FONT_SIZE)
        * k
        * scale;
    if let Some((mid, angle)) = point_along(&pts, 0.5) {
        let pos = label_anchor(mid, angle, quote.label_position, font, text_width(&label, font), width);
        let vertical = angle.sin().abs() > angle.cos().abs();
        let local = Placement {
            center: pos,
            rotation: if vertical { -90.0 } else { 0.0 },
            sx: 1.0,
            sy: 1.0,
        };
        let origin = Point::new(0.0, 0.0);
        surface.begin_group(Some(&local), 1.0);
        if quote.label_background {
            surface.pill(origin, &[label.as_str()], font, font * PILL_PAD_EM, PILL_FILL);
        }
        surface.text(origin, &[label.as_str()], &TextStyle::centered(font, LABEL_COLOR));
        surface.end_group();
    }
    surface.end_group();
}

/// `"12.34 m"` when the plan has a usable scale, plain units otherwise.
pub(crate) fn length_label(world_len: f64, meters_per_unit: Option<f64>) -> String {
    match meters_per_unit {
        Some(mpu) => format!("{:.2} m", world_len * mpu),
        None => format!("{:.0} px", world_len),
    }
}

/// Label center for a segment midpoint `mid` running along `angle` (radians).
pub(crate) fn label_anchor(
    mid: Point,
    angle: f64,
    position: LabelPosition,
    font: f64,
    label_width: f64,
    stroke_width: f64,
) -> Point {
    let gap = stroke_width * QUOTE_LABEL_STROKE_GAP;
    // Unit normal pointing to the left of travel, which is "up" for a
    // left-to-right line in screen space.
    let (nx, ny) = (angle.sin(), -angle.cos());
    let (nx, ny) = if ny > 0.0 || (ny == 0.0 && nx > 0.0) {
        (-nx, -ny)
    } else {
        (nx, ny)
    };
    let side = font * QUOTE_LABEL_SIDE_EM + gap;
    let lateral = label_width * QUOTE_LABEL_LATERAL_FACTOR + gap;
    match position {
        LabelPosition::Above => mid.offset(nx * side, ny * side),
        LabelPosition::Below => mid.offset(-nx * side, -ny * side),
        LabelPosition::Left => mid.offset(-lateral, 0.0),
        LabelPosition::Right => mid.offset(lateral, 0.0),
        LabelPosition::Center => mid,
    }
}
