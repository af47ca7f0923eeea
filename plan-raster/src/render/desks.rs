//! Parametric desk silhouettes.
//!
//! Every shape is built in world units around the origin from [`DESK_UNIT`]
//! stretched by the object's per-axis scale. The drawing group only applies
//! rotation and the plan-to-pixel factors, so L-shape arms keep
//! [`DESK_L_THICKNESS`] whatever the scale. Names are drawn upright.

use plan_core::model::{Desk, DeskShape};
use plan_core::{MapObject, Point};

use super::{DrawContext, color, label_lines, opacity, width_or};
use crate::consts::{
    DESK_FILL, DESK_L_THICKNESS, DESK_LABEL_SIZE, DESK_STROKE, DESK_STROKE_WIDTH, DESK_UNIT,
    LABEL_COLOR, MARKER_LABEL_MAX_LINES,
};
use crate::surface::{Placement, Stroke, Surface, TextStyle};

/// One primitive of a desk outline, in world units relative to the desk center.
#[derive(Clone, Debug, PartialEq)]
pub enum DeskPart {
    Polygon(Vec<Point>),
    Ellipse { center: Point, rx: f64, ry: f64 },
}

/// Outline of `shape` with its footprint stretched by `(sx, sy)`.
pub fn desk_outline(shape: DeskShape, sx: f64, sy: f64) -> Vec<DeskPart> {
    let (ux, uy) = (DESK_UNIT * sx, DESK_UNIT * sy);
    match shape {
        DeskShape::Round => vec![DeskPart::Ellipse {
            center: Point::new(0.0, 0.0),
            rx: ux / 2.0,
            ry: uy / 2.0,
        }],
        DeskShape::Square => vec![DeskPart::Polygon(centered_rect(ux, uy))],
        DeskShape::Rectangular => vec![DeskPart::Polygon(centered_rect(1.6 * ux, 0.8 * uy))],
        DeskShape::Long => vec![DeskPart::Polygon(centered_rect(3.0 * ux, 0.8 * uy))],
        DeskShape::Double => {
            let (w, h) = (1.6 * ux, 0.8 * uy);
            vec![
                DeskPart::Polygon(rect_at(-w / 2.0, -h, w, h)),
                DeskPart::Polygon(rect_at(-w / 2.0, 0.0, w, h)),
            ]
        }
        DeskShape::Trapezoid => {
            let (top, bottom, h) = (ux, 2.0 * ux, 0.8 * uy);
            vec![DeskPart::Polygon(vec![
                Point::new(-top / 2.0, -h / 2.0),
                Point::new(top / 2.0, -h / 2.0),
                Point::new(bottom / 2.0, h / 2.0),
                Point::new(-bottom / 2.0, h / 2.0),
            ])]
        }
        DeskShape::LShape => vec![DeskPart::Polygon(l_shape(ux, uy, false))],
        DeskShape::MirroredLShape => vec![DeskPart::Polygon(l_shape(ux, uy, true))],
    }
}

fn rect_at(x: f64, y: f64, w: f64, h: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ]
}

fn centered_rect(w: f64, h: f64) -> Vec<Point> {
    rect_at(-w / 2.0, -h / 2.0, w, h)
}

/// Top arm plus a left arm (right arm when mirrored).
fn l_shape(ux: f64, uy: f64, mirrored: bool) -> Vec<Point> {
    let (hx, hy) = (0.75 * ux, 0.75 * uy);
    // Tiny footprints cap the arm at the full side.
    let t = DESK_L_THICKNESS.min(2.0 * hx).min(2.0 * hy);
    let pts = [
        (-hx, -hy),
        (hx, -hy),
        (hx, -hy + t),
        (-hx + t, -hy + t),
        (-hx + t, hy),
        (-hx, hy),
    ];
    let sign = if mirrored { -1.0 } else { 1.0 };
    let mut out: Vec<Point> = pts.iter().map(|&(x, y)| Point::new(x * sign, y)).collect();
    if mirrored {
        // Keep clockwise winding after the flip.
        out.reverse();
    }
    out
}

pub(super) fn draw(surface: &mut Surface, ctx: &DrawContext<'_>, obj: &MapObject, desk: &Desk) {
    let place = Placement {
        center: ctx.transform.to_px(obj.position()),
        rotation: obj.rotation(),
        sx: ctx.transform.kx(),
        sy: ctx.transform.ky(),
    };
    let fill = color(desk.fill_color.as_deref(), DESK_FILL);
    let stroke = Stroke::solid(
        color(obj.stroke_color.as_deref(), DESK_STROKE),
        width_or(obj.stroke_width, DESK_STROKE_WIDTH),
    );

    surface.begin_group(Some(&place), opacity(obj));
    for part in desk_outline(desk.shape, obj.scale_x(), obj.scale_y()) {
        match part {
            DeskPart::Polygon(pts) => surface.path(&pts, true, Some(&stroke), Some(fill)),
            DeskPart::Ellipse { center, rx, ry } => {
                surface.ellipse(center, rx, ry, Some(fill), Some(&stroke));
            }
        }
    }
    surface.end_group();

    if let Some(name) = desk.name.as_deref() {
        let lines = label_lines(name, MARKER_LABEL_MAX_LINES);
        let size = DESK_LABEL_SIZE * ctx.transform.unit();
        surface.begin_group(None, opacity(obj));
        surface.text(place.center, &lines, &TextStyle::centered(size, LABEL_COLOR));
        surface.end_group();
    }
}
