use plan_core::model::Wall;
use plan_core::{MapObject, Point};

use super::{DrawContext, color, opacity, width_or};
use crate::consts::{MIN_STROKE_PX, WALL_COLOR, WALL_DASH, WALL_WIDTH};
use crate::surface::{Stroke, Surface};

pub(super) fn draw(
    surface: &mut Surface,
    ctx: &DrawContext<'_>,
    obj: &MapObject,
    wall: &Wall,
    points: &[Point],
) {
    let k = ctx.transform.unit();
    let width = (width_or(obj.stroke_width, WALL_WIDTH) * k).max(MIN_STROKE_PX);
    let mut stroke = Stroke::solid(color(obj.stroke_color.as_deref(), WALL_COLOR), width).rounded();
    if wall.dashed {
        stroke = stroke.dashed([WALL_DASH[0] * k, WALL_DASH[1] * k]);
    }
    let pts: Vec<Point> = points.iter().map(|p| ctx.transform.to_px(*p)).collect();

    surface.begin_group(None, opacity(obj));
    surface.path(&pts, false, Some(&stroke), None);
    surface.end_group();
}
