use plan_core::{Point, Room, RoomOutline};

use super::{DrawContext, color};
use crate::consts::{ROOM_COLOR, ROOM_DASH, ROOM_STROKE_WIDTH};
use crate::surface::{Stroke, Surface};

/// Dashed outline, never filled.
pub(super) fn draw(surface: &mut Surface, ctx: &DrawContext<'_>, room: &Room) {
    let Some(outline) = room.outline() else {
        return;
    };
    let world = match outline {
        RoomOutline::Rect {
            origin,
            width,
            height,
        } => vec![
            origin,
            origin.offset(width, 0.0),
            origin.offset(width, height),
            origin.offset(0.0, height),
        ],
        RoomOutline::Polygon(points) => points,
    };
    let pts: Vec<Point> = world.into_iter().map(|p| ctx.transform.to_px(p)).collect();
    let k = ctx.transform.unit();
    let stroke = Stroke::solid(color(room.color.as_deref(), ROOM_COLOR), ROOM_STROKE_WIDTH * k)
        .dashed([ROOM_DASH[0] * k, ROOM_DASH[1] * k]);
    surface.path(&pts, true, Some(&stroke), None);
}
