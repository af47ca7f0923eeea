//! Entity renderers.
//!
//! [`draw_entity`] is the single dispatch point from scene entity to drawing
//! routine. Each routine converts its entity to pixel space through the
//! context's [`PixelTransform`], applies style defaults and clamps, and appends
//! primitives to the [`Surface`]. Nothing here mutates the plan.

mod desks;
mod dimensions;
mod links;
mod markers;
mod rooms;
mod scale_bar;
mod walls;

use plan_core::{MapObject, PixelTransform, Point};

use crate::consts::{ARROW_SPREAD_DEG, MAX_OPACITY, MIN_OPACITY};
use crate::options::IconLookup;
use crate::resources::ResourceCache;
use crate::scene::Entity;
use crate::surface::{Placement, Surface};

pub use desks::{DeskPart, desk_outline};

/// Read-only inputs shared by all renderers of one plan.
pub struct DrawContext<'a> {
    pub transform: &'a PixelTransform,
    pub cache: &'a ResourceCache,
    pub icons: &'a IconLookup,
    pub meters_per_unit: Option<f64>,
}

pub fn draw_entity(surface: &mut Surface, ctx: &DrawContext<'_>, entity: &Entity<'_>) {
    match entity {
        Entity::Room(room) => rooms::draw(surface, ctx, room),
        Entity::Wall { obj, wall, points } => walls::draw(surface, ctx, obj, wall, points),
        Entity::Dimension { obj, quote, points } => {
            dimensions::draw(surface, ctx, obj, quote, points);
        }
        Entity::Link { obj, link, from, to } => links::draw(surface, ctx, obj, link, *from, *to),
        Entity::Marker(obj, marker) => markers::draw_marker(surface, ctx, obj, marker),
        Entity::Desk(obj, desk) => desks::draw(surface, ctx, obj, desk),
        Entity::Text(obj, text) => markers::draw_text(surface, ctx, obj, text),
        Entity::Image(obj, img) => markers::draw_image(surface, ctx, obj, img),
        Entity::ScaleBar { bar, start, end } => {
            scale_bar::draw(surface, ctx, bar, *start, *end);
        }
    }
}

pub(crate) fn opacity(obj: &MapObject) -> f64 {
    obj.opacity
        .filter(|o| o.is_finite())
        .unwrap_or(MAX_OPACITY)
        .clamp(MIN_OPACITY, MAX_OPACITY)
}

pub(crate) fn color<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.map(str::trim).filter(|c| !c.is_empty()).unwrap_or(fallback)
}

/// Positive finite width or the fallback.
pub(crate) fn width_or(value: Option<f64>, fallback: f64) -> f64 {
    value.filter(|w| w.is_finite() && *w > 0.0).unwrap_or(fallback)
}

/// Group placement for objects anchored at their center with rotation and scale.
pub(crate) fn placement(ctx: &DrawContext<'_>, obj: &MapObject) -> Placement {
    Placement {
        center: ctx.transform.to_px(obj.position()),
        rotation: obj.rotation(),
        sx: ctx.transform.kx() * obj.scale_x(),
        sy: ctx.transform.ky() * obj.scale_y(),
    }
}

/// Filled arrowhead triangle with its tip at `tip`, pointing along `angle`.
pub(crate) fn arrowhead(tip: Point, angle: f64, size: f64) -> [Point; 3] {
    let spread = ARROW_SPREAD_DEG.to_radians();
    let wing = |a: f64| Point::new(tip.x + size * a.cos(), tip.y + size * a.sin());
    [tip, wing(angle + spread), wing(angle - spread)]
}

/// Up to two short label lines.
pub(crate) fn label_lines(text: &str, max: usize) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(max)
        .collect()
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
