//! Scene model adapter: picks the entities a render will draw and fixes their order.
//!
//! Draw order is by [`Layer`] first (rooms at the bottom, the scale bar on top)
//! and by snapshot list order inside a layer. Endpoint references are resolved
//! here, so renderers never see a link or dimension line with a dangling id.

use std::collections::HashMap;

use plan_core::geom::{dedup_points, translate_geom};
use plan_core::model::{Desk, EmbeddedImage, Link, Marker, Quote, TextBlock, Wall};
use plan_core::{FloorPlan, MapObject, ObjectKind, Point, Room, ScaleBar};
use tracing::debug;

use crate::options::Categories;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Rooms,
    Walls,
    Dimensions,
    Links,
    Objects,
    ScaleBar,
}

/// One drawable entity with world-space endpoints already resolved.
#[derive(Clone, Debug)]
pub enum Entity<'a> {
    Room(&'a Room),
    Wall {
        obj: &'a MapObject,
        wall: &'a Wall,
        points: Vec<Point>,
    },
    Dimension {
        obj: &'a MapObject,
        quote: &'a Quote,
        points: Vec<Point>,
    },
    Link {
        obj: &'a MapObject,
        link: &'a Link,
        from: Point,
        to: Point,
    },
    Marker(&'a MapObject, &'a Marker),
    Desk(&'a MapObject, &'a Desk),
    Text(&'a MapObject, &'a TextBlock),
    Image(&'a MapObject, &'a EmbeddedImage),
    ScaleBar {
        bar: &'a ScaleBar,
        start: Point,
        end: Point,
    },
}

impl Entity<'_> {
    pub fn layer(&self) -> Layer {
        match self {
            Entity::Room(_) => Layer::Rooms,
            Entity::Wall { .. } => Layer::Walls,
            Entity::Dimension { .. } => Layer::Dimensions,
            Entity::Link { .. } => Layer::Links,
            Entity::Marker(..) | Entity::Desk(..) | Entity::Text(..) | Entity::Image(..) => {
                Layer::Objects
            }
            Entity::ScaleBar { .. } => Layer::ScaleBar,
        }
    }

    /// Id of the backing plan entity, for logs and tests.
    pub fn id(&self) -> &str {
        match self {
            Entity::Room(r) => &r.id,
            Entity::Wall { obj, .. }
            | Entity::Dimension { obj, .. }
            | Entity::Link { obj, .. }
            | Entity::Marker(obj, _)
            | Entity::Desk(obj, _)
            | Entity::Text(obj, _)
            | Entity::Image(obj, _) => &obj.id,
            Entity::ScaleBar { .. } => "scale",
        }
    }
}

/// Ordered draw list for one plan.
#[derive(Debug, Default)]
pub struct Scene<'a> {
    items: Vec<Entity<'a>>,
}

impl<'a> Scene<'a> {
    pub fn build(plan: &'a FloorPlan, categories: &Categories) -> Self {
        let by_id: HashMap<&str, &MapObject> =
            plan.objects.iter().map(|o| (o.id.as_str(), o)).collect();
        let mut items = Vec::new();

        if categories.include_rooms {
            for room in &plan.rooms {
                if room.outline().is_some() {
                    items.push(Entity::Room(room));
                } else {
                    debug!(room = %room.id, "room skipped: degenerate outline");
                }
            }
        }

        for obj in &plan.objects {
            if !obj.position().is_finite() {
                debug!(object = %obj.id, kind = obj.type_tag(), "object skipped: non-finite position");
                continue;
            }
            if let Some(entity) = select_object(obj, categories, &by_id) {
                items.push(entity);
            }
        }

        if categories.include_scale
            && let Some(bar) = &plan.scale
            && let Some((start, end)) = bar.endpoints()
            && start.is_finite()
            && end.is_finite()
        {
            items.push(Entity::ScaleBar { bar, start, end });
        }

        // Stable: list order survives inside each layer.
        items.sort_by_key(Entity::layer);
        Scene { items }
    }

    pub fn items(&self) -> &[Entity<'a>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn select_object<'a>(
    obj: &'a MapObject,
    categories: &Categories,
    by_id: &HashMap<&str, &'a MapObject>,
) -> Option<Entity<'a>> {
    match &obj.kind {
        ObjectKind::Marker(marker) => {
            let enabled = if marker.safety {
                categories.include_safety
            } else {
                categories.include_objects
            };
            enabled.then_some(Entity::Marker(obj, marker))
        }
        ObjectKind::Desk(desk) => categories.include_desks.then_some(Entity::Desk(obj, desk)),
        ObjectKind::Text(text) => categories.include_objects.then_some(Entity::Text(obj, text)),
        ObjectKind::Image(img) => categories.include_objects.then_some(Entity::Image(obj, img)),
        ObjectKind::Wall(wall) => {
            if !categories.include_walls {
                return None;
            }
            let points = offset_points(obj, &wall.points);
            if points.len() < 2 || points.iter().any(|p| !p.is_finite()) {
                debug!(object = %obj.id, "wall skipped: degenerate polyline");
                return None;
            }
            Some(Entity::Wall { obj, wall, points })
        }
        ObjectKind::Quote(quote) => {
            if !categories.include_quotes {
                return None;
            }
            let points = resolve_quote(obj, quote, by_id)?;
            Some(Entity::Dimension { obj, quote, points })
        }
        ObjectKind::Link(link) => {
            if !categories.include_links {
                return None;
            }
            let (Some(a), Some(b)) = (
                by_id.get(link.from_id.as_str()),
                by_id.get(link.to_id.as_str()),
            ) else {
                debug!(object = %obj.id, "link skipped: missing endpoint");
                return None;
            };
            let (from, to) = (a.position(), b.position());
            if !from.is_finite() || !to.is_finite() || from.distance(to) == 0.0 {
                debug!(object = %obj.id, "link skipped: degenerate endpoints");
                return None;
            }
            Some(Entity::Link { obj, link, from, to })
        }
    }
}

fn offset_points(obj: &MapObject, pts: &[Point]) -> Vec<Point> {
    translate_geom(pts, obj.x, obj.y)
}

fn resolve_quote(
    obj: &MapObject,
    quote: &Quote,
    by_id: &HashMap<&str, &MapObject>,
) -> Option<Vec<Point>> {
    let mut points = offset_points(obj, &quote.points);
    let anchor = |id: &Option<String>| -> Result<Option<Point>, ()> {
        match id {
            None => Ok(None),
            Some(id) => by_id.get(id.as_str()).map(|o| Some(o.position())).ok_or(()),
        }
    };
    let (Ok(from), Ok(to)) = (anchor(&quote.from_id), anchor(&quote.to_id)) else {
        debug!(object = %obj.id, "dimension skipped: missing endpoint");
        return None;
    };
    if let Some(p) = from {
        match points.first_mut() {
            Some(first) => *first = p,
            None => points.push(p),
        }
    }
    if let Some(p) = to {
        if points.len() < 2 {
            points.push(p);
        } else if let Some(last) = points.last_mut() {
            *last = p;
        }
    }
    let points = dedup_points(points);
    if points.len() < 2 || points.iter().any(|p| !p.is_finite()) {
        debug!(object = %obj.id, "dimension skipped: degenerate polyline");
        return None;
    }
    Some(points)
}

#[cfg(test)]
#[path = "scene_test.rs"]
mod tests;
