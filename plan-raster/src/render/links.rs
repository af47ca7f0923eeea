use plan_core::geom::{dedup_points, point_along};
use plan_core::model::{Link, LinkKind, Routing};
use plan_core::{MapObject, Point};

use super::{DrawContext, arrowhead, color, opacity, width_or};
use crate::consts::{
    ARROW_LINK_COLOR, CABLE_COLOR, LABEL_COLOR, LINK_ARROW_SIZE, LINK_FONT_SIZE, LINK_WIDTH,
    MIN_STROKE_PX, PILL_FILL, PILL_PAD_EM,
};
use crate::surface::{Stroke, Surface, TextStyle};

pub(super) fn draw(
    surface: &mut Surface,
    ctx: &DrawContext<'_>,
    obj: &MapObject,
    link: &Link,
    from: Point,
    to: Point,
) {
    let k = ctx.transform.unit();
    let (a, b) = (ctx.transform.to_px(from), ctx.transform.to_px(to));
    let width = (width_or(obj.stroke_width, LINK_WIDTH) * k).max(MIN_STROKE_PX);

    surface.begin_group(None, opacity(obj));
    match link.kind {
        LinkKind::Arrow => {
            let line_color = color(obj.stroke_color.as_deref(), ARROW_LINK_COLOR);
            surface.path(&[a, b], false, Some(&Stroke::solid(line_color, width)), None);
            let size = LINK_ARROW_SIZE * k;
            if link.arrows.at_start() {
                let head = arrowhead(a, b.angle_to(a), size);
                surface.path(&head, true, None, Some(line_color));
            }
            if link.arrows.at_end() {
                let head = arrowhead(b, a.angle_to(b), size);
                surface.path(&head, true, None, Some(line_color));
            }
        }
        LinkKind::Cable => {
            let line_color = color(obj.stroke_color.as_deref(), CABLE_COLOR);
            let pts = cable_route(a, b, link.routing);
            let stroke = Stroke::solid(line_color, width).rounded();
            surface.path(&pts, false, Some(&stroke), None);
            let name = link.name.as_deref().map(str::trim).unwrap_or_default();
            if !name.is_empty()
                && let Some((mid, _)) = point_along(&pts, 0.5)
            {
                let font = LINK_FONT_SIZE * k;
                surface.pill(mid, &[name], font, font * PILL_PAD_EM, PILL_FILL);
                surface.text(mid, &[name], &TextStyle::centered(font, LABEL_COLOR));
            }
        }
    }
    surface.end_group();
}

/// Orthogonal route with one bend; collapses to a straight segment when the
/// endpoints share an axis.
pub(crate) fn cable_route(a: Point, b: Point, routing: Routing) -> Vec<Point> {
    let bend = match routing {
        Routing::HorizontalFirst => Point::new(b.x, a.y),
        Routing::VerticalFirst => Point::new(a.x, b.y),
    };
    dedup_points(vec![a, bend, b])
}
