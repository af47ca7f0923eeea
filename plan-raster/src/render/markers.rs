//! Markers, text blocks and embedded images: the free-standing objects drawn
//! inside their own placement group.

use plan_core::model::{EmbeddedImage, Marker, TextBlock};
use plan_core::{MapObject, Point};

use super::{DrawContext, color, label_lines, opacity, placement, width_or};
use crate::consts::{
    FALLBACK_GLYPH, LABEL_COLOR, LINE_HEIGHT_EM, MARKER_CORNER, MARKER_FILL, MARKER_ICON_RATIO,
    MARKER_LABEL_MAX_LINES, MARKER_LABEL_SIZE, MARKER_SIZE, MARKER_STROKE, MARKER_STROKE_WIDTH,
    PILL_FILL, PILL_PAD_EM, PLACEHOLDER_DASH, PLACEHOLDER_STROKE, SAFETY_STROKE, TEXT_COLOR,
    TEXT_FONT_SIZE,
};
use crate::resources::Fetch;
use crate::surface::{Stroke, Surface, TextStyle};

const ORIGIN: Point = Point::new(0.0, 0.0);

pub(super) fn draw_marker(
    surface: &mut Surface,
    ctx: &DrawContext<'_>,
    obj: &MapObject,
    marker: &Marker,
) {
    let place = placement(ctx, obj);
    let s = MARKER_SIZE;
    let outline = if marker.safety {
        SAFETY_STROKE
    } else {
        color(obj.stroke_color.as_deref(), MARKER_STROKE)
    };
    let stroke = Stroke::solid(outline, width_or(obj.stroke_width, MARKER_STROKE_WIDTH));

    surface.begin_group(Some(&place), opacity(obj));
    surface.rect(
        -s / 2.0,
        -s / 2.0,
        s,
        s,
        MARKER_CORNER,
        Some(color(marker.fill_color.as_deref(), MARKER_FILL)),
        Some(&stroke),
    );
    let icon = ctx.icons.get(&marker.type_id).and_then(|name| {
        ctx.cache
            .cached_icon(name)
            .and_then(Fetch::loaded)
            .map(|img| (name, img))
    });
    match icon {
        Some((name, img)) => {
            let side = s * MARKER_ICON_RATIO;
            let key = format!("icon:{name}");
            let rect = (-side / 2.0, -side / 2.0, side, side);
            surface.shared_image(&key, rect, || img.data_url());
        }
        None => {
            let mut style = TextStyle::centered(s * 0.6, outline);
            style.bold = true;
            surface.text(ORIGIN, &[FALLBACK_GLYPH], &style);
        }
    }
    surface.end_group();

    // Name label sits below the plate and stays upright.
    if let Some(name) = marker.name.as_deref() {
        let lines = label_lines(name, MARKER_LABEL_MAX_LINES);
        if lines.is_empty() {
            return;
        }
        let k = ctx.transform.unit();
        let size = MARKER_LABEL_SIZE * k;
        let block = lines.len() as f64 * size * LINE_HEIGHT_EM;
        let below = s / 2.0 * ctx.transform.ky() * obj.scale_y();
        let pos = place.center.offset(0.0, below + size * PILL_PAD_EM + block / 2.0);
        surface.begin_group(None, opacity(obj));
        surface.text(pos, &lines, &TextStyle::centered(size, LABEL_COLOR));
        surface.end_group();
    }
}

pub(super) fn draw_text(surface: &mut Surface, ctx: &DrawContext<'_>, obj: &MapObject, text: &TextBlock) {
    let lines: Vec<&str> = text.text.lines().collect();
    if lines.iter().all(|l| l.trim().is_empty()) {
        return;
    }
    let size = text
        .font_size
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(TEXT_FONT_SIZE);
    let mut style = TextStyle::centered(size, color(text.color.as_deref(), TEXT_COLOR));
    style.family = text.font_family.clone().filter(|f| !f.trim().is_empty());

    surface.begin_group(Some(&placement(ctx, obj)), opacity(obj));
    if text.background {
        let fill = color(text.background_color.as_deref(), PILL_FILL);
        surface.pill(ORIGIN, &lines, size, size * PILL_PAD_EM, fill);
    }
    surface.text(ORIGIN, &lines, &style);
    surface.end_group();
}

pub(super) fn draw_image(
    surface: &mut Surface,
    ctx: &DrawContext<'_>,
    obj: &MapObject,
    img: &EmbeddedImage,
) {
    let (w, h) = (img.width, img.height);
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return;
    }
    let place = placement(ctx, obj);
    surface.begin_group(Some(&place), opacity(obj));
    match ctx.cache.cached_image(&img.src).and_then(Fetch::loaded) {
        Some(loaded) => {
            let key = format!("image:{}", img.src);
            surface.shared_image(&key, (-w / 2.0, -h / 2.0, w, h), || loaded.data_url());
        }
        None => {
            let stroke = Stroke::solid(PLACEHOLDER_STROKE, place.local_len(1.0))
                .dashed(PLACEHOLDER_DASH);
            surface.rect(-w / 2.0, -h / 2.0, w, h, 0.0, None, Some(&stroke));
        }
    }
    surface.end_group();
}
