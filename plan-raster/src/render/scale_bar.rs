use plan_core::{Point, ScaleBar};

use super::{DrawContext, color, width_or};
use crate::consts::{
    LABEL_COLOR, MIN_STROKE_PX, PILL_FILL, PILL_PAD_EM, SCALE_COLOR, SCALE_DOT_RADIUS,
    SCALE_FONT_SIZE, SCALE_WIDTH,
};
use crate::surface::{Stroke, Surface, TextStyle};

pub(super) fn draw(
    surface: &mut Surface,
    ctx: &DrawContext<'_>,
    bar: &ScaleBar,
    start: Point,
    end: Point,
) {
    let k = ctx.transform.unit();
    let (a, b) = (ctx.transform.to_px(start), ctx.transform.to_px(end));
    let line_color = color(bar.color.as_deref(), SCALE_COLOR);
    let width = (width_or(bar.stroke_width, SCALE_WIDTH) * k).max(MIN_STROKE_PX);

    surface.path(&[a, b], false, Some(&Stroke::solid(line_color, width)), None);
    surface.circle(a, SCALE_DOT_RADIUS * k, Some(line_color), None);
    surface.circle(b, SCALE_DOT_RADIUS * k, Some(line_color), None);

    let label = format!("{:.2} m", bar.meters);
    let font = SCALE_FONT_SIZE * k;
    let mid = a.midpoint(b);
    surface.pill(mid, &[label.as_str()], font, font * PILL_PAD_EM, PILL_FILL);
    surface.text(mid, &[label.as_str()], &TextStyle::centered(font, LABEL_COLOR));
}
