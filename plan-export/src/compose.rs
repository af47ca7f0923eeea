//! Page composer: one plan raster per page, fitted and centered above a
//! revision footer.

use chrono::NaiveDate;
use plan_core::RevisionStamp;
use plan_raster::RasterImage;

use crate::config::PageConfig;
use crate::metrics::Font;
use crate::pdf::{PdfBuilder, Rgb};

const FOOTER_COLOR: Rgb = Rgb(0.35, 0.35, 0.35);
const RULE_COLOR: Rgb = Rgb(0.8, 0.8, 0.8);

/// Axis-aligned box in PDF points, origin bottom-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Largest box with the image's aspect ratio that fits `area`, centered in it.
pub fn fit_centered(img_w: u32, img_h: u32, area: Placement) -> Placement {
    let (iw, ih) = (img_w.max(1) as f32, img_h.max(1) as f32);
    let scale = (area.width / iw).min(area.height / ih).max(0.0);
    let (w, h) = (iw * scale, ih * scale);
    Placement {
        x: area.x + (area.width - w) / 2.0,
        y: area.y + (area.height - h) / 2.0,
        width: w,
        height: h,
    }
}

/// Region of a plan page available to the raster: the page minus margins and
/// the footer band.
pub fn content_area(page: &PageConfig) -> Placement {
    let m = page.margin;
    Placement {
        x: m,
        y: m + page.footer_height,
        width: (page.width - 2.0 * m).max(1.0),
        height: (page.height - 2.0 * m - page.footer_height).max(1.0),
    }
}

/// Text printed in the footer: revision label (when the plan has one) and the
/// date, stamp date first.
pub fn footer_text(stamp: Option<&RevisionStamp>, fallback_date: NaiveDate) -> (Option<String>, String) {
    let label = stamp.map(RevisionStamp::label);
    let date = stamp.map_or(fallback_date, |s| s.date);
    (label, date.format("%Y-%m-%d").to_string())
}

/// Place `raster` on a new page and return the page index.
pub fn compose_plan_page(
    pdf: &mut PdfBuilder,
    page: &PageConfig,
    raster: &RasterImage,
    stamp: Option<&RevisionStamp>,
    fallback_date: NaiveDate,
) -> usize {
    let index = pdf.add_page();
    let image = pdf.embed_jpeg(raster.bytes(), raster.width(), raster.height());
    let spot = fit_centered(raster.width(), raster.height(), content_area(page));
    pdf.draw_image(index, &image, spot.x, spot.y, spot.width, spot.height);

    let m = page.margin;
    let rule_y = m + page.footer_height;
    pdf.line(index, (m, rule_y), (page.width - m, rule_y), 0.5, RULE_COLOR);

    let baseline = m + (page.footer_height - page.footer_font_size) / 2.0;
    let (label, date) = footer_text(stamp, fallback_date);
    if let Some(label) = label {
        pdf.text(index, m, baseline, page.footer_font_size, Font::Regular, FOOTER_COLOR, &label);
    }
    pdf.text_right(
        index,
        page.width - m,
        baseline,
        page.footer_font_size,
        Font::Regular,
        FOOTER_COLOR,
        &date,
    );
    index
}

/// `"Page i / n"` centered in the bottom margin of every page.
pub fn stamp_page_counters(pdf: &mut PdfBuilder, page: &PageConfig) {
    let total = pdf.page_count();
    let y = (page.margin - page.footer_font_size) / 2.0;
    for i in 0..total {
        let label = format!("Page {} / {}", i + 1, total);
        pdf.text_centered(
            i,
            page.width / 2.0,
            y.max(2.0),
            page.footer_font_size,
            Font::Regular,
            FOOTER_COLOR,
            &label,
        );
    }
}

#[cfg(test)]
#[path = "compose_test.rs"]
mod tests;
