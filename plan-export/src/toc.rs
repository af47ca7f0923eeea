//! Index (table of contents) pages.
//!
//! Layout is computed before any plan page exists: the row list depends only
//! on breadcrumbs and client names, so the number of index pages to reserve
//! is known up front. Page numbers are filled in afterwards.

use chrono::NaiveDate;

use crate::config::{IndexConfig, PageConfig};
use crate::metrics::{Font, text_width, truncate_to_width};
use crate::pdf::{ImageHandle, PdfBuilder, Rgb};

const CARD_FILL: Rgb = Rgb(0.95, 0.96, 0.98);
const ACCENT: Rgb = Rgb(0.1, 0.46, 0.82);
const MUTED: Rgb = Rgb(0.4, 0.4, 0.4);
/// Gap between a label and the page number column, in points.
const NUMBER_GAP: f32 = 12.0;

/// Embedded logo with its pixel size, for aspect-correct placement.
#[derive(Clone, Debug)]
pub struct Logo {
    pub image: ImageHandle,
    pub width: u32,
    pub height: u32,
}

/// One plan listed in the index.
#[derive(Clone, Debug)]
pub struct TocEntry {
    pub breadcrumb: String,
    pub client_name: Option<String>,
    pub client_logo: Option<Logo>,
    /// Zero-based physical page of the plan.
    pub target_page: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TocRow {
    /// Client heading; `entry` is the first entry of the group.
    Group { entry: usize },
    Entry { entry: usize, grouped: bool },
}

/// Rows for the given client names, one heading each time a named client
/// differs from the previous entry's.
pub fn toc_rows(client_names: &[Option<&str>]) -> Vec<TocRow> {
    let mut rows = Vec::with_capacity(client_names.len());
    let mut previous: Option<&str> = None;
    for (entry, client) in client_names.iter().enumerate() {
        let client = client.map(str::trim).filter(|c| !c.is_empty());
        if client.is_some() && client != previous {
            rows.push(TocRow::Group { entry });
        }
        rows.push(TocRow::Entry {
            entry,
            grouped: client.is_some(),
        });
        previous = client;
    }
    rows
}

/// Rows that fit on one index page.
pub fn lines_per_page(page: &PageConfig, index: &IndexConfig) -> usize {
    let usable = page.height - 2.0 * page.margin - index.header_reserve;
    let lines = (usable / index.line_height.max(1.0)).floor();
    if lines.is_finite() && lines >= 1.0 {
        lines as usize
    } else {
        1
    }
}

pub fn index_page_count(rows: usize, lines_per_page: usize) -> usize {
    rows.div_ceil(lines_per_page.max(1)).max(1)
}

/// A row pinned to an index page. `top` is the PDF y of the row's top edge.
#[derive(Clone, Debug, PartialEq)]
pub struct RowSlot {
    pub page: usize,
    pub top: f32,
    pub row: TocRow,
}

/// Assign rows to index pages. First-page rows are centered vertically in the
/// space under the header card when the whole index fits on that page; later
/// pages start at the configured top offset.
pub fn layout_rows(rows: &[TocRow], page: &PageConfig, index: &IndexConfig) -> Vec<RowSlot> {
    let lpp = lines_per_page(page, index);
    let lh = index.line_height;
    let mut slots = Vec::with_capacity(rows.len());
    for (ordinal, chunk) in rows.chunks(lpp).enumerate() {
        let start = if ordinal == 0 {
            let region_top = page.height - page.margin - index.header_reserve;
            let region_h = page.height - 2.0 * page.margin - index.header_reserve;
            if rows.len() <= lpp {
                let block = chunk.len() as f32 * lh;
                region_top - ((region_h - block) / 2.0).max(0.0)
            } else {
                region_top
            }
        } else {
            page.height - page.margin - index.top_offset
        };
        for (i, row) in chunk.iter().enumerate() {
            slots.push(RowSlot {
                page: ordinal,
                top: start - i as f32 * lh,
                row: row.clone(),
            });
        }
    }
    slots
}

/// Branding and summary printed on the first index page.
#[derive(Clone, Debug)]
pub struct IndexHeader {
    pub product_name: String,
    pub title: String,
    pub generated_on: NaiveDate,
    pub categories: Vec<&'static str>,
    pub logo: Option<Logo>,
}

/// Draw the index onto the reserved pages (`pages[i]` is the i-th index page).
pub fn draw_index(
    pdf: &mut PdfBuilder,
    pages: &[usize],
    entries: &[TocEntry],
    header: &IndexHeader,
    page: &PageConfig,
    index: &IndexConfig,
) {
    let Some(&first) = pages.first() else {
        return;
    };
    draw_header_card(pdf, first, header, entries.len(), page, index);

    let names: Vec<Option<&str>> = entries.iter().map(|e| e.client_name.as_deref()).collect();
    let rows = toc_rows(&names);
    let left = page.margin;
    let right = page.width - page.margin;
    let lh = index.line_height;

    for slot in layout_rows(&rows, page, index) {
        let Some(&pdf_page) = pages.get(slot.page) else {
            continue;
        };
        match slot.row {
            TocRow::Group { entry } => {
                let Some(e) = entries.get(entry) else { continue };
                let size = index.group_font_size;
                let baseline = slot.top - lh / 2.0 - size * 0.35;
                let mut x = left;
                if let Some(logo) = &e.client_logo {
                    let side = index.logo_size.min(lh);
                    let (w, h) = fit_box(logo, side);
                    pdf.draw_image(pdf_page, &logo.image, x, slot.top - (lh + h) / 2.0, w, h);
                    x += side + 6.0;
                }
                let name = e.client_name.as_deref().unwrap_or_default().trim();
                pdf.text(pdf_page, x, baseline, size, Font::Bold, ACCENT, name);
            }
            TocRow::Entry { entry, grouped } => {
                let Some(e) = entries.get(entry) else { continue };
                let size = index.font_size;
                let baseline = slot.top - lh / 2.0 - size * 0.35;
                let number = (e.target_page + 1).to_string();
                let x = if grouped { left + index.group_indent } else { left };
                let max_label = right - x - text_width(&number, size, Font::Regular) - NUMBER_GAP;
                let label = truncate_to_width(&e.breadcrumb, size, Font::Regular, max_label);
                pdf.text(pdf_page, x, baseline, size, Font::Regular, Rgb::BLACK, &label);
                pdf.text_right(pdf_page, right, baseline, size, Font::Regular, Rgb::BLACK, &number);
                let w = text_width(&label, size, Font::Regular);
                pdf.link(pdf_page, x, slot.top - lh, w, lh, e.target_page);
            }
        }
    }
}

fn draw_header_card(
    pdf: &mut PdfBuilder,
    page_index: usize,
    header: &IndexHeader,
    plan_count: usize,
    page: &PageConfig,
    index: &IndexConfig,
) {
    let m = page.margin;
    let top = page.height - m;
    let card_h = (index.header_reserve - index.line_height).max(index.title_font_size * 3.0);
    pdf.fill_rect(page_index, m, top - card_h, page.width - 2.0 * m, card_h, CARD_FILL);
    pdf.fill_rect(page_index, m, top - card_h, 4.0, card_h, ACCENT);

    let pad = 14.0;
    let mut x = m + pad;
    if let Some(logo) = &header.logo {
        let side = (card_h - 2.0 * pad).max(1.0);
        let (w, h) = fit_box(logo, side);
        pdf.draw_image(page_index, &logo.image, x, top - card_h / 2.0 - h / 2.0, w, h);
        x += w + pad;
    }

    let title_size = index.title_font_size;
    let small = index.font_size;
    let mut y = top - pad - title_size;
    pdf.text(page_index, x, y, title_size, Font::Bold, ACCENT, &header.product_name);
    y -= small * 1.8;
    pdf.text(page_index, x, y, small, Font::Bold, Rgb::BLACK, &header.title);
    y -= small * 1.5;
    let generated = format!(
        "Generated on {} - {} plan{}",
        header.generated_on.format("%Y-%m-%d"),
        plan_count,
        if plan_count == 1 { "" } else { "s" }
    );
    pdf.text(page_index, x, y, small, Font::Regular, MUTED, &generated);
    y -= small * 1.5;
    let included = if header.categories.is_empty() {
        "Included: nothing".to_string()
    } else {
        format!("Included: {}", header.categories.join(", "))
    };
    let max = page.width - m - pad - x;
    let included = truncate_to_width(&included, small, Font::Regular, max);
    pdf.text(page_index, x, y, small, Font::Regular, MUTED, &included);
}

/// Size of `logo` scaled to fit a `side` x `side` box.
fn fit_box(logo: &Logo, side: f32) -> (f32, f32) {
    let (w, h) = (logo.width.max(1) as f32, logo.height.max(1) as f32);
    let k = side / w.max(h);
    (w * k, h * k)
}

#[cfg(test)]
#[path = "toc_test.rs"]
mod tests;
