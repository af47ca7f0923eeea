//! Thin page-oriented wrapper over `pdf-writer`.
//!
//! Pages are allocated up front and their content streams stay open until
//! [`PdfBuilder::finish`], so index pages can be reserved first and filled
//! once the plan pages they point at exist. Coordinates are PDF points with
//! the origin at the bottom-left corner.

use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::metrics::{Font, text_width, winansi};

/// RGB fill or stroke color with 0..=1 channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
}

/// An image XObject already written to the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageHandle {
    name: String,
    id: Ref,
}

#[derive(Clone, Copy, Debug)]
struct LinkRegion {
    rect: Rect,
    target: usize,
}

struct PageDraft {
    id: Ref,
    content: Content,
    images: Vec<ImageHandle>,
    links: Vec<LinkRegion>,
}

pub struct PdfBuilder {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    pages_id: Ref,
    fonts: [(Font, Ref); 2],
    width: f32,
    height: f32,
    pages: Vec<PageDraft>,
    images: usize,
}

impl PdfBuilder {
    pub fn new(width: f32, height: f32) -> Self {
        let mut builder = PdfBuilder {
            pdf: Pdf::new(),
            next_id: 1,
            catalog_id: Ref::new(1),
            pages_id: Ref::new(1),
            fonts: [(Font::Regular, Ref::new(1)), (Font::Bold, Ref::new(1))],
            width,
            height,
            pages: Vec::new(),
            images: 0,
        };
        builder.catalog_id = builder.alloc();
        builder.pages_id = builder.alloc();
        for i in 0..builder.fonts.len() {
            let id = builder.alloc();
            let font = builder.fonts[i].0;
            builder
                .pdf
                .type1_font(id)
                .base_font(Name(font.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            builder.fonts[i].1 = id;
        }
        builder
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Append an empty page and return its zero-based index.
    pub fn add_page(&mut self) -> usize {
        let id = self.alloc();
        self.pages.push(PageDraft {
            id,
            content: Content::new(),
            images: Vec::new(),
            links: Vec::new(),
        });
        self.pages.len() - 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Embed a baseline JPEG as-is (DCT passthrough, no re-encode).
    pub fn embed_jpeg(&mut self, jpeg: &[u8], width: u32, height: u32) -> ImageHandle {
        let id = self.alloc();
        self.images += 1;
        let mut xobj = self.pdf.image_xobject(id, jpeg);
        xobj.filter(Filter::DctDecode);
        xobj.width(dim(width));
        xobj.height(dim(height));
        xobj.color_space().device_rgb();
        xobj.bits_per_component(8);
        ImageHandle {
            name: format!("Im{}", self.images),
            id,
        }
    }

    /// Draw `image` stretched over the box with bottom-left `(x, y)`.
    pub fn draw_image(&mut self, page: usize, image: &ImageHandle, x: f32, y: f32, w: f32, h: f32) {
        let Some(draft) = self.pages.get_mut(page) else {
            return;
        };
        if !draft.images.contains(image) {
            draft.images.push(image.clone());
        }
        draft.content.save_state();
        draft.content.transform([w, 0.0, 0.0, h, x, y]);
        draft.content.x_object(Name(image.name.as_bytes()));
        draft.content.restore_state();
    }

    /// Single line of text with its baseline starting at `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn text(&mut self, page: usize, x: f32, y: f32, size: f32, font: Font, color: Rgb, text: &str) {
        let Some(draft) = self.pages.get_mut(page) else {
            return;
        };
        let bytes = winansi(text);
        draft
            .content
            .set_fill_rgb(color.0, color.1, color.2)
            .begin_text()
            .set_font(Name(font.resource_name()), size)
            .next_line(x, y)
            .show(Str(&bytes))
            .end_text();
    }

    /// Text whose right edge ends at `right`.
    #[allow(clippy::too_many_arguments)]
    pub fn text_right(&mut self, page: usize, right: f32, y: f32, size: f32, font: Font, color: Rgb, text: &str) {
        let x = right - text_width(text, size, font);
        self.text(page, x, y, size, font, color, text);
    }

    /// Text centered horizontally on `cx`.
    #[allow(clippy::too_many_arguments)]
    pub fn text_centered(&mut self, page: usize, cx: f32, y: f32, size: f32, font: Font, color: Rgb, text: &str) {
        let x = cx - text_width(text, size, font) / 2.0;
        self.text(page, x, y, size, font, color, text);
    }

    pub fn fill_rect(&mut self, page: usize, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        if let Some(draft) = self.pages.get_mut(page) {
            draft
                .content
                .set_fill_rgb(color.0, color.1, color.2)
                .rect(x, y, w, h)
                .fill_nonzero();
        }
    }

    pub fn line(&mut self, page: usize, from: (f32, f32), to: (f32, f32), width: f32, color: Rgb) {
        if let Some(draft) = self.pages.get_mut(page) {
            draft
                .content
                .set_stroke_rgb(color.0, color.1, color.2)
                .set_line_width(width)
                .move_to(from.0, from.1)
                .line_to(to.0, to.1)
                .stroke();
        }
    }

    /// Clickable region on `page` jumping to the top of page `target`.
    pub fn link(&mut self, page: usize, x: f32, y: f32, w: f32, h: f32, target: usize) {
        if let Some(draft) = self.pages.get_mut(page) {
            draft.links.push(LinkRegion {
                rect: Rect::new(x, y, x + w, y + h),
                target,
            });
        }
    }

    /// Number of link regions registered on `page`.
    pub fn link_count(&self, page: usize) -> usize {
        self.pages.get(page).map_or(0, |p| p.links.len())
    }

    /// Link targets registered on `page`, in registration order.
    pub fn link_targets(&self, page: usize) -> Vec<usize> {
        self.pages
            .get(page)
            .map(|p| p.links.iter().map(|l| l.target).collect())
            .unwrap_or_default()
    }

    /// Serialize the document.
    pub fn finish(mut self, title: &str, producer: &str) -> Vec<u8> {
        let page_ids: Vec<Ref> = self.pages.iter().map(|p| p.id).collect();
        let drafts = std::mem::take(&mut self.pages);

        for draft in drafts {
            let content_id = self.alloc();
            let annot_ids: Vec<Ref> = draft
                .links
                .iter()
                .filter_map(|link| {
                    let target = *page_ids.get(link.target)?;
                    let annot_id = self.alloc();
                    let mut annot = self.pdf.annotation(annot_id);
                    annot
                        .subtype(AnnotationType::Link)
                        .rect(link.rect)
                        .border(0.0, 0.0, 0.0, None);
                    annot
                        .action()
                        .action_type(ActionType::GoTo)
                        .destination()
                        .page(target)
                        .xyz(0.0, self.height, None);
                    Some(annot_id)
                })
                .collect();

            self.pdf.stream(content_id, &draft.content.finish());

            let mut page = self.pdf.page(draft.id);
            page.media_box(Rect::new(0.0, 0.0, self.width, self.height))
                .parent(self.pages_id)
                .contents(content_id);
            if !annot_ids.is_empty() {
                page.annotations(annot_ids.iter().copied());
            }
            let mut resources = page.resources();
            {
                let mut fonts = resources.fonts();
                for (font, id) in &self.fonts {
                    fonts.pair(Name(font.resource_name()), *id);
                }
            }
            if !draft.images.is_empty() {
                let mut xobjects = resources.x_objects();
                for image in &draft.images {
                    xobjects.pair(Name(image.name.as_bytes()), image.id);
                }
            }
        }

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(page_ids.iter().copied())
            .count(i32::try_from(page_ids.len()).unwrap_or(i32::MAX));
        let info_id = self.alloc();
        self.pdf
            .document_info(info_id)
            .title(TextStr(title))
            .producer(TextStr(producer));
        self.pdf.finish()
    }
}

fn dim(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
#[path = "pdf_test.rs"]
mod tests;
