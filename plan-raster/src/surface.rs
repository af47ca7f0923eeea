//! SVG drawing surface.
//!
//! Entity renderers append primitives here in draw order; the rasterizer turns
//! the finished document into pixels. Coordinates are output pixels. Numbers
//! are written with fixed precision so identical scenes produce identical
//! documents.

use std::collections::HashMap;
use std::fmt::Write as _;

use plan_core::Point;

use crate::consts::{AVG_CHAR_EM, FONT_FAMILY, LINE_HEIGHT_EM};

/// Stroke style for paths and shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub dash: Option<[f64; 2]>,
    pub round: bool,
}

impl Stroke {
    pub fn solid(color: &str, width: f64) -> Self {
        Stroke {
            color: color.to_string(),
            width,
            dash: None,
            round: false,
        }
    }

    pub fn dashed(mut self, dash: [f64; 2]) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    fn attrs(&self) -> String {
        let mut s = format!(
            " stroke=\"{}\" stroke-width=\"{:.2}\"",
            svg_escape(&self.color),
            self.width
        );
        if let Some([on, off]) = self.dash {
            let _ = write!(s, " stroke-dasharray=\"{on:.2} {off:.2}\"");
        }
        if self.round {
            s.push_str(" stroke-linecap=\"round\" stroke-linejoin=\"round\"");
        }
        s
    }
}

/// Group placement: `translate(center) scale(sx, sy) rotate(rotation)`, so local
/// geometry is rotated first and then stretched into pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub center: Point,
    pub rotation: f64,
    pub sx: f64,
    pub sy: f64,
}

impl Placement {
    fn attr(&self) -> String {
        format!(
            " transform=\"translate({:.2} {:.2}) scale({:.4} {:.4}) rotate({:.2})\"",
            self.center.x, self.center.y, self.sx, self.sy, self.rotation
        )
    }

    /// Stroke width in local units that comes out as `px` on the surface.
    pub fn local_len(&self, px: f64) -> f64 {
        let k = (self.sx.abs() + self.sy.abs()) / 2.0;
        if k > 0.0 { px / k } else { px }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: String,
    pub family: Option<String>,
    pub bold: bool,
    pub anchor: Anchor,
}

impl TextStyle {
    pub fn centered(size: f64, color: &str) -> Self {
        TextStyle {
            size,
            color: color.to_string(),
            family: None,
            bold: false,
            anchor: Anchor::Middle,
        }
    }
}

/// Estimated advance width of `text`; there is no shaping before rasterization.
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * AVG_CHAR_EM
}

pub struct Surface {
    width: u32,
    height: u32,
    body: String,
    depth: usize,
    defs: String,
    shared: HashMap<String, String>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Surface {
            width,
            height,
            body: String::new(),
            depth: 0,
            defs: String::new(),
            shared: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn begin_group(&mut self, placement: Option<&Placement>, opacity: f64) {
        self.body.push_str("<g");
        if let Some(p) = placement {
            self.body.push_str(&p.attr());
        }
        if opacity < 1.0 {
            let _ = write!(self.body, " opacity=\"{opacity:.3}\"");
        }
        self.body.push_str(">\n");
        self.depth += 1;
    }

    pub fn end_group(&mut self) {
        if self.depth > 0 {
            self.body.push_str("</g>\n");
            self.depth -= 1;
        }
    }

    /// Open or closed path through `pts`.
    pub fn path(&mut self, pts: &[Point], closed: bool, stroke: Option<&Stroke>, fill: Option<&str>) {
        if pts.is_empty() {
            return;
        }
        let mut d = format!("M {:.2} {:.2}", pts[0].x, pts[0].y);
        for p in &pts[1..] {
            let _ = write!(d, " L {:.2} {:.2}", p.x, p.y);
        }
        if closed {
            d.push_str(" Z");
        }
        let _ = writeln!(
            self.body,
            "<path d=\"{d}\"{}{}/>",
            fill_attr(fill),
            stroke.map(Stroke::attrs).unwrap_or_default()
        );
    }

    pub fn circle(&mut self, center: Point, r: f64, fill: Option<&str>, stroke: Option<&Stroke>) {
        let _ = writeln!(
            self.body,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"{}{}/>",
            center.x,
            center.y,
            r,
            fill_attr(fill),
            stroke.map(Stroke::attrs).unwrap_or_default()
        );
    }

    pub fn ellipse(&mut self, center: Point, rx: f64, ry: f64, fill: Option<&str>, stroke: Option<&Stroke>) {
        let _ = writeln!(
            self.body,
            "<ellipse cx=\"{:.2}\" cy=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\"{}{}/>",
            center.x,
            center.y,
            rx,
            ry,
            fill_attr(fill),
            stroke.map(Stroke::attrs).unwrap_or_default()
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        fill: Option<&str>,
        stroke: Option<&Stroke>,
    ) {
        let _ = writeln!(
            self.body,
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" rx=\"{radius:.2}\"{}{}/>",
            fill_attr(fill),
            stroke.map(Stroke::attrs).unwrap_or_default()
        );
    }

    /// Rounded box centered on `center`, sized to fit `lines` at `size`.
    pub fn pill(&mut self, center: Point, lines: &[&str], size: f64, pad: f64, fill: &str) {
        let widest = lines.iter().map(|l| text_width(l, size)).fold(0.0, f64::max);
        let w = widest + pad * 2.0;
        let h = lines.len().max(1) as f64 * size * LINE_HEIGHT_EM + pad * 2.0;
        let r = (h / 2.0).min(size);
        self.rect(center.x - w / 2.0, center.y - h / 2.0, w, h, r, Some(fill), None);
    }

    /// Lines of text centered vertically as a block on `pos`.
    pub fn text(&mut self, pos: Point, lines: &[&str], style: &TextStyle) {
        if lines.is_empty() {
            return;
        }
        let line_h = style.size * LINE_HEIGHT_EM;
        let top = pos.y - line_h * (lines.len() - 1) as f64 / 2.0;
        let family = style.family.as_deref().unwrap_or(FONT_FAMILY);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let _ = writeln!(
                self.body,
                "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{:.2}\"{} fill=\"{}\" text-anchor=\"{}\" dominant-baseline=\"central\">{}</text>",
                pos.x,
                top + line_h * i as f64,
                svg_escape(family),
                style.size,
                if style.bold { " font-weight=\"bold\"" } else { "" },
                svg_escape(&style.color),
                style.anchor.as_str(),
                svg_escape(line)
            );
        }
    }

    pub fn image(&mut self, x: f64, y: f64, w: f64, h: f64, href: &str) {
        let _ = writeln!(
            self.body,
            "<image x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" preserveAspectRatio=\"none\" xlink:href=\"{}\"/>",
            svg_escape(href)
        );
    }

    /// Image drawn through a `<use>` of a `<defs>` entry, so a picture placed
    /// many times at one size is embedded once. `key` names the picture;
    /// `href` is only called the first time a key is seen at that size.
    pub fn shared_image(
        &mut self,
        key: &str,
        (x, y, w, h): (f64, f64, f64, f64),
        href: impl FnOnce() -> String,
    ) {
        let slot = format!("{key}@{w:.2}x{h:.2}");
        let next = self.shared.len();
        let id = match self.shared.get(&slot) {
            Some(id) => id.clone(),
            None => {
                let id = format!("img{next}");
                let _ = writeln!(
                    self.defs,
                    "<image id=\"{id}\" width=\"{w:.2}\" height=\"{h:.2}\" preserveAspectRatio=\"none\" xlink:href=\"{}\"/>",
                    svg_escape(&href())
                );
                self.shared.insert(slot, id.clone());
                id
            }
        };
        let _ = writeln!(self.body, "<use xlink:href=\"#{id}\" x=\"{x:.2}\" y=\"{y:.2}\"/>");
    }

    /// Close any open groups and wrap the body in an `<svg>` root.
    pub fn finish(mut self) -> String {
        while self.depth > 0 {
            self.end_group();
        }
        let mut s = String::with_capacity(self.defs.len() + self.body.len() + 256);
        s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            s,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{0}\" height=\"{1}\" viewBox=\"0 0 {0} {1}\" fill=\"none\">",
            self.width, self.height
        );
        if !self.defs.is_empty() {
            s.push_str("<defs>\n");
            s.push_str(&self.defs);
            s.push_str("</defs>\n");
        }
        s.push_str(&self.body);
        s.push_str("</svg>\n");
        s
    }
}

fn fill_attr(fill: Option<&str>) -> String {
    match fill {
        Some(f) => format!(" fill=\"{}\"", svg_escape(f)),
        None => " fill=\"none\"".to_string(),
    }
}

pub fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[path = "surface_test.rs"]
mod tests;
