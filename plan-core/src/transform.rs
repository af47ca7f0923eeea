//! World-to-pixel conversion.
//!
//! A plan is authored in world units (`0..width`, `0..height`). Its background
//! image has its own natural pixel size, so one world unit covers
//! `natural / logical` background pixels per axis. The export then picks an
//! output scale so the long side of the (cropped) region hits the requested
//! pixel count:
//!
//! ```text
//! px = (world - crop_origin) * scale * out_scale
//! ```

use crate::geom::Point;
use crate::model::{FloorPlan, PrintArea};

pub const MIN_TARGET_LONG_PX: u32 = 900;
pub const MAX_TARGET_LONG_PX: u32 = 5200;

/// Smallest crop extent in world units.
const MIN_CROP_EXTENT: f64 = 1.0;

/// Clamp a requested long-side pixel count into the supported range.
pub fn clamp_target_long(px: u32) -> u32 {
    px.clamp(MIN_TARGET_LONG_PX, MAX_TARGET_LONG_PX)
}

/// Crop rectangle in world units, always inside plan bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Clamp an optional print area into `[0, plan_w] × [0, plan_h]`. Without a
    /// print area the whole plan is used.
    pub fn clamped(area: Option<&PrintArea>, plan_w: f64, plan_h: f64) -> Self {
        let plan_w = sane_extent(plan_w);
        let plan_h = sane_extent(plan_h);
        let Some(a) = area else {
            return CropRect {
                x: 0.0,
                y: 0.0,
                width: plan_w,
                height: plan_h,
            };
        };
        let (x, width) = clamp_axis(a.x, a.width, plan_w);
        let (y, height) = clamp_axis(a.y, a.height, plan_h);
        CropRect {
            x,
            y,
            width,
            height,
        }
    }
}

fn sane_extent(v: f64) -> f64 {
    if v.is_finite() { v.max(MIN_CROP_EXTENT) } else { MIN_CROP_EXTENT }
}

fn clamp_axis(start: f64, len: f64, bound: f64) -> (f64, f64) {
    let start = if start.is_finite() { start } else { 0.0 };
    let len = if len.is_finite() { len } else { bound };
    let start = start.clamp(0.0, (bound - MIN_CROP_EXTENT).max(0.0));
    let len = len.min(bound - start).max(MIN_CROP_EXTENT);
    (start, len)
}

/// Resolved world-to-pixel mapping for one plan render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelTransform {
    crop: CropRect,
    scale_x: f64,
    scale_y: f64,
    out_scale: f64,
    width_px: u32,
    height_px: u32,
}

impl PixelTransform {
    /// Build the mapping from the plan's logical size, the background's natural
    /// pixel size (when one was loaded) and the target long side.
    pub fn new(
        logical: (f64, f64),
        natural: Option<(u32, u32)>,
        print_area: Option<&PrintArea>,
        target_long_px: u32,
    ) -> Self {
        let logical_w = sane_extent(logical.0);
        let logical_h = sane_extent(logical.1);
        let (scale_x, scale_y) = match natural {
            Some((nw, nh)) if nw > 0 && nh > 0 => (f64::from(nw) / logical_w, f64::from(nh) / logical_h),
            _ => (1.0, 1.0),
        };
        let crop = CropRect::clamped(print_area, logical_w, logical_h);
        let crop_w_px = crop.width * scale_x;
        let crop_h_px = crop.height * scale_y;
        let target = f64::from(clamp_target_long(target_long_px));
        let out_scale = target / crop_w_px.max(crop_h_px);
        PixelTransform {
            crop,
            scale_x,
            scale_y,
            out_scale,
            width_px: round_px(crop_w_px * out_scale),
            height_px: round_px(crop_h_px * out_scale),
        }
    }

    pub fn for_plan(plan: &FloorPlan, natural: Option<(u32, u32)>, target_long_px: u32) -> Self {
        Self::new(
            (plan.width, plan.height),
            natural,
            plan.print_area.as_ref(),
            target_long_px,
        )
    }

    pub fn crop(&self) -> CropRect {
        self.crop
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    pub fn out_scale(&self) -> f64 {
        self.out_scale
    }

    /// Pixels per world unit along x.
    pub fn kx(&self) -> f64 {
        self.scale_x * self.out_scale
    }

    /// Pixels per world unit along y.
    pub fn ky(&self) -> f64 {
        self.scale_y * self.out_scale
    }

    /// Combined factor for isotropic quantities (stroke widths, dash lengths, font sizes).
    pub fn unit(&self) -> f64 {
        (self.kx() + self.ky()) / 2.0
    }

    pub fn to_px(&self, p: Point) -> Point {
        Point {
            x: (p.x - self.crop.x) * self.kx(),
            y: (p.y - self.crop.y) * self.ky(),
        }
    }

    pub fn len_px(&self, world: f64) -> f64 {
        world * self.unit()
    }

    /// Placement `(x, y, w, h)` in output pixels of a background image whose
    /// natural size covers the whole plan.
    pub fn background_rect(&self, natural: (u32, u32)) -> (f64, f64, f64, f64) {
        let origin = self.to_px(Point::new(0.0, 0.0));
        (
            origin.x,
            origin.y,
            f64::from(natural.0) * self.out_scale,
            f64::from(natural.1) * self.out_scale,
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_px(v: f64) -> u32 {
    (v.round() as u32).max(1)
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
