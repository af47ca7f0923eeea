use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_LONG_PX: u32 = 2600;
pub const DEFAULT_JPEG_QUALITY: f32 = 0.85;
pub const MIN_JPEG_QUALITY: f32 = 0.5;
pub const MAX_JPEG_QUALITY: f32 = 0.95;

/// Marker type id → icon name.
pub type IconLookup = HashMap<String, String>;

/// Which entity categories end up in the raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Categories {
    pub include_objects: bool,
    pub include_desks: bool,
    pub include_safety: bool,
    pub include_links: bool,
    pub include_rooms: bool,
    pub include_walls: bool,
    pub include_quotes: bool,
    pub include_scale: bool,
}

impl Default for Categories {
    fn default() -> Self {
        Categories {
            include_objects: true,
            include_desks: true,
            include_safety: true,
            include_links: true,
            include_rooms: true,
            include_walls: true,
            include_quotes: true,
            include_scale: true,
        }
    }
}

impl Categories {
    pub fn none() -> Self {
        Categories {
            include_objects: false,
            include_desks: false,
            include_safety: false,
            include_links: false,
            include_rooms: false,
            include_walls: false,
            include_quotes: false,
            include_scale: false,
        }
    }

    /// Human-readable names of the enabled categories, in draw order.
    pub fn summary(&self) -> Vec<&'static str> {
        [
            (self.include_rooms, "Rooms"),
            (self.include_walls, "Walls"),
            (self.include_quotes, "Dimensions"),
            (self.include_links, "Links"),
            (self.include_objects, "Objects"),
            (self.include_desks, "Desks"),
            (self.include_safety, "Safety"),
            (self.include_scale, "Scale"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeFormat {
    #[default]
    Jpeg,
    Png,
}

impl EncodeFormat {
    pub fn mime(self) -> &'static str {
        match self {
            EncodeFormat::Jpeg => "image/jpeg",
            EncodeFormat::Png => "image/png",
        }
    }
}

/// Options for a single plan render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    pub target_long_pixel: u32,
    pub jpeg_quality: f32,
    pub format: EncodeFormat,
    #[serde(flatten)]
    pub categories: Categories,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            target_long_pixel: DEFAULT_TARGET_LONG_PX,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            format: EncodeFormat::Jpeg,
            categories: Categories::default(),
        }
    }
}

impl RenderOptions {
    /// Quality clamped into the supported range, as the 1..=100 scale JPEG encoders use.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn jpeg_quality_percent(&self) -> u8 {
        let q = if self.jpeg_quality.is_finite() {
            self.jpeg_quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
        } else {
            DEFAULT_JPEG_QUALITY
        };
        (q * 100.0).round() as u8
    }
}
