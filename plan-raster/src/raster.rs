//! Rasterizer: plan snapshot in, encoded raster out.
//!
//! One call owns one drawing surface. Resources are fetched up front through
//! the build's [`ResourceCache`]; after that the scene is drawn synchronously
//! and handed to resvg.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use plan_core::{FloorPlan, PixelTransform};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use tracing::debug;
use usvg::fontdb::Database;

use crate::error::RenderError;
use crate::options::{EncodeFormat, IconLookup, RenderOptions};
use crate::render::{DrawContext, draw_entity};
use crate::resources::{Fetch, ResourceCache, ResourceLoader};
use crate::scene::{Entity, Scene};
use crate::surface::Surface;

/// Encoded raster of one plan.
#[derive(Clone, Debug)]
pub struct RasterImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    format: EncodeFormat,
}

impl RasterImage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> EncodeFormat {
        self.format
    }

    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime(),
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Renders plans against a shared font database.
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<Database>,
}

impl Rasterizer {
    pub fn new(fontdb: Arc<Database>) -> Self {
        Rasterizer { fontdb }
    }

    pub async fn render<L: ResourceLoader>(
        &self,
        plan: &FloorPlan,
        options: &RenderOptions,
        icons: &IconLookup,
        loader: &L,
        cache: &mut ResourceCache,
    ) -> Result<RasterImage, RenderError> {
        let scene = Scene::build(plan, &options.categories);
        prefetch(plan, &scene, icons, loader, cache).await;

        let svg = self.compose(plan, &scene, options, icons, cache);
        let transform = &svg.transform;
        let (width, height) = (transform.width_px(), transform.height_px());

        let mut opt = usvg::Options::default();
        opt.fontdb = Arc::clone(&self.fontdb);
        let tree = usvg::Tree::from_str(&svg.document, &opt)?;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(RenderError::SurfaceAllocation { width, height })?;
        pixmap.fill(tiny_skia::Color::WHITE);
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        let bytes = match options.format {
            EncodeFormat::Jpeg => encode_jpeg(&pixmap, options.jpeg_quality_percent())?,
            EncodeFormat::Png => encode_png_deterministic(&pixmap)?,
        };
        debug!(
            plan = %plan.id,
            width,
            height,
            entities = scene.len(),
            bytes = bytes.len(),
            "plan rasterized"
        );
        Ok(RasterImage {
            bytes,
            width,
            height,
            format: options.format,
        })
    }

    /// Scene document for a plan whose resources are already in `cache`.
    pub fn compose_svg(
        &self,
        plan: &FloorPlan,
        options: &RenderOptions,
        icons: &IconLookup,
        cache: &ResourceCache,
    ) -> String {
        let scene = Scene::build(plan, &options.categories);
        self.compose(plan, &scene, options, icons, cache).document
    }

    fn compose(
        &self,
        plan: &FloorPlan,
        scene: &Scene<'_>,
        options: &RenderOptions,
        icons: &IconLookup,
        cache: &ResourceCache,
    ) -> ComposedSvg {
        let background = plan
            .background
            .as_deref()
            .and_then(|src| cache.cached_image(src))
            .and_then(Fetch::loaded);
        let natural = background.map(|img| (img.width(), img.height()));
        let transform = PixelTransform::for_plan(plan, natural, options.target_long_pixel);

        let mut surface = Surface::new(transform.width_px(), transform.height_px());
        if let (Some(img), Some(natural)) = (background, natural) {
            let (x, y, w, h) = transform.background_rect(natural);
            surface.image(x, y, w, h, &img.data_url());
        }
        let ctx = DrawContext {
            transform: &transform,
            cache,
            icons,
            meters_per_unit: plan.meters_per_unit(),
        };
        for entity in scene.items() {
            draw_entity(&mut surface, &ctx, entity);
        }
        ComposedSvg {
            document: surface.finish(),
            transform,
        }
    }
}

struct ComposedSvg {
    document: String,
    transform: PixelTransform,
}

/// Fetch everything the scene will draw. Failures land in the cache as
/// `Fetch::Failed` and surface later as placeholders.
async fn prefetch<L: ResourceLoader>(
    plan: &FloorPlan,
    scene: &Scene<'_>,
    icons: &IconLookup,
    loader: &L,
    cache: &mut ResourceCache,
) {
    if let Some(src) = plan.background.as_deref() {
        cache.image(loader, src).await;
    }
    for entity in scene.items() {
        match entity {
            Entity::Image(_, img) => {
                cache.image(loader, &img.src).await;
            }
            Entity::Marker(_, marker) => {
                if let Some(name) = icons.get(&marker.type_id) {
                    cache.icon(loader, name).await;
                }
            }
            _ => {}
        }
    }
}

fn encode_jpeg(pixmap: &tiny_skia::Pixmap, quality: u8) -> Result<Vec<u8>, RenderError> {
    // The surface is opaque, so premultiplied and straight RGB agree.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality).encode(
        &rgb,
        pixmap.width(),
        pixmap.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

fn encode_png_deterministic(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    let mut enc = Encoder::new(&mut buf, pixmap.width(), pixmap.height());
    enc.set_color(ColorType::Rgba);
    enc.set_depth(BitDepth::Eight);
    enc.set_filter(FilterType::NoFilter);
    enc.set_compression(Compression::Default);
    {
        let mut writer = enc.write_header()?;
        writer.write_image_data(pixmap.data())?;
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "raster_test.rs"]
mod tests;
