//! Best-effort resource loading and the per-build image cache.
//!
//! Every fetch ends in a [`Fetch`] value; a failed read or an undecodable
//! payload is `Fetch::Failed`, never an error. Renderers branch on it and draw
//! a placeholder instead.

use std::cell::Cell;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::error::LoadError;

/// Source of raw resource bytes. Calls are the only suspension points of a build.
#[allow(async_fn_in_trait)]
pub trait ResourceLoader {
    /// Read the bytes behind a caller-supplied reference (path or data URL).
    async fn fetch(&self, source: &str) -> Result<Vec<u8>, LoadError>;

    /// Read the image registered for an icon name.
    async fn fetch_icon(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        Err(LoadError::NoIcon(name.to_string()))
    }
}

/// Loader reading from the local filesystem, with `data:` URL support.
#[derive(Clone, Debug, Default)]
pub struct FsLoader {
    root: Option<PathBuf>,
    icon_dir: Option<PathBuf>,
}

impl FsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory relative references are resolved against.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Directory holding `<name>.svg` / `<name>.png` icon files.
    pub fn with_icon_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.icon_dir = Some(dir.into());
        self
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let path = PathBuf::from(source);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        }
    }
}

impl ResourceLoader for FsLoader {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>, LoadError> {
        if source.starts_with("data:") {
            return decode_data_url(source);
        }
        let source = source.strip_prefix("file://").unwrap_or(source);
        if source.contains("://") {
            return Err(LoadError::Unsupported(source.to_string()));
        }
        let path = self.resolve(source);
        tokio::fs::read(&path).await.map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }

    async fn fetch_icon(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        let Some(dir) = &self.icon_dir else {
            return Err(LoadError::NoIcon(name.to_string()));
        };
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(LoadError::NoIcon(name.to_string()));
        }
        for ext in ["svg", "png"] {
            if let Ok(bytes) = tokio::fs::read(dir.join(format!("{name}.{ext}"))).await {
                return Ok(bytes);
            }
        }
        Err(LoadError::NoIcon(name.to_string()))
    }
}

/// Loader over bytes already held in memory, keyed by reference and icon name.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    sources: HashMap<String, Vec<u8>>,
    icons: HashMap<String, Vec<u8>>,
    fetches: Cell<usize>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, bytes: Vec<u8>) {
        self.sources.insert(source.into(), bytes);
    }

    pub fn insert_icon(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.icons.insert(name.into(), bytes);
    }

    /// Number of fetches served so far, hits and misses alike.
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl ResourceLoader for MemoryLoader {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>, LoadError> {
        self.fetches.set(self.fetches.get() + 1);
        if source.starts_with("data:") {
            return decode_data_url(source);
        }
        self.sources
            .get(source)
            .cloned()
            .ok_or_else(|| LoadError::Unsupported(source.to_string()))
    }

    async fn fetch_icon(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        self.fetches.set(self.fetches.get() + 1);
        self.icons
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::NoIcon(name.to_string()))
    }
}

/// Decode `data:[<mime>][;base64],<payload>`.
pub fn decode_data_url(src: &str) -> Result<Vec<u8>, LoadError> {
    let rest = src.strip_prefix("data:").ok_or(LoadError::DataUrl)?;
    let (meta, payload) = rest.split_once(',').ok_or(LoadError::DataUrl)?;
    if meta.ends_with(";base64") {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        STANDARD.decode(compact).map_err(|_| LoadError::DataUrl)
    } else {
        Ok(percent_encoding::percent_decode_str(payload).collect())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Webp,
    Svg,
}

impl ImageKind {
    pub fn mime(self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Gif => "image/gif",
            ImageKind::Webp => "image/webp",
            ImageKind::Svg => "image/svg+xml",
        }
    }
}

/// Validated image payload in a format the rasterizer can embed.
#[derive(Debug)]
pub struct LoadedImage {
    data: Vec<u8>,
    kind: ImageKind,
    width: u32,
    height: u32,
}

impl LoadedImage {
    /// Sniff and validate raw bytes. Raster formats the rasterizer cannot embed
    /// directly (BMP, ...) are re-encoded as PNG.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        if looks_like_svg(&bytes) {
            let tree = usvg::Tree::from_data(&bytes, &usvg::Options::default()).ok()?;
            let size = tree.size();
            return Some(LoadedImage {
                data: bytes,
                kind: ImageKind::Svg,
                width: dim(size.width()),
                height: dim(size.height()),
            });
        }
        let format = image::guess_format(&bytes).ok()?;
        let decoded = image::load_from_memory_with_format(&bytes, format).ok()?;
        let (width, height) = (decoded.width(), decoded.height());
        if width == 0 || height == 0 {
            return None;
        }
        let (data, kind) = match format {
            image::ImageFormat::Png => (bytes, ImageKind::Png),
            image::ImageFormat::Jpeg => (bytes, ImageKind::Jpeg),
            image::ImageFormat::Gif => (bytes, ImageKind::Gif),
            image::ImageFormat::WebP => (bytes, ImageKind::Webp),
            _ => {
                let mut out = Cursor::new(Vec::new());
                decoded.write_to(&mut out, image::ImageFormat::Png).ok()?;
                (out.into_inner(), ImageKind::Png)
            }
        };
        Some(LoadedImage {
            data,
            kind,
            width,
            height,
        })
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.kind.mime(), STANDARD.encode(&self.data))
    }

    /// Flatten onto white as an RGB bitmap (for formats that cannot carry alpha).
    pub fn to_rgb(&self) -> Option<image::RgbImage> {
        let rgba = match self.kind {
            ImageKind::Svg => {
                let tree = usvg::Tree::from_data(&self.data, &usvg::Options::default()).ok()?;
                let mut pixmap = tiny_skia::Pixmap::new(self.width, self.height)?;
                pixmap.fill(tiny_skia::Color::WHITE);
                resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
                image::RgbaImage::from_raw(self.width, self.height, pixmap.take())?
            }
            _ => image::load_from_memory(&self.data).ok()?.to_rgba8(),
        };
        let mut rgb = image::RgbImage::new(rgba.width(), rgba.height());
        for (dst, src) in rgb.pixels_mut().zip(rgba.pixels()) {
            let a = u16::from(src.0[3]);
            for c in 0..3 {
                let v = (u16::from(src.0[c]) * a + 255 * (255 - a)) / 255;
                dst.0[c] = u8::try_from(v).unwrap_or(u8::MAX);
            }
        }
        Some(rgb)
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let t = text.trim_start_matches('\u{feff}').trim_start();
    t.starts_with('<') && (t.contains("<svg") || t.starts_with("<?xml"))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn dim(v: f32) -> u32 {
    (v.ceil() as u32).max(1)
}

/// Outcome of one fetch.
#[derive(Clone, Debug)]
pub enum Fetch {
    Loaded(Arc<LoadedImage>),
    Failed,
}

impl Fetch {
    pub fn loaded(&self) -> Option<&LoadedImage> {
        match self {
            Fetch::Loaded(img) => Some(img),
            Fetch::Failed => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum CacheKey {
    Source(String),
    Icon(String),
}

/// Memoizes fetch results for exactly one document build. Create one per build
/// and pass it by `&mut`; drop it when the build ends.
#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: HashMap<CacheKey, Fetch>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn image<L: ResourceLoader>(&mut self, loader: &L, source: &str) -> Fetch {
        let key = CacheKey::Source(source.to_string());
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }
        let fetched = settle(loader.fetch(source).await, source);
        self.entries.insert(key, fetched.clone());
        fetched
    }

    pub async fn icon<L: ResourceLoader>(&mut self, loader: &L, name: &str) -> Fetch {
        let key = CacheKey::Icon(name.to_string());
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }
        let fetched = settle(loader.fetch_icon(name).await, name);
        self.entries.insert(key, fetched.clone());
        fetched
    }

    pub fn cached_image(&self, source: &str) -> Option<&Fetch> {
        self.entries.get(&CacheKey::Source(source.to_string()))
    }

    pub fn cached_icon(&self, name: &str) -> Option<&Fetch> {
        self.entries.get(&CacheKey::Icon(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn settle(result: Result<Vec<u8>, LoadError>, what: &str) -> Fetch {
    match result {
        Ok(bytes) => match LoadedImage::from_bytes(bytes) {
            Some(img) => Fetch::Loaded(Arc::new(img)),
            None => {
                debug!(resource = %short(what), "resource is not a decodable image");
                Fetch::Failed
            }
        },
        Err(err) => {
            debug!(resource = %short(what), error = %err, "resource unavailable");
            Fetch::Failed
        }
    }
}

/// Keeps data URLs out of the logs.
fn short(what: &str) -> &str {
    if what.starts_with("data:") {
        what.split_once(',').map_or("data:", |(meta, _)| meta)
    } else {
        what
    }
}

#[cfg(test)]
#[path = "resources_test.rs"]
mod tests;
