use thiserror::Error;

/// Fatal render failures. Missing images and degenerate entities are not
/// errors; they degrade to placeholders or are skipped.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} drawing surface")]
    SurfaceAllocation { width: u32, height: u32 },
    #[error("scene document rejected by the SVG parser: {0}")]
    Svg(#[from] usvg::Error),
    #[error("jpeg encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// Why a single resource could not be read. Logged, never propagated.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data URL")]
    DataUrl,
    #[error("unsupported resource reference: {0}")]
    Unsupported(String),
    #[error("no icon named {0}")]
    NoIcon(String),
}
