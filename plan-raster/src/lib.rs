//! Floor-plan rasterizer.
//!
//! A plan snapshot becomes an ordered [`Scene`], the scene is drawn onto an SVG
//! [`Surface`] in output pixel space, and resvg turns the document into pixels
//! that are encoded as JPEG (or PNG).
//!
//! ```text
//! FloorPlan ─▶ Scene::build ─▶ render::draw_entity* ─▶ Surface::finish
//!                                                          │
//!              RasterImage ◀─ encode ◀─ resvg::render ◀────┘
//! ```
//!
//! Resource reads go through a [`ResourceLoader`] and are memoized in a
//! [`ResourceCache`] that the caller creates per build.

pub mod consts;
pub mod error;
pub mod fonts;
pub mod options;
pub mod raster;
pub mod render;
pub mod resources;
pub mod scene;
pub mod surface;

pub use error::{LoadError, RenderError};
pub use fonts::font_database;
pub use options::{
    Categories, DEFAULT_JPEG_QUALITY, DEFAULT_TARGET_LONG_PX, EncodeFormat, IconLookup,
    RenderOptions,
};
pub use raster::{RasterImage, Rasterizer};
pub use resources::{
    Fetch, FsLoader, ImageKind, LoadedImage, MemoryLoader, ResourceCache, ResourceLoader,
};
pub use scene::{Entity, Layer, Scene};
pub use surface::Surface;
