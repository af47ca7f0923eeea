//! Multi-plan PDF export.
//!
//! An [`ExportJob`] lists plans in output order. The [`DocumentAssembler`]
//! reserves index pages, renders each plan through
//! [`plan_raster::Rasterizer`] onto its own landscape page with a revision
//! footer, fills the index with clickable entries, numbers every page and
//! writes the file atomically.
//!
//! Layout constants (page size, margins, index spacing, branding) come from
//! [`ExportConfig`], read from TOML.

pub mod compose;
pub mod config;
pub mod document;
pub mod error;
pub mod job;
pub mod metrics;
pub mod pdf;
pub mod toc;

pub use config::{ConfigError, ExportConfig};
pub use document::{
    BuiltDocument, DocumentAssembler, ExportSummary, PlacedPlan, Stage, save_atomic, today,
};
pub use error::ExportError;
pub use job::{ExportEntry, ExportJob};
