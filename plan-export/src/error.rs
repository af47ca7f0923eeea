use std::path::PathBuf;

use plan_raster::RenderError;
use thiserror::Error;

/// Structural failures that abort a document build. No partial document is
/// written when one of these is returned.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no floor plans selected for export")]
    EmptySelection,
    #[error("rendering {breadcrumb:?}: {source}")]
    Render {
        breadcrumb: String,
        #[source]
        source: RenderError,
    },
    #[error("writing {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("reading export job: {0}")]
    Job(#[from] serde_json::Error),
}
