use std::path::PathBuf;

use chrono::NaiveDate;
use plan_core::FloorPlan;
use plan_raster::{Categories, IconLookup};
use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// One plan selected for the document, in output order.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEntry {
    /// Label shown in the index, e.g. `"HQ / Floor 2"`.
    pub breadcrumb: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_logo_url: Option<String>,
    pub plan: FloorPlan,
}

/// Multi-plan export request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    pub output: PathBuf,
    #[serde(default)]
    pub include_index: bool,
    #[serde(flatten)]
    pub categories: Categories,
    /// Overrides the configured render target.
    #[serde(default)]
    pub target_long_pixel: Option<u32>,
    #[serde(default)]
    pub jpeg_quality: Option<f32>,
    #[serde(default)]
    pub icons: IconLookup,
    #[serde(default)]
    pub title: Option<String>,
    /// Date printed in the index header and on pages without revisions.
    /// Today when absent.
    #[serde(default)]
    pub generated_on: Option<NaiveDate>,
    pub entries: Vec<ExportEntry>,
}

impl ExportJob {
    pub fn from_json(text: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(text)?)
    }
}
