use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use plan_raster::{DEFAULT_JPEG_QUALITY, DEFAULT_TARGET_LONG_PX};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FLOORPRINT_CONFIG";

/// Root of the export configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub branding: BrandingConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
}

impl ExportConfig {
    /// Load from an explicit path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `FLOORPRINT_CONFIG` first, then `./config/default.toml`; defaults when
    /// neither exists.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = env::current_dir()
            .map(|dir| dir.join("config").join("default.toml"))
            .map_err(|source| ConfigError::Context {
                message: "cannot read the current working directory".to_string(),
                source,
            })?;

        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// Page geometry in PDF points. Defaults to A4 landscape.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Band at the bottom of plan pages reserved for the revision footer.
    pub footer_height: f32,
    pub footer_font_size: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: 842.0,
            height: 595.0,
            margin: 36.0,
            footer_height: 24.0,
            footer_font_size: 9.0,
        }
    }
}

/// Index (table of contents) layout, in PDF points.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub line_height: f32,
    /// Space kept free for the header card on the first index page.
    pub header_reserve: f32,
    /// Where entries start on index pages after the first.
    pub top_offset: f32,
    pub font_size: f32,
    pub group_font_size: f32,
    pub title_font_size: f32,
    pub logo_size: f32,
    pub group_indent: f32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            line_height: 18.0,
            header_reserve: 120.0,
            top_offset: 24.0,
            font_size: 11.0,
            group_font_size: 12.0,
            title_font_size: 20.0,
            logo_size: 14.0,
            group_indent: 12.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandingConfig {
    #[serde(default = "BrandingConfig::default_product")]
    pub product_name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default = "BrandingConfig::default_title")]
    pub document_title: String,
}

impl BrandingConfig {
    fn default_product() -> String {
        "Floorprint".to_string()
    }

    fn default_title() -> String {
        "Floor plans".to_string()
    }
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            product_name: Self::default_product(),
            logo: None,
            document_title: Self::default_title(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub target_long_pixel: u32,
    pub jpeg_quality: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target_long_pixel: DEFAULT_TARGET_LONG_PX,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    /// Base directory for relative image references.
    #[serde(default)]
    pub asset_root: Option<PathBuf>,
    /// Directory of `<icon>.svg` / `<icon>.png` files.
    #[serde(default)]
    pub icon_dir: Option<PathBuf>,
    #[serde(default)]
    pub font_files: Vec<PathBuf>,
    #[serde(default = "ResourceConfig::default_system_fonts")]
    pub system_fonts: bool,
}

impl ResourceConfig {
    fn default_system_fonts() -> bool {
        true
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            asset_root: None,
            icon_dir: None,
            font_files: Vec::new(),
            system_fonts: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
