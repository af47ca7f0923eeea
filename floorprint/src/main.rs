use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use plan_core::FloorPlan;
use plan_export::{ConfigError, DocumentAssembler, ExportConfig, ExportError, ExportJob};
use plan_raster::{
    EncodeFormat, FsLoader, IconLookup, Rasterizer, RenderError, RenderOptions, ResourceCache,
    font_database,
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("writing {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON input: {0}")]
    Plan(#[from] serde_json::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("cannot start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "floorprint", about = "Render floor plans to images and PDF documents")]
struct Cli {
    /// TOML configuration file; otherwise FLOORPRINT_CONFIG or ./config/default.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one plan to a JPEG or PNG file.
    Render {
        plan: PathBuf,
        /// Output path; a `.png` extension selects PNG.
        output: PathBuf,
        /// Long side of the output in pixels.
        target_long_pixel: Option<u32>,
        /// JPEG quality in [0, 1].
        quality: Option<f32>,
        /// JSON object mapping marker type ids to icon names.
        #[arg(long)]
        icons: Option<PathBuf>,
    },
    /// Assemble a multi-plan PDF from an export job.
    Export { job: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, config_err) = match load_configuration(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (ExportConfig::default(), Some(err)),
    };
    init_logging(&config);
    if let Some(err) = config_err {
        if cli.config.is_some() {
            error!(error = %err, "configuration not loaded");
            return ExitCode::FAILURE;
        }
        warn!(error = %err, "configuration not loaded, using defaults");
    }

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "floorprint failed");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: ExportConfig) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(async move {
        match command {
            Command::Render {
                plan,
                output,
                target_long_pixel,
                quality,
                icons,
            } => render(&config, &plan, &output, target_long_pixel, quality, icons.as_deref()).await,
            Command::Export { job } => export(config, &job).await,
        }
    })
}

async fn render(
    config: &ExportConfig,
    plan_path: &Path,
    output: &Path,
    target_long_pixel: Option<u32>,
    quality: Option<f32>,
    icons: Option<&Path>,
) -> Result<(), CliError> {
    let plan: FloorPlan = serde_json::from_str(&read_text(plan_path).await?)?;
    let icons: IconLookup = match icons {
        Some(path) => serde_json::from_str(&read_text(path).await?)?,
        None => IconLookup::default(),
    };
    let options = RenderOptions {
        target_long_pixel: target_long_pixel.unwrap_or(config.render.target_long_pixel),
        jpeg_quality: quality.unwrap_or(config.render.jpeg_quality),
        format: format_for(output),
        ..RenderOptions::default()
    };

    let rasterizer = rasterizer(config);
    let mut cache = ResourceCache::new();
    let image = rasterizer
        .render(&plan, &options, &icons, &loader(config), &mut cache)
        .await?;
    tokio::fs::write(output, image.bytes())
        .await
        .map_err(|source| CliError::Write {
            path: output.to_path_buf(),
            source,
        })?;
    info!(
        path = %output.display(),
        width = image.width(),
        height = image.height(),
        "plan rendered"
    );
    Ok(())
}

async fn export(config: ExportConfig, job_path: &Path) -> Result<(), CliError> {
    let job = ExportJob::from_json(&read_text(job_path).await?)?;
    let loader = loader(&config);
    let rasterizer = rasterizer(&config);
    let assembler = DocumentAssembler::new(config, rasterizer);
    let summary = assembler.export(&job, &loader).await?;
    info!(
        path = %summary.path.display(),
        pages = summary.page_count,
        index_pages = summary.index_pages,
        "export finished"
    );
    Ok(())
}

fn load_configuration(path: Option<&Path>) -> Result<ExportConfig, ConfigError> {
    match path {
        Some(path) => ExportConfig::from_file(path),
        None => ExportConfig::discover(),
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(config: &ExportConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

fn rasterizer(config: &ExportConfig) -> Rasterizer {
    let resources = &config.resources;
    Rasterizer::new(font_database(&resources.font_files, resources.system_fonts))
}

fn loader(config: &ExportConfig) -> FsLoader {
    let mut loader = FsLoader::new();
    if let Some(root) = &config.resources.asset_root {
        loader = loader.with_root(root);
    }
    if let Some(dir) = &config.resources.icon_dir {
        loader = loader.with_icon_dir(dir);
    }
    loader
}

fn format_for(output: &Path) -> EncodeFormat {
    match output.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => EncodeFormat::Png,
        _ => EncodeFormat::Jpeg,
    }
}

async fn read_text(path: &Path) -> Result<String, CliError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
