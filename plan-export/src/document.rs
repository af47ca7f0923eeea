//! Document assembler.
//!
//! A build walks a fixed sequence of stages and never goes back:
//!
//! ```text
//! Init → ReserveIndexPages → RenderPage* → FillIndexPages → StampPageCounters → Save
//! ```
//!
//! Plans are rendered one at a time; each raster is embedded and dropped
//! before the next plan starts. Any render failure aborts the build and
//! nothing is written.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use plan_core::RevisionStamp;
use plan_raster::{
    EncodeFormat, Fetch, LoadedImage, Rasterizer, RenderOptions, ResourceCache,
    ResourceLoader,
};
use tracing::{debug, info, warn};

use crate::compose::{compose_plan_page, stamp_page_counters};
use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::job::ExportJob;
use crate::pdf::PdfBuilder;
use crate::toc::{IndexHeader, Logo, TocEntry, draw_index, index_page_count, lines_per_page, toc_rows};

const PRODUCER: &str = concat!("floorprint ", env!("CARGO_PKG_VERSION"));
/// JPEG quality for re-encoded logos.
const LOGO_QUALITY: u8 = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    ReserveIndexPages,
    RenderPages,
    FillIndexPages,
    StampPageCounters,
    Save,
}

/// Where each plan landed in the finished document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedPlan {
    pub breadcrumb: String,
    /// One-based physical page number.
    pub page_number: usize,
}

#[derive(Debug)]
pub struct BuiltDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub index_pages: usize,
    pub placed: Vec<PlacedPlan>,
}

#[derive(Debug)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub page_count: usize,
    pub index_pages: usize,
    pub placed: Vec<PlacedPlan>,
}

/// Builds multi-plan PDF documents.
pub struct DocumentAssembler {
    config: ExportConfig,
    rasterizer: Rasterizer,
}

impl DocumentAssembler {
    pub fn new(config: ExportConfig, rasterizer: Rasterizer) -> Self {
        DocumentAssembler { config, rasterizer }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Build the document and write it to `job.output`.
    pub async fn export<L: ResourceLoader>(
        &self,
        job: &ExportJob,
        loader: &L,
    ) -> Result<ExportSummary, ExportError> {
        let built = self.build(job, loader).await?;
        save_atomic(&job.output, &built.bytes)?;
        info!(
            path = %job.output.display(),
            pages = built.page_count,
            bytes = built.bytes.len(),
            "document saved"
        );
        Ok(ExportSummary {
            path: job.output.clone(),
            page_count: built.page_count,
            index_pages: built.index_pages,
            placed: built.placed,
        })
    }

    /// Run every stage and return the serialized document without writing it.
    pub async fn build<L: ResourceLoader>(
        &self,
        job: &ExportJob,
        loader: &L,
    ) -> Result<BuiltDocument, ExportError> {
        if job.entries.is_empty() {
            return Err(ExportError::EmptySelection);
        }
        let mut build = Build::new(&self.config);
        // One cache per build, dropped with it.
        let mut cache = ResourceCache::new();
        let generated_on = job.generated_on.unwrap_or_else(today);
        let page = &self.config.page;
        let index_cfg = &self.config.index;

        build.enter(Stage::ReserveIndexPages);
        let index_pages: Vec<usize> = if job.include_index {
            let names: Vec<Option<&str>> =
                job.entries.iter().map(|e| e.client_name.as_deref()).collect();
            let rows = toc_rows(&names).len();
            let count = index_page_count(rows, lines_per_page(page, index_cfg));
            (0..count).map(|_| build.pdf.add_page()).collect()
        } else {
            Vec::new()
        };
        debug!(index_pages = index_pages.len(), "index pages reserved");

        build.enter(Stage::RenderPages);
        let options = self.render_options(job);
        let mut placed = Vec::with_capacity(job.entries.len());
        let mut toc = Vec::with_capacity(job.entries.len());
        for entry in &job.entries {
            let raster = self
                .rasterizer
                .render(&entry.plan, &options, &job.icons, loader, &mut cache)
                .await
                .map_err(|source| ExportError::Render {
                    breadcrumb: entry.breadcrumb.clone(),
                    source,
                })?;
            let stamp = RevisionStamp::for_plan(&entry.plan);
            let page_index =
                compose_plan_page(&mut build.pdf, page, &raster, stamp.as_ref(), generated_on);
            debug!(
                breadcrumb = %entry.breadcrumb,
                page = page_index + 1,
                width = raster.width(),
                height = raster.height(),
                "plan page composed"
            );
            drop(raster);

            let client_logo = match (&entry.client_logo_url, job.include_index) {
                (Some(src), true) => build.logo(&mut cache, loader, src).await,
                _ => None,
            };
            placed.push(PlacedPlan {
                breadcrumb: entry.breadcrumb.clone(),
                page_number: page_index + 1,
            });
            toc.push(TocEntry {
                breadcrumb: entry.breadcrumb.clone(),
                client_name: entry.client_name.clone(),
                client_logo,
                target_page: page_index,
            });
        }

        build.enter(Stage::FillIndexPages);
        if !index_pages.is_empty() {
            let logo = match &self.config.branding.logo {
                Some(src) => build.logo(&mut cache, loader, src).await,
                None => None,
            };
            let header = IndexHeader {
                product_name: self.config.branding.product_name.clone(),
                title: self.title(job).to_string(),
                generated_on,
                categories: job.categories.summary(),
                logo,
            };
            draw_index(&mut build.pdf, &index_pages, &toc, &header, page, index_cfg);
        }

        build.enter(Stage::StampPageCounters);
        stamp_page_counters(&mut build.pdf, page);

        build.enter(Stage::Save);
        let page_count = build.pdf.page_count();
        let bytes = build.pdf.finish(self.title(job), PRODUCER);
        Ok(BuiltDocument {
            bytes,
            page_count,
            index_pages: index_pages.len(),
            placed,
        })
    }

    fn render_options(&self, job: &ExportJob) -> RenderOptions {
        RenderOptions {
            target_long_pixel: job
                .target_long_pixel
                .unwrap_or(self.config.render.target_long_pixel),
            jpeg_quality: job.jpeg_quality.unwrap_or(self.config.render.jpeg_quality),
            // Pages embed the JPEG stream directly.
            format: EncodeFormat::Jpeg,
            categories: job.categories,
        }
    }

    fn title<'a>(&'a self, job: &'a ExportJob) -> &'a str {
        job.title
            .as_deref()
            .unwrap_or(&self.config.branding.document_title)
    }
}

/// Per-build state: the document under construction, the current stage and
/// the logos already embedded, keyed by source.
struct Build {
    stage: Stage,
    pdf: PdfBuilder,
    logos: HashMap<String, Option<Logo>>,
}

impl Build {
    fn new(config: &ExportConfig) -> Self {
        Build {
            stage: Stage::Init,
            pdf: PdfBuilder::new(config.page.width, config.page.height),
            logos: HashMap::new(),
        }
    }

    /// Embedded logo for `src`; each source is embedded at most once.
    async fn logo<L: ResourceLoader>(
        &mut self,
        cache: &mut ResourceCache,
        loader: &L,
        src: &str,
    ) -> Option<Logo> {
        if let Some(logo) = self.logos.get(src) {
            return logo.clone();
        }
        let logo = load_logo(&mut self.pdf, cache, loader, src).await;
        self.logos.insert(src.to_string(), logo.clone());
        logo
    }

    fn enter(&mut self, next: Stage) {
        debug_assert!(next > self.stage, "stage {next:?} after {:?}", self.stage);
        debug!(from = ?self.stage, to = ?next, "export stage");
        self.stage = next;
    }
}

/// Fetch, flatten and embed a logo. Missing or corrupt logos are omitted.
async fn load_logo<L: ResourceLoader>(
    pdf: &mut PdfBuilder,
    cache: &mut ResourceCache,
    loader: &L,
    src: &str,
) -> Option<Logo> {
    let fetched = cache.image(loader, src).await;
    let rgb = fetched.loaded().and_then(LoadedImage::to_rgb);
    let Some(rgb) = rgb else {
        if matches!(fetched, Fetch::Failed) {
            warn!(logo = %src, "logo unavailable, omitted");
        }
        return None;
    };
    let (width, height) = rgb.dimensions();
    let mut jpeg = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, LOGO_QUALITY)
        .encode(rgb.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .ok()?;
    Some(Logo {
        image: pdf.embed_jpeg(&jpeg, width, height),
        width,
        height,
    })
}

/// Write to a sibling temporary file and rename it over `path`, so readers
/// never observe a half-written document.
pub fn save_atomic(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

/// Today's date in local time, for callers that want the default stamp date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
