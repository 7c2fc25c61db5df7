//! Static site builder.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use serde_json::Value;

use crate::assets::{copy_static_files, AssetError};
use crate::data::{load_data, DataError};
use crate::output::{prepare_output_dir, OutputError};
use crate::templates::{Bindings, TemplateEngine, TemplateError, TemplateRenderer};

/// Configuration for building the site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// JSON data file
    pub data_file: PathBuf,

    /// Directory templates are resolved from
    pub templates_dir: PathBuf,

    /// Directory of assets copied verbatim
    pub static_dir: PathBuf,

    /// Output directory, wiped at the start of every build
    pub output_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data").join("heroes.json"),
            templates_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("dist"),
        }
    }
}

/// A page rendered from a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Template name, relative to the templates directory
    pub template: &'static str,

    /// File name written inside the output directory
    pub output: &'static str,

    /// Name the dataset is bound under, if the page uses it
    pub binding: Option<&'static str>,
}

/// Pages rendered on every build, in order.
pub const PAGES: [Page; 2] = [
    Page {
        template: "index.html",
        output: "index.html",
        binding: None,
    },
    Page {
        template: "db.html",
        output: "showEntries.html",
        binding: Some("heroes"),
    },
];

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages rendered
    pub pages: usize,

    /// Number of static files copied
    pub assets: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Error loading data file")]
    Data(#[from] DataError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Failed to write {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Assets(#[from] AssetError),
}

/// Static site builder.
pub struct SiteBuilder {
    config: BuildConfig,
}

impl SiteBuilder {
    /// Create a new site builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Build the site from scratch.
    ///
    /// Stops at the first failing stage. Files written by earlier stages are
    /// left in place.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let templates = self.setup_environment()?;
        let heroes = load_data(&self.config.data_file)?;
        let pages = self.render_pages(&templates, &heroes)?;
        let assets = copy_static_files(&self.config.static_dir, &self.config.output_dir)?;

        Ok(BuildResult {
            pages,
            assets: assets.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Create the template engine and leave an empty output directory.
    pub fn setup_environment(&self) -> Result<TemplateEngine, BuildError> {
        tracing::info!(
            "Setting up template environment from: {}",
            self.config.templates_dir.display()
        );
        let templates = TemplateEngine::from_dir(&self.config.templates_dir);

        prepare_output_dir(&self.config.output_dir)?;

        Ok(templates)
    }

    /// Render every page in [`PAGES`] into the output directory.
    ///
    /// Returns the number of pages written.
    pub fn render_pages<R: TemplateRenderer>(
        &self,
        renderer: &R,
        heroes: &Value,
    ) -> Result<usize, BuildError> {
        for page in &PAGES {
            tracing::info!("Rendering {} (from {})...", page.output, page.template);

            let mut vars = Bindings::new();
            if let Some(name) = page.binding {
                vars.insert(name.to_string(), heroes.clone());
            }

            let html = renderer.render(page.template, &vars)?;

            let path = self.config.output_dir.join(page.output);
            fs::write(&path, html).map_err(|source| BuildError::Write {
                path: path.display().to_string(),
                source,
            })?;

            tracing::info!("Saved {}", path.display());
        }

        Ok(PAGES.len())
    }
}
