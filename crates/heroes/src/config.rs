//! Site configuration file (site.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use heroes_static::BuildConfig;
use serde::Deserialize;

/// Configuration file structure (site.toml).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    site: SiteConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SiteConfig {
    #[serde(default = "default_data")]
    data: String,
    #[serde(default = "default_templates")]
    templates: String,
    #[serde(default = "default_static", rename = "static")]
    static_dir: String,
    #[serde(default = "default_output")]
    output: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data: default_data(),
            templates: default_templates(),
            static_dir: default_static(),
            output: default_output(),
        }
    }
}

fn default_data() -> String {
    "data/heroes.json".to_string()
}
fn default_templates() -> String {
    "templates".to_string()
}
fn default_static() -> String {
    "static".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Turn the file settings into a build configuration.
    pub fn into_build_config(self, output: Option<PathBuf>) -> BuildConfig {
        BuildConfig {
            data_file: PathBuf::from(self.site.data),
            templates_dir: PathBuf::from(self.site.templates),
            static_dir: PathBuf::from(self.site.static_dir),
            output_dir: output.unwrap_or_else(|| PathBuf::from(self.site.output)),
        }
    }
}
