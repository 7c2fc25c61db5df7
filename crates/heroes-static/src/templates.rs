//! Template resolution and rendering.

use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, ErrorKind};
use serde_json::{Map, Value as JsonValue};

/// Variables bound into a template while rendering, keyed by name.
pub type Bindings = Map<String, JsonValue>;

/// Errors that can occur while resolving or rendering a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template not found: {name} (in {dir})")]
    NotFound { name: String, dir: String },

    #[error("Failed to render {name}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Something that can look up a template by name and render it with bound variables.
pub trait TemplateRenderer {
    /// Render the named template with `vars` available as top-level variables.
    fn render(&self, name: &str, vars: &Bindings) -> Result<String, TemplateError>;
}

/// Template engine using minijinja, loading templates from a directory on disk.
///
/// Templates are resolved lazily, so a missing directory or template is only
/// reported when that template is first rendered.
pub struct TemplateEngine {
    env: Environment<'static>,
    dir: PathBuf,
}

impl TemplateEngine {
    /// Create an engine that resolves template names relative to `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let mut env = Environment::new();

        env.set_loader(minijinja::path_loader(&dir));

        // Output is written exactly as the data reads, no HTML escaping
        env.set_auto_escape_callback(|_| AutoEscape::None);

        Self { env, dir }
    }
}

impl TemplateRenderer for TemplateEngine {
    fn render(&self, name: &str, vars: &Bindings) -> Result<String, TemplateError> {
        let tmpl = self.env.get_template(name).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                TemplateError::NotFound {
                    name: name.to_string(),
                    dir: self.dir.display().to_string(),
                }
            } else {
                TemplateError::Render {
                    name: name.to_string(),
                    source: e,
                }
            }
        })?;

        tmpl.render(vars).map_err(|source| TemplateError::Render {
            name: name.to_string(),
            source,
        })
    }
}
