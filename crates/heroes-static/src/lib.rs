//! Static site builder for the heroes listing site.
//!
//! Renders an index page and a data listing page from a JSON dataset and a
//! directory of minijinja templates, then copies static assets alongside them.

pub mod assets;
pub mod builder;
pub mod data;
pub mod output;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, Page, SiteBuilder, PAGES};
pub use templates::{Bindings, TemplateEngine, TemplateError, TemplateRenderer};
