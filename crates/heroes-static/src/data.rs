//! Loading the heroes dataset.

use std::fs;
use std::path::Path;

use serde_json::Value;

/// Errors that can occur while loading the data file.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse the JSON document at `path`.
///
/// The shape of the document is not checked; whatever parses is handed to the
/// templates as-is.
pub fn load_data(path: &Path) -> Result<Value, DataError> {
    tracing::info!("Loading data from: {}", path.display());

    let content = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let data = serde_json::from_str(&content).map_err(|source| DataError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!("Data loaded successfully.");
    Ok(data)
}
