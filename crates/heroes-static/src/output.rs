//! Output directory preparation.

use std::fs;
use std::path::Path;

/// Errors that can occur while preparing the output directory.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to remove old output directory {path}")]
    Remove {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {path}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Leave an empty directory at `dir`.
///
/// Anything already at `dir` is deleted first, without confirmation.
pub fn prepare_output_dir(dir: &Path) -> Result<(), OutputError> {
    if dir.exists() {
        tracing::info!("Removing old output directory: {}", dir.display());
        fs::remove_dir_all(dir).map_err(|source| OutputError::Remove {
            path: dir.display().to_string(),
            source,
        })?;
    }

    tracing::info!("Creating new output directory: {}", dir.display());
    fs::create_dir_all(dir).map_err(|source| OutputError::Create {
        path: dir.display().to_string(),
        source,
    })?;

    Ok(())
}
