//! Product catalog loading.
//!
//! The catalog is a JSON array of products read once at startup. A missing
//! or invalid file is fatal: there is nothing to sell without it.

use std::path::{Path, PathBuf};

use corner_shop_core::{Catalog, CatalogError};
use thiserror::Error;

/// Error loading the catalog file.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },
}

/// Read and validate the catalog at `path`.
///
/// # Errors
///
/// Returns [`CatalogLoadError`] if the file cannot be read or does not hold
/// a valid product list.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = Catalog::from_json(&json).map_err(|source| CatalogLoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        products = catalog.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}
