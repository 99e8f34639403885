use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid OSV document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to walk catalog directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Range events out of order in {id} for module {module}")]
    UnorderedEvents { id: String, module: String },
}
