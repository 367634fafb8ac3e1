use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for xray-fetch operations.
///
/// Every variant is fatal: the pipeline aborts on the first error it sees.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset id '{input}': {message}")]
    InvalidDataset { input: String, message: String },

    #[error(
        "kaggle.json not found. Place it either at {} or {}.",
        .project.display(),
        .home.display()
    )]
    MissingCredentials { project: PathBuf, home: PathBuf },

    #[error("could not determine the home directory for Kaggle credentials")]
    HomeDirUnavailable,

    #[error("Failed to parse Kaggle credentials from {path}: {source}")]
    CredentialsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Download of '{dataset}' failed: {message}")]
    Download { dataset: String, message: String },

    #[error("Zip file not found after download in {}", .dir.display())]
    ArchiveNotFound { dir: PathBuf },

    #[error("Failed to extract {}: {source}", .path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Could not locate dataset folder after extraction under {}", .root.display())]
    DatasetDirNotFound { root: PathBuf },

    #[error("Missing split folder: {}", .path.display())]
    MissingSplitFolder { path: PathBuf },

    #[error("Missing class folder: {}", .path.display())]
    MissingClassFolder { path: PathBuf },

    #[error("Failed while traversing {}: {message}", .path.display())]
    Walk { path: PathBuf, message: String },
}

impl FetchError {
    /// Adapter for `map_err` that attaches the path an I/O call touched.
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> FetchError {
        let path = path.to_path_buf();
        move |source| FetchError::Io { path, source }
    }
}
