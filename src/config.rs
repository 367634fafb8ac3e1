//! Run configuration: where things live and which dataset to fetch.

use std::path::{Path, PathBuf};

use crate::error::FetchError;
use crate::kaggle::DatasetRef;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Kaggle dataset this tool fetches.
pub const DATASET_ID: &str = "paultimothymooney/chest-xray-pneumonia";

/// Data root used when neither `--data-dir` nor `DATA_DIR` is given.
pub fn default_data_root() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\CECS456_Project\data")
    } else {
        PathBuf::from("data")
    }
}

/// Everything a pipeline run needs to know about its environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Directory holding the fallback `kaggle.json`.
    pub project_root: PathBuf,
    /// Kaggle config directory holding the canonical `kaggle.json`.
    pub config_dir: PathBuf,
    /// Directory the archive is downloaded to and extracted in.
    pub data_root: PathBuf,
    pub dataset: DatasetRef,
}

impl PipelineOptions {
    /// Options for the built-in dataset.
    ///
    /// A relative `data_root` is taken relative to `project_root`.
    pub fn new(
        project_root: &Path,
        config_dir: &Path,
        data_root: Option<&Path>,
    ) -> Result<Self, FetchError> {
        let data_root = match data_root {
            Some(path) => project_root.join(path),
            None => project_root.join(default_data_root()),
        };

        Ok(Self {
            project_root: project_root.to_path_buf(),
            config_dir: config_dir.to_path_buf(),
            data_root,
            dataset: DatasetRef::parse(DATASET_ID)?,
        })
    }
}
