//! Kaggle dataset plumbing.
//!
//! This module owns remote-specific concerns (dataset references, credentials
//! and the HTTP client). Archive handling stays in `crate::retrieve` and
//! `crate::extract`.

pub mod api;

use std::fmt;
use std::path::Path;

use crate::error::FetchError;

pub use api::{KaggleApi, KaggleCredentials};

/// Canonical reference to a Kaggle dataset (`<owner>/<slug>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetRef {
    pub owner: String,
    pub slug: String,
}

impl DatasetRef {
    /// Parse a dataset reference in `<owner>/<slug>` form.
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let trimmed = input.trim();
        let mut parts = trimmed.split('/');
        let owner = parts.next().unwrap_or_default();
        let slug = parts.next().unwrap_or_default();
        let extra = parts.next();

        if owner.is_empty() || slug.is_empty() || extra.is_some() {
            return Err(FetchError::InvalidDataset {
                input: input.to_string(),
                message: "expected dataset id in '<owner>/<slug>' form".to_string(),
            });
        }

        Ok(Self {
            owner: owner.to_string(),
            slug: slug.to_string(),
        })
    }

    /// File name Kaggle gives the downloaded archive.
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.slug)
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.slug)
    }
}

/// Something that can place a dataset archive into a directory.
///
/// Implementations must not extract the archive; they only store it as
/// `<target_dir>/<slug>.zip` (or some other `.zip` name in `target_dir`).
pub trait DatasetSource {
    fn download(&self, dataset: &DatasetRef, target_dir: &Path) -> Result<(), FetchError>;
}
