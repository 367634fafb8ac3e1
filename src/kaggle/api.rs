use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use base64::Engine;
use serde::Deserialize;

use crate::error::FetchError;

use super::{DatasetRef, DatasetSource};

/// Public Kaggle API root.
pub const DEFAULT_BASE_URL: &str = "https://www.kaggle.com/api/v1";

/// Contents of `kaggle.json`.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct KaggleCredentials {
    pub username: String,
    pub key: String,
}

impl fmt::Debug for KaggleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KaggleCredentials")
            .field("username", &self.username)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl KaggleCredentials {
    /// Read a `kaggle.json` file.
    pub fn load(path: &Path) -> Result<Self, FetchError> {
        let bytes = std::fs::read(path).map_err(FetchError::io(path))?;
        serde_json::from_slice(&bytes).map_err(|source| FetchError::CredentialsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `KAGGLE_USERNAME`/`KAGGLE_KEY`, when both are set.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("KAGGLE_USERNAME").ok()?;
        let key = std::env::var("KAGGLE_KEY").ok()?;
        Some(Self { username, key })
    }

    /// Environment variables win over the staged file, as in the Kaggle client.
    pub fn resolve(staged: &Path) -> Result<Self, FetchError> {
        match Self::from_env() {
            Some(credentials) => {
                log::debug!("using Kaggle credentials from environment");
                Ok(credentials)
            }
            None => Self::load(staged),
        }
    }

    fn basic_auth(&self) -> String {
        let raw = format!("{}:{}", self.username, self.key);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }
}

/// Blocking Kaggle API client for dataset downloads.
pub struct KaggleApi {
    agent: ureq::Agent,
    base_url: String,
    credentials: KaggleCredentials,
}

impl KaggleApi {
    pub fn new(credentials: KaggleCredentials) -> Self {
        let config = ureq::Agent::config_builder().build();
        Self {
            agent: config.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
        }
    }

    /// Point the client at another API root (mirrors, local test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `<base>/datasets/download/<owner>/<slug>`
    pub fn download_url(&self, dataset: &DatasetRef) -> Result<url::Url, FetchError> {
        let invalid = |message: String| FetchError::Download {
            dataset: dataset.to_string(),
            message,
        };

        let mut url = url::Url::parse(&self.base_url)
            .map_err(|source| invalid(format!("invalid API URL '{}': {source}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| invalid(format!("API URL '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["datasets", "download", dataset.owner.as_str(), dataset.slug.as_str()]);

        Ok(url)
    }
}

impl DatasetSource for KaggleApi {
    fn download(&self, dataset: &DatasetRef, target_dir: &Path) -> Result<(), FetchError> {
        let url = self.download_url(dataset)?;
        let failed = |message: String| FetchError::Download {
            dataset: dataset.to_string(),
            message,
        };

        log::debug!("GET {url}");
        let response = self
            .agent
            .get(url.as_str())
            .header("Authorization", &self.credentials.basic_auth())
            .call()
            .map_err(|source| failed(source.to_string()))?;

        let destination = target_dir.join(dataset.archive_name());
        let partial = partial_path(&destination);

        let mut reader = response.into_body().into_reader();
        let mut file = File::create(&partial).map_err(FetchError::io(&partial))?;
        let written = std::io::copy(&mut reader, &mut file)
            .map_err(|source| failed(format!("failed writing '{}': {source}", partial.display())))?;
        file.sync_all().map_err(FetchError::io(&partial))?;
        drop(file);

        std::fs::rename(&partial, &destination).map_err(FetchError::io(&destination))?;
        log::info!("Downloaded {written} bytes to {}", destination.display());

        Ok(())
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}
