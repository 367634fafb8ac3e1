//! Credential staging.
//!
//! The Kaggle client expects `kaggle.json` in its config directory. When it is
//! missing there, a copy at the project root is staged into place.

use std::path::{Path, PathBuf};

use crate::error::FetchError;

/// Name of the Kaggle credential file, both at the project root and in the
/// config directory.
pub const CREDENTIALS_FILE: &str = "kaggle.json";

/// Outcome of [`stage_credentials`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StagedCredentials {
    /// The canonical file was already present; nothing was written.
    Existing(PathBuf),
    /// The project-root copy was written to the canonical location.
    Copied(PathBuf),
}

impl StagedCredentials {
    /// Path of the canonical credential file.
    pub fn path(&self) -> &Path {
        match self {
            StagedCredentials::Existing(path) | StagedCredentials::Copied(path) => path,
        }
    }
}

/// Kaggle config directory: `$KAGGLE_CONFIG_DIR`, else `~/.kaggle`.
pub fn kaggle_config_dir() -> Result<PathBuf, FetchError> {
    if let Some(dir) = std::env::var_os("KAGGLE_CONFIG_DIR").filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let mut dir = dirs::home_dir().ok_or(FetchError::HomeDirUnavailable)?;
    dir.push(".kaggle");
    Ok(dir)
}

/// Ensure `<config_dir>/kaggle.json` exists, copying it from `project_root`
/// if needed.
pub fn stage_credentials(
    project_root: &Path,
    config_dir: &Path,
) -> Result<StagedCredentials, FetchError> {
    let home_creds = config_dir.join(CREDENTIALS_FILE);
    let project_creds = project_root.join(CREDENTIALS_FILE);

    if home_creds.is_file() {
        log::debug!("credentials already staged at {}", home_creds.display());
        return Ok(StagedCredentials::Existing(home_creds));
    }

    if !project_creds.is_file() {
        return Err(FetchError::MissingCredentials {
            project: project_creds,
            home: home_creds,
        });
    }

    std::fs::create_dir_all(config_dir).map_err(FetchError::io(config_dir))?;
    std::fs::copy(&project_creds, &home_creds).map_err(FetchError::io(&home_creds))?;

    if let Err(source) = restrict_to_owner(&home_creds) {
        log::debug!(
            "could not restrict permissions on {}: {source}",
            home_creds.display()
        );
    }

    Ok(StagedCredentials::Copied(home_creds))
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
