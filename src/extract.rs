//! Archive extraction and dataset-folder discovery.

use std::fs::File;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::FetchError;

/// Directory name at the top of the extracted dataset.
pub const DATASET_DIR_NAME: &str = "chest_xray";

/// macOS resource-fork folder some zips carry alongside the real content.
const MACOS_METADATA_DIR: &str = "__MACOSX";

/// Extract `archive` into `target_dir` and return the dataset folder.
pub fn extract_archive(archive: &Path, target_dir: &Path) -> Result<PathBuf, FetchError> {
    unzip(archive, target_dir)?;
    locate_dataset_dir(target_dir, DATASET_DIR_NAME)
}

/// Unpack every entry of `archive` under `target_dir`, overwriting files
/// that already exist. Modes stored in the archive are not applied.
pub fn unzip(archive: &Path, target_dir: &Path) -> Result<usize, FetchError> {
    let extract_err = |source: ZipError| FetchError::Extract {
        path: archive.to_path_buf(),
        source,
    };

    let file = File::open(archive).map_err(|source| extract_err(source.into()))?;
    let mut zip = ZipArchive::new(file).map_err(extract_err)?;
    std::fs::create_dir_all(target_dir).map_err(FetchError::io(target_dir))?;

    let mut written = 0;
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(extract_err)?;
        let Some(relative) = entry.enclosed_name() else {
            log::debug!("skipping unsafe entry name '{}'", entry.name());
            continue;
        };
        let out_path = target_dir.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path).map_err(FetchError::io(&out_path))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(FetchError::io(parent))?;
        }
        let mut out = File::create(&out_path).map_err(FetchError::io(&out_path))?;
        std::io::copy(&mut entry, &mut out).map_err(|source| extract_err(source.into()))?;
        written += 1;
    }

    log::debug!("extracted {written} file(s) into {}", target_dir.display());
    Ok(written)
}

/// Find the folder named `name` under `root`.
///
/// `root/name` is returned directly when it exists. Otherwise the shallowest
/// match anywhere below `root` is used, ties broken by path order.
pub fn locate_dataset_dir(root: &Path, name: &str) -> Result<PathBuf, FetchError> {
    let direct = root.join(name);
    if direct.is_dir() {
        return Ok(direct);
    }

    let mut best: Option<(usize, PathBuf)> = None;
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != MACOS_METADATA_DIR);

    for entry in walker {
        let entry = entry.map_err(|source| FetchError::Walk {
            path: root.to_path_buf(),
            message: source.to_string(),
        })?;

        if !entry.file_type().is_dir() || entry.file_name() != name {
            continue;
        }

        let candidate = (entry.depth(), entry.into_path());
        if best.as_ref().is_none_or(|current| candidate < *current) {
            best = Some(candidate);
        }
    }

    best.map(|(_, path)| path)
        .ok_or_else(|| FetchError::DatasetDirNotFound {
            root: root.to_path_buf(),
        })
}
