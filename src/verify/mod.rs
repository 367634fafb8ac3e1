//! Structure verification for the extracted dataset.
//!
//! The expected layout is a fixed two-level enumeration:
//! `<dataset>/<split>/<class>/*` for every split in [`EXPECTED_SPLITS`] and
//! every class in [`EXPECTED_CLASSES`]. The first missing folder aborts the
//! check; file contents are never inspected.

mod report;

pub use report::{ClassCount, SplitCounts, StructureReport};

use std::path::Path;

use walkdir::WalkDir;

use crate::error::FetchError;

/// Data splits, in verification order.
pub const EXPECTED_SPLITS: [&str; 3] = ["train", "val", "test"];

/// Class folders expected inside every split, in verification order.
pub const EXPECTED_CLASSES: [&str; 2] = ["NORMAL", "PNEUMONIA"];

/// Verifies the split/class layout under `dataset_dir` and counts files.
pub fn verify_structure(dataset_dir: &Path) -> Result<StructureReport, FetchError> {
    let mut report = StructureReport::new();

    for split in EXPECTED_SPLITS {
        let split_dir = dataset_dir.join(split);
        if !split_dir.is_dir() {
            return Err(FetchError::MissingSplitFolder { path: split_dir });
        }

        let mut classes = Vec::with_capacity(EXPECTED_CLASSES.len());
        for class in EXPECTED_CLASSES {
            let class_dir = split_dir.join(class);
            if !class_dir.is_dir() {
                return Err(FetchError::MissingClassFolder { path: class_dir });
            }

            classes.push(ClassCount {
                class: class.to_string(),
                files: count_files(&class_dir)?,
            });
        }

        report.push(SplitCounts {
            split: split.to_string(),
            classes,
        });
    }

    Ok(report)
}

/// Counts regular files directly inside `dir` (subdirectories are not entered).
fn count_files(dir: &Path) -> Result<usize, FetchError> {
    let mut count = 0;

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|source| FetchError::Walk {
            path: dir.to_path_buf(),
            message: format!("failed while traversing directory: {source}"),
        })?;

        if entry.file_type().is_file() {
            count += 1;
        }
    }

    Ok(count)
}
