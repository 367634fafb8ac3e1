//! Archive retrieval: ask a [`DatasetSource`] for the archive, then find it
//! on disk.

use std::path::{Path, PathBuf};

use crate::error::FetchError;
use crate::kaggle::{DatasetRef, DatasetSource};

/// Download `dataset` into `target_dir` and return the archive path.
///
/// The source is called exactly once. Its errors propagate unchanged.
pub fn download_archive(
    source: &dyn DatasetSource,
    dataset: &DatasetRef,
    target_dir: &Path,
) -> Result<PathBuf, FetchError> {
    std::fs::create_dir_all(target_dir).map_err(FetchError::io(target_dir))?;
    source.download(dataset, target_dir)?;
    locate_archive(target_dir, &dataset.archive_name())
}

/// Find the downloaded archive in `target_dir`.
///
/// `expected_name` wins when present. Otherwise the lexicographically first
/// `.zip` file directly inside `target_dir` is used.
pub fn locate_archive(target_dir: &Path, expected_name: &str) -> Result<PathBuf, FetchError> {
    let expected = target_dir.join(expected_name);
    if expected.is_file() {
        return Ok(expected);
    }

    log::debug!(
        "{} not found, scanning {} for zip files",
        expected.display(),
        target_dir.display()
    );

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(target_dir).map_err(FetchError::io(target_dir))? {
        let path = entry.map_err(FetchError::io(target_dir))?.path();
        if path.is_file() && is_zip(&path) {
            candidates.push(path);
        }
    }
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::ArchiveNotFound {
            dir: target_dir.to_path_buf(),
        })
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;

    const EXPECTED: &str = "chest-xray-pneumonia.zip";

    struct WritesFile {
        name: &'static str,
        calls: Cell<usize>,
    }

    impl DatasetSource for WritesFile {
        fn download(&self, _dataset: &DatasetRef, target_dir: &Path) -> Result<(), FetchError> {
            self.calls.set(self.calls.get() + 1);
            let path = target_dir.join(self.name);
            fs::write(&path, b"PK").map_err(FetchError::io(&path))
        }
    }

    struct Fails;

    impl DatasetSource for Fails {
        fn download(&self, dataset: &DatasetRef, _target_dir: &Path) -> Result<(), FetchError> {
            Err(FetchError::Download {
                dataset: dataset.to_string(),
                message: "403 Forbidden".to_string(),
            })
        }
    }

    fn dataset() -> DatasetRef {
        DatasetRef::parse("paultimothymooney/chest-xray-pneumonia").expect("parse")
    }

    #[test]
    fn expected_name_wins_over_other_archives() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a-first.zip"), b"PK").expect("write");
        fs::write(dir.path().join(EXPECTED), b"PK").expect("write");

        assert_eq!(
            locate_archive(dir.path(), EXPECTED).expect("locate"),
            dir.path().join(EXPECTED)
        );
    }

    #[test]
    fn single_other_archive_is_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("archive.ZIP"), b"PK").expect("write");
        fs::write(dir.path().join("notes.txt"), b"hi").expect("write");

        assert_eq!(
            locate_archive(dir.path(), EXPECTED).expect("locate"),
            dir.path().join("archive.ZIP")
        );
    }

    #[test]
    fn multiple_archives_resolve_lexicographically() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("b.zip"), b"PK").expect("write");
        fs::write(dir.path().join("a.zip"), b"PK").expect("write");

        assert_eq!(
            locate_archive(dir.path(), EXPECTED).expect("locate"),
            dir.path().join("a.zip")
        );
    }

    #[test]
    fn no_archive_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("folder.zip")).expect("mkdir");

        match locate_archive(dir.path(), EXPECTED).expect_err("should fail") {
            FetchError::ArchiveNotFound { dir: reported } => assert_eq!(reported, dir.path()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn download_creates_target_and_calls_source_once() {
        let root = tempfile::tempdir().expect("tempdir");
        let target = root.path().join("nested").join("data");
        let source = WritesFile {
            name: EXPECTED,
            calls: Cell::new(0),
        };

        let archive = download_archive(&source, &dataset(), &target).expect("download");

        assert_eq!(archive, target.join(EXPECTED));
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn download_falls_back_to_any_zip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = WritesFile {
            name: "renamed.zip",
            calls: Cell::new(0),
        };

        let archive = download_archive(&source, &dataset(), dir.path()).expect("download");
        assert_eq!(archive, dir.path().join("renamed.zip"));
    }

    #[test]
    fn source_errors_propagate() {
        let dir = tempfile::tempdir().expect("tempdir");

        match download_archive(&Fails, &dataset(), dir.path()).expect_err("should fail") {
            FetchError::Download { message, .. } => assert_eq!(message, "403 Forbidden"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn uncreatable_target_dir_is_named_in_the_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"regular file").expect("write");
        let target = blocker.join("data");
        let source = WritesFile {
            name: EXPECTED,
            calls: Cell::new(0),
        };

        let err = download_archive(&source, &dataset(), &target).expect_err("should fail");

        assert!(matches!(&err, FetchError::Io { path, .. } if path == &target));
        assert!(err.to_string().contains(&target.display().to_string()));
        assert_eq!(source.calls.get(), 0);
    }
}
