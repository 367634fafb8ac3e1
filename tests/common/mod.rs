#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use xray_fetch::verify::{EXPECTED_CLASSES, EXPECTED_SPLITS};
use xray_fetch::{DatasetRef, DatasetSource, FetchError};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const CREDS: &str = r#"{"username":"alice","key":"secret"}"#;

/// Writes a zip whose entries are `<prefix>/<split>/<class>/img_<n>.jpeg`,
/// with `files_for(split, class)` images per class folder. Empty class
/// folders get an explicit directory entry.
pub fn write_dataset_zip(
    path: &Path,
    prefix: &str,
    skip: Option<(&str, &str)>,
    files_for: impl Fn(&str, &str) -> usize,
) {
    let file = File::create(path).expect("create zip");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for split in EXPECTED_SPLITS {
        for class in EXPECTED_CLASSES {
            if skip == Some((split, class)) {
                continue;
            }
            let dir = format!("{prefix}/{split}/{class}");
            writer
                .add_directory(format!("{dir}/"), options)
                .expect("add directory");
            for n in 0..files_for(split, class) {
                writer
                    .start_file(format!("{dir}/img_{n}.jpeg"), options)
                    .expect("start file");
                writer.write_all(b"\xff\xd8\xff").expect("write entry");
            }
        }
    }

    writer.finish().expect("finish zip");
}

pub fn write_credentials(dir: &Path) {
    fs::create_dir_all(dir).expect("create credentials dir");
    fs::write(dir.join("kaggle.json"), CREDS).expect("write kaggle.json");
}

/// A [`DatasetSource`] that copies a prepared archive into place.
pub struct PreparedArchive {
    pub archive: std::path::PathBuf,
    pub file_name: String,
}

impl DatasetSource for PreparedArchive {
    fn download(&self, _dataset: &DatasetRef, target_dir: &Path) -> Result<(), FetchError> {
        let destination = target_dir.join(&self.file_name);
        fs::copy(&self.archive, &destination).map_err(|source| FetchError::Io {
            path: destination,
            source,
        })?;
        Ok(())
    }
}
