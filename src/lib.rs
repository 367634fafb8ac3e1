//! xray-fetch: fetch and sanity-check the Kaggle chest X-ray pneumonia dataset.
//!
//! The tool runs a fixed four-stage pipeline:
//!
//! 1. stage `kaggle.json` into the Kaggle config directory,
//! 2. download the dataset archive through the Kaggle API,
//! 3. unzip it and locate the `chest_xray` folder,
//! 4. verify the `train`/`val`/`test` × `NORMAL`/`PNEUMONIA` layout and count files.
//!
//! # Modules
//!
//! - [`credentials`]: credential staging
//! - [`kaggle`]: dataset references and the Kaggle HTTP client
//! - [`retrieve`]: archive download and discovery
//! - [`extract`]: archive extraction and dataset-folder discovery
//! - [`verify`]: layout verification and the count report
//! - [`error`]: error types for xray-fetch operations

pub mod config;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod kaggle;
pub mod retrieve;
pub mod verify;

use std::path::{Path, PathBuf};

use clap::Parser;

pub use config::PipelineOptions;
pub use credentials::StagedCredentials;
pub use error::FetchError;
pub use kaggle::{DatasetRef, DatasetSource, KaggleApi, KaggleCredentials};
pub use verify::StructureReport;

/// The xray-fetch CLI application.
#[derive(Parser)]
#[command(name = "xray-fetch")]
#[command(version, about)]
struct Cli {
    /// Directory to download and extract the dataset into.
    #[arg(long, value_name = "DIR", env = config::DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,
}

/// Run the xray-fetch CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), FetchError> {
    let cli = Cli::parse();

    let project_root = std::env::current_dir().map_err(FetchError::io(Path::new(".")))?;
    let config_dir = credentials::kaggle_config_dir()?;
    let options = PipelineOptions::new(&project_root, &config_dir, cli.data_dir.as_deref())?;

    let report = run_pipeline(&options, |staged| {
        KaggleCredentials::resolve(staged.path()).map(KaggleApi::new)
    })?;

    println!("{report}");
    println!("Done. Run notebooks from the project root to train/evaluate.");

    Ok(())
}

/// Run all four stages in order, printing a progress line per stage.
///
/// `connect` builds the download source once credentials are staged. Any
/// error aborts the run; artifacts from earlier stages are left on disk.
pub fn run_pipeline<S, F>(
    options: &PipelineOptions,
    connect: F,
) -> Result<StructureReport, FetchError>
where
    S: DatasetSource,
    F: FnOnce(&StagedCredentials) -> Result<S, FetchError>,
{
    let staged = credentials::stage_credentials(&options.project_root, &options.config_dir)?;
    match &staged {
        StagedCredentials::Existing(path) => {
            println!("Found existing credentials at {}", path.display())
        }
        StagedCredentials::Copied(path) => {
            println!("Copied kaggle.json to {}", path.display())
        }
    }

    let source = connect(&staged)?;

    println!(
        "Downloading {} to {} ...",
        options.dataset,
        options.data_root.display()
    );
    let archive = retrieve::download_archive(&source, &options.dataset, &options.data_root)?;
    println!("Downloaded zip: {}", archive.display());

    println!("Extracting {} ...", archive.display());
    let dataset_dir = extract::extract_archive(&archive, &options.data_root)?;
    println!("Dataset extracted to {}", dataset_dir.display());

    verify::verify_structure(&dataset_dir)
}
