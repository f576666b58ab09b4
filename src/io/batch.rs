//! Batch conversion of a folder of weekly JSON files.
//!
//! Every `*.json` directly inside the input folder becomes `<stem>.js` in the
//! output folder. A file that fails to convert does not stop the batch; all
//! failures are collected and returned with the successes.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::io::artifact::{ConvertError, ConvertedFile, convert_json_to_js};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid file pattern for '{}'", .dir.display())]
    Pattern {
        dir: PathBuf,
        #[source]
        source: glob::PatternError,
    },
}

/// A file that could not be converted.
#[derive(Debug)]
pub struct BatchFailure {
    pub source: PathBuf,
    pub error: ConvertError,
}

/// Result of a batch run.
#[derive(Debug)]
pub enum BatchOutcome {
    /// The input folder does not exist.
    MissingDir(PathBuf),
    /// The input folder holds no `*.json` files.
    NothingToConvert(PathBuf),
    Converted {
        converted: Vec<ConvertedFile>,
        failures: Vec<BatchFailure>,
    },
}

impl BatchOutcome {
    pub fn failures(&self) -> &[BatchFailure] {
        match self {
            BatchOutcome::Converted { failures, .. } => failures,
            _ => &[],
        }
    }

    pub fn converted(&self) -> &[ConvertedFile] {
        match self {
            BatchOutcome::Converted { converted, .. } => converted,
            _ => &[],
        }
    }
}

/// Convert every `*.json` in `input_dir` (non-recursive, sorted by name).
pub fn convert_weekly_dir(
    input_dir: &Path,
    output_dir: &Path,
    variable_name: &str,
) -> Result<BatchOutcome, BatchError> {
    if !input_dir.is_dir() {
        return Ok(BatchOutcome::MissingDir(input_dir.to_path_buf()));
    }

    let sources = list_json_files(input_dir)?;
    if sources.is_empty() {
        return Ok(BatchOutcome::NothingToConvert(input_dir.to_path_buf()));
    }

    let mut converted = Vec::with_capacity(sources.len());
    let mut failures = Vec::new();

    for source in sources {
        let output = output_dir.join(artifact_name(&source));
        match convert_json_to_js(&source, &output, variable_name) {
            Ok(file) => converted.push(file),
            Err(error) => {
                tracing::warn!(source = %source.display(), %error, "conversion failed, continuing");
                failures.push(BatchFailure { source, error });
            }
        }
    }

    Ok(BatchOutcome::Converted {
        converted,
        failures,
    })
}

fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join("*.json");
    let paths = glob::glob(&pattern.to_string_lossy()).map_err(|source| BatchError::Pattern {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(err) => tracing::warn!(%err, "skipping unreadable path"),
        }
    }
    Ok(files)
}

/// `<stem>.js` for a JSON source path.
fn artifact_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}.js")
}
