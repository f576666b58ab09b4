//! The data processor collaborator.
//!
//! Aggregating a raw weekly spreadsheet against master reference data is done
//! by an external program; this crate only defines the contract and a runner
//! for it. The processor writes its JSON document to the requested output path
//! and the pipeline reads it back from there.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use serde_json::Value;
use thiserror::Error;

use crate::io::artifact::{ConvertError, read_document};

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("no data processor configured (set {})", crate::config::PROCESSOR_ENV)]
    NotConfigured,

    #[error("failed to start data processor '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to prepare output path '{}'", .path.display())]
    PrepareOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("data processor failed ({status}): {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("data processor output is unusable")]
    Output(#[source] ConvertError),

    #[error("data processor output '{}' is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf },
}

/// Paths handed to the processor for one weekly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    /// Raw weekly spreadsheet.
    pub input: PathBuf,
    /// Where the aggregated JSON must be written.
    pub output_json: PathBuf,
    pub raw_data_dir: PathBuf,
    pub master_data_dir: PathBuf,
}

/// The processed weekly document.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedData {
    pub document: Value,
}

impl ProcessedData {
    /// Read a processed document back from disk; the top level must be an object.
    pub fn read(path: &Path) -> Result<Self, ProcessorError> {
        let document = read_document(path).map_err(ProcessorError::Output)?;
        if !document.is_object() {
            return Err(ProcessorError::NotAnObject {
                path: path.to_path_buf(),
            });
        }
        Ok(Self { document })
    }

    /// Keys of the top-level `brands` mapping, in document order.
    pub fn brand_names(&self) -> Vec<String> {
        self.document
            .get("brands")
            .and_then(Value::as_object)
            .map(|brands| brands.keys().cloned().collect())
            .unwrap_or_default()
    }
}

pub trait DataProcessor {
    /// Aggregate `request.input` into `request.output_json` and return the result.
    fn process(&self, request: &ProcessRequest) -> Result<ProcessedData, ProcessorError>;
}

/// Runs an external aggregation program.
///
/// Invocation:
///
/// ```text
/// <program> [args...] --raw-data <dir> --master-data <dir> <input.xlsx> <output.json>
/// ```
///
/// The program's stdout is passed through; stderr is captured for the error
/// message when it exits unsuccessfully. Any file already at the output path
/// is removed first, so a program that exits 0 without writing fails the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandProcessor {
    argv: Vec<String>,
}

impl CommandProcessor {
    /// Build from a whitespace-separated command line (no shell quoting).
    ///
    /// `None` or a blank command yields a processor that fails with
    /// [`ProcessorError::NotConfigured`] when used.
    pub fn new(command: Option<&str>) -> Self {
        Self {
            argv: command
                .map(|cmd| cmd.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

impl DataProcessor for CommandProcessor {
    fn process(&self, request: &ProcessRequest) -> Result<ProcessedData, ProcessorError> {
        let Some((program, args)) = self.argv.split_first() else {
            return Err(ProcessorError::NotConfigured);
        };

        if let Some(parent) = request.output_json.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ProcessorError::PrepareOutput {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        match fs::remove_file(&request.output_json) {
            Ok(()) => tracing::debug!(path = %request.output_json.display(), "removed previous output"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(ProcessorError::PrepareOutput {
                    path: request.output_json.clone(),
                    source,
                });
            }
        }

        tracing::info!(%program, input = %request.input.display(), "running data processor");

        let output = Command::new(program)
            .args(args)
            .arg("--raw-data")
            .arg(&request.raw_data_dir)
            .arg("--master-data")
            .arg(&request.master_data_dir)
            .arg(&request.input)
            .arg(&request.output_json)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ProcessorError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProcessorError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        ProcessedData::read(&request.output_json)
    }
}
