//! The weekly update workflow.
//!
//! period -> expected raw spreadsheet -> data processor -> processed JSON ->
//! dashboard artifact
//!
//! A run either completes every step or fails as a whole; files written by
//! earlier steps are left in place on failure.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::Period;
use crate::io::artifact::{ConvertError, ConvertedFile, DEFAULT_VARIABLE_NAME, convert_json_to_js};
use crate::io::layout::{Layout, raw_file_name};
use crate::processor::{DataProcessor, ProcessRequest, ProcessorError};

#[derive(Debug, Error)]
pub enum WeeklyError {
    #[error("input file not found: {}", .expected.display())]
    MissingInput {
        expected: PathBuf,
        directory: PathBuf,
        file_name: String,
    },

    #[error("data processing failed")]
    Processor(#[from] ProcessorError),

    #[error("dashboard artifact conversion failed")]
    Convert(#[from] ConvertError),
}

/// Everything a completed weekly run produced.
#[derive(Debug, Clone)]
pub struct WeeklyRun {
    pub period: Period,
    pub input: PathBuf,
    pub output_json: PathBuf,
    pub artifact: ConvertedFile,
    pub brands: Vec<String>,
}

/// Run the weekly update for `period`.
///
/// Fails before touching the filesystem when the raw spreadsheet is missing.
pub fn run_weekly(
    layout: &Layout,
    period: Period,
    processor: &dyn DataProcessor,
) -> Result<WeeklyRun, WeeklyError> {
    let input = layout.raw_input_path(&period);
    if !input.is_file() {
        return Err(WeeklyError::MissingInput {
            expected: input,
            directory: layout.raw_month_dir(&period),
            file_name: raw_file_name(&period),
        });
    }

    let output_json = layout.processed_json_path(&period);
    let request = ProcessRequest {
        input: input.clone(),
        output_json: output_json.clone(),
        raw_data_dir: layout.raw_data_dir(),
        master_data_dir: layout.master_data_dir(),
    };
    let processed = processor.process(&request)?;
    tracing::info!(%period, json = %output_json.display(), "processed weekly data");

    let artifact = convert_json_to_js(
        &output_json,
        &layout.current_artifact_path(),
        DEFAULT_VARIABLE_NAME,
    )?;

    Ok(WeeklyRun {
        period,
        input,
        output_json,
        artifact,
        brands: processed.brand_names(),
    })
}
