//! Command-line parsing for the weekly sales ETL.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! conversion and pipeline code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::io::artifact::DEFAULT_VARIABLE_NAME;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sales", version, about = "Weekly sales ETL: raw spreadsheets to dashboard data scripts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert processed JSON into a dashboard data script.
    ///
    /// With no paths, converts every `processed_data/weekly/*.json` into
    /// `dashboard/data/<name>.js`.
    Convert(ConvertArgs),
    /// Run the weekly update for the current period.
    Weekly(WeeklyArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ConvertArgs {
    /// JSON file to convert.
    #[arg(value_name = "JSON")]
    pub json_path: Option<PathBuf>,

    /// Output script (defaults to `<JSON>.js`).
    #[arg(value_name = "JS", requires = "json_path")]
    pub js_path: Option<PathBuf>,

    /// JavaScript variable the data is bound to.
    #[arg(long = "var", value_name = "NAME", default_value = DEFAULT_VARIABLE_NAME)]
    pub variable_name: String,
}

#[derive(Debug, Parser, Clone)]
pub struct WeeklyArgs {
    /// Process the week containing this date instead of today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}
