//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the conversion and pipeline code stays free of presentation
//! - output changes are localized (and testable as plain strings)

use std::fmt::Write;
use std::path::Path;

use crate::app::pipeline::WeeklyRun;
use crate::io::artifact::ConvertedFile;
use crate::io::batch::BatchOutcome;

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Title framed by `=` rules.
pub fn format_banner(title: &str) -> String {
    format!("{}\n{title}\n{}", rule(), rule())
}

/// `Converting a.json -> a.js`
pub fn format_converting(source: &Path, output: &Path) -> String {
    format!("Converting {} -> {}", file_label(source), file_label(output))
}

/// `Converted: dashboard/data/a.js (12.3 KB)`
pub fn format_converted(file: &ConvertedFile) -> String {
    format!("Converted: {} ({:.1} KB)", file.output.display(), file.size_kib())
}

/// One line per converted file, then notices or a failure summary.
pub fn format_batch_outcome(outcome: &BatchOutcome) -> String {
    match outcome {
        BatchOutcome::MissingDir(dir) => format!("Folder not found: {}", dir.display()),
        BatchOutcome::NothingToConvert(dir) => {
            format!("No JSON files to convert in {}.", dir.display())
        }
        BatchOutcome::Converted {
            converted,
            failures,
        } => {
            let mut out = String::new();
            for file in converted {
                let _ = writeln!(out, "{}", format_converting(&file.source, &file.output));
                let _ = writeln!(out, "{}", format_converted(file));
            }
            let _ = write!(
                out,
                "{} converted, {} failed",
                converted.len(),
                failures.len()
            );
            for failure in failures {
                let _ = write!(out, "\n  {}: {}", failure.source.display(), failure.error);
                for cause in crate::error::causes(&failure.error) {
                    let _ = write!(out, "\n    caused by: {cause}");
                }
            }
            out
        }
    }
}

/// Diagnostic for a missing weekly spreadsheet, with where to put it.
pub fn format_missing_input(expected: &Path, directory: &Path, file_name: &str) -> String {
    format!(
        "Error: input file not found
   Expected path: {}

Fix:
   1. Save the raw data in:
      {}
   2. Name the file:
      {file_name}",
        expected.display(),
        directory.display(),
    )
}

/// Conversion lines and closing summary of a completed weekly run.
pub fn format_weekly_summary(run: &WeeklyRun) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format_converting(&run.artifact.source, &run.artifact.output));
    let _ = writeln!(out, "{}", format_converted(&run.artifact));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", format_banner("Weekly data update complete"));
    let _ = writeln!(out, "Files:");
    let _ = writeln!(out, "   Input: {}", run.input.display());
    let _ = writeln!(out, "   JSON:  {}", run.output_json.display());
    let _ = writeln!(out, "   JS:    {} ({:.1} KB)", run.artifact.output.display(), run.artifact.size_kib());
    let _ = writeln!(out);
    let _ = writeln!(out, "Brands processed:");
    if run.brands.is_empty() {
        let _ = writeln!(out, "   (none)");
    }
    for brand in &run.brands {
        let _ = writeln!(out, "   - {brand}");
    }
    let _ = write!(out, "{}", rule());
    out
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
