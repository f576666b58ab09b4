use std::error::Error;

use crate::app::pipeline::WeeklyError;
use crate::io::artifact::ConvertError;
use crate::io::batch::BatchError;

/// Exit status for any failed run (missing input, unreadable JSON, processor failure).
pub const EXIT_FAILURE: u8 = 1;

/// The `source()` chain of `err`, nearest cause first (`err` itself excluded).
pub fn causes<'a>(err: &'a (dyn Error + 'static)) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    std::iter::successors(err.source(), |&cause: &&'a (dyn Error + 'static)| cause.source())
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Build an error message from `err` followed by its whole `source()` chain.
    ///
    /// This is what the binary prints as the diagnostic trace of a failed run.
    pub fn from_report(exit_code: u8, err: &(dyn Error + 'static)) -> Self {
        let mut message = format!("Error: {err}");
        for cause in causes(err) {
            message.push_str(&format!("\n  caused by: {cause}"));
        }
        Self::new(exit_code, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        Self::from_report(EXIT_FAILURE, &err)
    }
}

impl From<BatchError> for AppError {
    fn from(err: BatchError) -> Self {
        Self::from_report(EXIT_FAILURE, &err)
    }
}

impl From<WeeklyError> for AppError {
    fn from(err: WeeklyError) -> Self {
        match &err {
            WeeklyError::MissingInput {
                expected,
                directory,
                file_name,
            } => Self::new(
                EXIT_FAILURE,
                crate::report::format_missing_input(expected, directory, file_name),
            ),
            _ => Self::from_report(EXIT_FAILURE, &err),
        }
    }
}
