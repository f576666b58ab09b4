//! Runtime settings from the environment (`.env` is honoured).
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `SALES_ETL_ROOT` | project root holding `raw_data/`, `processed_data/`, `dashboard/` | working directory |
//! | `SALES_PROCESSOR_CMD` | external data processor command line | unset (weekly runs fail at the processing step) |
//!
//! Sub-directory names under the root are fixed; see [`crate::io::layout`].

use std::path::PathBuf;

use crate::io::layout::Layout;
use crate::processor::CommandProcessor;

pub const ROOT_ENV: &str = "SALES_ETL_ROOT";
pub const PROCESSOR_ENV: &str = "SALES_PROCESSOR_CMD";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub root: PathBuf,
    pub processor_command: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            root: non_blank(ROOT_ENV).map(PathBuf::from).unwrap_or_default(),
            processor_command: non_blank(PROCESSOR_ENV),
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.root.clone())
    }

    pub fn processor(&self) -> CommandProcessor {
        CommandProcessor::new(self.processor_command.as_deref())
    }
}
