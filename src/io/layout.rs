//! Project directory layout.
//!
//! Every path the pipeline reads or writes is derived from a single project
//! root plus fixed sub-directory conventions:
//!
//! ```text
//! <root>/raw_data/<YYYY>/<YYYY>_<MM>/sales_raw_<YYYY><MM>_week<W>.xlsx
//! <root>/master_data/
//! <root>/processed_data/weekly/<YYYY><MM>_week<W>.json
//! <root>/dashboard/data_weekly.js
//! <root>/dashboard/data/<stem>.js
//! ```
//!
//! Nothing here touches the filesystem.

use std::path::PathBuf;

use crate::domain::Period;

const RAW_DATA_DIR: &str = "raw_data";
const MASTER_DATA_DIR: &str = "master_data";
const PROCESSED_DATA_DIR: &str = "processed_data";
const WEEKLY_DIR: &str = "weekly";
const DASHBOARD_DIR: &str = "dashboard";
const DASHBOARD_DATA_DIR: &str = "data";
const CURRENT_ARTIFACT_NAME: &str = "data_weekly.js";

/// Path resolver rooted at the project directory.
///
/// An empty root resolves everything relative to the working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn raw_data_dir(&self) -> PathBuf {
        self.root.join(RAW_DATA_DIR)
    }

    pub fn master_data_dir(&self) -> PathBuf {
        self.root.join(MASTER_DATA_DIR)
    }

    /// Folder holding one month's raw spreadsheets.
    pub fn raw_month_dir(&self, period: &Period) -> PathBuf {
        self.raw_data_dir()
            .join(format!("{:04}", period.year))
            .join(format!("{:04}_{:02}", period.year, period.month))
    }

    /// Expected raw spreadsheet for `period`. Existence is not checked.
    pub fn raw_input_path(&self, period: &Period) -> PathBuf {
        self.raw_month_dir(period).join(raw_file_name(period))
    }

    pub fn weekly_json_dir(&self) -> PathBuf {
        self.root.join(PROCESSED_DATA_DIR).join(WEEKLY_DIR)
    }

    /// Where the data processor writes the aggregated JSON for `period`.
    pub fn processed_json_path(&self, period: &Period) -> PathBuf {
        self.weekly_json_dir()
            .join(format!("{}_week{}.json", period.month_stamp(), period.week))
    }

    pub fn dashboard_dir(&self) -> PathBuf {
        self.root.join(DASHBOARD_DIR)
    }

    /// Output folder for batch conversion (one artifact per weekly JSON).
    pub fn dashboard_data_dir(&self) -> PathBuf {
        self.dashboard_dir().join(DASHBOARD_DATA_DIR)
    }

    /// The "current week" artifact the dashboard loads; overwritten by every weekly run.
    pub fn current_artifact_path(&self) -> PathBuf {
        self.dashboard_dir().join(CURRENT_ARTIFACT_NAME)
    }
}

/// `sales_raw_<YYYY><MM>_week<W>.xlsx`
pub fn raw_file_name(period: &Period) -> String {
    format!("sales_raw_{}_week{}.xlsx", period.month_stamp(), period.week)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_input_path_follows_naming_convention() {
        let layout = Layout::default();
        let period = Period::new(2024, 3, 2);
        assert_eq!(
            layout.raw_input_path(&period),
            PathBuf::from("raw_data/2024/2024_03/sales_raw_202403_week2.xlsx")
        );
        assert_eq!(raw_file_name(&period), "sales_raw_202403_week2.xlsx");
    }

    #[test]
    fn processed_and_dashboard_paths() {
        let layout = Layout::new("/srv/sales");
        let period = Period::new(2025, 11, 5);
        assert_eq!(
            layout.processed_json_path(&period),
            PathBuf::from("/srv/sales/processed_data/weekly/202511_week5.json")
        );
        assert_eq!(
            layout.raw_month_dir(&period),
            PathBuf::from("/srv/sales/raw_data/2025/2025_11")
        );
        assert_eq!(
            layout.current_artifact_path(),
            PathBuf::from("/srv/sales/dashboard/data_weekly.js")
        );
        assert_eq!(
            layout.dashboard_data_dir(),
            PathBuf::from("/srv/sales/dashboard/data")
        );
        assert_eq!(layout.master_data_dir(), PathBuf::from("/srv/sales/master_data"));
    }

    #[test]
    fn out_of_range_values_are_not_validated() {
        let layout = Layout::default();
        let period = Period::new(2024, 13, 9);
        assert_eq!(
            layout.raw_input_path(&period),
            PathBuf::from("raw_data/2024/2024_13/sales_raw_202413_week9.xlsx")
        );
    }
}
