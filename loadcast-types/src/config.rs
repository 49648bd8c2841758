//! Configuration types shared by the store and the dashboard.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{FORECAST_TAIL_LEN, LoadcastError};

/// Header names of the five columns read from the input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    /// Timestamp column.
    pub time: String,
    /// Measured demand.
    pub actual_load: String,
    /// Point forecast.
    pub forecast: String,
    /// Upper edge of the confidence band.
    pub upper_bound: String,
    /// Lower edge of the confidence band.
    pub lower_bound: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            time: "time".to_string(),
            actual_load: "AT_load_actual_entsoe_transparency".to_string(),
            forecast: "forecast".to_string(),
            upper_bound: "Upper bound".to_string(),
            lower_bound: "Lower bound".to_string(),
        }
    }
}

impl ColumnMap {
    /// All header names, timestamp first.
    #[must_use]
    pub fn names(&self) -> [&str; 5] {
        [
            &self.time,
            &self.actual_load,
            &self.forecast,
            &self.upper_bound,
            &self.lower_bound,
        ]
    }
}

/// Global configuration for the store and dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadcastConfig {
    /// CSV file loaded at startup when no store is injected.
    pub data_path: Option<PathBuf>,
    /// Header names of the input table.
    pub columns: ColumnMap,
    /// Number of trailing forecast points in the series.
    pub forecast_tail_len: usize,
    /// How far before the last timestamp the date/hour controls start.
    pub default_lookback_hours: u32,
    /// Sort rows by timestamp before validating the index.
    ///
    /// Duplicates and gaps are still rejected after sorting.
    pub sort_on_load: bool,
}

impl Default for LoadcastConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            columns: ColumnMap::default(),
            forecast_tail_len: FORECAST_TAIL_LEN,
            default_lookback_hours: 7 * 24,
            sort_on_load: false,
        }
    }
}

impl LoadcastConfig {
    /// Largest horizon a request may ask for under this configuration.
    #[must_use]
    pub const fn max_horizon(&self) -> usize {
        self.forecast_tail_len.saturating_sub(1)
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `Config` if the text is not valid JSON for this shape or fails
    /// [`LoadcastConfig::validate`].
    pub fn from_json_str(text: &str) -> Result<Self, LoadcastError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, LoadcastError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LoadcastError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Check values that serde cannot constrain.
    ///
    /// # Errors
    /// Returns `Config` if the tail length is zero, a column name is blank, or
    /// two columns share a name.
    pub fn validate(&self) -> Result<(), LoadcastError> {
        if self.forecast_tail_len == 0 {
            return Err(LoadcastError::Config(
                "forecast_tail_len must be at least 1".into(),
            ));
        }
        let names = self.columns.names();
        if let Some(blank) = names.iter().position(|n| n.trim().is_empty()) {
            return Err(LoadcastError::Config(format!(
                "column name #{blank} is empty"
            )));
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for n in names {
            if !seen.insert(n) {
                return Err(LoadcastError::Config(format!(
                    "column name '{n}' is used more than once"
                )));
            }
        }
        Ok(())
    }
}
