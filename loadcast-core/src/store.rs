//! Once-loaded, immutable owner of the energy series.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};
use serde::Serialize;

use crate::series::{EnergyRecord, EnergySeries};
use crate::{ColumnMap, LoadcastConfig, LoadcastError};

/// Initial values for the date, hour, and horizon controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlDefaults {
    /// Earliest selectable date.
    pub min_date: NaiveDate,
    /// Latest selectable date.
    pub max_date: NaiveDate,
    /// Month the date picker opens on.
    pub initial_visible_month: NaiveDate,
    /// Preselected date.
    pub date: NaiveDate,
    /// Preselected hour of day.
    pub hour: u32,
    /// Preselected horizon.
    pub horizon: usize,
}

/// Holds the validated series for the lifetime of the process.
///
/// Cloning is cheap; clones share the same series.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    series: Arc<EnergySeries>,
    bounds: (DateTime<Utc>, DateTime<Utc>),
    source_name: String,
}

impl SeriesStore {
    /// Load the CSV named by `cfg.data_path`.
    ///
    /// # Errors
    /// - `Config` if the configuration is invalid or has no `data_path`.
    /// - `DataLoad` for any read or schema failure (see [`SeriesStore::from_reader`]).
    pub fn load(cfg: &LoadcastConfig) -> Result<Self, LoadcastError> {
        cfg.validate()?;
        let path = cfg
            .data_path
            .as_deref()
            .ok_or_else(|| LoadcastError::Config("no data_path configured".into()))?;
        Self::from_path(path, cfg)
    }

    /// Load a CSV file.
    ///
    /// # Errors
    /// Returns `DataLoad` if the file cannot be opened or fails validation.
    pub fn from_path(path: impl AsRef<Path>, cfg: &LoadcastConfig) -> Result<Self, LoadcastError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let file = std::fs::File::open(path)
            .map_err(|e| LoadcastError::data_load(&source_name, e.to_string()))?;
        Self::read_csv(file, source_name, cfg)
    }

    /// Load CSV data from any reader.
    ///
    /// # Errors
    /// - `Config` if `cfg` is invalid.
    /// - `DataLoad` if the data is unreadable, a required column is missing, a
    ///   cell is malformed, the index is not strictly hourly, or the series is
    ///   shorter than `cfg.forecast_tail_len`.
    pub fn from_reader<R: Read>(reader: R, cfg: &LoadcastConfig) -> Result<Self, LoadcastError> {
        Self::read_csv(reader, "csv reader".to_string(), cfg)
    }

    /// Wrap an already-built series.
    ///
    /// # Errors
    /// Returns `DataLoad` if the series is shorter than `cfg.forecast_tail_len`.
    pub fn from_series(series: EnergySeries, cfg: &LoadcastConfig) -> Result<Self, LoadcastError> {
        Self::finish(series, "in-memory series".to_string(), cfg.forecast_tail_len)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "loadcast_core::store::read_csv",
            skip(reader, cfg, source_name),
            fields(source = %source_name),
        )
    )]
    fn read_csv<R: Read>(
        reader: R,
        source_name: String,
        cfg: &LoadcastConfig,
    ) -> Result<Self, LoadcastError> {
        cfg.validate()?;
        let fail = |msg: String| LoadcastError::data_load(&source_name, msg);

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers().map_err(|e| fail(e.to_string()))?.clone();
        let cols = ColumnIndices::resolve(&headers, &cfg.columns).map_err(fail)?;

        let mut records: Vec<EnergyRecord> = Vec::new();
        for (i, row) in rdr.records().enumerate() {
            let row = row.map_err(|e| fail(e.to_string()))?;
            // Line 1 is the header.
            let line = i + 2;
            records.push(cols.parse_row(&row, line, &cfg.columns).map_err(fail)?);
        }

        if cfg.sort_on_load {
            records.sort_by_key(|r| r.ts);
        }
        let series = EnergySeries::with_source(&source_name, records)?;
        Self::finish(series, source_name, cfg.forecast_tail_len)
    }

    fn finish(
        series: EnergySeries,
        source_name: String,
        tail_len: usize,
    ) -> Result<Self, LoadcastError> {
        let store_err = |msg: String| LoadcastError::data_load(&source_name, msg);
        if series.len() < tail_len.max(1) {
            return Err(store_err(format!(
                "series has {} rows but the forecast tail needs {}",
                series.len(),
                tail_len.max(1)
            )));
        }
        let bounds = series
            .index_bounds()
            .ok_or_else(|| store_err("series is empty".into()))?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            source = %source_name,
            rows = series.len(),
            first = %bounds.0,
            last = %bounds.1,
            "loaded energy series"
        );

        Ok(Self {
            series: Arc::new(series),
            bounds,
            source_name,
        })
    }

    /// Check that the held series can carry a forecast tail of `tail_len` points.
    ///
    /// # Errors
    /// Returns `DataLoad` if the series is too short.
    pub fn ensure_tail(&self, tail_len: usize) -> Result<(), LoadcastError> {
        if self.series.len() < tail_len {
            return Err(LoadcastError::data_load(
                &self.source_name,
                format!(
                    "series has {} rows but the forecast tail needs {tail_len}",
                    self.series.len()
                ),
            ));
        }
        Ok(())
    }

    /// The held series.
    #[must_use]
    pub fn series(&self) -> &EnergySeries {
        &self.series
    }

    /// Shared handle to the held series.
    #[must_use]
    pub fn shared(&self) -> Arc<EnergySeries> {
        Arc::clone(&self.series)
    }

    /// Label of the source the series was read from.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True if the series is empty; never the case for a loaded store.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// `(min_timestamp, max_timestamp)` of the series.
    #[must_use]
    pub const fn index_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        self.bounds
    }

    /// Index of the first forecast-tail point, or `None` if the series is
    /// shorter than `tail_len` or the tail is empty.
    #[must_use]
    pub fn forecast_boundary(&self, tail_len: usize) -> Option<usize> {
        self.series
            .len()
            .checked_sub(tail_len)
            .filter(|&i| i < self.series.len())
    }

    /// Initial control values: the full date range, the picker opened on the
    /// first month, and a start `lookback` before the last timestamp with no
    /// forecast revealed.
    ///
    /// The preselected start is clamped to the first timestamp for short series.
    #[must_use]
    pub fn control_defaults(&self, lookback: TimeDelta) -> ControlDefaults {
        let (min_ts, max_ts) = self.bounds;
        let start = max_ts
            .checked_sub_signed(lookback)
            .map_or(min_ts, |s| s.max(min_ts));
        ControlDefaults {
            min_date: min_ts.date_naive(),
            max_date: max_ts.date_naive(),
            initial_visible_month: min_ts.date_naive(),
            date: start.date_naive(),
            hour: start.hour(),
            horizon: 0,
        }
    }
}

/// Positions of the configured columns within a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    time: usize,
    actual_load: usize,
    forecast: usize,
    upper_bound: usize,
    lower_bound: usize,
}

impl ColumnIndices {
    fn resolve(headers: &csv::StringRecord, columns: &ColumnMap) -> Result<Self, String> {
        let find = |name: &str| -> Result<usize, String> {
            headers
                .iter()
                .position(|h| h == name)
                .or_else(|| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
                .ok_or_else(|| format!("missing required column '{name}'"))
        };
        Ok(Self {
            time: find(&columns.time)?,
            actual_load: find(&columns.actual_load)?,
            forecast: find(&columns.forecast)?,
            upper_bound: find(&columns.upper_bound)?,
            lower_bound: find(&columns.lower_bound)?,
        })
    }

    fn parse_row(
        &self,
        row: &csv::StringRecord,
        line: usize,
        columns: &ColumnMap,
    ) -> Result<EnergyRecord, String> {
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let ts = parse_timestamp(cell(self.time))
            .ok_or_else(|| format!("line {line}: unparseable timestamp '{}'", cell(self.time)))?;
        let value = |idx: usize, name: &str| {
            parse_value(cell(idx)).map_err(|raw| {
                format!(
                    "line {line}: column '{name}' has non-finite or non-numeric value '{raw}'"
                )
            })
        };
        Ok(EnergyRecord {
            ts,
            actual_load: value(self.actual_load, &columns.actual_load)?,
            forecast: value(self.forecast, &columns.forecast)?,
            upper_bound: value(self.upper_bound, &columns.upper_bound)?,
            lower_bound: value(self.lower_bound, &columns.lower_bound)?,
        })
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// RFC 3339 (converted to UTC) or a naive `YYYY-MM-DD HH:MM[:SS]` read as UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Empty and NaN-like cells are missing; anything else must be a finite number.
fn parse_value(s: &str) -> Result<Option<f64>, &str> {
    const MISSING: [&str; 4] = ["nan", "na", "null", "none"];
    if s.is_empty() || MISSING.iter().any(|m| s.eq_ignore_ascii_case(m)) {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_in_common_layouts() {
        let expected = DateTime::from_timestamp(1_577_836_800, 0).unwrap();
        for s in [
            "2020-01-01T00:00:00Z",
            "2020-01-01T01:00:00+01:00",
            "2020-01-01 00:00:00",
            "2020-01-01T00:00:00",
            "2020-01-01 00:00",
        ] {
            assert_eq!(parse_timestamp(s), Some(expected), "{s}");
        }
        assert_eq!(parse_timestamp("01/01/2020"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn values_and_missing_markers() {
        assert_eq!(parse_value("6012.5"), Ok(Some(6012.5)));
        assert_eq!(parse_value("-1e3"), Ok(Some(-1000.0)));
        for missing in ["", "NaN", "nan", "NA", "null"] {
            assert_eq!(parse_value(missing), Ok(None), "{missing}");
        }
        assert_eq!(parse_value("12kW"), Err("12kW"));
        for infinite in ["inf", "-inf", "Infinity", "1e400"] {
            assert_eq!(parse_value(infinite), Err(infinite), "{infinite}");
        }
    }

    #[test]
    fn header_lookup_falls_back_to_case_insensitive() {
        let headers = csv::StringRecord::from(vec![
            "TIME",
            "at_load_actual_entsoe_transparency",
            "Forecast",
            "Upper bound",
            "Lower bound",
        ]);
        let idx = ColumnIndices::resolve(&headers, &ColumnMap::default()).unwrap();
        assert_eq!(
            (idx.time, idx.actual_load, idx.forecast, idx.upper_bound, idx.lower_bound),
            (0, 1, 2, 3, 4)
        );
    }

    #[test]
    fn missing_header_is_named() {
        let headers = csv::StringRecord::from(vec!["time", "forecast"]);
        let err = ColumnIndices::resolve(&headers, &ColumnMap::default()).unwrap_err();
        assert!(err.contains("AT_load_actual_entsoe_transparency"), "{err}");
    }
}
