use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::LoadcastError;
use crate::timeseries::infer::{first_irregular_step, modal_step_seconds};

const HOUR_SECONDS: i64 = 3600;

/// One of the four value columns carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesRole {
    /// Measured demand.
    Actual,
    /// Point forecast.
    Forecast,
    /// Upper edge of the confidence band.
    UpperBound,
    /// Lower edge of the confidence band.
    LowerBound,
}

impl SeriesRole {
    /// All roles in draw order.
    pub const ALL: [Self; 4] = [
        Self::Actual,
        Self::Forecast,
        Self::UpperBound,
        Self::LowerBound,
    ];
}

/// A single hourly row. `None` marks a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    /// Hour this row describes.
    pub ts: DateTime<Utc>,
    /// Measured demand; absent for forecast-only hours.
    pub actual_load: Option<f64>,
    /// Point forecast.
    pub forecast: Option<f64>,
    /// Upper edge of the confidence band.
    pub upper_bound: Option<f64>,
    /// Lower edge of the confidence band.
    pub lower_bound: Option<f64>,
}

impl EnergyRecord {
    /// Value of the given column.
    #[must_use]
    pub const fn value(&self, role: SeriesRole) -> Option<f64> {
        match role {
            SeriesRole::Actual => self.actual_load,
            SeriesRole::Forecast => self.forecast,
            SeriesRole::UpperBound => self.upper_bound,
            SeriesRole::LowerBound => self.lower_bound,
        }
    }
}

/// Gap-free hourly series, strictly increasing by timestamp.
///
/// The invariant is checked once at construction; the series cannot be
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergySeries {
    records: Vec<EnergyRecord>,
}

impl EnergySeries {
    /// Build a series from records already in timestamp order.
    ///
    /// # Errors
    /// Returns `DataLoad` if timestamps are duplicated, decreasing, or not
    /// exactly one hour apart.
    pub fn new(records: Vec<EnergyRecord>) -> Result<Self, LoadcastError> {
        Self::with_source("in-memory series", records)
    }

    pub(crate) fn with_source(
        source_name: &str,
        records: Vec<EnergyRecord>,
    ) -> Result<Self, LoadcastError> {
        let ts: Vec<DateTime<Utc>> = records.iter().map(|r| r.ts).collect();
        if let Some(i) = first_irregular_step(&ts, HOUR_SECONDS) {
            let (prev, next) = (ts[i], ts[i + 1]);
            let delta: TimeDelta = next - prev;
            let msg = if delta == TimeDelta::zero() {
                format!("duplicate timestamp {next} at indices {i} and {}", i + 1)
            } else if delta < TimeDelta::zero() {
                format!("timestamps decrease from {prev} to {next} at index {}", i + 1)
            } else {
                let cadence = modal_step_seconds(&ts)
                    .map_or_else(|| "unknown".to_string(), |s| format!("{s}s"));
                format!(
                    "expected hourly steps but found {}s between {prev} and {next} \
                     (inferred cadence {cadence})",
                    delta.num_seconds()
                )
            };
            return Err(LoadcastError::data_load(source_name, msg));
        }
        Ok(Self { records })
    }

    /// Number of records (`L`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the series holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in timestamp order.
    #[must_use]
    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    /// Record at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EnergyRecord> {
        self.records.get(index)
    }

    /// First timestamp, if any.
    #[must_use]
    pub fn first_ts(&self) -> Option<DateTime<Utc>> {
        self.records.first().map(|r| r.ts)
    }

    /// Last timestamp, if any.
    #[must_use]
    pub fn last_ts(&self) -> Option<DateTime<Utc>> {
        self.records.last().map(|r| r.ts)
    }

    /// `(first, last)` timestamps, or `None` for an empty series.
    #[must_use]
    pub fn index_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.first_ts()?, self.last_ts()?))
    }

    /// Smallest index whose timestamp is `>= start`; `len()` if none.
    #[must_use]
    pub fn lower_bound_index(&self, start: DateTime<Utc>) -> usize {
        self.records.partition_point(|r| r.ts < start)
    }
}
