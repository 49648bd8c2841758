//! Deterministic synthetic energy series for tests and demos.
//!
//! The generated series mimics the real input: an hourly history with a daily
//! and weekly demand cycle, a short stretch of in-sample forecast fit right
//! before the boundary, and a trailing forecast block with a widening band and
//! no measured load.

use std::f64::consts::TAU;

use chrono::{DateTime, SecondsFormat, TimeDelta, Timelike, Utc};
use loadcast_core::{
    ColumnMap, EnergyRecord, EnergySeries, FORECAST_TAIL_LEN, LoadcastConfig, LoadcastError,
    SeriesStore,
};

/// 2020-01-01T00:00:00Z, the default first timestamp.
#[must_use]
pub fn default_start() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::hours(438_288)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Builder for a synthetic series of `len` hourly records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSeries {
    start: DateTime<Utc>,
    len: usize,
    tail_len: usize,
    fitted_history: usize,
}

impl MockSeries {
    /// `len` records from [`default_start`], a 120-point forecast tail, and 24
    /// fitted history points.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            start: default_start(),
            len,
            tail_len: FORECAST_TAIL_LEN,
            fitted_history: 24,
        }
    }

    /// First timestamp.
    #[must_use]
    pub const fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = start;
        self
    }

    /// Length of the forecast block at the end of the series.
    #[must_use]
    pub const fn tail_len(mut self, tail_len: usize) -> Self {
        self.tail_len = tail_len;
        self
    }

    /// Number of history points right before the boundary that also carry a
    /// forecast and band.
    #[must_use]
    pub const fn fitted_history(mut self, n: usize) -> Self {
        self.fitted_history = n;
        self
    }

    /// Index of the first forecast-only record.
    #[must_use]
    pub const fn boundary(&self) -> usize {
        self.len.saturating_sub(self.tail_len)
    }

    /// Timestamp of record `i`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn ts_at(&self, i: usize) -> DateTime<Utc> {
        self.start + TimeDelta::hours(i as i64)
    }

    fn demand(ts: DateTime<Utc>) -> f64 {
        let hour = f64::from(ts.hour());
        let day = (ts.timestamp().div_euclid(86_400)).rem_euclid(7) as f64;
        round1(6000.0 + 1500.0 * (TAU * hour / 24.0).sin() + 300.0 * (TAU * day / 7.0).sin())
    }

    /// Record `i` of the series.
    #[must_use]
    pub fn record(&self, i: usize) -> EnergyRecord {
        let ts = self.ts_at(i);
        let demand = Self::demand(ts);
        let forecast = round1(demand * 0.98);
        let boundary = self.boundary();

        if i >= boundary {
            let band = 150.0 + 5.0 * (i - boundary) as f64;
            return EnergyRecord {
                ts,
                actual_load: None,
                forecast: Some(forecast),
                upper_bound: Some(round1(forecast + band)),
                lower_bound: Some(round1(forecast - band)),
            };
        }
        let fitted = i + self.fitted_history >= boundary;
        EnergyRecord {
            ts,
            actual_load: Some(demand),
            forecast: fitted.then_some(forecast),
            upper_bound: fitted.then_some(round1(forecast + 150.0)),
            lower_bound: fitted.then_some(round1(forecast - 150.0)),
        }
    }

    /// All records in order.
    #[must_use]
    pub fn records(&self) -> Vec<EnergyRecord> {
        (0..self.len).map(|i| self.record(i)).collect()
    }

    /// Build the validated series.
    ///
    /// # Errors
    /// Never fails for generated data; the `Result` mirrors `EnergySeries::new`.
    pub fn build(&self) -> Result<EnergySeries, LoadcastError> {
        EnergySeries::new(self.records())
    }

    /// Build a store around the series, using `cfg` for the tail check.
    ///
    /// # Errors
    /// Returns `DataLoad` if `len` is shorter than `cfg.forecast_tail_len`.
    pub fn store(&self, cfg: &LoadcastConfig) -> Result<SeriesStore, LoadcastError> {
        SeriesStore::from_series(self.build()?, cfg)
    }

    /// Render the series as CSV with the given headers, timestamps in RFC 3339
    /// and missing values as empty cells.
    ///
    /// # Errors
    /// Returns `Other` if the CSV writer fails.
    pub fn to_csv(&self, columns: &ColumnMap) -> Result<String, LoadcastError> {
        let other = |e: &dyn std::fmt::Display| LoadcastError::Other(e.to_string());
        let fmt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();

        let mut w = csv::Writer::from_writer(Vec::new());
        w.write_record(columns.names()).map_err(|e| other(&e))?;
        for r in self.records() {
            w.write_record([
                r.ts.to_rfc3339_opts(SecondsFormat::Secs, true),
                fmt(r.actual_load),
                fmt(r.forecast),
                fmt(r.upper_bound),
                fmt(r.lower_bound),
            ])
            .map_err(|e| other(&e))?;
        }
        let bytes = w.into_inner().map_err(|e| other(&e))?;
        String::from_utf8(bytes).map_err(|e| other(&e))
    }
}
