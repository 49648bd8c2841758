use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::LoadcastError;
use crate::store::SeriesStore;

/// Calendar date as delivered by a date control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    /// Already-parsed date.
    Date(NaiveDate),
    /// `YYYY-MM-DD`, optionally followed by a `T`/space time part that is ignored.
    Text(String),
}

impl DateInput {
    /// Resolve to a calendar date.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if the text is not a `YYYY-MM-DD` date.
    pub fn to_date(&self) -> Result<NaiveDate, LoadcastError> {
        match self {
            Self::Date(d) => Ok(*d),
            Self::Text(s) => parse_date_text(s),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

fn parse_date_text(raw: &str) -> Result<NaiveDate, LoadcastError> {
    let s = raw.trim();
    let date_part = s
        .split_once(['T', ' '])
        .map_or(s, |(date, _time)| date);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| LoadcastError::invalid_request(format!("unparseable date '{raw}': {e}")))
}

/// Current values of the three linked controls; any may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRequest {
    /// Start date.
    pub date: Option<DateInput>,
    /// Start hour of day.
    pub hour: Option<i64>,
    /// Forecast hours to reveal.
    pub horizon: Option<i64>,
}

impl RawRequest {
    /// Request with every control unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date control.
    #[must_use]
    pub fn date(mut self, date: impl Into<DateInput>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the hour control.
    #[must_use]
    pub const fn hour(mut self, hour: i64) -> Self {
        self.hour = Some(hour);
        self
    }

    /// Set the horizon control.
    #[must_use]
    pub const fn horizon(mut self, horizon: i64) -> Self {
        self.horizon = Some(horizon);
        self
    }
}

/// Canonical request: show from `start` through the boundary plus `horizon` hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowRequest {
    /// First instant to display.
    pub start: DateTime<Utc>,
    /// Forecast hours revealed past the historical/forecast boundary.
    pub horizon: usize,
}

/// Result of validating a `RawRequest`.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// At least one control is unset; nothing is computed.
    Incomplete,
    /// All controls set and in range.
    Valid(WindowRequest),
    /// All controls set but rejected; carries an `InvalidRequest` error.
    Invalid(LoadcastError),
}

impl Request {
    /// The canonical request, if valid.
    #[must_use]
    pub const fn valid(&self) -> Option<&WindowRequest> {
        match self {
            Self::Valid(r) => Some(r),
            _ => None,
        }
    }

    /// True if some control was unset.
    #[must_use]
    pub const fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete)
    }
}

/// Normalizes control values into a `WindowRequest`.
///
/// Start instants are built as `date + hour:00:00` in UTC and must fall inside
/// the store's index bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestValidator {
    min_ts: DateTime<Utc>,
    max_ts: DateTime<Utc>,
    max_horizon: usize,
}

impl RequestValidator {
    /// Validator accepting starts within `[min_ts, max_ts]` and horizons up to `max_horizon`.
    #[must_use]
    pub const fn new(min_ts: DateTime<Utc>, max_ts: DateTime<Utc>, max_horizon: usize) -> Self {
        Self {
            min_ts,
            max_ts,
            max_horizon,
        }
    }

    /// Validator for the bounds of `store`.
    #[must_use]
    pub fn for_store(store: &SeriesStore, max_horizon: usize) -> Self {
        let (min_ts, max_ts) = store.index_bounds();
        Self::new(min_ts, max_ts, max_horizon)
    }

    /// Validate the three control values.
    ///
    /// Partial input is not an error: it yields `Request::Incomplete`.
    #[must_use]
    pub fn validate(&self, raw: &RawRequest) -> Request {
        let (Some(date), Some(hour), Some(horizon)) = (&raw.date, raw.hour, raw.horizon) else {
            return Request::Incomplete;
        };
        match self.canonicalize(date, hour, horizon) {
            Ok(req) => Request::Valid(req),
            Err(e) => Request::Invalid(e),
        }
    }

    fn canonicalize(
        &self,
        date: &DateInput,
        hour: i64,
        horizon: i64,
    ) -> Result<WindowRequest, LoadcastError> {
        let date = date.to_date()?;
        let hour_of_day = u32::try_from(hour)
            .ok()
            .filter(|h| *h <= 23)
            .ok_or_else(|| LoadcastError::invalid_request(format!("hour {hour} outside 0..=23")))?;
        let start = date
            .and_hms_opt(hour_of_day, 0, 0)
            .ok_or_else(|| {
                LoadcastError::invalid_request(format!("invalid start {date} {hour}:00"))
            })?
            .and_utc();

        if start < self.min_ts || start > self.max_ts {
            return Err(LoadcastError::invalid_request(format!(
                "start {start} outside series bounds {}..={}",
                self.min_ts, self.max_ts
            )));
        }

        let horizon = usize::try_from(horizon)
            .ok()
            .filter(|h| *h <= self.max_horizon)
            .ok_or_else(|| {
                LoadcastError::invalid_request(format!(
                    "horizon {horizon} outside 0..={}",
                    self.max_horizon
                ))
            })?;

        Ok(WindowRequest { start, horizon })
    }
}
