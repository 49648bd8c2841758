use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the loadcast workspace.
///
/// Startup failures (`DataLoad`, `Config`) are fatal: the process cannot serve
/// without a valid series. Everything else is scoped to a single request and
/// resolves to a renderable state.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadcastError {
    /// The input table could not be read or violates the series schema.
    #[error("failed to load {source_name}: {msg}")]
    DataLoad {
        /// Path or label of the data source.
        source_name: String,
        /// Human-readable description of the failure.
        msg: String,
    },

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A complete request whose values fall outside the accepted domain.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The requested start lies after the last timestamp of the series.
    #[error("start {start} is after the last timestamp {last}")]
    OutOfRange {
        /// Requested start instant.
        start: DateTime<Utc>,
        /// Last timestamp held by the series.
        last: DateTime<Utc>,
    },

    /// A precondition the store should have guaranteed does not hold.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl LoadcastError {
    /// Helper: build a `DataLoad` error for a source label and message.
    pub fn data_load(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::DataLoad {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `InvalidRequest` error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Helper: build an `InternalInvariant` error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalInvariant(msg.into())
    }

    /// Returns true for errors that must abort startup.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::DataLoad { .. } | Self::Config(_))
    }

    /// Returns true if the request should be ignored and the previous display kept.
    ///
    /// Range and invariant failures are not in this class: they replace the
    /// display with an error state.
    #[must_use]
    pub const fn keeps_prior_display(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

impl From<serde_json::Error> for LoadcastError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
