use std::path::PathBuf;

use chrono::TimeDelta;

use loadcast_core::{
    ControlDefaults, RawRequest, Request, RequestValidator, Selection, SeriesStore,
    WindowRequest, WindowSelector, align,
};
use loadcast_types::{ColumnMap, LoadcastConfig, LoadcastError};

use crate::chart::{ChartState, Figure, Update};

/// Request pipeline over one immutable series.
///
/// Holds the store, the validator bound to its index, and the window
/// selector. All methods take `&self`; a `Dashboard` can be shared across
/// threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: SeriesStore,
    cfg: LoadcastConfig,
    selector: WindowSelector,
    validator: RequestValidator,
}

/// Builder for constructing a `Dashboard` with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct DashboardBuilder {
    store: Option<SeriesStore>,
    cfg: LoadcastConfig,
}

impl DashboardBuilder {
    /// Create a new builder with default configuration and no data source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already-loaded store instead of reading `data_path`.
    #[must_use]
    pub fn store(mut self, store: SeriesStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the whole configuration.
    ///
    /// Modifiers called afterwards still apply on top of it.
    #[must_use]
    pub fn config(mut self, cfg: LoadcastConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// CSV file to load when no store is supplied.
    #[must_use]
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cfg.data_path = Some(path.into());
        self
    }

    /// Column names to read from the CSV header.
    #[must_use]
    pub fn columns(mut self, columns: ColumnMap) -> Self {
        self.cfg.columns = columns;
        self
    }

    /// Number of trailing forecast points.
    #[must_use]
    pub const fn forecast_tail_len(mut self, n: usize) -> Self {
        self.cfg.forecast_tail_len = n;
        self
    }

    /// How far before the last timestamp the initial start is placed.
    #[must_use]
    pub const fn default_lookback_hours(mut self, hours: u32) -> Self {
        self.cfg.default_lookback_hours = hours;
        self
    }

    /// Sort rows by timestamp after reading instead of rejecting disorder.
    #[must_use]
    pub const fn sort_on_load(mut self, yes: bool) -> Self {
        self.cfg.sort_on_load = yes;
        self
    }

    /// Build the `Dashboard`, loading the series if no store was supplied.
    ///
    /// # Errors
    /// - `Config` if the configuration is invalid, or if neither a store nor a
    ///   `data_path` was provided.
    /// - `DataLoad` if the CSV cannot be loaded or the store is shorter than
    ///   the forecast tail.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "loadcast::core::build",
            skip(self),
            fields(
                tail_len = self.cfg.forecast_tail_len,
                preloaded = self.store.is_some(),
            ),
        )
    )]
    pub fn build(self) -> Result<Dashboard, LoadcastError> {
        self.cfg.validate()?;
        let store = match self.store {
            Some(store) => store,
            None if self.cfg.data_path.is_some() => SeriesStore::load(&self.cfg)?,
            None => {
                return Err(LoadcastError::Config(
                    "no data source; supply a store or a data_path".into(),
                ));
            }
        };
        store.ensure_tail(self.cfg.forecast_tail_len)?;

        let selector = WindowSelector::new(self.cfg.forecast_tail_len);
        let validator = RequestValidator::for_store(&store, selector.max_horizon());
        Ok(Dashboard {
            store,
            cfg: self.cfg,
            selector,
            validator,
        })
    }
}

impl Dashboard {
    /// Start building a new `Dashboard`.
    ///
    /// ```rust,ignore
    /// let dashboard = loadcast::Dashboard::builder()
    ///     .data_path("datos_energia.csv")
    ///     .sort_on_load(true)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::new()
    }

    /// The held store.
    #[must_use]
    pub const fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &LoadcastConfig {
        &self.cfg
    }

    /// Largest horizon a request may ask for.
    #[must_use]
    pub const fn max_horizon(&self) -> usize {
        self.selector.max_horizon()
    }

    /// Initial values for the date, hour, and horizon controls.
    #[must_use]
    pub fn control_defaults(&self) -> ControlDefaults {
        self.store
            .control_defaults(TimeDelta::hours(i64::from(self.cfg.default_lookback_hours)))
    }

    /// Check raw control values against the series bounds.
    #[must_use]
    pub fn validate(&self, raw: &RawRequest) -> Request {
        self.validator.validate(raw)
    }

    /// Resolve a canonical request to index bounds.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the start lies after the last timestamp and
    /// `InvalidRequest` if the horizon exceeds [`Dashboard::max_horizon`].
    pub fn select(&self, req: &WindowRequest) -> Result<Selection, LoadcastError> {
        self.selector.select(self.store.series(), req)
    }

    /// Select and align the window for `req`.
    ///
    /// Never fails: errors become `ChartState::Error`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "loadcast::core::render",
            skip(self),
            fields(start = %req.start, horizon = req.horizon),
        )
    )]
    #[must_use]
    pub fn render(&self, req: &WindowRequest) -> ChartState {
        let selected = self.select(req).and_then(|sel| match sel {
            Selection::Window(w) => {
                align(self.store.series(), &w).map(|data| ChartState::Chart(Figure::new(w, data)))
            }
            Selection::Empty(e) => Ok(ChartState::Empty(e)),
        });
        match selected {
            Ok(state) => state,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, "request could not be rendered");
                ChartState::Error(e)
            }
        }
    }

    /// Run raw control values through validation, selection, and alignment.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "loadcast::core::update", skip(self, raw))
    )]
    #[must_use]
    pub fn update(&self, raw: &RawRequest) -> Update {
        match self.validate(raw) {
            Request::Incomplete => Update::Unchanged,
            Request::Invalid(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %e, "ignoring invalid request");
                Update::Rejected(e)
            }
            Request::Valid(req) => Update::Render(self.render(&req)),
        }
    }
}
