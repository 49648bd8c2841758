use std::ops::RangeInclusive;

use serde::Serialize;

use crate::request::WindowRequest;
use crate::series::EnergySeries;
use crate::{FORECAST_TAIL_LEN, LoadcastError};

/// Inclusive index bounds into an `EnergySeries`; never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DisplayWindow {
    first_index: usize,
    last_index: usize,
}

impl DisplayWindow {
    /// Build a window, or `None` if `first_index > last_index`.
    #[must_use]
    pub const fn new(first_index: usize, last_index: usize) -> Option<Self> {
        if first_index > last_index {
            return None;
        }
        Some(Self {
            first_index,
            last_index,
        })
    }

    /// First index shown.
    #[must_use]
    pub const fn first_index(&self) -> usize {
        self.first_index
    }

    /// Last index shown (inclusive).
    #[must_use]
    pub const fn last_index(&self) -> usize {
        self.last_index
    }

    /// Number of points in the window (always at least 1).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.last_index - self.first_index + 1
    }

    /// Index range as a `RangeInclusive`, ready for slicing.
    #[must_use]
    pub const fn range(&self) -> RangeInclusive<usize> {
        self.first_index..=self.last_index
    }
}

/// A well-formed request whose start lies past the visible boundary.
///
/// Not an error: the renderer decides how to draw it (usually a blank chart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EmptyWindow {
    /// First index at or after the requested start.
    pub first_index: usize,
    /// Last visible index for the requested horizon; `None` if the horizon
    /// hides the entire series.
    pub boundary_index: Option<usize>,
}

/// Outcome of window selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Selection {
    /// Non-empty range to display.
    Window(DisplayWindow),
    /// Nothing to display for this request.
    Empty(EmptyWindow),
}

impl Selection {
    /// The display window, if non-empty.
    #[must_use]
    pub const fn window(&self) -> Option<DisplayWindow> {
        match self {
            Self::Window(w) => Some(*w),
            Self::Empty(_) => None,
        }
    }

    /// True for the empty outcome.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

/// Resolves a `WindowRequest` into index bounds over a forecast-tailed series.
///
/// The last `tail_len` points of the series are the forecast block. A request
/// with horizon `h` hides the most recent `tail_len - h` points, so `h = 0`
/// stops at the historical/forecast boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSelector {
    tail_len: usize,
}

impl Default for WindowSelector {
    fn default() -> Self {
        Self::new(FORECAST_TAIL_LEN)
    }
}

impl WindowSelector {
    /// Selector for a series whose forecast tail has `tail_len` points.
    #[must_use]
    pub const fn new(tail_len: usize) -> Self {
        Self { tail_len }
    }

    /// Forecast tail length.
    #[must_use]
    pub const fn tail_len(&self) -> usize {
        self.tail_len
    }

    /// Largest accepted horizon.
    #[must_use]
    pub const fn max_horizon(&self) -> usize {
        self.tail_len.saturating_sub(1)
    }

    /// Compute the display range for `req`.
    ///
    /// `first_index` is the first record at or after `req.start` (binary
    /// search); `last_index = L - 1 - (tail_len - horizon)`. When the start
    /// falls inside the hidden tail, the result is `Selection::Empty`.
    ///
    /// # Errors
    /// - `InternalInvariant` if the series is shorter than the forecast tail.
    /// - `InvalidRequest` if the horizon exceeds [`max_horizon`](Self::max_horizon).
    /// - `OutOfRange` if `req.start` is after the last timestamp.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "loadcast_core::window::select",
            level = "trace",
            skip(self, series),
            fields(len = series.len(), start = %req.start, horizon = req.horizon),
        )
    )]
    pub fn select(
        &self,
        series: &EnergySeries,
        req: &WindowRequest,
    ) -> Result<Selection, LoadcastError> {
        let len = series.len();
        if len < self.tail_len || len == 0 {
            return Err(LoadcastError::internal(format!(
                "series has {len} points but the forecast tail needs {}",
                self.tail_len.max(1)
            )));
        }
        if req.horizon > self.max_horizon() {
            return Err(LoadcastError::invalid_request(format!(
                "horizon {} outside 0..={}",
                req.horizon,
                self.max_horizon()
            )));
        }

        let first_index = series.lower_bound_index(req.start);
        if first_index == len {
            let last = series.last_ts().ok_or_else(|| {
                LoadcastError::internal("non-empty series without a last timestamp")
            })?;
            return Err(LoadcastError::OutOfRange {
                start: req.start,
                last,
            });
        }

        let tail_drop = self.tail_len - req.horizon;
        let boundary_index = (len - 1).checked_sub(tail_drop);
        let visible = boundary_index.and_then(|last| DisplayWindow::new(first_index, last));
        let selection = match visible {
            Some(window) => Selection::Window(window),
            None => Selection::Empty(EmptyWindow {
                first_index,
                boundary_index,
            }),
        };

        #[cfg(feature = "tracing")]
        if let Selection::Empty(e) = &selection {
            tracing::debug!(
                first_index = e.first_index,
                boundary_index = ?e.boundary_index,
                "requested start lies inside the hidden forecast tail"
            );
        }

        Ok(selection)
    }
}

/// Select with the default 120-point forecast tail.
///
/// # Errors
/// See [`WindowSelector::select`].
pub fn select_window(
    series: &EnergySeries,
    req: &WindowRequest,
) -> Result<Selection, LoadcastError> {
    WindowSelector::default().select(series, req)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_window_rejects_inverted_bounds() {
        assert!(DisplayWindow::new(5, 4).is_none());
        let w = DisplayWindow::new(4, 4).unwrap();
        assert_eq!(w.len(), 1);
        assert_eq!(w.range(), 4..=4);
    }

    #[test]
    fn max_horizon_tracks_tail_len() {
        assert_eq!(WindowSelector::default().max_horizon(), 119);
        assert_eq!(WindowSelector::new(24).max_horizon(), 23);
        assert_eq!(WindowSelector::new(0).max_horizon(), 0);
    }

    #[test]
    fn selection_accessors() {
        let w = DisplayWindow::new(1, 3).unwrap();
        assert_eq!(Selection::Window(w).window(), Some(w));
        let e = Selection::Empty(EmptyWindow {
            first_index: 9,
            boundary_index: Some(3),
        });
        assert!(e.is_empty());
        assert!(e.window().is_none());
    }
}
