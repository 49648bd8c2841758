use loadcast_types::LoadcastError;

use crate::chart::{ChartState, Update};

/// What one front end is currently showing.
///
/// `Unchanged` and `Rejected` updates leave the display alone; `Render`
/// replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplaySession {
    current: Option<ChartState>,
    rejected: usize,
    last_rejection: Option<LoadcastError>,
}

impl DisplaySession {
    /// Session with nothing drawn yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an update and return the state now on display.
    pub fn apply(&mut self, update: Update) -> Option<&ChartState> {
        match update {
            Update::Unchanged => {}
            Update::Rejected(e) => {
                self.rejected += 1;
                self.last_rejection = Some(e);
            }
            Update::Render(state) => {
                self.current = Some(state);
                self.last_rejection = None;
            }
        }
        self.current.as_ref()
    }

    /// State on display, if anything has been rendered.
    #[must_use]
    pub const fn current(&self) -> Option<&ChartState> {
        self.current.as_ref()
    }

    /// Number of rejected requests so far.
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.rejected
    }

    /// Reason for the most recent rejection since the last render.
    #[must_use]
    pub const fn last_rejection(&self) -> Option<&LoadcastError> {
        self.last_rejection.as_ref()
    }
}
