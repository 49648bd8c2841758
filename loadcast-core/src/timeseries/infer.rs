use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};

/// Most frequent positive step, in seconds, between sorted distinct
/// timestamps. Ties go to the smaller step.
///
/// Gap errors report it as the cadence the file appears to follow.
///
/// ```
/// use loadcast_core::modal_step_seconds;
/// use chrono::{DateTime, Utc};
///
/// fn t(sec: i64) -> DateTime<Utc> { DateTime::from_timestamp(sec, 0).unwrap() }
///
/// // Steps 3600, 3600, 3600, 7200.
/// let ts = [t(0), t(3600), t(7200), t(10_800), t(18_000)];
/// assert_eq!(modal_step_seconds(&ts), Some(3600));
///
/// // Steps 900, 900, 3600, 3600: tie.
/// let ts = [t(0), t(900), t(1800), t(5400), t(9000)];
/// assert_eq!(modal_step_seconds(&ts), Some(900));
/// ```
///
/// Returns `None` with fewer than two distinct timestamps.
#[must_use]
pub fn modal_step_seconds(timestamps: &[DateTime<Utc>]) -> Option<i64> {
    let mut ts = timestamps.to_vec();
    ts.sort_unstable();
    ts.dedup();

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for pair in ts.windows(2) {
        *counts.entry((pair[1] - pair[0]).num_seconds()).or_default() += 1;
    }
    // `max_by_key` keeps the last maximum; walk descending so that is the smallest step.
    counts
        .into_iter()
        .rev()
        .max_by_key(|&(_, n)| n)
        .map(|(step, _)| step)
}

/// Index `i` of the first adjacent pair `(ts[i], ts[i + 1])` whose delta is not
/// exactly `step_seconds`, in input order.
///
/// Duplicates (delta 0) and decreasing pairs count as irregular, so `None`
/// means the series is strictly increasing with a constant step.
#[must_use]
pub fn first_irregular_step(timestamps: &[DateTime<Utc>], step_seconds: i64) -> Option<usize> {
    let step = TimeDelta::seconds(step_seconds);
    timestamps.windows(2).position(|w| w[1] - w[0] != step)
}
