//! Re-export of foundational types from `loadcast-types`.
// Consolidated re-exports so downstream crates can depend on `loadcast-core` only

pub use loadcast_types::{ColumnMap, LoadcastConfig, LoadcastError};
pub use loadcast_types::{FORECAST_TAIL_LEN, MAX_HORIZON};
