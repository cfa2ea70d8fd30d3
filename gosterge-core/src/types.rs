//! Re-export of foundational types from `gosterge-types`.
// Consolidated re-exports so downstream crates can depend on `gosterge-core` only

pub use gosterge_types::{DashboardConfig, Field, GostergeError, Resolution, TimeRange};
