//! Gosterge-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod field;
mod range;
mod resolution;

pub use config::DashboardConfig;
pub use error::GostergeError;
pub use field::Field;
pub use range::TimeRange;
pub use resolution::Resolution;
