use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TimeRange;

/// Unified error type for the gosterge workspace.
///
/// `NoData` is the expected business outcome for ranges that yield nothing
/// usable; the remaining variants describe bad input or source failures that
/// are propagated unchanged to the caller.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GostergeError {
    /// The requested range and resolution produced zero usable rows.
    #[error("No data found between {range}")]
    NoData {
        /// The range originally requested by the caller.
        range: TimeRange,
    },

    /// Malformed input (instant strings, symbol codes, tags, overflowing arithmetic).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Issues with the returned or expected data.
    #[error("data issue: {0}")]
    Data(String),

    /// A data source returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "history for GC=F".
        what: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl GostergeError {
    /// Helper: build a `NoData` error for the originally requested range.
    #[must_use]
    pub const fn no_data(range: TimeRange) -> Self {
        Self::NoData { range }
    }

    /// Helper: build an `InvalidInput` error from any message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Returns true for the "no data for this range" outcome.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }

    /// Returns true if the error stems from caller input rather than the source.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
