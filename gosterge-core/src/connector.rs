use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{GostergeError, ObservationTable, Resolution, TimeRange};

/// A multi-symbol history request over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRequest {
    /// Provider symbols, without duplicates.
    pub symbols: Vec<String>,
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end.
    pub end: DateTime<Utc>,
    /// Bar size asked from the provider.
    pub resolution: Resolution,
}

impl ObservationRequest {
    /// Build a request for `symbols` over `range`; duplicate symbols are dropped.
    pub fn new<I, S>(symbols: I, range: &TimeRange, resolution: Resolution) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for s in symbols {
            let s = s.into();
            if !unique.contains(&s) {
                unique.push(s);
            }
        }
        Self {
            symbols: unique,
            start: range.start_utc(),
            end: range.end_utc(),
            resolution,
        }
    }
}

/// External time-series source consumed once per request.
///
/// Implementations return whatever bars the provider has; an empty table is
/// a valid answer meaning "nothing in this range". Transport and parse
/// failures are reported as errors and propagated unchanged by the caller.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    /// Stable connector name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Fetch raw observations for every requested symbol.
    async fn observations(
        &self,
        req: &ObservationRequest,
    ) -> Result<ObservationTable, GostergeError>;
}
