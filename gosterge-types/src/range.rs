use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A pair of offset-aware instants bounding a chart window.
///
/// `from <= to` is not enforced here; consumers treat an inverted range as
/// a range without data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive start.
    pub from: DateTime<FixedOffset>,
    /// Exclusive end when used for fetching.
    pub to: DateTime<FixedOffset>,
}

impl TimeRange {
    /// Build a range from its two endpoints.
    #[must_use]
    pub const fn new(from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> Self {
        Self { from, to }
    }

    /// True when `from` lies after `to`.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.from > self.to
    }

    /// Start as a UTC instant.
    #[must_use]
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.from.with_timezone(&Utc)
    }

    /// End as a UTC instant.
    #[must_use]
    pub fn end_utc(&self) -> DateTime<Utc> {
        self.to.with_timezone(&Utc)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] - [{}]",
            self.from.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            self.to.to_rfc3339_opts(SecondsFormat::AutoSi, false)
        )
    }
}
