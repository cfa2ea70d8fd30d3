use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GostergeError;

/// Spans strictly longer than this many hours are charted with daily bars.
pub(crate) const DAILY_ABOVE_HOURS: i64 = 8 * 24;
/// Spans strictly longer than this many hours (and not daily) use hourly bars.
pub(crate) const HOURLY_ABOVE_HOURS: i64 = 2 * 24;

/// Sampling granularity at which raw observations are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// One bar per trading day, passed through as returned by the source.
    #[serde(rename = "1d")]
    Daily,
    /// Hourly buckets.
    #[serde(rename = "1h")]
    Hourly,
    /// Fifteen-minute buckets.
    #[serde(rename = "15m")]
    FifteenMinutes,
}

impl Resolution {
    /// Select the bucket for a span expressed in whole hours.
    ///
    /// ```
    /// use gosterge_types::Resolution;
    /// assert_eq!(Resolution::for_span_hours(200), Resolution::Daily);
    /// assert_eq!(Resolution::for_span_hours(192), Resolution::Hourly);
    /// assert_eq!(Resolution::for_span_hours(48), Resolution::FifteenMinutes);
    /// ```
    #[must_use]
    pub const fn for_span_hours(span_hours: i64) -> Self {
        if span_hours > DAILY_ABOVE_HOURS {
            Self::Daily
        } else if span_hours > HOURLY_ABOVE_HOURS {
            Self::Hourly
        } else {
            Self::FifteenMinutes
        }
    }

    /// Canonical short tag ("1d", "1h", "15m").
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Daily => "1d",
            Self::Hourly => "1h",
            Self::FifteenMinutes => "15m",
        }
    }

    /// Bucket width in minutes for intraday resolutions; `None` for daily.
    #[must_use]
    pub const fn minutes(self) -> Option<i64> {
        match self {
            Self::Daily => None,
            Self::Hourly => Some(60),
            Self::FifteenMinutes => Some(15),
        }
    }

    /// Width of the bucket rows are averaged into after fetching.
    ///
    /// Daily rows collapse onto their UTC calendar day, so symbols whose
    /// sessions open at different hours share a row.
    #[must_use]
    pub const fn bucket_minutes(self) -> i64 {
        match self.minutes() {
            Some(m) => m,
            None => 24 * 60,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Resolution {
    type Err = GostergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1d" => Ok(Self::Daily),
            "1h" => Ok(Self::Hourly),
            "15m" => Ok(Self::FifteenMinutes),
            other => Err(GostergeError::invalid_input(format!(
                "unknown resolution tag '{other}'"
            ))),
        }
    }
}
