//! Pan and zoom ranges for the chart, and the query parameters that encode them.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::diti::{self, Diti, DitiPart};
use crate::{GostergeError, TimeRange};

/// Query parameter carrying the start of a range.
pub const FROM_PARAM: &str = "fDiti";
/// Query parameter carrying the end of a range.
pub const TO_PARAM: &str = "tDiti";
/// Narrowest zoom-in window, in hours, unless the current window is already narrower.
pub const DEFAULT_MIN_ZOOM_SPAN_HOURS: i64 = 1;

/// The four ranges reachable from the current chart window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartActions {
    /// Both ends moved back by one step.
    pub prev: TimeRange,
    /// Both ends moved forward by one step.
    pub next: TimeRange,
    /// Window narrowed by one step on each side.
    pub zoom_in: TimeRange,
    /// Window widened by one step on each side.
    pub zoom_out: TimeRange,
}

impl ChartActions {
    /// `fDiti=..&tDiti=..` for the previous window.
    #[must_use]
    pub fn prev_params(&self) -> String {
        query_params(&self.prev)
    }

    /// `fDiti=..&tDiti=..` for the next window.
    #[must_use]
    pub fn next_params(&self) -> String {
        query_params(&self.next)
    }

    /// `fDiti=..&tDiti=..` for the zoomed-in window.
    #[must_use]
    pub fn zoom_in_params(&self) -> String {
        query_params(&self.zoom_in)
    }

    /// `fDiti=..&tDiti=..` for the zoomed-out window.
    #[must_use]
    pub fn zoom_out_params(&self) -> String {
        query_params(&self.zoom_out)
    }
}

/// Percent-encoded `fDiti=<from>&tDiti=<to>` for a range.
///
/// ```
/// use gosterge_core::{TimeRange, navigation};
/// let at = |s| chrono::DateTime::parse_from_rfc3339(s).unwrap();
/// let range = TimeRange::new(at("2024-01-01T00:00:00+03:00"), at("2024-01-08T00:00:00+03:00"));
/// assert_eq!(
///     navigation::query_params(&range),
///     "fDiti=2024-01-01T00%3A00%3A00%2B03%3A00&tDiti=2024-01-08T00%3A00%3A00%2B03%3A00"
/// );
/// ```
#[must_use]
pub fn query_params(range: &TimeRange) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(FROM_PARAM, &diti::format(&range.from))
        .append_pair(TO_PARAM, &diti::format(&range.to))
        .finish()
}

/// Default step for a window: a quarter of its span in whole hours.
#[must_use]
pub fn step_hours(range: &TimeRange) -> i64 {
    diti::span_hours(range) / 4
}

/// Navigation ranges with the default minimum zoom-in span.
///
/// # Errors
/// Returns `GostergeError::InvalidInput` if a shifted endpoint is not representable.
pub fn compute_navigation(
    from: &Diti,
    to: &Diti,
    step_hours: i64,
) -> Result<ChartActions, GostergeError> {
    compute_navigation_with(from, to, step_hours, DEFAULT_MIN_ZOOM_SPAN_HOURS)
}

/// Navigation ranges shifted by `step_hours`.
///
/// A zoom-in that would leave less than `min(min_zoom_span_hours, current
/// span)` is replaced by a window of that width centred on the current
/// midpoint, so zooming never inverts a well-formed range.
///
/// # Errors
/// Returns `GostergeError::InvalidInput` if a shifted endpoint is not representable.
pub fn compute_navigation_with(
    from: &Diti,
    to: &Diti,
    step_hours: i64,
    min_zoom_span_hours: i64,
) -> Result<ChartActions, GostergeError> {
    let shift = |at: &Diti, hours: i64| diti::add(at, DitiPart::Hours, hours);
    let back = step_hours
        .checked_neg()
        .ok_or_else(|| GostergeError::invalid_input(format!("step of {step_hours} hours")))?;

    let prev = TimeRange::new(shift(from, back)?, shift(to, back)?);
    let next = TimeRange::new(shift(from, step_hours)?, shift(to, step_hours)?);
    let zoom_out = TimeRange::new(shift(from, back)?, shift(to, step_hours)?);
    let zoom_in = clamp_zoom_in(
        from,
        to,
        TimeRange::new(shift(from, step_hours)?, shift(to, back)?),
        min_zoom_span_hours,
    )?;

    Ok(ChartActions {
        prev,
        next,
        zoom_in,
        zoom_out,
    })
}

fn clamp_zoom_in(
    from: &Diti,
    to: &Diti,
    zoomed: TimeRange,
    min_span_hours: i64,
) -> Result<TimeRange, GostergeError> {
    let span = *to - *from;
    if span < TimeDelta::zero() {
        return Ok(zoomed);
    }
    let floor = TimeDelta::try_hours(min_span_hours.max(0))
        .ok_or_else(|| {
            GostergeError::invalid_input(format!("minimum zoom span of {min_span_hours} hours"))
        })?
        .min(span);
    if zoomed.to - zoomed.from >= floor {
        return Ok(zoomed);
    }
    let start = *from + span / 2 - floor / 2;
    Ok(TimeRange::new(start, start + floor))
}
