//! Calendar arithmetic on timezone-aware instants ("diti").
//!
//! Every function is pure and generic over the chrono [`TimeZone`] of its
//! input, so the same operations serve offset-carrying query parameters
//! ([`Diti`]) and named display zones ([`chrono_tz::Tz`]).
//!
//! Fixed-length units (seconds through weeks) are absolute durations. Months
//! and years move the local wall clock and clamp the day to the target month.
//! Boundaries (`snap_to_start`/`snap_to_end`) are computed on the local wall
//! clock of the instant's own zone.

use chrono::offset::LocalResult;
use chrono::{
    DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta,
    TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{GostergeError, TimeRange};

/// An instant together with the UTC offset it was written with.
pub type Diti = DateTime<FixedOffset>;

/// Calendar unit used by the arithmetic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DitiPart {
    /// Seconds.
    Seconds,
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
    /// Days (24 hours when shifting or diffing).
    Days,
    /// Weeks starting Monday (7 days when shifting or diffing).
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

impl DitiPart {
    const fn fixed_seconds(self) -> Option<i64> {
        match self {
            Self::Seconds => Some(1),
            Self::Minutes => Some(60),
            Self::Hours => Some(3_600),
            Self::Days => Some(86_400),
            Self::Weeks => Some(7 * 86_400),
            Self::Months | Self::Years => None,
        }
    }

    const fn calendar_months(self) -> i64 {
        match self {
            Self::Years => 12,
            _ => 1,
        }
    }
}

fn out_of_range(what: &str) -> GostergeError {
    GostergeError::invalid_input(format!("{what} is outside the representable range"))
}

/// Map a local wall-clock time back to an instant in `zone`.
///
/// Ambiguous times (DST fall-back) take the earlier mapping; times inside a
/// DST gap move forward by one hour.
fn resolve_local<Z: TimeZone>(zone: &Z, naive: NaiveDateTime) -> Option<DateTime<Z>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => {
            let later = naive.checked_add_signed(TimeDelta::try_hours(1)?)?;
            zone.from_local_datetime(&later).earliest()
        }
    }
}

fn shift_months<Z: TimeZone>(at: &DateTime<Z>, months: i64) -> Option<DateTime<Z>> {
    let local = at.naive_local();
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    let shifted = if months >= 0 {
        local.checked_add_months(magnitude)?
    } else {
        local.checked_sub_months(magnitude)?
    };
    resolve_local(&at.timezone(), shifted)
}

fn period_start(local: NaiveDateTime, part: DitiPart) -> Option<NaiveDateTime> {
    let date = local.date();
    match part {
        DitiPart::Seconds => local.with_nanosecond(0),
        DitiPart::Minutes => date.and_hms_opt(local.hour(), local.minute(), 0),
        DitiPart::Hours => date.and_hms_opt(local.hour(), 0, 0),
        DitiPart::Days => date.and_hms_opt(0, 0, 0),
        DitiPart::Weeks => {
            let back = chrono::Days::new(u64::from(date.weekday().num_days_from_monday()));
            date.checked_sub_days(back)?.and_hms_opt(0, 0, 0)
        }
        DitiPart::Months => date.with_day(1)?.and_hms_opt(0, 0, 0),
        DitiPart::Years => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0),
    }
}

fn next_period_start(start: NaiveDateTime, part: DitiPart) -> Option<NaiveDateTime> {
    match part {
        DitiPart::Seconds => start.checked_add_signed(TimeDelta::try_seconds(1)?),
        DitiPart::Minutes => start.checked_add_signed(TimeDelta::try_minutes(1)?),
        DitiPart::Hours => start.checked_add_signed(TimeDelta::try_hours(1)?),
        DitiPart::Days => start.checked_add_days(chrono::Days::new(1)),
        DitiPart::Weeks => start.checked_add_days(chrono::Days::new(7)),
        DitiPart::Months => start.checked_add_months(Months::new(1)),
        DitiPart::Years => start.checked_add_months(Months::new(12)),
    }
}

/// Shift `at` by `amount` units of `part`; `amount` may be negative.
///
/// # Errors
/// Returns `GostergeError::InvalidInput` if the result falls outside chrono's
/// representable range.
///
/// ```
/// use gosterge_core::diti::{self, DitiPart};
/// let at = chrono::DateTime::parse_from_rfc3339("2024-01-31T10:00:00+03:00").unwrap();
/// let later = diti::add(&at, DitiPart::Months, 1).unwrap();
/// assert_eq!(diti::format(&later), "2024-02-29T10:00:00+03:00");
/// ```
pub fn add<Z: TimeZone>(
    at: &DateTime<Z>,
    part: DitiPart,
    amount: i64,
) -> Result<DateTime<Z>, GostergeError> {
    let shifted = match part.fixed_seconds() {
        Some(unit) => amount
            .checked_mul(unit)
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| at.clone().checked_add_signed(delta)),
        None => amount
            .checked_mul(part.calendar_months())
            .and_then(|months| shift_months(at, months)),
    };
    shifted.ok_or_else(|| out_of_range(&format!("adding {amount} {part:?}")))
}

/// Truncate `at` to the start of its enclosing `part` period.
///
/// # Errors
/// Returns `GostergeError::InvalidInput` if the boundary is not representable.
pub fn snap_to_start<Z: TimeZone>(
    at: &DateTime<Z>,
    part: DitiPart,
) -> Result<DateTime<Z>, GostergeError> {
    period_start(at.naive_local(), part)
        .and_then(|start| resolve_local(&at.timezone(), start))
        .ok_or_else(|| out_of_range(&format!("start of {part:?}")))
}

/// Advance `at` to the last microsecond of its enclosing `part` period.
///
/// # Errors
/// Returns `GostergeError::InvalidInput` if the boundary is not representable.
///
/// ```
/// use gosterge_core::diti::{self, DitiPart};
/// let at = chrono::DateTime::parse_from_rfc3339("2024-01-08T13:45:00+03:00").unwrap();
/// let end = diti::snap_to_end(&at, DitiPart::Days).unwrap();
/// assert_eq!(diti::format(&end), "2024-01-08T23:59:59.999999+03:00");
/// ```
pub fn snap_to_end<Z: TimeZone>(
    at: &DateTime<Z>,
    part: DitiPart,
) -> Result<DateTime<Z>, GostergeError> {
    period_start(at.naive_local(), part)
        .and_then(|start| next_period_start(start, part))
        .and_then(|next| next.checked_sub_signed(TimeDelta::microseconds(1)))
        .and_then(|end| resolve_local(&at.timezone(), end))
        .ok_or_else(|| out_of_range(&format!("end of {part:?}")))
}

/// Present the same absolute instant in `zone`.
#[must_use]
pub fn convert_timezone<Z: TimeZone>(at: &DateTime<Z>, zone: Tz) -> DateTime<Tz> {
    at.with_timezone(&zone)
}

// Whole calendar months from `earlier` to `later`; requires earlier <= later.
fn whole_months<A: TimeZone, B: TimeZone>(earlier: &DateTime<A>, later: &DateTime<B>) -> i64 {
    let later = later.with_timezone(&earlier.timezone());
    let mut months = i64::from(later.year() - earlier.year()) * 12 + i64::from(later.month())
        - i64::from(earlier.month());
    while months > 0 && shift_months(earlier, months).is_none_or(|s| s > later) {
        months -= 1;
    }
    months
}

/// Signed count of whole `part` units in `b - a`, truncated toward zero.
///
/// `diff(a, b, part) == -diff(b, a, part)` for every pair of instants.
///
/// ```
/// use gosterge_core::diti::{self, DitiPart};
/// let a = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00+03:00").unwrap();
/// let b = chrono::DateTime::parse_from_rfc3339("2024-01-08T00:00:00+03:00").unwrap();
/// assert_eq!(diti::diff(&a, &b, DitiPart::Hours), 168);
/// assert_eq!(diti::diff(&b, &a, DitiPart::Hours), -168);
/// ```
#[must_use]
pub fn diff<A: TimeZone, B: TimeZone>(a: &DateTime<A>, b: &DateTime<B>, part: DitiPart) -> i64 {
    let a_utc = a.with_timezone(&Utc);
    let b_utc = b.with_timezone(&Utc);
    match part.fixed_seconds() {
        Some(unit) => b_utc.signed_duration_since(a_utc).num_seconds() / unit,
        None if a_utc <= b_utc => whole_months(a, b) / part.calendar_months(),
        None => -(whole_months(b, a) / part.calendar_months()),
    }
}

/// Parse both strings with [`parse`] and return their [`diff`].
///
/// # Errors
/// Returns `GostergeError::InvalidInput` if either string is not an instant.
pub fn diff_str(a: &str, b: &str, part: DitiPart, fallback_zone: Tz) -> Result<i64, GostergeError> {
    let a = parse(a, fallback_zone)?;
    let b = parse(b, fallback_zone)?;
    Ok(diff(&a, &b, part))
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO-8601 instant.
///
/// Strings carrying an offset keep it. Naive date-times, and bare dates at
/// midnight, are interpreted on the wall clock of `fallback_zone`.
///
/// # Errors
/// Returns `GostergeError::InvalidInput` if `text` matches none of the accepted forms.
pub fn parse(text: &str, fallback_zone: Tz) -> Result<Diti, GostergeError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt);
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
    {
        return Ok(dt);
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });
    naive
        .and_then(|n| resolve_local(&fallback_zone, n))
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| {
            GostergeError::invalid_input(format!("cannot parse '{text}' as an ISO-8601 instant"))
        })
}

/// Render an instant as ISO-8601 with its offset; fractional seconds only when non-zero.
#[must_use]
pub fn format<Z: TimeZone>(at: &DateTime<Z>) -> String
where
    Z::Offset: std::fmt::Display,
{
    at.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Whole hours spanned by a range; negative for an inverted range.
#[must_use]
pub fn span_hours(range: &TimeRange) -> i64 {
    diff(&range.from, &range.to, DitiPart::Hours)
}

/// Default chart window: `lookback_days` days ending at the end of today in `zone`.
///
/// # Errors
/// Returns `GostergeError::InvalidInput` if the boundaries are not representable.
pub fn initial_range(
    now: DateTime<Utc>,
    zone: Tz,
    lookback_days: i64,
) -> Result<TimeRange, GostergeError> {
    let today_end = snap_to_end(&convert_timezone(&now, zone), DitiPart::Days)?;
    let from = snap_to_start(&add(&today_end, DitiPart::Days, -lookback_days)?, DitiPart::Days)?;
    Ok(TimeRange::new(from.fixed_offset(), today_end.fixed_offset()))
}
