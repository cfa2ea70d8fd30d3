use chrono_tz::Tz;

use super::frame::AlignedFrame;
use super::resample::resample_to_minutes;
use super::series::SeriesFrame;
use crate::catalog::{self, CATALOG, CatalogEntry, SeriesSource};
use crate::{Field, GostergeError, ObservationTable, Resolution, TimeRange};

/// Which catalog series a request emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPlan {
    entries: Vec<&'static CatalogEntry>,
}

impl SeriesPlan {
    /// Every catalog series (the index view).
    #[must_use]
    pub fn index() -> Self {
        Self {
            entries: CATALOG.iter().collect(),
        }
    }

    /// A single series selected by provider symbol or display name.
    ///
    /// # Errors
    /// Returns `GostergeError::InvalidInput` if `code` is not in the catalog.
    pub fn detail(code: &str) -> Result<Self, GostergeError> {
        let entry = catalog::lookup(code)
            .ok_or_else(|| GostergeError::invalid_input(format!("unknown symbol '{code}'")))?;
        Ok(Self {
            entries: vec![entry],
        })
    }

    /// Selected entries in output order.
    #[must_use]
    pub fn entries(&self) -> &[&'static CatalogEntry] {
        &self.entries
    }

    /// Provider symbols to fetch, each once, in first-use order.
    #[must_use]
    pub fn symbols(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for s in self.entries.iter().flat_map(|e| e.required_symbols()) {
            if !out.contains(&s) {
                out.push(s);
            }
        }
        out
    }

    fn output_keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.column_key()).collect()
    }
}

/// Run the post-fetch stages on a raw table.
///
/// 1. select the `field` column of every planned symbol
/// 2. average rows per resolution bucket (UTC calendar day for daily bars)
/// 3. drop rows with any missing value
/// 4. derive cross-rate columns
/// 5. keep the planned columns and normalize them to their first row
/// 6. label rows in `zone` and columns with display names
///
/// # Errors
/// - `GostergeError::NoData` (carrying `range`) if the table is empty, a row
///   timestamp cannot be bucketed, or no complete row survives.
/// - `GostergeError::Data` if a planned column has no usable baseline.
pub fn prepare_series(
    table: &ObservationTable,
    plan: &SeriesPlan,
    range: &TimeRange,
    resolution: Resolution,
    field: Field,
    zone: Tz,
) -> Result<SeriesFrame, GostergeError> {
    let no_data = || GostergeError::no_data(*range);
    if table.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::debug!(%range, "source returned no rows");
        return Err(no_data());
    }

    let frame = AlignedFrame::select(table, field, &plan.symbols());
    let frame = resample_to_minutes(frame, resolution.bucket_minutes()).ok_or_else(no_data)?;

    #[cfg(feature = "tracing")]
    let rows_before = frame.len();
    let mut frame = frame.drop_incomplete();
    #[cfg(feature = "tracing")]
    tracing::debug!(
        rows_before,
        rows_after = frame.len(),
        resolution = %resolution,
        "dropped incomplete rows"
    );
    if frame.is_empty() {
        return Err(no_data());
    }

    for entry in plan.entries() {
        if let SeriesSource::CrossRate { rate } = entry.source {
            frame.derive_product(entry.column_key(), entry.symbol, rate)?;
        }
    }
    frame.retain_columns(&plan.output_keys())?;
    frame.normalize()?;

    SeriesFrame::label(frame, zone)
}
