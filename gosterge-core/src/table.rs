use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Field;

/// One bar of a single symbol as returned by a data source.
///
/// Every numeric field is optional; providers leave gaps for bars that did
/// not trade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Bar timestamp (UTC).
    pub ts: DateTime<Utc>,
    /// Opening value.
    pub open: Option<f64>,
    /// Highest value.
    pub high: Option<f64>,
    /// Lowest value.
    pub low: Option<f64>,
    /// Closing value.
    pub close: Option<f64>,
    /// Traded volume.
    pub volume: Option<f64>,
}

impl Observation {
    /// Observation carrying the same value in every price field and no volume.
    #[must_use]
    pub const fn flat(ts: DateTime<Utc>, value: f64) -> Self {
        Self {
            ts,
            open: Some(value),
            high: Some(value),
            low: Some(value),
            close: Some(value),
            volume: None,
        }
    }

    /// Value of the requested field, if present.
    #[must_use]
    pub const fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::Open => self.open,
            Field::High => self.high,
            Field::Low => self.low,
            Field::Close => self.close,
            Field::Volume => self.volume,
        }
    }
}

/// Raw multi-symbol observations keyed by provider symbol.
///
/// Each symbol holds its own time-ordered bars; symbols do not need to share
/// timestamps. Alignment happens in [`crate::AlignedFrame::select`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    series: BTreeMap<String, Vec<Observation>>,
}

impl ObservationTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append observations for `symbol`, keeping its bars sorted by timestamp.
    pub fn insert(&mut self, symbol: impl Into<String>, observations: Vec<Observation>) {
        let bars = self.series.entry(symbol.into()).or_default();
        bars.extend(observations);
        bars.sort_by_key(|o| o.ts);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_series(mut self, symbol: impl Into<String>, observations: Vec<Observation>) -> Self {
        self.insert(symbol, observations);
        self
    }

    /// Symbols present in the table (possibly with zero bars).
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Bars of one symbol.
    #[must_use]
    pub fn series(&self, symbol: &str) -> Option<&[Observation]> {
        self.series.get(symbol).map(Vec::as_slice)
    }

    /// Number of distinct timestamps across all symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series
            .values()
            .flatten()
            .map(|o| o.ts)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// True when no symbol has a single bar.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.values().all(Vec::is_empty)
    }
}
