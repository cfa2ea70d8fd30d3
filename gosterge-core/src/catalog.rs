//! Fixed catalog of charted series and their display names.
//!
//! The catalog is a process-wide constant: provider symbols on one side,
//! display names on the other, and for derived series the rate used to
//! price the asset in Turkish lira.

/// Provider symbol of the USD/TRY rate every cross-rate series is multiplied by.
pub const LOCAL_FX: &str = "TRY=X";

/// How a catalog series is obtained from provider columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesSource {
    /// The provider column is charted as-is.
    Direct,
    /// The provider column multiplied row-wise by the `rate` column.
    CrossRate {
        /// Provider symbol of the multiplier.
        rate: &'static str,
    },
}

/// One charted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    /// Provider symbol, also accepted as the detail-view code.
    pub symbol: &'static str,
    /// Display name used for the emitted series.
    pub name: &'static str,
    /// Direct or derived.
    pub source: SeriesSource,
}

impl CatalogEntry {
    /// True for series computed from two provider columns.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        matches!(self.source, SeriesSource::CrossRate { .. })
    }

    /// Internal column key of this series after derivation (e.g. `GC=FxTRY=X`).
    #[must_use]
    pub fn column_key(&self) -> String {
        match self.source {
            SeriesSource::Direct => self.symbol.to_string(),
            SeriesSource::CrossRate { rate } => format!("{}x{rate}", self.symbol),
        }
    }

    /// Provider symbols that must be fetched to build this series.
    #[must_use]
    pub fn required_symbols(&self) -> Vec<&'static str> {
        match self.source {
            SeriesSource::Direct => vec![self.symbol],
            SeriesSource::CrossRate { rate } => vec![self.symbol, rate],
        }
    }
}

/// Every charted series, in output order.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        symbol: LOCAL_FX,
        name: "USD",
        source: SeriesSource::Direct,
    },
    CatalogEntry {
        symbol: "XU100.IS",
        name: "BIST",
        source: SeriesSource::Direct,
    },
    CatalogEntry {
        symbol: "GC=F",
        name: "GOLD",
        source: SeriesSource::CrossRate { rate: LOCAL_FX },
    },
    CatalogEntry {
        symbol: "BTC-USD",
        name: "BTC",
        source: SeriesSource::CrossRate { rate: LOCAL_FX },
    },
];

/// Find an entry by provider symbol or display name, ignoring ASCII case.
///
/// ```
/// use gosterge_core::catalog;
/// assert_eq!(catalog::lookup("gold").unwrap().symbol, "GC=F");
/// assert_eq!(catalog::lookup("BTC-USD").unwrap().name, "BTC");
/// assert!(catalog::lookup("ETH-USD").is_none());
/// ```
#[must_use]
pub fn lookup(code: &str) -> Option<&'static CatalogEntry> {
    let code = code.trim();
    CATALOG
        .iter()
        .find(|e| e.symbol.eq_ignore_ascii_case(code) || e.name.eq_ignore_ascii_case(code))
}

/// Display name for a provider symbol or derived column key.
#[must_use]
pub fn display_name(column_key: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|e| e.column_key() == column_key)
        .map(|e| e.name)
}
