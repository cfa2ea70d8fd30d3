//! gosterge-mock
//!
//! Deterministic data sources for tests and demos. [`MockSource`] synthesizes
//! bars for the catalog symbols over any range; [`DynamicMockSource`] defers
//! every answer to a controller owned by the test.
use async_trait::async_trait;
use gosterge_core::{GostergeError, ObservationRequest, ObservationSource, ObservationTable};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};

/// Bars generated per symbol before a request is refused.
pub const MAX_BARS_PER_SYMBOL: i64 = 50_000;

/// Mock source for CI-safe demos. Provides deterministic synthetic bars.
///
/// Catalog symbols get a smooth weekly cycle around a realistic price level;
/// FX, equity and futures symbols skip weekends while bitcoin trades every
/// day. Unknown symbols are left out of the table, and the symbol `FAIL`
/// fails the whole request.
pub struct MockSource {
    empty: bool,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    /// Source that synthesizes bars for every catalog symbol.
    #[must_use]
    pub const fn new() -> Self {
        Self { empty: false }
    }

    /// Source that always answers with an empty table.
    #[must_use]
    pub const fn empty() -> Self {
        Self { empty: true }
    }

    fn maybe_fail(symbol: &str) -> Result<(), GostergeError> {
        match symbol {
            "FAIL" => Err(GostergeError::connector(
                "gosterge-mock",
                format!("forced failure: history for {symbol}"),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ObservationSource for MockSource {
    fn name(&self) -> &'static str {
        "gosterge-mock"
    }

    async fn observations(
        &self,
        req: &ObservationRequest,
    ) -> Result<ObservationTable, GostergeError> {
        let mut table = ObservationTable::new();
        if self.empty || req.start >= req.end {
            return Ok(table);
        }
        let span = (req.end - req.start).num_seconds();
        if span / fixtures::history::step_seconds(req.resolution) > MAX_BARS_PER_SYMBOL {
            return Err(GostergeError::invalid_input(format!(
                "mock range too long for {} bars",
                req.resolution
            )));
        }
        for symbol in &req.symbols {
            Self::maybe_fail(symbol)?;
            if let Some(profile) = fixtures::history::profile(symbol) {
                table.insert(
                    symbol.as_str(),
                    profile.bars(req.start, req.end, req.resolution),
                );
            }
        }
        Ok(table)
    }
}
