
pub use mock_source::{FnSource, base_value, scripted_bars};

use chrono::{DateTime, Utc};
use gosterge::{Dashboard, Diti, TimeRange};

/// Provider symbols in the order the index view fetches them.
pub const INDEX_SYMBOLS: &[&str] = &["TRY=X", "XU100.IS", "GC=F", "BTC-USD"];

/// Parse an RFC 3339 instant for readability in tests.
pub fn at(s: &str) -> Diti {
    DateTime::parse_from_rfc3339(s).unwrap()
}

/// Range between two RFC 3339 instants.
pub fn range(from: &str, to: &str) -> TimeRange {
    TimeRange::new(at(from), at(to))
}

/// Fixed "current time" used by page tests: 2024-01-10T09:30:00Z.
pub fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-10T09:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Dashboard with default configuration over `source`.
pub fn dashboard(source: std::sync::Arc<dyn gosterge::ObservationSource>) -> Dashboard {
    Dashboard::builder().with_source(source).build().unwrap()
}
