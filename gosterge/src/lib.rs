//! Gosterge serves a small market dashboard: USD/TRY, BIST-100, gold and
//! bitcoin, each normalized to 1.0 at the start of the charted window.
//!
//! Overview
//! - A `Dashboard` wraps one `ObservationSource` (Yahoo Finance, a mock, or
//!   anything implementing `gosterge_core::ObservationSource`).
//! - Series helpers fetch raw bars, align them on a shared timestamp axis,
//!   price gold and bitcoin in lira and normalize every series.
//! - Page helpers resolve `fDiti`/`tDiti` query parameters, pick a resolution
//!   from the window span and attach pan/zoom links.
//!
//! Key behaviors
//! - Resolution: windows over eight days use daily bars, over two days hourly
//!   bars, anything shorter fifteen-minute bars.
//! - Navigation step: a quarter of the window span, in whole hours.
//! - Missing query parameters fall back to the last seven days ending at the
//!   end of today in the display zone.
//! - An empty result is `NoData` carrying the requested range.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use gosterge::{Dashboard, PageQuery};
//!
//! let dashboard = Dashboard::builder()
//!     .with_source(Arc::new(gosterge_yfinance::YfConnector::try_new_default()?))
//!     .build()?;
//!
//! let page = dashboard.index_page(&PageQuery::new()).await?;
//! println!("{}", page.data_list);
//!
//! let next = PageQuery::from_query_string(&page.next_url_params);
//! let detail = dashboard.detail_page("BTC-USD", &next).await?;
//! ```
//!
//! See `demos/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Dashboard, DashboardBuilder};
pub use router::page::{DetailPage, IndexPage, PageQuery};

// Re-export core types for convenience
pub use gosterge_core::{
    ChartActions, DashboardConfig, Diti, Field, GostergeError, NamedSeries, Observation,
    ObservationRequest, ObservationSource, ObservationTable, Resolution, SeriesFrame, TimeRange,
};
