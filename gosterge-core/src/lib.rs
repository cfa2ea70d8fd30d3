//! gosterge-core
//!
//! Core types, traits, and utilities shared across the gosterge workspace.
//!
//! - `diti`: calendar arithmetic on timezone-aware instants.
//! - `connector`: the `ObservationSource` trait implemented by data sources.
//! - `table`: the raw, symbol-keyed observation table a source returns.
//! - `catalog`: the fixed symbol catalog and display names.
//! - `timeseries`: alignment, resampling, derivation and normalization stages.
//! - `navigation`: pan/zoom ranges and their URL parameters.
#![warn(missing_docs)]

pub mod catalog;
/// Data source trait and request type.
pub mod connector;
pub mod diti;
pub mod navigation;
/// Raw observation storage returned by data sources.
pub mod table;
/// Series preparation stages.
pub mod timeseries;
pub mod types;

pub use catalog::{CATALOG, CatalogEntry, LOCAL_FX, SeriesSource};
pub use connector::{ObservationRequest, ObservationSource};
pub use diti::{Diti, DitiPart};
pub use navigation::{ChartActions, compute_navigation, compute_navigation_with, step_hours};
pub use table::{Observation, ObservationTable};
pub use timeseries::frame::AlignedFrame;
pub use timeseries::pipeline::{SeriesPlan, prepare_series};
pub use timeseries::resample::resample_to_minutes;
pub use timeseries::series::{NamedSeries, SeriesFrame};
pub use types::*;
