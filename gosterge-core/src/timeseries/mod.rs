//! Series preparation stages shared by the dashboard entry points.
//!
//! Modules include:
//! - `frame`: wide, timestamp-aligned frame with row filtering, derivation and normalization
//! - `resample`: bucket intraday rows and average them column-wise
//! - `series`: labeled output handed to the charting layer
//! - `pipeline`: composition of the stages for a catalog selection
/// Aligned frame and its row/column operations.
pub mod frame;
/// Stage composition for index and detail selections.
pub mod pipeline;
/// Intraday bucketing.
pub mod resample;
/// Labeled chart-ready output.
pub mod series;
