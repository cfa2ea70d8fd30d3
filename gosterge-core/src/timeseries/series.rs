use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::frame::AlignedFrame;
use crate::{GostergeError, catalog, diti};

/// One display series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    /// Catalog display name ("USD", "GOLD", ...).
    pub name: String,
    /// Values aligned with [`SeriesFrame::timestamps`].
    pub data: Vec<f64>,
}

/// Chart-ready output of the series pipeline.
///
/// Every `data` array has the length of `timestamps`, holds no missing
/// entries, and starts at 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesFrame {
    /// ISO-8601 timestamps in the display zone.
    pub timestamps: Vec<String>,
    /// Series in catalog order.
    pub series: Vec<NamedSeries>,
}

impl SeriesFrame {
    /// Convert row timestamps to `zone` and rename columns to their display names.
    ///
    /// # Errors
    /// Returns `GostergeError::Data` if a column still holds a missing value
    /// or has no catalog display name.
    pub fn label(frame: AlignedFrame, zone: Tz) -> Result<Self, GostergeError> {
        let (index, columns) = frame.into_parts();
        let timestamps = index
            .iter()
            .map(|ts| diti::format(&diti::convert_timezone(ts, zone)))
            .collect();
        let series = columns
            .into_iter()
            .map(|col| {
                let name = catalog::display_name(&col.key).ok_or_else(|| {
                    GostergeError::Data(format!("column {} has no display name", col.key))
                })?;
                let data = col.values.into_iter().collect::<Option<Vec<f64>>>().ok_or_else(
                    || GostergeError::Data(format!("column {} has missing values", col.key)),
                )?;
                Ok(NamedSeries {
                    name: name.to_string(),
                    data,
                })
            })
            .collect::<Result<Vec<_>, GostergeError>>()?;
        Ok(Self { timestamps, series })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// True when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Values of the series called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.data.as_slice())
    }

    /// Series names in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }

    /// JSON array of the timestamps, as embedded into the chart template.
    ///
    /// # Errors
    /// Returns `GostergeError::Other` if serialization fails.
    pub fn timestamps_json(&self) -> Result<String, GostergeError> {
        serde_json::to_string(&self.timestamps).map_err(|e| GostergeError::Other(e.to_string()))
    }

    /// JSON array of `{"name": .., "data": [..]}` objects.
    ///
    /// # Errors
    /// Returns `GostergeError::Other` if serialization fails.
    pub fn series_json(&self) -> Result<String, GostergeError> {
        serde_json::to_string(&self.series).map_err(|e| GostergeError::Other(e.to_string()))
    }
}
