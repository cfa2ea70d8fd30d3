//! Configuration shared by the dashboard facade and its helpers.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::Field;

/// Global configuration for the `Dashboard` facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Zone used to present every emitted timestamp and to compute default ranges.
    pub display_timezone: Tz,
    /// Observation field charted by the page helpers.
    pub field: Field,
    /// Length of the default window, in days, ending at the end of today.
    pub lookback_days: i64,
    /// Narrowest window (in hours) a zoom-in link may produce.
    pub min_zoom_span_hours: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            display_timezone: chrono_tz::Europe::Istanbul,
            field: Field::Close,
            lookback_days: 7,
            min_zoom_span_hours: 1,
        }
    }
}
