use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GostergeError;

/// Which observation field feeds the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Field {
    /// Opening value of the bar.
    Open,
    /// Highest value of the bar.
    High,
    /// Lowest value of the bar.
    Low,
    /// Closing value of the bar.
    #[default]
    Close,
    /// Traded volume within the bar.
    Volume,
}

impl Field {
    /// All fields, in display order.
    pub const ALL: [Self; 5] = [Self::Open, Self::High, Self::Low, Self::Close, Self::Volume];

    /// Human readable name ("Close", ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Close => "Close",
            Self::Volume => "Volume",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = GostergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GostergeError::invalid_input(format!("unknown field '{wanted}'")))
    }
}
