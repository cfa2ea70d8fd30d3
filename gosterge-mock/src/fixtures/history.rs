use std::f64::consts::TAU;

use chrono::{DateTime, Datelike, Utc, Weekday};
use gosterge_core::{Observation, Resolution};

/// Shape of one synthetic instrument.
pub struct Profile {
    base: f64,
    swing: f64,
    phase: f64,
    weekends: bool,
}

pub fn profile(symbol: &str) -> Option<Profile> {
    let p = |base, swing, phase, weekends| Profile {
        base,
        swing,
        phase,
        weekends,
    };
    match symbol {
        "TRY=X" => Some(p(30.0, 0.01, 0.0, false)),
        "XU100.IS" => Some(p(8_000.0, 0.04, 1.0, false)),
        "GC=F" => Some(p(2_050.0, 0.02, 2.0, false)),
        "BTC-USD" => Some(p(42_000.0, 0.08, 3.0, true)),
        _ => None,
    }
}

pub const fn step_seconds(resolution: Resolution) -> i64 {
    match resolution {
        Resolution::Daily => 86_400,
        Resolution::Hourly => 3_600,
        Resolution::FifteenMinutes => 900,
    }
}

impl Profile {
    // One-week sine around `base`.
    #[allow(clippy::cast_precision_loss)]
    fn value_at(&self, secs: i64) -> f64 {
        let days = secs as f64 / 86_400.0;
        self.base * self.swing.mul_add((days * TAU / 7.0 + self.phase).sin(), 1.0)
    }

    fn trades_on(&self, ts: DateTime<Utc>) -> bool {
        self.weekends || !matches!(ts.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Bars on `resolution` boundaries inside `[start, end)`.
    #[allow(clippy::cast_precision_loss)]
    pub fn bars(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        resolution: Resolution,
    ) -> Vec<Observation> {
        let step = step_seconds(resolution);
        let mut secs = start.timestamp().div_euclid(step) * step;
        if secs < start.timestamp() {
            secs += step;
        }
        let mut out = Vec::new();
        while secs < end.timestamp() {
            if let Some(ts) = DateTime::from_timestamp(secs, 0)
                && self.trades_on(ts)
            {
                let open = self.value_at(secs);
                let close = self.value_at(secs + step - 1);
                let band = self.swing / 10.0;
                out.push(Observation {
                    ts,
                    open: Some(open),
                    high: Some(open.max(close) * (1.0 + band)),
                    low: Some(open.min(close) * (1.0 - band)),
                    close: Some(close),
                    volume: Some(1_000.0 + (secs.rem_euclid(7_919)) as f64),
                });
            }
            secs += step;
        }
        out
    }
}
