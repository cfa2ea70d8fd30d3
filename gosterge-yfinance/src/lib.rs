//! gosterge-yfinance
//!
//! Public data source that implements `ObservationSource` on top of the
//! `yfinance-rs` client library. One history call is issued per requested
//! symbol and the calls run concurrently.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `yfinance-rs`.
pub mod adapter;

use std::sync::Arc;

#[cfg(feature = "test-adapters")]
use adapter::CloneArcAdapters;
use adapter::{RealAdapter, YfHistory};
use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use futures::future::join_all;
use gosterge_core::{
    GostergeError, Observation, ObservationRequest, ObservationSource, ObservationTable,
    Resolution,
};
use paft::market::requests::history::Interval;
use rust_decimal::prelude::ToPrimitive;
use yfinance_rs as yf;

#[cfg(feature = "test-adapters")]
type HistoryAdapter = Arc<dyn YfHistory>;
#[cfg(not(feature = "test-adapters"))]
type HistoryAdapter = Arc<RealAdapter>;

/// Public source type. Production users will construct with `YfConnector::try_new_default()`.
pub struct YfConnector {
    history: HistoryAdapter,
}

impl YfConnector {
    /// Connector name used in errors and logs.
    pub const NAME: &'static str = "gosterge-yfinance";

    /// Build with a fresh `yfinance_rs::YfClient` inside.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or the `YfClient` cannot be built.
    pub fn try_new_default() -> Result<Self, GostergeError> {
        let a = RealAdapter::try_new_default()?;
        Ok(Self::from_adapter(&a))
    }

    /// Build from an existing `yfinance_rs::YfClient`.
    #[must_use]
    pub fn new_with_client(client: yf::YfClient) -> Self {
        let a = RealAdapter::new(client);
        Self::from_adapter(&a)
    }

    /// Build from a provided `reqwest::Client` by constructing a `yfinance_rs::YfClient`.
    ///
    /// Note: The provided client should enable a cookie store for yfinance auth/crumb flow.
    ///
    /// # Errors
    /// Returns an error if the internal `YfClient` cannot be constructed from the provided HTTP client.
    pub fn try_new_with_reqwest_client(http: reqwest::Client) -> Result<Self, GostergeError> {
        let a = RealAdapter::try_with_reqwest_client(http)?;
        Ok(Self::from_adapter(&a))
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    pub fn from_adapter<A: CloneArcAdapters + 'static>(adapter: &A) -> Self {
        Self {
            history: adapter.clone_arc_history(),
        }
    }

    #[cfg(not(feature = "test-adapters"))]
    /// Build from a concrete `RealAdapter` by cloning it into a shared handle.
    pub fn from_adapter(adapter: &RealAdapter) -> Self {
        Self {
            history: Arc::new(adapter.clone()),
        }
    }

    /// Provider bar size for a chart resolution.
    #[must_use]
    pub const fn interval_for(resolution: Resolution) -> Interval {
        match resolution {
            Resolution::Daily => Interval::D1,
            Resolution::Hourly => Interval::I1h,
            Resolution::FifteenMinutes => Interval::I15m,
        }
    }

    fn history_request(req: &ObservationRequest) -> yf::core::services::HistoryRequest {
        yf::core::services::HistoryRequest {
            range: None,
            period: Some((req.start.timestamp(), req.end.timestamp())),
            interval: Self::interval_for(req.resolution),
            include_prepost: false,
            include_actions: false,
            auto_adjust: true,
            keepna: false,
        }
    }

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("delisted")
    }

    fn normalize_error(e: GostergeError, symbol: &str) -> GostergeError {
        match e {
            GostergeError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    GostergeError::not_found(format!("history for {symbol}"))
                } else {
                    GostergeError::connector(Self::NAME, msg)
                }
            }
            GostergeError::Other(msg) => GostergeError::connector(Self::NAME, msg),
            other => other,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "gosterge::yfinance", skip(self, yf_req))
    )]
    async fn fetch_symbol(
        &self,
        symbol: &str,
        yf_req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, GostergeError> {
        self.history
            .fetch_full(symbol, yf_req)
            .await
            .map_err(|e| Self::normalize_error(e, symbol))
    }
}

fn money_to_f64(m: &paft::money::Money) -> Option<f64> {
    m.amount().to_f64().filter(|v| v.is_finite())
}

/// Stamp of a daily bar: midnight UTC of its exchange-local trading date.
///
/// Yahoo opens each daily bar at the session start of the listing exchange,
/// so raw stamps of different markets never coincide.
fn trading_day(ts: DateTime<Utc>, meta: Option<&yf::HistoryMeta>) -> DateTime<Utc> {
    let date = match meta {
        Some(yf::HistoryMeta {
            timezone: Some(tz), ..
        }) => ts.with_timezone(tz).date_naive(),
        Some(yf::HistoryMeta {
            utc_offset_seconds: Some(offset),
            ..
        }) => ts
            .checked_add_signed(TimeDelta::seconds(i64::from(*offset)))
            .unwrap_or(ts)
            .date_naive(),
        _ => ts.date_naive(),
    };
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Convert provider candles to observations, keeping bars inside `[start, end)`.
///
/// Daily bars are restamped with [`trading_day`].
#[allow(clippy::cast_precision_loss)]
fn to_observations(resp: yf::HistoryResponse, req: &ObservationRequest) -> Vec<Observation> {
    let daily = req.resolution == Resolution::Daily;
    let meta = resp.meta.as_ref();
    resp.candles
        .into_iter()
        .filter(|c| c.ts >= req.start && c.ts < req.end)
        .map(|c| Observation {
            ts: if daily { trading_day(c.ts, meta) } else { c.ts },
            open: money_to_f64(&c.open),
            high: money_to_f64(&c.high),
            low: money_to_f64(&c.low),
            close: money_to_f64(&c.close),
            volume: c.volume.map(|v| v as f64),
        })
        .collect()
}

#[async_trait]
impl ObservationSource for YfConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Symbols Yahoo does not know are left out of the table; any other
    /// failure fails the whole request.
    async fn observations(
        &self,
        req: &ObservationRequest,
    ) -> Result<ObservationTable, GostergeError> {
        let calls = req
            .symbols
            .iter()
            .map(|symbol| self.fetch_symbol(symbol, Self::history_request(req)));
        let results = join_all(calls).await;

        let mut table = ObservationTable::new();
        for (symbol, result) in req.symbols.iter().zip(results) {
            match result {
                Ok(resp) => {
                    table.insert(symbol.as_str(), to_observations(resp, req));
                }
                Err(GostergeError::NotFound { .. }) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        target: "gosterge::yfinance",
                        %symbol,
                        "symbol not found; column left empty"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Ok(table)
    }
}
