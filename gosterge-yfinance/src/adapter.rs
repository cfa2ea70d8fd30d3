#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;

use gosterge_core::GostergeError;
use yf::core::HistoryService;
use yfinance_rs as yf;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// History abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait YfHistory: Send + Sync {
    /// Fetch full history for a symbol using a provider-specific request.
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, GostergeError>;
}

/// Real adapter backed by a single `YfClient` instance.
/// `YfClient` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    client: yf::YfClient,
}

impl RealAdapter {
    /// Build a `YfClient` with a cookie-enabled HTTP client and a browser user agent.
    ///
    /// # Errors
    /// Returns `GostergeError::Other` if the HTTP client or the `YfClient`
    /// cannot be constructed.
    pub fn try_new_default() -> Result<Self, GostergeError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .no_proxy()
            .build()
            .map_err(|e| GostergeError::Other(format!("http client: {e}")))?;
        Self::try_with_reqwest_client(http)
    }

    /// Build a `YfClient` on top of a caller-provided HTTP client.
    ///
    /// The client should keep a cookie store for the Yahoo crumb flow.
    ///
    /// # Errors
    /// Returns `GostergeError::Other` if the `YfClient` cannot be constructed.
    pub fn try_with_reqwest_client(http: reqwest::Client) -> Result<Self, GostergeError> {
        let client = yf::YfClient::builder()
            .custom_client(http)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GostergeError::Other(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing `YfClient`.
    #[must_use]
    pub const fn new(client: yf::YfClient) -> Self {
        Self { client }
    }
}

pub(crate) fn map_yf_err(e: &yf::YfError, context: &str) -> GostergeError {
    match e {
        yf::YfError::NotFound { .. } => GostergeError::not_found(context.to_string()),
        yf::YfError::RateLimited { .. } => {
            GostergeError::connector(crate::YfConnector::NAME, format!("rate limit: {context}"))
        }
        yf::YfError::ServerError { status, .. } => GostergeError::connector(
            crate::YfConnector::NAME,
            format!("server error {status}: {context}"),
        ),
        yf::YfError::Status { status, .. } => GostergeError::connector(
            crate::YfConnector::NAME,
            format!("status {status}: {context}"),
        ),
        other => GostergeError::connector(crate::YfConnector::NAME, other.to_string()),
    }
}

#[async_trait]
impl YfHistory for RealAdapter {
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, GostergeError> {
        self.client
            .fetch_full_history(symbol, req)
            .await
            .map_err(|e| map_yf_err(&e, &format!("history for {symbol}")))
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn YfHistory {
    /// Build a `YfHistory` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YfHistory>
    where
        F: Send
            + Sync
            + 'static
            + Fn(
                String,
                yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, GostergeError>,
    {
        struct FnHist<F>(F);
        #[async_trait]
        impl<F> YfHistory for FnHist<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(
                    String,
                    yf::core::services::HistoryRequest,
                ) -> Result<yf::HistoryResponse, GostergeError>,
        {
            async fn fetch_full(
                &self,
                symbol: &str,
                req: yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, GostergeError> {
                (self.0)(symbol.to_string(), req)
            }
        }
        Arc::new(FnHist(f))
    }
}

/// Helper trait to split a concrete adapter into arc trait objects.
#[cfg(feature = "test-adapters")]
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn YfHistory>`.
    fn clone_arc_history(&self) -> Arc<dyn YfHistory> {
        <dyn YfHistory>::from_fn(|symbol, _| {
            Err(GostergeError::connector(
                crate::YfConnector::NAME,
                format!("no history adapter for {symbol}"),
            ))
        })
    }
}

#[cfg(feature = "test-adapters")]
impl CloneArcAdapters for RealAdapter {
    fn clone_arc_history(&self) -> Arc<dyn YfHistory> {
        Arc::new(self.clone()) as Arc<dyn YfHistory>
    }
}
