use chrono::{DateTime, Utc};
use gosterge_core::navigation::{FROM_PARAM, TO_PARAM};
use gosterge_core::{
    GostergeError, Resolution, SeriesFrame, TimeRange, catalog, compute_navigation_with, diti,
    step_hours,
};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::Dashboard;

/// Optional `fDiti`/`tDiti` query parameters of a chart page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Start of the window as an ISO-8601 string.
    #[serde(rename = "fDiti", default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// End of the window as an ISO-8601 string.
    #[serde(rename = "tDiti", default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl PageQuery {
    /// Query without parameters (the default window).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Query carrying both endpoints.
    #[must_use]
    pub fn with_range(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Decode a raw `fDiti=..&tDiti=..` query string, as produced by the
    /// navigation links. Unknown keys are ignored and the first occurrence of
    /// a key wins.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let mut out = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                FROM_PARAM => &mut out.from,
                TO_PARAM => &mut out.to,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        out
    }
}

/// Everything the chart template needs for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexPage {
    /// Window that was charted.
    pub range: TimeRange,
    /// Bucket chosen from the window span.
    pub resolution: Resolution,
    /// JSON array of ISO-8601 timestamps.
    pub diti_list: String,
    /// JSON array of `{"name": .., "data": [..]}` objects.
    pub data_list: String,
    /// Query string of the previous window.
    pub prev_url_params: String,
    /// Query string of the next window.
    pub next_url_params: String,
    /// Query string of the zoomed-in window.
    pub zoom_in_url_params: String,
    /// Query string of the zoomed-out window.
    pub zoom_out_url_params: String,
    /// End of the charted window, ISO-8601.
    pub to_diti: String,
}

/// Chart page for one catalog series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPage {
    /// Provider symbol of the series.
    pub symbol: String,
    /// Display name of the series.
    pub name: String,
    /// Chart data and navigation links.
    #[serde(flatten)]
    pub page: IndexPage,
}

impl Dashboard {
    /// Resolve the query into a window; missing endpoints fall back to the
    /// default window ending at the end of `now`'s day in the display zone.
    ///
    /// # Errors
    /// Returns `InvalidInput` if a provided endpoint does not parse.
    pub fn resolve_range(
        &self,
        query: &PageQuery,
        now: DateTime<Utc>,
    ) -> Result<TimeRange, GostergeError> {
        let zone = self.cfg.display_timezone;
        let default = diti::initial_range(now, zone, self.cfg.lookback_days)?;
        let from = match &query.from {
            Some(text) => diti::parse(text, zone)?,
            None => default.from,
        };
        let to = match &query.to {
            Some(text) => diti::parse(text, zone)?,
            None => default.to,
        };
        Ok(TimeRange::new(from, to))
    }

    /// Index page for the current time. See [`index_page_at`](Self::index_page_at).
    ///
    /// # Errors
    /// As [`index_page_at`](Self::index_page_at).
    pub async fn index_page(&self, query: &PageQuery) -> Result<IndexPage, GostergeError> {
        self.index_page_at(query, Utc::now()).await
    }

    /// Index page with every catalog series.
    ///
    /// The window comes from the query (or the default window at `now`); its
    /// span selects the resolution, a quarter of the span is the navigation
    /// step.
    ///
    /// # Errors
    /// - `InvalidInput` for unparsable endpoints.
    /// - Otherwise as [`prepare_index_series`](Self::prepare_index_series).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "gosterge::router",
            skip_all,
            fields(from = ?query.from, to = ?query.to),
        )
    )]
    pub async fn index_page_at(
        &self,
        query: &PageQuery,
        now: DateTime<Utc>,
    ) -> Result<IndexPage, GostergeError> {
        let range = self.resolve_range(query, now)?;
        let resolution = Resolution::for_span_hours(diti::span_hours(&range));
        let frame = self
            .prepare_index_series(range.from, range.to, resolution, self.cfg.field)
            .await?;
        self.assemble(range, resolution, &frame)
    }

    /// Detail page for the current time. See [`detail_page_at`](Self::detail_page_at).
    ///
    /// # Errors
    /// As [`detail_page_at`](Self::detail_page_at).
    pub async fn detail_page(
        &self,
        symbol: &str,
        query: &PageQuery,
    ) -> Result<DetailPage, GostergeError> {
        self.detail_page_at(symbol, query, Utc::now()).await
    }

    /// Detail page for a single catalog series, addressed by provider symbol
    /// or display name.
    ///
    /// # Errors
    /// - `InvalidInput` for an unknown symbol or unparsable endpoints.
    /// - Otherwise as [`prepare_detail_series`](Self::prepare_detail_series).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "gosterge::router",
            skip_all,
            fields(symbol = %symbol, from = ?query.from, to = ?query.to),
        )
    )]
    pub async fn detail_page_at(
        &self,
        symbol: &str,
        query: &PageQuery,
        now: DateTime<Utc>,
    ) -> Result<DetailPage, GostergeError> {
        let entry = catalog::lookup(symbol)
            .ok_or_else(|| GostergeError::invalid_input(format!("unknown symbol '{symbol}'")))?;
        let range = self.resolve_range(query, now)?;
        let resolution = Resolution::for_span_hours(diti::span_hours(&range));
        let frame = self
            .prepare_detail_series(entry.symbol, range.from, range.to, resolution, self.cfg.field)
            .await?;
        Ok(DetailPage {
            symbol: entry.symbol.to_string(),
            name: entry.name.to_string(),
            page: self.assemble(range, resolution, &frame)?,
        })
    }

    fn assemble(
        &self,
        range: TimeRange,
        resolution: Resolution,
        frame: &SeriesFrame,
    ) -> Result<IndexPage, GostergeError> {
        let step = step_hours(&range);
        let nav =
            compute_navigation_with(&range.from, &range.to, step, self.cfg.min_zoom_span_hours)?;
        Ok(IndexPage {
            range,
            resolution,
            diti_list: frame.timestamps_json()?,
            data_list: frame.series_json()?,
            prev_url_params: nav.prev_params(),
            next_url_params: nav.next_params(),
            zoom_in_url_params: nav.zoom_in_params(),
            zoom_out_url_params: nav.zoom_out_params(),
            to_diti: diti::format(&range.to),
        })
    }
}
