use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use gosterge_core::{DashboardConfig, Field, GostergeError, ObservationSource};

/// Request handler core: one data source plus presentation settings.
pub struct Dashboard {
    pub(crate) source: Arc<dyn ObservationSource>,
    pub(crate) cfg: DashboardConfig,
}

/// Builder for constructing a `Dashboard` with custom configuration.
pub struct DashboardBuilder {
    source: Option<Arc<dyn ObservationSource>>,
    cfg: DashboardConfig,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardBuilder {
    /// Create a new builder with default configuration and no source.
    ///
    /// Defaults: Europe/Istanbul display zone, closing prices, a 7-day
    /// initial window and a 1-hour minimum zoom-in span.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            cfg: DashboardConfig::default(),
        }
    }

    /// Set the data source. A later call replaces an earlier one.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn ObservationSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: DashboardConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Zone used for emitted timestamps and for the default window.
    #[must_use]
    pub const fn display_timezone(mut self, zone: Tz) -> Self {
        self.cfg.display_timezone = zone;
        self
    }

    /// Observation field charted by the page helpers.
    #[must_use]
    pub const fn field(mut self, field: Field) -> Self {
        self.cfg.field = field;
        self
    }

    /// Length of the default window in days.
    #[must_use]
    pub const fn lookback_days(mut self, days: i64) -> Self {
        self.cfg.lookback_days = days;
        self
    }

    /// Narrowest window, in hours, a zoom-in link may produce.
    #[must_use]
    pub const fn min_zoom_span_hours(mut self, hours: i64) -> Self {
        self.cfg.min_zoom_span_hours = hours;
        self
    }

    /// Build the `Dashboard`.
    ///
    /// # Errors
    /// Returns `InvalidInput` if no source was registered via [`with_source`](Self::with_source)
    /// or if a numeric setting is negative or spans more than the calendar can represent.
    pub fn build(self) -> Result<Dashboard, GostergeError> {
        let source = self.source.ok_or_else(|| {
            GostergeError::invalid_input("no source registered; add one via with_source(...)")
        })?;
        check_span("lookback_days", self.cfg.lookback_days, TimeDelta::try_days)?;
        check_span(
            "min_zoom_span_hours",
            self.cfg.min_zoom_span_hours,
            TimeDelta::try_hours,
        )?;
        Ok(Dashboard {
            source,
            cfg: self.cfg,
        })
    }
}

impl Dashboard {
    /// Start building a new `Dashboard`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let dashboard = gosterge::Dashboard::builder()
    ///     .with_source(Arc::new(gosterge_yfinance::YfConnector::try_new_default()?))
    ///     .lookback_days(14)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.cfg
    }

    /// Name of the underlying data source.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}

/// A window length setting must be non-negative and fit between the epoch and
/// the earliest representable instant.
fn check_span(
    setting: &str,
    value: i64,
    to_delta: fn(i64) -> Option<TimeDelta>,
) -> Result<(), GostergeError> {
    if value < 0 {
        return Err(GostergeError::invalid_input(format!(
            "{setting} must not be negative, got {value}"
        )));
    }
    to_delta(value)
        .and_then(|span| DateTime::<Utc>::UNIX_EPOCH.checked_sub_signed(span))
        .map(|_| ())
        .ok_or_else(|| GostergeError::invalid_input(format!("{setting} is out of range, got {value}")))
}
