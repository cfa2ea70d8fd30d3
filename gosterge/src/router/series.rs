use gosterge_core::{
    Diti, Field, GostergeError, ObservationRequest, Resolution, SeriesFrame, SeriesPlan,
    TimeRange, prepare_series,
};

use crate::Dashboard;

impl Dashboard {
    /// Normalized USD, BIST, GOLD and BTC series over `[from, to)`.
    ///
    /// Behavior:
    /// - Fetches every catalog symbol once and prices gold and bitcoin in lira.
    /// - Every series starts at 1.0 and shares the same timestamps, which are
    ///   rendered in the configured display zone.
    ///
    /// # Errors
    /// - `NoData` (carrying the requested range) when the range is inverted, the
    ///   source returns nothing, or no row has a value for every series.
    /// - `Data` when a series starts at zero.
    /// - Source errors are returned unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "gosterge::router",
            skip_all,
            fields(from = %from, to = %to, resolution = %resolution),
        )
    )]
    pub async fn prepare_index_series(
        &self,
        from: Diti,
        to: Diti,
        resolution: Resolution,
        field: Field,
    ) -> Result<SeriesFrame, GostergeError> {
        self.prepare(&SeriesPlan::index(), TimeRange::new(from, to), resolution, field)
            .await
    }

    /// A single normalized series selected by provider symbol or display name.
    ///
    /// Gold and bitcoin are fetched together with `TRY=X` and priced in lira;
    /// only the requested series is returned.
    ///
    /// # Errors
    /// - `InvalidInput` when `symbol` is not in the catalog.
    /// - Otherwise as [`prepare_index_series`](Self::prepare_index_series).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "gosterge::router",
            skip_all,
            fields(symbol = %symbol, from = %from, to = %to, resolution = %resolution),
        )
    )]
    pub async fn prepare_detail_series(
        &self,
        symbol: &str,
        from: Diti,
        to: Diti,
        resolution: Resolution,
        field: Field,
    ) -> Result<SeriesFrame, GostergeError> {
        let plan = SeriesPlan::detail(symbol)?;
        self.prepare(&plan, TimeRange::new(from, to), resolution, field)
            .await
    }

    async fn prepare(
        &self,
        plan: &SeriesPlan,
        range: TimeRange,
        resolution: Resolution,
        field: Field,
    ) -> Result<SeriesFrame, GostergeError> {
        if range.is_inverted() {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "gosterge::router", %range, "inverted range; source not called");
            return Err(GostergeError::no_data(range));
        }

        let req = ObservationRequest::new(plan.symbols(), &range, resolution);
        let table = self.source.observations(&req).await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "gosterge::router",
            source = self.source.name(),
            rows = table.len(),
            "observations fetched"
        );

        prepare_series(
            &table,
            plan,
            &range,
            resolution,
            field,
            self.cfg.display_timezone,
        )
    }
}
