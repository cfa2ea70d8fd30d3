use gosterge::{Dashboard, PageQuery};
use gosterge_demos::common::get_source;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,gosterge=trace,gosterge_yfinance=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let dashboard = Dashboard::builder().with_source(get_source()?).build()?;

    // Default window, then a single series over the same window.
    let page = dashboard.index_page(&PageQuery::new()).await?;
    let query = PageQuery::from_query_string(&page.zoom_in_url_params);
    let detail = dashboard.detail_page("BTC-USD", &query).await?;
    tracing::info!(
        resolution = %page.resolution,
        zoomed = %detail.page.resolution,
        to = %detail.page.to_diti,
        "pages rendered"
    );

    Ok(())
}
