use gosterge::{Dashboard, PageQuery};
use gosterge_demos::common::{get_source, print_last_values};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let symbol = std::env::args().nth(1).unwrap_or_else(|| "GC=F".to_string());
    let dashboard = Dashboard::builder()
        .with_source(get_source()?)
        .lookback_days(30)
        .build()?;

    let page = dashboard.detail_page(&symbol, &PageQuery::new()).await?;
    println!(
        "{} ({}) over {} at {} resolution\n",
        page.name, page.symbol, page.page.range, page.page.resolution
    );
    print_last_values(&page.page.data_list)?;

    // Unknown symbols are rejected before any request is made.
    if let Err(e) = dashboard.detail_page("ETH-USD", &PageQuery::new()).await {
        println!("\nETH-USD: {e}");
    }
    Ok(())
}
