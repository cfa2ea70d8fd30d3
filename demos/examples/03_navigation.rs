use gosterge::{Dashboard, GostergeError, PageQuery};
use gosterge_demos::common::get_source;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = Dashboard::builder().with_source(get_source()?).build()?;

    let start = PageQuery::with_range("2024-03-04T00:00:00+03:00", "2024-03-11T00:00:00+03:00");
    let page = dashboard.index_page(&start).await?;
    println!("start    {} ({})", page.range, page.resolution);

    // Follow each link the chart would render.
    for (label, params) in [
        ("prev", &page.prev_url_params),
        ("next", &page.next_url_params),
        ("zoom in", &page.zoom_in_url_params),
        ("zoom out", &page.zoom_out_url_params),
    ] {
        let query = PageQuery::from_query_string(params);
        match dashboard.index_page(&query).await {
            Ok(p) => println!("{label:<8} {} ({})", p.range, p.resolution),
            Err(e @ GostergeError::NoData { .. }) => println!("{label:<8} {e}"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
