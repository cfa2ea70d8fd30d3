use gosterge::{Dashboard, PageQuery};
use gosterge_demos::common::{get_source, print_last_values};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = Dashboard::builder().with_source(get_source()?).build()?;

    // 1. No parameters: the last seven days ending tonight in Istanbul.
    let page = dashboard.index_page(&PageQuery::new()).await?;
    println!("Window {} at {} resolution", page.range, page.resolution);

    // 2. Every series starts at 1.0; the last value is the change over the window.
    print_last_values(&page.data_list)?;

    let ditis: Vec<String> = serde_json::from_str(&page.diti_list)?;
    if let (Some(first), Some(last)) = (ditis.first(), ditis.last()) {
        println!("\n{} rows from {first} to {last}", ditis.len());
    }
    Ok(())
}
