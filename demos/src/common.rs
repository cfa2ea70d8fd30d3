use gosterge_core::{GostergeError, ObservationSource};
use std::sync::Arc;

/// Return a data source for demos.
///
/// Set `GOSTERGE_DEMOS_USE_MOCK` to run offline against the deterministic mock.
///
/// # Errors
/// Returns an error if the Yahoo Finance client cannot be constructed.
pub fn get_source() -> Result<Arc<dyn ObservationSource>, GostergeError> {
    if std::env::var("GOSTERGE_DEMOS_USE_MOCK").is_ok() {
        println!("--- (Using Mock Source for CI) ---");
        Ok(Arc::new(gosterge_mock::MockSource::new()))
    } else {
        Ok(Arc::new(gosterge_yfinance::YfConnector::try_new_default()?))
    }
}

/// Print the last value of every series in a `data_list` JSON payload.
///
/// # Errors
/// Returns an error if `data_list` is not the expected JSON shape.
pub fn print_last_values(data_list: &str) -> Result<(), serde_json::Error> {
    let series: Vec<gosterge::NamedSeries> = serde_json::from_str(data_list)?;
    println!("{:<6} | {:>10} | {:>5}", "Series", "Last", "Rows");
    println!("{:-<7}|{:-<12}|{:-<6}", "", "", "");
    for s in &series {
        let last = s.data.last().copied().unwrap_or(f64::NAN);
        println!("{:<6} | {:>10.4} | {:>5}", s.name, last, s.data.len());
    }
    Ok(())
}
