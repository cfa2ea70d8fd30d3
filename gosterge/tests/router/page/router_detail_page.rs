use std::sync::Arc;

use gosterge::{GostergeError, PageQuery, Resolution};
use gosterge_mock::MockSource;

use crate::helpers::{FnSource, dashboard, now};

#[tokio::test]
async fn detail_page_carries_symbol_and_single_series() {
    let src = FnSource::growing(0.01);
    let dash = dashboard(src.clone());
    let query = PageQuery::with_range("2024-01-01T00:00:00+03:00", "2024-01-02T00:00:00+03:00");

    let page = dash.detail_page_at("btc", &query, now()).await.unwrap();

    assert_eq!(page.symbol, "BTC-USD");
    assert_eq!(page.name, "BTC");
    assert_eq!(page.page.resolution, Resolution::FifteenMinutes);
    let data: serde_json::Value = serde_json::from_str(&page.page.data_list).unwrap();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["name"], "BTC");
    assert_eq!(src.requests()[0].symbols, ["BTC-USD", "TRY=X"]);

    // The page fields are flattened next to the symbol.
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["symbol"], "BTC-USD");
    assert!(json["diti_list"].is_string());
    assert!(json.get("page").is_none());
}

#[tokio::test]
async fn detail_page_over_mock_keeps_only_common_trading_hours() {
    // Bitcoin trades every hour, the lira rate only on weekdays.
    let dash = dashboard(Arc::new(MockSource::new()));
    let query = PageQuery::with_range("2024-01-01T03:00:00+03:00", "2024-01-08T03:00:00+03:00");

    let page = dash.detail_page_at("BTC-USD", &query, now()).await.unwrap();

    let ditis: Vec<String> = serde_json::from_str(&page.page.diti_list).unwrap();
    assert_eq!(ditis.len(), 120);
    assert_eq!(ditis[0], "2024-01-01T03:00:00+03:00");
}

#[tokio::test]
async fn unknown_symbol_is_invalid_input() {
    let src = FnSource::growing(0.0);
    let dash = dashboard(src.clone());

    let err = dash
        .detail_page_at("DOGE", &PageQuery::new(), now())
        .await
        .unwrap_err();

    assert!(matches!(err, GostergeError::InvalidInput(_)));
    assert_eq!(src.calls(), 0);
}
