use gosterge::{Field, GostergeError, Resolution};
use gosterge_mock::{DynamicMockSource, MockBehavior, MockSource};

use crate::helpers::{FnSource, INDEX_SYMBOLS, at, base_value, dashboard, range, scripted_bars};

#[tokio::test]
async fn empty_source_is_no_data_with_requested_range() {
    let dash = dashboard(std::sync::Arc::new(MockSource::empty()));
    let r = range("2024-01-01T00:00:00+03:00", "2024-01-08T00:00:00+03:00");

    let err = dash
        .prepare_index_series(r.from, r.to, Resolution::Hourly, Field::Close)
        .await
        .unwrap_err();

    assert_eq!(err, GostergeError::no_data(r));
    assert_eq!(
        err.to_string(),
        "No data found between [2024-01-01T00:00:00+03:00] - [2024-01-08T00:00:00+03:00]"
    );
}

#[tokio::test]
async fn inverted_range_is_no_data_without_fetching() {
    let (source, controller) = DynamicMockSource::new_with_controller("dyn");
    let dash = dashboard(source);
    let r = range("2024-01-08T00:00:00+03:00", "2024-01-01T00:00:00+03:00");

    let err = dash
        .prepare_index_series(r.from, r.to, Resolution::FifteenMinutes, Field::Close)
        .await
        .unwrap_err();

    assert!(err.is_no_data());
    assert_eq!(err, GostergeError::no_data(r));
    assert!(controller.requests().await.is_empty());
}

#[tokio::test]
async fn missing_column_yields_no_data() {
    // Gold is never answered, so no row holds every series.
    let (source, controller) = DynamicMockSource::new_with_controller("dyn");
    let bar = gosterge::Observation::flat(
        at("2024-01-01T00:00:00+00:00").with_timezone(&chrono::Utc),
        1.0,
    );
    for symbol in ["TRY=X", "XU100.IS", "BTC-USD"] {
        controller
            .set_behavior(symbol, MockBehavior::Return(vec![bar]))
            .await;
    }
    let dash = dashboard(source);

    let err = dash
        .prepare_index_series(
            at("2024-01-01T00:00:00+00:00"),
            at("2024-01-01T01:00:00+00:00"),
            Resolution::Hourly,
            Field::Close,
        )
        .await
        .unwrap_err();

    assert!(err.is_no_data());
    assert_eq!(controller.requests().await[0].symbols, INDEX_SYMBOLS);
}

#[tokio::test]
async fn source_errors_propagate_unchanged() {
    let boom = GostergeError::connector("scripted", "upstream 503");
    let dash = dashboard(FnSource::failing(boom.clone()));

    let err = dash
        .prepare_index_series(
            at("2024-01-01T00:00:00+03:00"),
            at("2024-01-02T00:00:00+03:00"),
            Resolution::FifteenMinutes,
            Field::Close,
        )
        .await
        .unwrap_err();

    assert_eq!(err, boom);
}

#[tokio::test]
async fn zero_baseline_is_a_data_error() {
    let src = FnSource::new("zero", |req| {
        Ok(scripted_bars(req, |symbol, i| {
            if symbol == "XU100.IS" && i == 0 {
                0.0
            } else {
                base_value(symbol)
            }
        }))
    });
    let dash = dashboard(src);

    let err = dash
        .prepare_index_series(
            at("2024-01-01T00:00:00+00:00"),
            at("2024-01-01T03:00:00+00:00"),
            Resolution::Hourly,
            Field::Close,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GostergeError::Data(_)));
}
