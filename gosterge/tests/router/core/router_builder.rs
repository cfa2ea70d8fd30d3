use std::sync::Arc;

use gosterge::{Dashboard, DashboardConfig, Field, GostergeError, PageQuery, Resolution};
use gosterge_mock::MockSource;

use crate::helpers::{FnSource, at, now};

#[test]
fn build_requires_a_source() {
    let err = Dashboard::builder().build().err().unwrap();
    assert!(matches!(err, GostergeError::InvalidInput(ref m) if m.contains("with_source")));
}

#[test]
fn negative_settings_are_rejected() {
    let err = Dashboard::builder()
        .with_source(Arc::new(MockSource::new()))
        .lookback_days(-1)
        .build()
        .err()
        .unwrap();
    assert!(err.is_invalid_input());

    let err = Dashboard::builder()
        .with_source(Arc::new(MockSource::new()))
        .min_zoom_span_hours(-2)
        .build()
        .err()
        .unwrap();
    assert!(err.is_invalid_input());
}

#[test]
fn unrepresentable_spans_are_rejected_at_build() {
    for builder in [
        Dashboard::builder().lookback_days(i64::MAX),
        Dashboard::builder().lookback_days(400_000_000),
        Dashboard::builder().min_zoom_span_hours(i64::MAX),
    ] {
        let err = builder
            .with_source(Arc::new(MockSource::new()))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, GostergeError::InvalidInput(ref m) if m.contains("out of range")));
    }

    // A century of history is fine.
    assert!(
        Dashboard::builder()
            .with_source(Arc::new(MockSource::new()))
            .lookback_days(36_500)
            .min_zoom_span_hours(24 * 36_500)
            .build()
            .is_ok()
    );
}

#[test]
fn defaults_and_source_name() {
    let dash = Dashboard::builder()
        .with_source(FnSource::growing(0.0))
        .build()
        .unwrap();
    assert_eq!(dash.config(), &DashboardConfig::default());
    assert_eq!(dash.config().display_timezone, chrono_tz::Europe::Istanbul);
    assert_eq!(dash.source_name(), "scripted");
}

#[tokio::test]
async fn display_zone_and_lookback_shape_the_page() {
    let dash = Dashboard::builder()
        .with_source(FnSource::growing(0.0))
        .display_timezone(chrono_tz::UTC)
        .lookback_days(1)
        .field(Field::Open)
        .build()
        .unwrap();

    let page = dash.index_page_at(&PageQuery::new(), now()).await.unwrap();

    assert_eq!(page.range.from, at("2024-01-09T00:00:00+00:00"));
    assert_eq!(page.to_diti, "2024-01-10T23:59:59.999999+00:00");
    // 47 whole hours.
    assert_eq!(page.resolution, Resolution::FifteenMinutes);
    let ditis: Vec<String> = serde_json::from_str(&page.diti_list).unwrap();
    assert!(ditis.iter().all(|d| d.ends_with("+00:00")));
}

#[tokio::test]
async fn zoom_in_respects_the_minimum_span() {
    let dash = Dashboard::builder()
        .with_source(FnSource::growing(0.0))
        .min_zoom_span_hours(5)
        .build()
        .unwrap();
    // 6h window, 1h step: a plain zoom-in would leave 4h.
    let query = PageQuery::with_range("2024-01-01T00:00:00+03:00", "2024-01-01T06:00:00+03:00");

    let page = dash.index_page_at(&query, now()).await.unwrap();

    assert_eq!(
        page.zoom_in_url_params,
        "fDiti=2024-01-01T00%3A30%3A00%2B03%3A00&tDiti=2024-01-01T05%3A30%3A00%2B03%3A00"
    );
}

#[test]
fn config_replaces_every_setting() {
    let cfg = DashboardConfig {
        lookback_days: 30,
        ..DashboardConfig::default()
    };
    let dash = Dashboard::builder()
        .config(cfg.clone())
        .with_source(Arc::new(MockSource::new()))
        .build()
        .unwrap();
    assert_eq!(dash.config(), &cfg);
}
