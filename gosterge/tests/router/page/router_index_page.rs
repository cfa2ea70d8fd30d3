use gosterge::{GostergeError, PageQuery, Resolution};
use gosterge_mock::MockSource;

use crate::helpers::{FnSource, at, dashboard, now, range};

fn week() -> PageQuery {
    PageQuery::with_range("2024-01-01T00:00:00+03:00", "2024-01-08T00:00:00+03:00")
}

#[tokio::test]
async fn week_window_is_hourly_with_quarter_span_links() {
    let src = FnSource::growing(0.001);
    let dash = dashboard(src.clone());

    let page = dash.index_page_at(&week(), now()).await.unwrap();

    assert_eq!(page.resolution, Resolution::Hourly);
    assert_eq!(src.requests()[0].resolution, Resolution::Hourly);
    assert_eq!(page.to_diti, "2024-01-08T00:00:00+03:00");

    // 168h span, 42h step.
    assert_eq!(
        page.prev_url_params,
        "fDiti=2023-12-30T06%3A00%3A00%2B03%3A00&tDiti=2024-01-06T06%3A00%3A00%2B03%3A00"
    );
    assert_eq!(
        page.next_url_params,
        "fDiti=2024-01-02T18%3A00%3A00%2B03%3A00&tDiti=2024-01-09T18%3A00%3A00%2B03%3A00"
    );
    assert_eq!(
        page.zoom_in_url_params,
        "fDiti=2024-01-02T18%3A00%3A00%2B03%3A00&tDiti=2024-01-06T06%3A00%3A00%2B03%3A00"
    );
    assert_eq!(
        page.zoom_out_url_params,
        "fDiti=2023-12-30T06%3A00%3A00%2B03%3A00&tDiti=2024-01-09T18%3A00%3A00%2B03%3A00"
    );

    let ditis: Vec<String> = serde_json::from_str(&page.diti_list).unwrap();
    assert_eq!(ditis.len(), 168);
    assert_eq!(ditis[0], "2024-01-01T00:00:00+03:00");

    let data: serde_json::Value = serde_json::from_str(&page.data_list).unwrap();
    let names: Vec<&str> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["USD", "BIST", "GOLD", "BTC"]);
    assert_eq!(data[0]["data"].as_array().unwrap().len(), 168);
    assert_eq!(data[0]["data"][0], 1.0);
}

#[tokio::test]
async fn span_selects_the_resolution() {
    let src = FnSource::growing(0.0);
    let dash = dashboard(src.clone());

    let ten_days = PageQuery::with_range("2024-01-01T00:00:00+03:00", "2024-01-11T00:00:00+03:00");
    let page = dash.index_page_at(&ten_days, now()).await.unwrap();
    assert_eq!(page.resolution, Resolution::Daily);

    let one_day = PageQuery::with_range("2024-01-01T00:00:00+03:00", "2024-01-02T00:00:00+03:00");
    let page = dash.index_page_at(&one_day, now()).await.unwrap();
    assert_eq!(page.resolution, Resolution::FifteenMinutes);
    assert_eq!(serde_json::from_str::<Vec<String>>(&page.diti_list).unwrap().len(), 96);

    let resolutions: Vec<Resolution> = src.requests().iter().map(|r| r.resolution).collect();
    assert_eq!(resolutions, [Resolution::Daily, Resolution::FifteenMinutes]);
}

#[tokio::test]
async fn missing_params_fall_back_to_the_last_week() {
    let dash = dashboard(FnSource::growing(0.0));

    let page = dash.index_page_at(&PageQuery::new(), now()).await.unwrap();

    assert_eq!(page.range.from, at("2024-01-03T00:00:00+03:00"));
    assert_eq!(page.to_diti, "2024-01-10T23:59:59.999999+03:00");
    // 191 whole hours: still hourly.
    assert_eq!(page.resolution, Resolution::Hourly);
}

#[tokio::test]
async fn a_single_param_keeps_the_default_for_the_other() {
    let dash = dashboard(FnSource::growing(0.0));
    let query = PageQuery {
        from: Some("2024-01-09T00:00:00+03:00".into()),
        to: None,
    };

    let page = dash.index_page_at(&query, now()).await.unwrap();

    assert_eq!(page.range.from, at("2024-01-09T00:00:00+03:00"));
    assert_eq!(page.to_diti, "2024-01-10T23:59:59.999999+03:00");
    assert_eq!(page.resolution, Resolution::FifteenMinutes);
}

#[tokio::test]
async fn unparsable_params_are_invalid_input_and_skip_the_source() {
    let src = FnSource::growing(0.0);
    let dash = dashboard(src.clone());

    for bad in ["", "yesterday", "2024-13-01"] {
        let query = PageQuery::with_range(bad, "2024-01-08T00:00:00+03:00");
        let err = dash.index_page_at(&query, now()).await.unwrap_err();
        assert!(err.is_invalid_input(), "{bad:?}: {err}");
    }
    assert_eq!(src.calls(), 0);
}

#[tokio::test]
async fn naive_params_are_read_in_the_display_zone() {
    let dash = dashboard(FnSource::growing(0.0));
    let query = PageQuery::with_range("2024-01-01", "2024-01-02T00:00");

    let page = dash.index_page_at(&query, now()).await.unwrap();

    assert_eq!(page.range.from, at("2024-01-01T00:00:00+03:00"));
    assert_eq!(page.to_diti, "2024-01-02T00:00:00+03:00");
}

#[tokio::test]
async fn empty_and_inverted_windows_are_no_data() {
    let dash = dashboard(std::sync::Arc::new(MockSource::empty()));
    let err = dash.index_page_at(&week(), now()).await.unwrap_err();
    assert_eq!(
        err,
        GostergeError::no_data(range("2024-01-01T00:00:00+03:00", "2024-01-08T00:00:00+03:00"))
    );

    let src = FnSource::growing(0.0);
    let dash = dashboard(src.clone());
    let inverted = PageQuery::with_range("2024-01-08T00:00:00+03:00", "2024-01-01T00:00:00+03:00");
    let err = dash.index_page_at(&inverted, now()).await.unwrap_err();
    assert!(err.is_no_data());
    assert_eq!(src.calls(), 0);
}

#[tokio::test]
async fn navigation_links_load_the_advertised_window() {
    let dash = dashboard(FnSource::growing(0.0));
    let page = dash.index_page_at(&week(), now()).await.unwrap();

    let next = PageQuery::from_query_string(&page.next_url_params);
    let moved = dash.index_page_at(&next, now()).await.unwrap();
    assert_eq!(moved.range.from, at("2024-01-02T18:00:00+03:00"));
    assert_eq!(moved.to_diti, "2024-01-09T18:00:00+03:00");

    let zoom_in = PageQuery::from_query_string(&page.zoom_in_url_params);
    let zoomed = dash.index_page_at(&zoom_in, now()).await.unwrap();
    // 84h after zooming in: hourly, 21h step.
    assert_eq!(zoomed.resolution, Resolution::Hourly);
    assert_eq!(
        zoomed.prev_url_params,
        "fDiti=2024-01-01T21%3A00%3A00%2B03%3A00&tDiti=2024-01-05T09%3A00%3A00%2B03%3A00"
    );
}

#[tokio::test]
async fn page_serializes_the_template_variables() {
    let dash = dashboard(FnSource::growing(0.0));
    let page = dash.index_page_at(&week(), now()).await.unwrap();

    let json = serde_json::to_value(&page).unwrap();
    for key in [
        "diti_list",
        "data_list",
        "prev_url_params",
        "next_url_params",
        "zoom_in_url_params",
        "zoom_out_url_params",
        "to_diti",
    ] {
        assert!(json[key].is_string(), "{key}");
    }
    assert_eq!(json["resolution"], "1h");
}
