use gosterge::{Field, ObservationTable, Resolution};

use crate::helpers::{FnSource, INDEX_SYMBOLS, at, base_value, dashboard, scripted_bars};

fn close_to(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[tokio::test]
async fn index_series_normalizes_every_catalog_series() {
    let src = FnSource::growing(0.01);
    let dash = dashboard(src.clone());

    let out = dash
        .prepare_index_series(
            at("2024-01-01T03:00:00+03:00"),
            at("2024-01-01T09:00:00+03:00"),
            Resolution::Hourly,
            Field::Close,
        )
        .await
        .unwrap();

    assert_eq!(out.names().collect::<Vec<_>>(), ["USD", "BIST", "GOLD", "BTC"]);
    assert_eq!(out.len(), 6);
    assert_eq!(out.timestamps[0], "2024-01-01T03:00:00+03:00");
    assert_eq!(out.timestamps[5], "2024-01-01T08:00:00+03:00");
    for s in &out.series {
        assert_eq!(s.data.len(), out.len(), "{}", s.name);
        assert!(close_to(s.data[0], 1.0), "{}", s.name);
    }

    // Direct series grow by 1%; lira-priced ones compound with the rate.
    assert!(close_to(out.get("USD").unwrap()[1], 1.01));
    assert!(close_to(out.get("BIST").unwrap()[1], 1.01));
    assert!(close_to(out.get("GOLD").unwrap()[1], 1.01 * 1.01));
    assert!(close_to(out.get("BTC").unwrap()[1], 1.01 * 1.01));
}

#[tokio::test]
async fn index_series_fetches_each_symbol_once() {
    let src = FnSource::growing(0.0);
    let dash = dashboard(src.clone());

    dash.prepare_index_series(
        at("2024-01-01T00:00:00+03:00"),
        at("2024-01-02T00:00:00+03:00"),
        Resolution::FifteenMinutes,
        Field::Close,
    )
    .await
    .unwrap();

    let reqs = src.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].symbols, INDEX_SYMBOLS);
    assert_eq!(reqs[0].resolution, Resolution::FifteenMinutes);
    assert_eq!(reqs[0].start.to_rfc3339(), "2023-12-31T21:00:00+00:00");
    assert_eq!(reqs[0].end.to_rfc3339(), "2024-01-01T21:00:00+00:00");
}

#[tokio::test]
async fn rows_missing_a_series_are_dropped_before_normalizing() {
    // The rate has no bar for the first hour; every series must then start
    // on the second hour at exactly 1.0.
    let src = FnSource::new("gappy", |req| {
        let full = scripted_bars(req, |symbol, i| base_value(symbol) + i as f64);
        let mut table = ObservationTable::new();
        for symbol in full.symbols() {
            let skip = usize::from(symbol == "TRY=X");
            table.insert(symbol, full.series(symbol).unwrap()[skip..].to_vec());
        }
        Ok(table)
    });
    let dash = dashboard(src);

    let out = dash
        .prepare_index_series(
            at("2024-01-01T00:00:00+00:00"),
            at("2024-01-01T04:00:00+00:00"),
            Resolution::Hourly,
            Field::Close,
        )
        .await
        .unwrap();

    assert_eq!(out.len(), 3);
    assert_eq!(out.timestamps[0], "2024-01-01T04:00:00+03:00");
    for s in &out.series {
        assert!(close_to(s.data[0], 1.0), "{}", s.name);
    }
}
