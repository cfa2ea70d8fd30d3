use chrono::{DateTime, Utc};

use super::frame::{AlignedFrame, Column};

// Epoch-aligned so every symbol lands in the same bucket regardless of exchange zone.
const fn bucket_minutes(ts: DateTime<Utc>, minutes: i64) -> Option<DateTime<Utc>> {
    let step = minutes * 60;
    let bucket = ts.timestamp() - ts.timestamp().rem_euclid(step);
    DateTime::from_timestamp(bucket, 0)
}

#[derive(Clone, Copy, Default)]
struct MeanAgg {
    sum: f64,
    count: u32,
}

impl MeanAgg {
    fn push(&mut self, v: Option<f64>) {
        if let Some(v) = v.filter(|v| !v.is_nan()) {
            self.sum += v;
            self.count += 1;
        }
    }

    fn finish(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

/// Truncate every row timestamp to a `minutes` boundary and average rows that
/// share a bucket, column by column.
///
/// - Missing values are skipped; a bucket with no present value stays missing.
/// - Output rows carry the bucket start as their timestamp.
/// - `minutes <= 0` returns the frame unchanged.
///
/// Returns `None` if a timestamp cannot be truncated.
///
/// ```
/// use gosterge_core::{AlignedFrame, resample_to_minutes};
/// use gosterge_core::timeseries::frame::Column;
/// use chrono::DateTime;
/// let t = |s: i64| DateTime::from_timestamp(s, 0).unwrap();
/// let frame = AlignedFrame::from_parts(
///     vec![t(0), t(900), t(3_600)],
///     vec![Column { key: "TRY=X".into(), values: vec![Some(1.0), Some(3.0), Some(5.0)] }],
/// ).unwrap();
/// let hourly = resample_to_minutes(frame, 60).unwrap();
/// assert_eq!(hourly.index(), &[t(0), t(3_600)]);
/// assert_eq!(hourly.columns()[0].values, vec![Some(2.0), Some(5.0)]);
/// ```
#[must_use]
pub fn resample_to_minutes(frame: AlignedFrame, minutes: i64) -> Option<AlignedFrame> {
    if frame.is_empty() || minutes <= 0 {
        return Some(frame);
    }
    let (index, columns) = frame.into_parts();

    let mut buckets: Vec<DateTime<Utc>> = Vec::new();
    let mut aggs: Vec<Vec<MeanAgg>> = vec![Vec::new(); columns.len()];
    for (row, ts) in index.into_iter().enumerate() {
        let bucket = bucket_minutes(ts, minutes)?;
        if buckets.last() != Some(&bucket) {
            buckets.push(bucket);
            for agg in &mut aggs {
                agg.push(MeanAgg::default());
            }
        }
        for (agg, col) in aggs.iter_mut().zip(&columns) {
            if let Some(cur) = agg.last_mut() {
                cur.push(col.values[row]);
            }
        }
    }

    let columns = columns
        .into_iter()
        .zip(aggs)
        .map(|(col, agg)| Column {
            key: col.key,
            values: agg.into_iter().map(MeanAgg::finish).collect(),
        })
        .collect();
    AlignedFrame::from_parts(buckets, columns).ok()
}
