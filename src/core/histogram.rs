//! Value-domain histogram conversion for histogram x-axis mode.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::core::types::Series;

/// Flattens every non-null sample value across all series.
#[must_use]
pub fn series_values(series: &[Series]) -> Vec<f64> {
    series
        .iter()
        .flat_map(|entry| entry.datapoints.iter().filter_map(|point| point.value))
        .collect()
}

/// Floor-buckets values into `(bucket_start, count)` pairs, ascending.
///
/// Non-finite values and a non-positive bucket size yield no buckets.
#[must_use]
pub fn convert_values_to_histogram(values: &[f64], bucket_size: f64) -> Vec<(f64, u64)> {
    if !bucket_size.is_finite() || bucket_size <= 0.0 {
        return Vec::new();
    }

    let mut buckets: BTreeMap<OrderedFloat<f64>, u64> = BTreeMap::new();
    for value in values {
        if !value.is_finite() {
            continue;
        }
        let bucket_start = (value / bucket_size).floor() * bucket_size;
        *buckets.entry(OrderedFloat(bucket_start)).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(bucket_start, count)| (bucket_start.into_inner(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_are_floor_aligned_and_sorted() {
        let histogram = convert_values_to_histogram(&[1.2, 4.9, 5.0, 9.9, -0.1], 5.0);
        assert_eq!(histogram, vec![(-5.0, 1), (0.0, 2), (5.0, 2)]);
    }

    #[test]
    fn invalid_bucket_size_yields_no_buckets() {
        assert!(convert_values_to_histogram(&[1.0, 2.0], 0.0).is_empty());
        assert!(convert_values_to_histogram(&[1.0, 2.0], f64::NAN).is_empty());
    }
}
