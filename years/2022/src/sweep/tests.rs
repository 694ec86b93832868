use proptest::prelude::*;

use super::*;
use crate::sensor::tests::sample;

fn points(spans: &[(i64, i64)]) -> Vec<KleePoint> {
    let mut out = Vec::new();
    klee_points(spans.iter().map(|&(s, e)| Span::new(s, e)), &mut out);
    out
}

/// Length of the union of closed intervals, computed by merging them.
fn merged_length(spans: &[(i64, i64)]) -> i64 {
    let mut spans = spans.to_vec();
    spans.sort();

    let mut total = 0;
    let mut current: Option<(i64, i64)> = None;

    for (s, e) in spans {
        current = match current {
            Some((cs, ce)) if s <= ce => Some((cs, ce.max(e))),
            Some((cs, ce)) => {
                total += ce - cs;
                Some((s, e))
            }
            None => Some((s, e)),
        };
    }

    if let Some((cs, ce)) = current {
        total += ce - cs;
    }

    total
}

#[test]
fn test_sum_overlapping_segment_lengths() {
    assert_eq!(sum_overlapping_segment_lengths(10, &sample()), 26);
}

#[test]
fn test_count_non_beacon_positions() {
    let readings = sample();
    assert_eq!(count_non_beacon_positions(10, &readings), 26);
    // Row 16 holds the beacon at 10,16, reported by four sensors.
    let covered = (-100..100)
        .filter(|&x| {
            readings
                .iter()
                .filter_map(|r| r.span_on_row(16))
                .any(|s| s.contains(x))
        })
        .count() as i64;
    assert_eq!(count_non_beacon_positions(16, &readings), covered - 1);
}

#[test]
fn test_points_order_ends_first() {
    let out = points(&[(5, 9), (0, 5)]);

    assert_eq!(
        out,
        [
            KleePoint { x: 0, is_end: false },
            KleePoint { x: 5, is_end: true },
            KleePoint { x: 5, is_end: false },
            KleePoint { x: 9, is_end: true },
        ]
    );

    assert_eq!(overlapping_length(&out), 9);
    assert_eq!(vacant_x(&out, 9), None);
}

#[test]
fn test_overlapping_length_edges() {
    assert_eq!(overlapping_length(&[]), 0);
    assert_eq!(overlapping_length(&points(&[(3, 3)])), 0);
    assert_eq!(overlapping_length(&points(&[(0, 0), (5, 6)])), 1);
    assert_eq!(overlapping_length(&points(&[(0, 0), (10, 12)])), 2);
    assert_eq!(overlapping_length(&points(&[(0, 10), (5, 5), (20, 22)])), 12);
}

#[test]
fn test_vacant_x() {
    assert_eq!(vacant_x(&[], 10), Some(0));
    assert_eq!(vacant_x(&points(&[(2, 10)]), 10), Some(0));
    assert_eq!(vacant_x(&points(&[(0, 4), (5, 10)]), 10), None);
    assert_eq!(vacant_x(&points(&[(0, 4), (6, 10)]), 10), Some(5));
    assert_eq!(vacant_x(&points(&[(0, 0), (2, 10)]), 10), Some(1));
    assert_eq!(vacant_x(&points(&[(0, 3), (5, 5), (7, 10)]), 10), Some(4));
    assert_eq!(vacant_x(&points(&[(0, 9)]), 10), Some(10));
}

#[test]
fn test_find_vacant_point() {
    let readings = sample();
    let expected = Some(Point::new(14, 11));

    assert_eq!(find_vacant_point_serially(20, &readings), expected);
    assert_eq!(find_vacant_point(20, &readings), expected);

    for workers in [0, 1, 2, 3, 8, 32] {
        assert_eq!(
            find_vacant_point_with_workers(20, &readings, workers),
            expected,
            "{workers} workers"
        );
    }
}

#[test]
fn test_no_vacant_point() {
    let readings = [Reading::new(Point::new(5, 5), Point::new(5, 20))];
    assert_eq!(find_vacant_point_serially(10, &readings), None);
    assert_eq!(find_vacant_point_with_workers(10, &readings, 4), None);
}

#[test]
fn test_tuning_frequency() {
    assert_eq!(tuning_frequency(Point::new(14, 11)), 56000011);
    assert_eq!(tuning_frequency(Point::new(3_000_000, 2)), 12_000_000_000_002);
}

fn spans() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((-30i64..30, 0i64..15), 0..12)
        .prop_map(|spans| spans.into_iter().map(|(s, w)| (s, s + w)).collect())
}

proptest! {
    #[test]
    fn overlapping_length_is_union_length(spans in spans()) {
        prop_assert_eq!(overlapping_length(&points(&spans)), merged_length(&spans));
    }

    #[test]
    fn vacant_x_is_first_uncovered(spans in spans(), limit in 0i64..40) {
        let clamped = spans
            .iter()
            .filter_map(|&(s, e)| Span::new(s, e).clamp(0, limit))
            .map(|s| (s.start, s.end))
            .collect::<Vec<_>>();

        let expected = (0..=limit).find(|&x| !clamped.iter().any(|&(s, e)| (s..=e).contains(&x)));
        prop_assert_eq!(vacant_x(&points(&clamped), limit), expected);
    }
}
