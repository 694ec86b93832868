//! Row coverage through [Klee's algorithm] over the spans of sensor readings.
//!
//! [Klee's algorithm]: https://en.wikipedia.org/wiki/Klee%27s_measure_problem

#[cfg(test)]
mod tests;

use core::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::geom::Point;
use crate::sensor::{Reading, Span};

/// A boundary of a span, as processed by the sweep line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KleePoint {
    pub x: i64,
    pub is_end: bool,
}

impl KleePoint {
    #[inline]
    fn delta(self) -> i64 {
        if self.is_end {
            -1
        } else {
            1
        }
    }
}

/// Collect the boundaries of `spans` into `out` in sweep order.
///
/// Points are ordered by `x`, with ends before starts at the same `x` so
/// that spans which touch are treated as one contiguous stretch.
pub fn klee_points<I>(spans: I, out: &mut Vec<KleePoint>)
where
    I: IntoIterator<Item = Span>,
{
    out.clear();

    for span in spans {
        out.push(KleePoint {
            x: span.start,
            is_end: false,
        });
        out.push(KleePoint {
            x: span.end,
            is_end: true,
        });
    }

    out.sort_unstable_by_key(|p| (p.x, !p.is_end));
}

/// The depth to start sweeping from, having applied the first point.
///
/// The first point is an opening one unless a single-position span sits at
/// the very left, in which case its end sorts before its own start.
#[inline]
fn initial_depth(points: &[KleePoint]) -> i64 {
    points.first().map_or(0, |p| p.delta())
}

/// Total length covered by the spans the sorted `points` were built from.
///
/// Spans are measured as closed intervals, so `[0, 5]` has a length of `5`.
///
/// # Examples
///
/// ```
/// use y2022::sensor::Span;
/// use y2022::sweep::{klee_points, overlapping_length};
///
/// let mut points = Vec::new();
/// klee_points([Span::new(0, 5), Span::new(3, 8), Span::new(10, 12)], &mut points);
/// assert_eq!(overlapping_length(&points), 10);
/// ```
pub fn overlapping_length(points: &[KleePoint]) -> i64 {
    let mut result = 0;
    // How many spans deep we are between the previous and the current point.
    // Starts at 1 for the usual opening first point, see [initial_depth].
    let mut depth = initial_depth(points);

    for i in 1..points.len() {
        let (prev, this) = (points[i - 1], points[i]);

        let diff = this.x - prev.x;

        if depth > 0 && diff > 0 {
            result += diff;
        }

        depth += this.delta();
    }

    result
}

/// Sum the lengths covered by sensors on `row`, counting overlapping
/// stretches once.
pub fn sum_overlapping_segment_lengths(row: i64, readings: &[Reading]) -> i64 {
    let mut points = Vec::with_capacity(readings.len() * 2);
    klee_points(readings.iter().filter_map(|r| r.span_on_row(row)), &mut points);
    overlapping_length(&points)
}

/// Count the positions on `row` where a beacon cannot be, which is every
/// covered position that does not already hold a known beacon.
pub fn count_non_beacon_positions(row: i64, readings: &[Reading]) -> i64 {
    let mut spans = readings
        .iter()
        .filter_map(|r| r.span_on_row(row))
        .collect::<Vec<_>>();

    spans.sort_unstable_by_key(|s| s.start);

    let mut covered = 0;
    // First position not yet counted.
    let mut x = i64::MIN;

    for s in spans {
        let start = s.start.max(x);

        if start <= s.end {
            covered += s.end - start + 1;
            x = s.end + 1;
        }
    }

    let mut beacons = readings
        .iter()
        .filter(|r| r.beacon.y == row)
        .map(|r| r.beacon.x)
        .collect::<Vec<_>>();

    beacons.sort_unstable();
    beacons.dedup();
    covered - beacons.len() as i64
}

/// Find the first position in `0..=limit` which is not covered by the spans
/// the sorted `points` were built from.
///
/// All points must already be restricted to `0..=limit`.
pub fn vacant_x(points: &[KleePoint], limit: i64) -> Option<i64> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return (limit >= 0).then_some(0);
    };

    if first.x > 0 {
        return Some(0);
    }

    // Same depth 1 convention as `overlapping_length`.
    let mut depth = initial_depth(points);

    for i in 1..points.len() {
        let (prev, this) = (points[i - 1], points[i]);

        // Spans are inclusive, so there's only room between two of them if
        // they are at least two apart.
        if depth == 0 && this.x - prev.x > 1 {
            return Some(prev.x + 1);
        }

        depth += this.delta();
    }

    (last.x < limit).then_some(last.x + 1)
}

/// Find the vacant position on `row`, using `buf` as scratch space.
fn vacant_on_row(
    row: i64,
    limit: i64,
    readings: &[Reading],
    buf: &mut Vec<KleePoint>,
) -> Option<i64> {
    let spans = readings
        .iter()
        .filter_map(|r| r.span_on_row(row)?.clamp(0, limit));

    klee_points(spans, buf);
    vacant_x(buf, limit)
}

/// Find the only point with both coordinates in `0..=limit` which no sensor
/// covers, scanning rows on one worker per available core.
pub fn find_vacant_point(limit: i64, readings: &[Reading]) -> Option<Point> {
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    find_vacant_point_with_workers(limit, readings, workers)
}

/// Find the vacant point using exactly `workers` threads.
///
/// Worker `n` scans rows `n`, `n + workers`, and so on. The first point
/// reported is returned and the remaining workers stop at their next row.
pub fn find_vacant_point_with_workers(
    limit: i64,
    readings: &[Reading],
    workers: usize,
) -> Option<Point> {
    let workers = workers.max(1);
    let step = workers as i64;
    let found = AtomicBool::new(false);
    let (tx, rx) = crossbeam_channel::bounded(workers);

    thread::scope(|s| {
        for worker in 0..workers {
            let tx = tx.clone();
            let found = &found;

            s.spawn(move || {
                let mut buf = Vec::with_capacity(readings.len() * 2);
                let mut row = worker as i64;

                while row <= limit && !found.load(Ordering::Relaxed) {
                    if let Some(x) = vacant_on_row(row, limit, readings, &mut buf) {
                        log::debug!("worker {worker} found vacant point at {x},{row}");
                        found.store(true, Ordering::Relaxed);
                        let _ = tx.send(Point::new(x, row));
                        return;
                    }

                    row += step;
                }
            });
        }

        drop(tx);
        rx.recv().ok()
    })
}

/// Find the vacant point scanning one row at a time.
pub fn find_vacant_point_serially(limit: i64, readings: &[Reading]) -> Option<Point> {
    let mut buf = Vec::with_capacity(readings.len() * 2);

    (0..=limit).find_map(|row| {
        let x = vacant_on_row(row, limit, readings, &mut buf)?;
        Some(Point::new(x, row))
    })
}

/// Encode a found point as the puzzle answer.
///
/// # Examples
///
/// ```
/// use y2022::geom::Point;
/// use y2022::sweep::tuning_frequency;
///
/// assert_eq!(tuning_frequency(Point::new(14, 11)), 56000011);
/// ```
#[inline]
pub fn tuning_frequency(point: Point) -> i64 {
    4_000_000 * point.x + point.y
}
