use lib::input::{ErrorKind, IStr};

use super::{parse_readings, Reading, Span};
use crate::geom::Point;
use crate::Error;

pub(crate) const SAMPLE: &str = "\
Sensor at x=2, y=18: closest beacon is at x=-2, y=15
Sensor at x=9, y=16: closest beacon is at x=10, y=16
Sensor at x=13, y=2: closest beacon is at x=15, y=3
Sensor at x=12, y=14: closest beacon is at x=10, y=16
Sensor at x=10, y=20: closest beacon is at x=10, y=16
Sensor at x=14, y=17: closest beacon is at x=10, y=16
Sensor at x=8, y=7: closest beacon is at x=2, y=10
Sensor at x=2, y=0: closest beacon is at x=2, y=10
Sensor at x=0, y=11: closest beacon is at x=2, y=10
Sensor at x=20, y=14: closest beacon is at x=25, y=17
Sensor at x=17, y=20: closest beacon is at x=21, y=22
Sensor at x=16, y=7: closest beacon is at x=15, y=3
Sensor at x=14, y=3: closest beacon is at x=15, y=3
Sensor at x=20, y=1: closest beacon is at x=15, y=3
";

pub(crate) fn sample() -> Vec<Reading> {
    parse_readings(&mut IStr::from(SAMPLE)).unwrap()
}

fn reading(sensor_x: i64, sensor_y: i64, beacon_x: i64, beacon_y: i64) -> Reading {
    Reading::new(
        Point::new(sensor_x, sensor_y),
        Point::new(beacon_x, beacon_y),
    )
}

#[test]
fn test_parse_reading() -> Result<(), Error> {
    let r = Reading::parse("Sensor at x=2, y=18: closest beacon is at x=-2, y=15")?;
    assert_eq!(r, reading(2, 18, -2, 15));
    Ok(())
}

#[test]
fn test_parse_bad_readings() {
    for line in [
        "Sensor at some other place",
        "Sensor at x=2, y=18: closest beacon is at x=-2",
        "Sensor at x=2, y=18: closest beacon is at x=-2, y=15 and more",
        "Sensor at x=2 y=18: closest beacon is at x=-2, y=15",
        "Sensor at x=2.5, y=18: closest beacon is at x=-2, y=15",
        "Beacon at x=2, y=18: closest sensor is at x=-2, y=15",
    ] {
        assert!(
            matches!(Reading::parse(line), Err(Error::Reading(..))),
            "{line:?} should not parse"
        );
    }
}

#[test]
fn test_parse_reports_position() {
    let error = Reading::parse("Sensor at x=2, y=1x: closest beacon is at x=-2, y=15").unwrap_err();

    let Error::Reading(error) = error else {
        panic!("expected reading error");
    };

    assert!(matches!(error.kind(), ErrorKind::NotInteger("1x")));
    assert_eq!(error.span(), 17..19);
}

#[test]
fn test_parse_all_readings() {
    let readings = sample();
    assert_eq!(readings.len(), 14);
    assert_eq!(readings[0], reading(2, 18, -2, 15));
    assert_eq!(readings[13], reading(20, 1, 15, 3));
}

#[test]
fn test_bad_line_fails_all_readings() {
    let mut input = IStr::from(
        "Sensor at x=2, y=18: closest beacon is at x=-2, y=15\nSensor at x=9, y=16\n",
    );
    assert!(matches!(
        parse_readings(&mut input),
        Err(Error::Reading(..))
    ));
}

#[test]
fn test_radius() {
    assert_eq!(reading(2, 18, -2, 15).radius(), 7);
    assert_eq!(reading(8, 7, 2, 10).radius(), 9);
}

#[test]
fn test_span_on_row() {
    let r = reading(8, 7, 2, 10);
    assert_eq!(r.span_on_row(10), Some(Span::new(2, 14)));
    assert_eq!(r.span_on_row(7), Some(Span::new(-1, 17)));
    assert_eq!(r.span_on_row(16), Some(Span::new(8, 8)));
    assert_eq!(r.span_on_row(-2), Some(Span::new(8, 8)));
    assert_eq!(r.span_on_row(17), None);
    assert_eq!(r.span_on_row(-3), None);
}

#[test]
fn test_span() {
    let span = Span::new(2, 14);
    assert_eq!(span.width(), 13);
    assert!(span.contains(2) && span.contains(14));
    assert!(!span.contains(15));
    assert_eq!(span.clamp(0, 10), Some(Span::new(2, 10)));
    assert_eq!(span.clamp(15, 20), None);
    assert_eq!(Span::new(-4, -1).clamp(0, 20), None);
}
