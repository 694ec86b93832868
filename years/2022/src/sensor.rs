//! Sensor readings and the spans they cover on a row.

#[cfg(test)]
pub(crate) mod tests;

use lib::input::{FromInput, IStr, IStrError};

use crate::geom::Point;
use crate::Error;

/// A sensor and the beacon closest to it.
///
/// No other beacon can be within [Reading::radius] of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub sensor: Point,
    pub beacon: Point,
}

impl Reading {
    #[inline]
    pub const fn new(sensor: Point, beacon: Point) -> Self {
        Self { sensor, beacon }
    }

    /// Parse a single line of the form
    /// `Sensor at x=<X>, y=<Y>: closest beacon is at x=<X>, y=<Y>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use y2022::geom::Point;
    /// use y2022::sensor::Reading;
    ///
    /// let reading = Reading::parse("Sensor at x=2, y=18: closest beacon is at x=-2, y=15")?;
    /// assert_eq!(reading.sensor, Point::new(2, 18));
    /// assert_eq!(reading.beacon, Point::new(-2, 15));
    ///
    /// assert!(Reading::parse("Sensor at some other place").is_err());
    /// # Ok::<_, y2022::Error>(())
    /// ```
    pub fn parse(line: &'static str) -> Result<Self, Error> {
        IStr::from(line).next().map_err(Error::Reading)
    }

    /// Manhattan distance between the sensor and its beacon.
    #[inline]
    pub fn radius(&self) -> i64 {
        self.sensor.manhattan(self.beacon)
    }

    /// The span of `x` coordinates the sensor covers on `row`, if it reaches
    /// that row at all.
    pub fn span_on_row(&self, row: i64) -> Option<Span> {
        let y_dist = self.sensor.y.abs_diff(row) as i64;
        let x_dist = self.radius() - y_dist;

        if x_dist < 0 {
            return None;
        }

        Some(Span::new(self.sensor.x - x_dist, self.sensor.x + x_dist))
    }
}

impl FromInput for Reading {
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>, IStrError> {
        if p.as_data().iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        p.expect("Sensor at x=")?;
        let x = field(p, b',')?;
        p.expect(" y=")?;
        let y = field(p, b':')?;
        let sensor = Point::new(x, y);

        p.expect(" closest beacon is at x=")?;
        let x = field(p, b',')?;
        p.expect(" y=")?;
        let y = p.next()?;
        p.finish()?;
        let beacon = Point::new(x, y);

        Ok(Some(Self { sensor, beacon }))
    }
}

/// Parse everything up until `delim` as a single `T`.
fn field<T>(p: &mut IStr, delim: u8) -> Result<T, IStrError>
where
    T: FromInput,
{
    let mut part = p.split_once(delim).unwrap_or(*p);
    let value = part.next()?;
    part.finish()?;
    Ok(value)
}

/// Parse one reading per line until the input or a blank line is reached.
///
/// The first malformed line fails the whole parse.
pub fn parse_readings(input: &mut IStr) -> Result<Vec<Reading>, Error> {
    input
        .lines::<Reading>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::Reading)
}

/// An inclusive span of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    #[inline]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Number of integer positions covered by the span.
    #[inline]
    pub fn width(&self) -> i64 {
        self.end - self.start + 1
    }

    #[inline]
    pub fn contains(&self, x: i64) -> bool {
        (self.start..=self.end).contains(&x)
    }

    /// Restrict the span to `min..=max`, or `None` if nothing of it is left.
    pub fn clamp(self, min: i64, max: i64) -> Option<Span> {
        let start = self.start.max(min);
        let end = self.end.min(max);
        (start <= end).then_some(Span { start, end })
    }
}
