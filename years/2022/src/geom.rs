//! Integer points and axis-aligned segments.

use core::fmt;

use lib::input::Split;

use crate::Error;

/// A point on the integer grid. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use y2022::geom::Point;
    ///
    /// assert_eq!(Point::new(2, 18).manhattan(Point::new(-2, 15)), 7);
    /// ```
    #[inline]
    pub fn manhattan(self, other: Point) -> i64 {
        self.x.abs_diff(other.x) as i64 + self.y.abs_diff(other.y) as i64
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

lib::from_input! {
    |Split((x, y)): Split<',', (i64, i64)>| -> Point {
        Ok(Point { x, y })
    }
}

/// A straight horizontal or vertical line between two points, both
/// inclusive.
///
/// Endpoints are stored left to right and top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    /// Construct a segment, erroring if `start` and `end` are not in line
    /// with each other.
    pub fn new(start: Point, end: Point) -> Result<Self, Error> {
        if start.x != end.x && start.y != end.y {
            return Err(Error::NotStraight { start, end });
        }

        Ok(Self {
            start: Point::new(start.x.min(end.x), start.y.min(end.y)),
            end: Point::new(start.x.max(end.x), start.y.max(end.y)),
        })
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Iterate over every point covered by the segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use y2022::geom::{Point, Segment};
    ///
    /// let segment = Segment::new(Point::new(498, 6), Point::new(496, 6))?;
    /// let points = segment.points().collect::<Vec<_>>();
    /// assert_eq!(points, [Point::new(496, 6), Point::new(497, 6), Point::new(498, 6)]);
    /// # Ok::<_, y2022::Error>(())
    /// ```
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let Self { start, end } = *self;
        (start.x..=end.x).flat_map(move |x| (start.y..=end.y).map(move |y| Point { x, y }))
    }

    /// Test if the segment covers `point`.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        (self.start.x..=self.end.x).contains(&point.x)
            && (self.start.y..=self.end.y).contains(&point.y)
    }
}
