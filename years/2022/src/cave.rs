//! Sand falling into a cave of rock.

#[cfg(test)]
mod tests;

use core::fmt;
use std::collections::HashMap;

use lib::input::{ErrorKind, FromInput, IStr, IStrError};

use crate::geom::{Point, Segment};
use crate::Error;

/// Where sand pours into the cave from.
pub const SOURCE: Point = Point::new(500, 0);

/// What occupies a tile of the cave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacle {
    Rock,
    Sand,
}

impl Obstacle {
    #[inline]
    fn as_char(self) -> char {
        match self {
            Obstacle::Rock => '#',
            Obstacle::Sand => 'o',
        }
    }
}

/// The vertices of a rock formation, connected by straight lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Point>);

impl Path {
    #[inline]
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Parse a path of the form `x1,y1 -> x2,y2 -> ...`.
    pub fn parse(line: &'static str) -> Result<Self, Error> {
        IStr::from(line).next().map_err(Error::Path)
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Iterate over the segments between consecutive vertices.
    pub fn segments(&self) -> impl Iterator<Item = Result<Segment, Error>> + '_ {
        self.0.windows(2).map(|w| Segment::new(w[0], w[1]))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut it = self.0.iter();

        if let Some(first) = it.next() {
            write!(f, "{first}")?;
        }

        for point in it {
            write!(f, " -> {point}")?;
        }

        Ok(())
    }
}

impl FromInput for Path {
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>, IStrError> {
        if p.as_data().iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let mut points = Vec::new();

        loop {
            let remaining = p.len();

            let Some(mut coord) = p.split_once_str(" -> ") else {
                break;
            };

            let separated = coord.len() < remaining;
            points.push(coord.next::<Point>()?);
            coord.finish()?;

            // A separator was consumed but nothing follows it.
            if separated && p.is_empty() {
                return Err(IStrError::new(
                    p.index()..p.index(),
                    ErrorKind::UnexpectedEof,
                ));
            }
        }

        Ok(Some(Self(points)))
    }
}

/// Sparse map of occupied tiles.
#[derive(Debug, Default, Clone)]
pub struct ObstacleMap {
    tiles: HashMap<Point, Obstacle>,
}

impl ObstacleMap {
    #[inline]
    pub fn get(&self, point: Point) -> Option<Obstacle> {
        self.tiles.get(&point).copied()
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.tiles.contains_key(&point)
    }

    #[inline]
    pub fn insert(&mut self, point: Point, obstacle: Obstacle) {
        self.tiles.insert(point, obstacle);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Fill every point along `path` with `obstacle`.
    ///
    /// Nothing is plotted unless every segment of the path is straight.
    pub fn plot_path(&mut self, path: &Path, obstacle: Obstacle) -> Result<(), Error> {
        let segments = match path.points() {
            &[point] => vec![Segment::new(point, point)?],
            _ => path.segments().collect::<Result<Vec<_>, _>>()?,
        };

        for segment in segments {
            for point in segment.points() {
                self.insert(point, obstacle);
            }
        }

        Ok(())
    }

    /// The top left and bottom right corners of all obstacles.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut it = self.tiles.keys();
        let first = *it.next()?;

        Some(it.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }
}

/// Where a single grain of sand ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// The grain came to rest at the given point.
    Settled(Point),
    /// The source is already occupied so no grain could be dropped.
    Blocked,
    /// The grain fell past the deepest rock into the abyss.
    FellThrough,
}

impl Landing {
    #[inline]
    pub fn is_settled(&self) -> bool {
        matches!(self, Landing::Settled(..))
    }

    /// Convert into the resting point and whether the grain settled, using
    /// `source` as the point of grains that did not.
    #[inline]
    pub fn into_parts(self, source: Point) -> (Point, bool) {
        match self {
            Landing::Settled(point) => (point, true),
            Landing::Blocked | Landing::FellThrough => (source, false),
        }
    }
}

/// A cave with rock formations that sand can be poured into.
#[derive(Debug, Default, Clone)]
pub struct Cave {
    obstacles: ObstacleMap,
    /// Deepest row of rock, anything falling past it is lost.
    deepest: i64,
}

impl Cave {
    /// Construct an empty cave.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a cave out of the given rock paths.
    pub fn from_paths<'a, I>(paths: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut cave = Self::new();

        for path in paths {
            cave.expand_path(path)?;
        }

        Ok(cave)
    }

    /// Construct a cave out of one rock path per line.
    pub fn from_input(input: &mut IStr) -> Result<Self, Error> {
        let mut cave = Self::new();

        for path in input.lines::<Path>() {
            cave.expand_path(&path.map_err(Error::Path)?)?;
        }

        log::debug!(
            "built cave with {} rock tiles, deepest at {}",
            cave.obstacles.len(),
            cave.deepest
        );

        Ok(cave)
    }

    /// The deepest row of rock.
    #[inline]
    pub fn deepest(&self) -> i64 {
        self.deepest
    }

    #[inline]
    pub fn obstacles(&self) -> &ObstacleMap {
        &self.obstacles
    }

    /// Turn every point along `path` into rock.
    pub fn expand_path(&mut self, path: &Path) -> Result<(), Error> {
        self.obstacles.plot_path(path, Obstacle::Rock)?;

        for point in path.points() {
            self.deepest = self.deepest.max(point.y);
        }

        Ok(())
    }

    /// Test if anything occupies `point`.
    #[inline]
    pub fn obstacle_at(&self, point: Point) -> bool {
        self.obstacles.contains(point)
    }

    /// Get what occupies `point`.
    #[inline]
    pub fn obstacle(&self, point: Point) -> Option<Obstacle> {
        self.obstacles.get(point)
    }

    /// Drop a single grain of sand from `source` and let it fall until it
    /// settles or is lost.
    ///
    /// A falling grain tries to move down, then down to the left, then down
    /// to the right. Only a settled grain changes the cave.
    pub fn drop_sand_from(&mut self, source: Point) -> Landing {
        if self.obstacle_at(source) {
            return Landing::Blocked;
        }

        let mut sand = source;

        'falling: while sand.y <= self.deepest {
            for x in [sand.x, sand.x - 1, sand.x + 1] {
                let below = Point::new(x, sand.y + 1);

                if !self.obstacle_at(below) {
                    sand = below;
                    continue 'falling;
                }
            }

            self.obstacles.insert(sand, Obstacle::Sand);
            log::trace!("grain settled at {sand}");
            return Landing::Settled(sand);
        }

        Landing::FellThrough
    }

    /// Keep dropping sand from `source` until a grain no longer settles,
    /// returning the number of grains which did.
    pub fn fill_with_sand_from(&mut self, source: Point) -> usize {
        let before = self.obstacles.len();

        while self.drop_sand_from(source).is_settled() {}

        let grains = self.obstacles.len() - before;
        log::debug!("{grains} grains settled from {source}");
        grains
    }

    /// The ends of a floor two rows below the deepest rock which is wide
    /// enough to catch all sand poured from `centre`.
    pub fn baseline_around(&self, centre: Point) -> (Point, Point) {
        let depth = self.deepest + 2;

        (
            Point::new(centre.x - depth - 1, depth),
            Point::new(centre.x + depth + 1, depth),
        )
    }

    /// Add the floor from [Cave::baseline_around] as rock, so that sand can
    /// no longer fall into the abyss.
    pub fn add_baseline_around(&mut self, centre: Point) -> Result<(), Error> {
        let (left, right) = self.baseline_around(centre);
        self.expand_path(&Path::new(vec![left, right]))
    }
}

impl fmt::Display for Cave {
    /// Draw the smallest box containing every obstacle.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((min, max)) = self.obstacles.bounds() else {
            return Ok(());
        };

        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let c = self
                    .obstacle(Point::new(x, y))
                    .map_or('.', Obstacle::as_char);

                write!(f, "{c}")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
