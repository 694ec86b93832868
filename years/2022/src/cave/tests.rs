use lib::input::{ErrorKind, IStr};
use proptest::prelude::*;

use super::{Cave, Landing, Obstacle, Path, SOURCE};
use crate::geom::Point;
use crate::Error;

const SAMPLE: &str = "\
498,4 -> 498,6 -> 496,6
503,4 -> 502,4 -> 502,9 -> 494,9
";

fn sample() -> Cave {
    Cave::from_input(&mut IStr::from(SAMPLE)).unwrap()
}

#[test]
fn test_parse_path() -> Result<(), Error> {
    let path = Path::parse("498,4 -> 498,6 -> 496,6")?;

    assert_eq!(
        path.points(),
        [Point::new(498, 4), Point::new(498, 6), Point::new(496, 6)]
    );

    assert_eq!(path.to_string(), "498,4 -> 498,6 -> 496,6");
    Ok(())
}

#[test]
fn test_parse_bad_paths() {
    for line in [
        "498,4 -> 498",
        "498,4 => 498,6",
        "498,4,1 -> 498,6",
        "a,4",
        "498 7,4 -> 498,6",
        "498,4 9 -> 498,6",
        "498,4 -> 498,6 -> ",
        "498,4 -> ",
    ] {
        assert!(
            matches!(Path::parse(line), Err(Error::Path(..))),
            "{line:?} should not parse"
        );
    }
}

#[test]
fn test_dangling_separator() {
    let Err(Error::Path(error)) = Path::parse("498,4 -> 498,6 -> ") else {
        panic!("expected path error");
    };

    assert!(matches!(error.kind(), ErrorKind::UnexpectedEof));
    assert_eq!(error.span(), 18..18);
}

#[test]
fn test_trailing_coordinate_input() {
    let Err(Error::Path(error)) = Path::parse("498,4 9 -> 498,6") else {
        panic!("expected path error");
    };

    assert!(matches!(error.kind(), ErrorKind::TrailingInput));
    assert_eq!(error.span(), 6..7);
}

#[test]
fn test_expand_path() -> Result<(), Error> {
    let mut cave = Cave::new();
    cave.expand_path(&Path::parse("498,4 -> 498,6 -> 496,6")?)?;

    for (x, y) in [(498, 4), (498, 5), (498, 6), (497, 6), (496, 6)] {
        assert_eq!(cave.obstacle(Point::new(x, y)), Some(Obstacle::Rock));
    }

    for (x, y) in [(497, 5), (499, 6), (498, 7), (498, 3), (495, 6)] {
        assert!(!cave.obstacle_at(Point::new(x, y)), "{x},{y} should be empty");
    }

    assert_eq!(cave.obstacles().len(), 5);
    assert_eq!(cave.deepest(), 6);
    Ok(())
}

#[test]
fn test_expand_single_point() -> Result<(), Error> {
    let mut cave = Cave::new();
    cave.expand_path(&Path::parse("500,5")?)?;
    assert!(cave.obstacle_at(Point::new(500, 5)));
    assert_eq!(cave.obstacles().len(), 1);
    assert_eq!(cave.deepest(), 5);
    Ok(())
}

#[test]
fn test_diagonal_path() -> Result<(), Error> {
    let mut cave = Cave::new();
    let path = Path::parse("498,4 -> 498,6 -> 497,7")?;

    assert!(matches!(
        cave.expand_path(&path),
        Err(Error::NotStraight { start, end }) if start == Point::new(498, 6) && end == Point::new(497, 7)
    ));

    assert!(cave.obstacles().is_empty());
    Ok(())
}

#[test]
fn test_from_paths() -> Result<(), Error> {
    let paths = SAMPLE
        .lines()
        .map(Path::parse)
        .collect::<Result<Vec<_>, _>>()?;

    let cave = Cave::from_paths(&paths)?;
    assert_eq!(cave.obstacles().len(), sample().obstacles().len());
    assert_eq!(cave.deepest(), 9);
    Ok(())
}

#[test]
fn test_drop_sand() {
    let mut cave = sample();

    assert_eq!(cave.drop_sand_from(SOURCE), Landing::Settled(Point::new(500, 8)));
    assert_eq!(cave.drop_sand_from(SOURCE), Landing::Settled(Point::new(499, 8)));
    assert_eq!(cave.drop_sand_from(SOURCE), Landing::Settled(Point::new(501, 8)));
    assert_eq!(cave.drop_sand_from(SOURCE), Landing::Settled(Point::new(500, 7)));
    assert_eq!(cave.drop_sand_from(SOURCE), Landing::Settled(Point::new(498, 8)));

    for n in 6..=22 {
        assert!(cave.drop_sand_from(SOURCE).is_settled(), "grain {n}");
    }

    assert_eq!(cave.drop_sand_from(SOURCE), Landing::Settled(Point::new(497, 5)));
    assert_eq!(cave.drop_sand_from(SOURCE), Landing::Settled(Point::new(495, 8)));
    assert_eq!(cave.drop_sand_from(SOURCE), Landing::FellThrough);
    assert_eq!(cave.drop_sand_from(SOURCE), Landing::FellThrough);
    assert_eq!(cave.deepest(), 9);
}

#[test]
fn test_landing_into_parts() {
    let point = Point::new(500, 8);
    assert_eq!(Landing::Settled(point).into_parts(SOURCE), (point, true));
    assert_eq!(Landing::FellThrough.into_parts(SOURCE), (SOURCE, false));
    assert_eq!(Landing::Blocked.into_parts(SOURCE), (SOURCE, false));
}

#[test]
fn test_fill_with_sand() {
    let mut cave = sample();
    assert_eq!(cave.fill_with_sand_from(SOURCE), 24);
    assert_eq!(cave.fill_with_sand_from(SOURCE), 0);
    assert_eq!(cave.deepest(), 9);
}

#[test]
fn test_fill_with_baseline() -> Result<(), Error> {
    let mut cave = sample();

    assert_eq!(
        cave.baseline_around(SOURCE),
        (Point::new(488, 11), Point::new(512, 11))
    );

    cave.add_baseline_around(SOURCE)?;
    assert_eq!(cave.deepest(), 11);
    assert_eq!(cave.fill_with_sand_from(SOURCE), 93);
    assert_eq!(cave.drop_sand_from(SOURCE), Landing::Blocked);
    assert_eq!(cave.obstacle(SOURCE), Some(Obstacle::Sand));
    Ok(())
}

#[test]
fn test_render() {
    let mut cave = sample();

    assert_eq!(
        cave.to_string(),
        "\
....#...##
....#...#.
..###...#.
........#.
........#.
#########.
"
    );

    cave.fill_with_sand_from(SOURCE);

    assert_eq!(
        cave.to_string(),
        "\
......o...
.....ooo..
....#ooo##
...o#ooo#.
..###ooo#.
....oooo#.
.o.ooooo#.
#########.
"
    );

    assert_eq!(Cave::new().to_string(), "");
}

/// A path walking from a start point through a number of straight moves.
fn paths() -> impl Strategy<Value = Path> {
    let start = (0i64..1000, 0i64..200);
    let step = (any::<bool>(), -20i64..20);

    (start, prop::collection::vec(step, 0..6)).prop_map(|((x, y), steps)| {
        let mut points = vec![Point::new(x, y)];
        let mut at = Point::new(x, y);

        for (horizontal, n) in steps {
            if horizontal {
                at.x += n;
            } else {
                at.y = (at.y + n).max(0);
            }

            points.push(at);
        }

        Path::new(points)
    })
}

proptest! {
    #[test]
    fn expanded_paths_are_rock(path in paths()) {
        let mut cave = Cave::new();
        cave.expand_path(&path).unwrap();

        for segment in path.segments() {
            let segment = segment.unwrap();

            for point in segment.points() {
                prop_assert!(segment.contains(point));
                prop_assert_eq!(cave.obstacle(point), Some(Obstacle::Rock));
            }
        }

        for point in path.points() {
            prop_assert!(cave.obstacle_at(*point));
        }

        let deepest = path.points().iter().map(|p| p.y).max().unwrap_or_default();
        prop_assert_eq!(cave.deepest(), deepest);
    }

    #[test]
    fn paths_display_as_parsed(path in paths()) {
        let line: &'static str = Box::leak(path.to_string().into_boxed_str());
        prop_assert_eq!(Path::parse(line).unwrap(), path);
    }
}
