use lib::input::IStrError;
use thiserror::Error;

use crate::geom::Point;

/// Errors raised while building caves and parsing sensor readings.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{start} -> {end} is not a straight line")]
    NotStraight { start: Point, end: Point },
    #[error("bad rock path")]
    Path(#[source] IStrError),
    #[error("bad sensor reading")]
    Reading(#[source] IStrError),
}
