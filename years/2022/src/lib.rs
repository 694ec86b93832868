//! Falling sand in a cave of rock paths, and beacon sensors covering rows of
//! a grid.
//!
//! * [cave] simulates grains of sand dropped from a source until they either
//!   fall into the abyss or block the source.
//! * [sensor] and [sweep] compute which positions on a row are covered by
//!   sensors, using Klee's algorithm over the covered spans.

pub mod cave;
mod error;
pub mod geom;
pub mod sensor;
pub mod sweep;

pub use self::error::Error;
