//! Input parsing and the command line harness shared by every puzzle binary.

pub mod cli;
pub mod env;
pub mod input;
mod macros;

#[doc(hidden)]
pub mod macro_support {
    pub use anyhow::Error;
}

pub mod prelude {
    //! Helper prelude with useful imports.
    pub use crate::cli::Opts;
    pub use crate::input::{FromInput, IStr, IStrError, Split};
    pub use anyhow::{anyhow, bail, ensure, Context, Result};
}
