use core::fmt;

use bstr::{BString, ByteSlice};

use crate::input::{IStr, IStrError};

/// Associate the input path, the `line:column` and the offending text of the
/// first parse error found in the chain of `error`.
pub(crate) fn error_context(path: &str, data: IStr, error: anyhow::Error) -> anyhow::Error {
    let (pos, found) = match find_parse_error(&error) {
        Some(e) => {
            let span = e.span();

            let found = data
                .as_bstr()
                .get(span.clone())
                .map(|text| text.as_bstr().to_owned())
                .unwrap_or_default();

            (crate::env::pos_from(data.as_data(), span), found)
        }
        None => (LineCol::EMPTY, BString::default()),
    };

    error.context(CliError {
        path: path.into(),
        pos,
        found,
    })
}

/// A line and column combination.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    line: usize,
    start: usize,
}

impl LineCol {
    pub(crate) const EMPTY: Self = Self::new(0, 0);

    pub(crate) const fn new(line: usize, start: usize) -> Self {
        Self { line, start }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line + 1;
        write!(f, "{line}:{}", self.start)
    }
}

/// Parse errors are usually wrapped by the domain error they caused, so the
/// whole chain has to be searched.
fn find_parse_error(error: &anyhow::Error) -> Option<&IStrError> {
    error.chain().find_map(|e| e.downcast_ref::<IStrError>())
}

/// Context added to errors raised while processing an input file.
#[derive(Debug)]
pub struct CliError {
    path: Box<str>,
    pos: LineCol,
    /// Input covered by the error, empty if unknown.
    found: BString,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{path}:{pos}", path = self.path, pos = self.pos)?;

        if !self.found.is_empty() {
            write!(f, ": `{}`", self.found)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::{error_context, LineCol};
    use crate::env::pos_from;
    use crate::input::IStr;

    #[test]
    fn test_pos_from() {
        let data = b"12\n3x\n";
        assert_eq!(pos_from(data, 0..1), LineCol::new(0, 0));
        assert_eq!(pos_from(data, 4..5), LineCol::new(1, 1));
    }

    #[test]
    fn test_context_through_chain() {
        let mut input = IStr::from("12\n3x\n");
        let error = input
            .lines::<u32>()
            .collect::<Result<Vec<_>, _>>()
            .context("parsing numbers")
            .unwrap_err();

        let error = error_context("inputs/numbers.txt", IStr::from("12\n3x\n"), error);
        assert_eq!(error.to_string(), "inputs/numbers.txt:2:0: `3x`");
    }

    #[test]
    fn test_context_without_parse_error() {
        let error = error_context("inputs/numbers.txt", IStr::from("12\n"), anyhow::anyhow!("boom"));
        assert_eq!(error.to_string(), "inputs/numbers.txt:1:0");
        assert_eq!(format!("{error:#}"), "inputs/numbers.txt:1:0: boom");
    }
}
