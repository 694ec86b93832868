use core::fmt;
use core::ops::Range;

use crate::env::Size;

#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    NotInteger(&'static str),
    NotUtf8,
    ExpectedInteger,
    ExpectedLine,
    ExpectedLiteral(&'static str),
    ExpectedTuple(usize),
    TrailingInput,
    UnexpectedEof,
    Boxed(anyhow::Error),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotInteger(n) => write!(f, "not an integer or integer overflow `{n}`"),
            ErrorKind::NotUtf8 => write!(f, "not utf-8"),
            ErrorKind::ExpectedInteger => write!(f, "expected integer"),
            ErrorKind::ExpectedLine => write!(f, "expected line"),
            ErrorKind::ExpectedLiteral(lit) => write!(f, "expected `{lit}`"),
            ErrorKind::ExpectedTuple(n) => write!(f, "expected tuple of length `{n}`"),
            ErrorKind::TrailingInput => write!(f, "unexpected trailing input"),
            ErrorKind::UnexpectedEof => write!(f, "unexpected eof"),
            ErrorKind::Boxed(error) => error.fmt(f),
        }
    }
}

/// Error raised through string processing.
#[derive(Debug)]
pub struct IStrError {
    pub(crate) span: Range<Size>,
    pub(crate) kind: ErrorKind,
}

impl IStrError {
    /// Construct a new input error.
    #[inline]
    pub fn new(span: Range<Size>, kind: ErrorKind) -> Self {
        Self { span, kind }
    }

    /// Wrap an arbitrary error raised while converting a parsed value.
    #[inline]
    pub fn boxed(span: Range<Size>, error: anyhow::Error) -> Self {
        Self::new(span, ErrorKind::Boxed(error))
    }

    /// The byte range in the original input the error refers to.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        Size::usize_range(self.span.clone())
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for IStrError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {:?})", self.kind, self.span())
    }
}

impl std::error::Error for IStrError {}
