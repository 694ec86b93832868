//! Input parser.

mod error;
mod iter;

use core::mem;
use core::ops;
use std::str::from_utf8;

use bstr::BStr;

pub use self::error::{ErrorKind, IStrError};
pub use self::iter::Lines;

pub(self) type Result<T> = std::result::Result<T, IStrError>;
use crate::env::Size;

pub(crate) const NL: u8 = b'\n';

/// Helper to parse input.
#[derive(Debug, Clone, Copy)]
pub struct IStr {
    /// The data being parsed.
    data: &'static [u8],
    /// Offset of `data` in the original input.
    index: Size,
}

impl IStr {
    /// Construct a new input processor.
    #[inline]
    pub fn new(data: &'static [u8], index: Size) -> Self {
        Self { data, index }
    }

    /// Access index of input string.
    #[inline]
    pub fn index(&self) -> Size {
        self.index
    }

    /// Test if input is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the length of the current input.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Get input being processed.
    #[inline]
    pub fn as_data(&self) -> &'static [u8] {
        self.data
    }

    /// Get remaining binary string of the input.
    #[inline]
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_data())
    }

    /// Construct an iterator over the remaining lines, parsing each as `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::input::IStr;
    ///
    /// let mut input = IStr::from("1\n2\n3\n");
    /// let values = input.lines::<u32>().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(values, [1, 2, 3]);
    /// # Ok::<_, lib::input::IStrError>(())
    /// ```
    #[inline]
    pub fn lines<T>(&mut self) -> Lines<'_, T> {
        Lines::new(self)
    }

    /// Parse the next value as T.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next<T>(&mut self) -> Result<T>
    where
        T: FromInput,
    {
        T::from_input(self)
    }

    /// Try parse the next value as `T`, returns `None` if there is no more
    /// non-whitespace data to process.
    #[inline]
    pub fn try_next<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput,
    {
        T::try_from_input(self)
    }

    /// Parse the next line as `T`, errors with `Err(IStrError)` if there are
    /// no more lines.
    #[inline]
    pub fn line<T>(&mut self) -> Result<T>
    where
        T: FromInput,
    {
        let index = self.index;

        let Some(line) = self.try_line()? else {
            return Err(IStrError::new(index..self.index, ErrorKind::ExpectedLine));
        };

        Ok(line)
    }

    /// Parse the next line as `T`, returns `Ok(None)` if there is no more
    /// data to process.
    #[inline]
    pub fn try_line<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput,
    {
        let Some(mut line) = self.split_once(NL) else {
            return Ok(None);
        };

        line.trim_end_cr();

        let Some(output) = line.try_next()? else {
            return Ok(None);
        };

        Ok(Some(output))
    }

    /// Consume the literal `lit`, or error with
    /// [ErrorKind::ExpectedLiteral].
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::input::IStr;
    ///
    /// let mut input = IStr::from("x=-12");
    /// input.expect("x=")?;
    /// assert_eq!(input.next::<i64>()?, -12);
    ///
    /// let mut input = IStr::from("y=4");
    /// assert!(input.expect("x=").is_err());
    /// # Ok::<_, lib::input::IStrError>(())
    /// ```
    pub fn expect(&mut self, lit: &'static str) -> Result<()> {
        if !self.data.starts_with(lit.as_bytes()) {
            let end = self.data.len().min(lit.len());
            return Err(IStrError::new(
                self.index..self.index.saturating_add(Size::new(end)),
                ErrorKind::ExpectedLiteral(lit),
            ));
        }

        self.advance(lit.len());
        Ok(())
    }

    /// Error with [ErrorKind::TrailingInput] if anything but whitespace is
    /// left to process.
    pub fn finish(&self) -> Result<()> {
        let n = self.find(0, |b| !b.is_ascii_whitespace());

        if n < self.data.len() {
            let start = self.index.saturating_add(Size::new(n));
            let end = self.index.saturating_add(Size::new(self.data.len()));
            return Err(IStrError::new(start..end, ErrorKind::TrailingInput));
        }

        Ok(())
    }

    /// Try to parse the next word.
    pub fn try_next_word<T>(&mut self) -> Result<Option<(Size, T)>>
    where
        T: FromInput,
    {
        let s = self.find(0, |b| !u8::is_ascii_whitespace(b));
        let n = self.find(s, u8::is_ascii_whitespace);

        if s == n {
            return Ok(None);
        }

        let Some(mut input) = self.slice(s..n) else {
            return Ok(None);
        };

        let Some(value) = T::try_from_input(&mut input)? else {
            return Ok(None);
        };

        self.advance(n);
        Ok(Some((Size::new(s), value)))
    }

    /// Split once at the given byte or until the end of string, returning the
    /// input up until the split.
    #[inline]
    pub fn split_once(&mut self, b: u8) -> Option<IStr> {
        self.split_once_at(|data| Some((memchr::memchr(b, data)?, 1)))
    }

    /// Split once at the given separator or until the end of string,
    /// returning the input up until the separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::input::IStr;
    ///
    /// let mut input = IStr::from("1 -> 2 -> 3");
    /// let mut out = Vec::new();
    ///
    /// while let Some(mut part) = input.split_once_str(" -> ") {
    ///     out.push(part.next::<u32>()?);
    /// }
    ///
    /// assert_eq!(out, [1, 2, 3]);
    /// # Ok::<_, lib::input::IStrError>(())
    /// ```
    #[inline]
    pub fn split_once_str(&mut self, sep: &'static str) -> Option<IStr> {
        let sep = sep.as_bytes();
        self.split_once_at(|data| Some((memchr::memmem::find(data, sep)?, sep.len())))
    }

    /// Split `self` on every `byte`.
    #[inline]
    pub(crate) fn splitn(&mut self, byte: u8) -> impl InputIterator + '_ {
        return Iterator { input: self, byte };

        struct Iterator<'a> {
            input: &'a mut IStr,
            byte: u8,
        }

        impl InputIterator for Iterator<'_> {
            #[inline]
            fn index(&self) -> Size {
                self.input.index
            }

            #[inline]
            fn next(&mut self) -> Option<IStr> {
                self.input.split_once(self.byte)
            }
        }
    }

    fn split_once_at<T>(&mut self, find: T) -> Option<IStr>
    where
        T: FnOnce(&[u8]) -> Option<(usize, usize)>,
    {
        if self.data.is_empty() {
            return None;
        }

        let Some((at, len)) = find(self.data) else {
            let index = self.index;
            self.index.advance(self.data.len());
            let data = mem::take(&mut self.data);
            return Some(IStr::new(data, index));
        };

        let data = self.data.get(..at)?;
        let index = self.index;
        self.advance(at.checked_add(len)?);
        Some(IStr::new(data, index))
    }

    /// Find by predicate.
    fn find(&self, mut n: usize, p: fn(&u8) -> bool) -> usize {
        while let Some(c) = self.data.get(n) {
            if p(c) {
                break;
            }

            n += 1;
        }

        n
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.data = self.data.get(n..).unwrap_or_default();
        self.index.advance(n);
    }

    /// Strip a trailing `\r` left behind by windows line endings.
    #[inline]
    fn trim_end_cr(&mut self) {
        if let [rest @ .., b'\r'] = self.data {
            self.data = rest;
        }
    }

    /// Construct a sub-range.
    #[inline]
    fn slice(&self, range: ops::Range<usize>) -> Option<IStr> {
        let index = self.index.checked_add(Size::new(range.start))?;

        Some(Self {
            data: self.data.get(range)?,
            index,
        })
    }
}

impl From<&'static str> for IStr {
    #[inline]
    fn from(value: &'static str) -> Self {
        Self::new(value.as_bytes(), Size::ZERO)
    }
}

/// A value that can be parsed from input.
pub trait FromInput: Sized {
    /// Custom error kind to use.
    #[inline]
    fn error_kind() -> ErrorKind {
        ErrorKind::UnexpectedEof
    }

    /// Try to parse a value, returning `None` if the input holds no value.
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>>;

    /// Parse a value from a given input.
    #[inline]
    fn from_input(p: &mut IStr) -> Result<Self> {
        let index = p.index;

        let Some(value) = Self::try_from_input(p)? else {
            return Err(IStrError::new(index..p.index, Self::error_kind()));
        };

        Ok(value)
    }
}

/// Iterator over inputs.
pub trait InputIterator {
    /// Current index of the input iterator.
    fn index(&self) -> Size;

    /// Get next input.
    fn next(&mut self) -> Option<IStr>;
}

/// Parse something from a sequence of inputs.
pub trait FromInputIter: Sized {
    /// Parse one value out of each input produced by the iterator.
    fn from_input_iter<I>(inputs: I) -> Result<Option<Self>>
    where
        I: InputIterator;
}

macro_rules! tuple {
    ($num:literal => $first:ident $first_id:ident $(, $rest:ident $rest_id:ident)* $(,)?) => {
        impl<$first, $($rest,)*> FromInputIter for ($first, $($rest,)*)
        where
            $first: FromInput,
            $($rest: FromInput,)*
        {
            #[inline]
            fn from_input_iter<I>(mut inputs: I) -> Result<Option<Self>>
            where
                I: InputIterator
            {
                let index = inputs.index();

                let Some(mut $first_id) = inputs.next() else {
                    return Ok(None);
                };

                $(
                    let Some(mut $rest_id) = inputs.next() else {
                        return Err(IStrError::new(index..inputs.index(), ErrorKind::ExpectedTuple($num)));
                    };
                )*

                let $first_id = {
                    let value = <$first>::from_input(&mut $first_id)?;
                    $first_id.finish()?;
                    value
                };

                $(
                    let $rest_id = {
                        let value = <$rest>::from_input(&mut $rest_id)?;
                        $rest_id.finish()?;
                        value
                    };
                )*

                Ok(Some(($first_id, $($rest_id,)*)))
            }
        }
    }
}

#[rustfmt::skip]
macro_rules! integer {
    ($ty:ty) => {
        impl FromInput for $ty {
            #[inline]
            fn error_kind() -> ErrorKind {
                ErrorKind::ExpectedInteger
            }

            #[inline]
            fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
                let index = p.index;

                let Some((n, string)) = p.try_next_word::<&str>()? else {
                    return Ok(None);
                };

                let Ok(value) = str::parse(string) else {
                    return Err(IStrError::new(index.saturating_add(n)..p.index, ErrorKind::NotInteger(string)));
                };

                Ok(Some(value))
            }
        }
    };
}

tuple!(2 => A a, B b);
tuple!(3 => A a, B b, C c);

integer!(usize);
integer!(u32);
integer!(u64);
integer!(i32);
integer!(i64);

impl FromInput for IStr {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let out = *p;
        p.advance(p.data.len());
        Ok(Some(out))
    }
}

impl FromInput for &[u8] {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let n = p.data.len();
        let data = mem::take(&mut p.data);
        p.index.advance(n);
        Ok(Some(data))
    }
}

impl FromInput for &str {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let index = p.index;

        let Some(data) = <&[u8]>::try_from_input(p)? else {
            return Ok(None);
        };

        let Ok(data) = from_utf8(data) else {
            return Err(IStrError::new(index..p.index, ErrorKind::NotUtf8));
        };

        Ok(Some(data))
    }
}

/// Split on byte `D`, parsing one value from each part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Split<const D: char, T>(pub T);

impl<const D: char, T> FromInput for Split<D, T>
where
    T: FromInputIter,
{
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let it = p.splitn(D as u8);

        let Some(out) = T::from_input_iter(it)? else {
            return Ok(None);
        };

        Ok(Some(Self(out)))
    }
}
