/// Helper macro to build an input processor.
///
/// Parses the value as `$ty` and converts it with the given block. Errors
/// raised by the block rewind the input and carry the span of the value.
#[macro_export]
macro_rules! from_input {
    (|$($value:ident)? $(($pat:pat))?: $ty:ty| -> $($rest:tt)*) => {
        $crate::from_input!(|[$($value)? $(($pat))?]: $ty| -> $($rest)*);
    };

    (|[$($value:tt)*]: $ty:ty| -> $out:ident $block:block) => {
        impl $crate::input::FromInput for $out {
            #[inline]
            fn try_from_input(
                p: &mut $crate::input::IStr,
            ) -> core::result::Result<Option<Self>, $crate::input::IStrError> {
                let original = *p;

                let Some(value) = <$ty as $crate::input::FromInput>::try_from_input(p)? else {
                    return Ok(None);
                };

                match (|$($value)*: $ty| -> core::result::Result<$out, $crate::macro_support::Error> {
                    $block
                })(value)
                {
                    Ok(value) => Ok(Some(value)),
                    Err(e) => {
                        let span = original.index()..p.index();
                        *p = original;
                        Err($crate::input::IStrError::boxed(span, e))
                    }
                }
            }
        }
    };
}

/// Load the input for a puzzle binary.
///
/// Reads `inputs/<path>` relative to the calling crate unless `--input` was
/// passed, and evaluates to the loaded input and the path it was read from.
#[macro_export]
macro_rules! input {
    ($opts:expr, $path:literal) => {{
        let path = match $crate::cli::Opts::input_path(&$opts) {
            Some(path) => path.to_owned(),
            None => concat!(env!("CARGO_MANIFEST_DIR"), "/inputs/", $path).to_owned(),
        };

        ($crate::env::input(&path)?, path)
    }};
}
