#![feature(error_generic_member_access)]
#![deny(missing_docs)]

//! This crate defines error & result types for Vortex.
//! It also contains a variety of useful macros for error handling.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;
use std::{env, fmt, io};

/// A string that can be used as an error message.
#[derive(Debug)]
pub struct ErrString(Cow<'static, str>);

#[allow(clippy::fallible_impl_from)]
impl<T> From<T> for ErrString
where
    T: Into<Cow<'static, str>>,
{
    #[allow(clippy::panic)]
    fn from(msg: T) -> Self {
        if env::var("VORTEX_PANIC_ON_ERR").as_deref().unwrap_or("") == "1" {
            panic!("{}\nBacktrace:\n{}", msg.into(), Backtrace::capture());
        } else {
            Self(msg.into())
        }
    }
}

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The top-level error type for Vortex.
#[derive(thiserror::Error)]
#[non_exhaustive]
pub enum VortexError {
    /// An index is out of bounds.
    #[error("index {0} out of bounds from {1} to {2}\nBacktrace:\n{3}")]
    OutOfBounds(usize, usize, usize, Backtrace),
    /// An invalid argument was provided.
    #[error("{0}\nBacktrace:\n{1}")]
    InvalidArgument(ErrString, Backtrace),
    /// An error occurred while serializing or deserializing.
    #[error("{0}\nBacktrace:\n{1}")]
    InvalidSerde(ErrString, Backtrace),
    /// A predicate, operator or type that cannot be expressed yet.
    ///
    /// Callers translating host expressions treat this as recoverable and leave the
    /// expression for the host to evaluate.
    #[error("not implemented: {0}\nBacktrace:\n{1}")]
    NotImplemented(ErrString, Backtrace),
    /// A file's top-level type cannot be scanned as a table.
    #[error("{0}\nBacktrace:\n{1}")]
    InvalidSchema(ErrString, Backtrace),
    /// A file's schema disagrees with the schema that was bound for the scan.
    #[error("{0}\nBacktrace:\n{1}")]
    SchemaMismatch(ErrString, Backtrace),
    /// An assertion failed.
    #[error("{0}\nBacktrace:\n{1}")]
    AssertionFailed(ErrString, Backtrace),
    /// A wrapper for other errors, carrying additional context.
    #[error("{0}: {1}")]
    Context(ErrString, #[source] Box<VortexError>),
    /// A wrapper for formatting errors.
    #[error(transparent)]
    FmtError(#[from] fmt::Error),
    /// A wrapper for IO errors.
    #[error(transparent)]
    IOError(#[from] io::Error),
    /// A wrapper for integer conversion errors.
    #[error(transparent)]
    TryFromIntError(#[from] std::num::TryFromIntError),
    /// A wrapper for protobuf decoding errors.
    #[cfg(feature = "prost")]
    #[error(transparent)]
    ProstDecodeError(#[from] prost::DecodeError),
    /// A wrapper for protobuf encoding errors.
    #[cfg(feature = "prost")]
    #[error(transparent)]
    ProstEncodeError(#[from] prost::EncodeError),
    /// A wrapper for URL parsing errors.
    #[cfg(feature = "url")]
    #[error(transparent)]
    UrlError(#[from] url::ParseError),
}

impl VortexError {
    /// Adds additional context to an error.
    pub fn with_context<T: Into<ErrString>>(self, msg: T) -> Self {
        VortexError::Context(msg.into(), Box::new(self))
    }

    /// Returns the innermost error, looking through any [`VortexError::Context`] wrappers.
    pub fn root_cause(&self) -> &VortexError {
        match self {
            VortexError::Context(_, inner) => inner.root_cause(),
            other => other,
        }
    }

    /// Whether this error (or the error it wraps) is [`VortexError::NotImplemented`].
    pub fn is_not_implemented(&self) -> bool {
        matches!(self.root_cause(), VortexError::NotImplemented(..))
    }
}

impl Debug for VortexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A type alias for Results that return VortexErrors as their error type.
pub type VortexResult<T> = Result<T, VortexError>;

/// A trait for expect-ing a VortexResult or an Option.
pub trait VortexExpect {
    /// The type of the value being expected.
    type Output;

    /// Returns the value of the result if it is Ok, otherwise panics with the error.
    /// Should be called only in contexts where the error condition represents a bug (programmer error).
    fn vortex_expect(self, msg: &str) -> Self::Output;
}

impl<T> VortexExpect for VortexResult<T> {
    type Output = T;

    #[inline(always)]
    fn vortex_expect(self, msg: &str) -> Self::Output {
        self.unwrap_or_else(|e| vortex_panic!(e.with_context(msg.to_string())))
    }
}

impl<T> VortexExpect for Option<T> {
    type Output = T;

    #[inline(always)]
    fn vortex_expect(self, msg: &str) -> Self::Output {
        self.unwrap_or_else(|| {
            let err = VortexError::AssertionFailed(msg.to_string().into(), Backtrace::capture());
            vortex_panic!(err)
        })
    }
}

/// A convenient macro for creating a VortexError.
#[macro_export]
macro_rules! vortex_err {
    (OutOfBounds: $idx:expr, $start:expr, $stop:expr) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use(
            $crate::VortexError::OutOfBounds($idx, $start, $stop, Backtrace::capture())
        )
    }};
    (Context: $msg:literal, $err:expr) => {{
        $crate::__private::must_use(
            $crate::VortexError::Context($msg.into(), Box::new($err))
        )
    }};
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use(
            $crate::VortexError::$variant(format!($fmt, $($arg),*).into(), Backtrace::capture())
        )
    }};
    ($variant:ident: $err:expr $(,)?) => {
        $crate::__private::must_use(
            $crate::VortexError::$variant($err)
        )
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::vortex_err!(InvalidArgument: $fmt, $($arg),*)
    };
}

/// A convenient macro for returning a VortexError.
#[macro_export]
macro_rules! vortex_bail {
    ($($tt:tt)+) => {
        return Err($crate::vortex_err!($($tt)+))
    };
}

/// A convenient macro for panicking with a VortexError in the presence of a programmer error
/// (e.g., an invariant has been violated).
#[macro_export]
macro_rules! vortex_panic {
    (OutOfBounds: $idx:expr, $start:expr, $stop:expr) => {{
        $crate::vortex_panic!($crate::vortex_err!(OutOfBounds: $idx, $start, $stop))
    }};
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::vortex_panic!($crate::vortex_err!($variant: $fmt, $($arg),*))
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::vortex_panic!($crate::vortex_err!($fmt, $($arg),*))
    };
    ($err:expr) => {{
        let err: $crate::VortexError = $err;
        panic!("{}", err)
    }};
}

// Not public, referenced by macros only.
#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    #[inline]
    #[cold]
    #[must_use]
    pub const fn must_use(error: crate::VortexError) -> crate::VortexError {
        error
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn open(path: &str) -> VortexResult<()> {
        Err(io::Error::new(io::ErrorKind::NotFound, path.to_string()).into())
    }

    #[test]
    fn not_implemented_message() {
        let err = vortex_err!(NotImplemented: "null checks");
        assert!(err.is_not_implemented());
        assert!(err.to_string().starts_with("not implemented: null checks"));
    }

    #[test]
    fn context_keeps_root_cause() {
        let err = open("a.vortex")
            .map_err(|e| e.with_context("Failed to open Vortex file: a.vortex"))
            .unwrap_err();
        assert!(matches!(err.root_cause(), VortexError::IOError(_)));
        assert!(!err.is_not_implemented());
        assert!(err.to_string().starts_with("Failed to open Vortex file: a.vortex"));
    }

    #[test]
    fn bail_defaults_to_invalid_argument() {
        fn check(len: usize) -> VortexResult<usize> {
            if len == 0 {
                vortex_bail!("expected at least one file, got {}", len);
            }
            Ok(len)
        }

        assert!(matches!(
            check(0).unwrap_err(),
            VortexError::InvalidArgument(..)
        ));
        assert_eq!(check(2).unwrap(), 2);
    }

    #[test]
    fn out_of_bounds() {
        let err = vortex_err!(OutOfBounds: 4, 0, 3);
        assert!(err.to_string().starts_with("index 4 out of bounds from 0 to 3"));
    }

    #[test]
    #[should_panic(expected = "invariant")]
    fn expect_on_none_panics() {
        let value: Option<u32> = None;
        value.vortex_expect("invariant");
    }
}
