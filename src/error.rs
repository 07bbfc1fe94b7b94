//! Error types for pb parameter encoding and decoding.
//!
//! Decoding is all-or-nothing: the first token that cannot be interpreted
//! aborts the whole call and the error carries that token verbatim so the
//! offending part of a captured URL can be found quickly.
//!
//! ## Error Categories
//!
//! - **Unknown tokens**: a token is neither a message header nor a scalar
//! - **Truncation**: a message header claims more children than remain
//! - **Depth limit**: nesting deeper than [`CodecOptions::max_depth`](crate::CodecOptions)
//! - **Literal errors**: malformed `"i50"`-style scalar literals or field keys
//!
//! ## Examples
//!
//! ```rust
//! use pb_param::{decode, Error};
//!
//! let err = decode("!1i5!xyz").unwrap_err();
//! assert!(matches!(err, Error::UnknownToken { index: 1, .. }));
//! assert!(err.to_string().contains("xyz"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A token matched neither `<tag>m<count>` nor `<tag><type><value>`.
    #[error("unknown param format at token {index}: {token:?}")]
    UnknownToken { index: usize, token: String },

    /// A message header declared more children than the enclosing range holds.
    #[error(
        "message header {token:?} at token {index} declares {declared} elements, only {available} remain"
    )]
    Truncated {
        index: usize,
        token: String,
        declared: String,
        available: usize,
    },

    /// Nested messages exceeded the configured depth limit.
    #[error("message nesting exceeds maximum depth of {max}")]
    DepthLimit { max: usize },

    /// A scalar literal did not start with a known type character.
    #[error("invalid scalar literal {0:?}: expected one of [bdefisuvxyz] followed by a value")]
    InvalidScalar(String),

    /// A document key was not a field key (`<digits>` or `<digits>_<digits>`).
    #[error("invalid field key {0:?}")]
    InvalidKey(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an unknown-token error for the token at absolute
    /// token index `index` in the wire string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pb_param::Error;
    ///
    /// let err = Error::unknown_token(3, "xyz");
    /// assert!(err.to_string().contains("\"xyz\""));
    /// ```
    pub fn unknown_token(index: usize, token: &str) -> Self {
        Error::UnknownToken {
            index,
            token: token.to_string(),
        }
    }

    /// Creates a truncation error for a header whose declared count cannot be satisfied.
    ///
    /// `declared` is kept as text so counts too large for `usize` are still reported.
    pub fn truncated(index: usize, token: &str, declared: &str, available: usize) -> Self {
        Error::Truncated {
            index,
            token: token.to_string(),
            declared: declared.to_string(),
            available,
        }
    }

    pub fn depth_limit(max: usize) -> Self {
        Error::DepthLimit { max }
    }

    pub fn invalid_scalar(literal: &str) -> Self {
        Error::InvalidScalar(literal.to_string())
    }

    pub fn invalid_key(key: &str) -> Self {
        Error::InvalidKey(key.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pb_param::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert_eq!(err.to_string(), "something went wrong");
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for errors raised while decoding a wire string.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(
            self,
            Error::UnknownToken { .. } | Error::Truncated { .. } | Error::DepthLimit { .. }
        )
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
