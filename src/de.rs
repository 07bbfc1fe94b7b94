//! Wire string decoding.
//!
//! Decoding runs in two steps: [`tokenize`] splits the wire string on `!`,
//! then the [`Decoder`] walks the tokens, recursing into the exact token
//! range each `<tag>m<count>` header announces.
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use pb_param::decode;
//!
//! let doc = decode("!1m2!1sabc!7e81!8i3").unwrap();
//! assert_eq!(doc.len(), 2);
//! assert_eq!(doc.get_message("1").map(|m| m.len()), Some(2));
//! ```
//!
//! ## Token shapes
//!
//! - `<digits>m<digits>`: message header; the second number is how many of
//!   the following tokens belong to the message
//! - `<digits><type><payload>`: scalar, with `<type>` one of `bdefisuvxyz`
//!
//! Anything else fails the whole decode with [`Error::UnknownToken`].

use crate::key::split_tag;
use crate::{CodecOptions, Document, Error, Field, Result, Scalar, ScalarType};
use tracing::{debug, trace};

/// Field separator of the wire format.
pub const DELIMITER: char = '!';

/// Splits a wire string on `!`, dropping empty segments.
///
/// # Examples
///
/// ```rust
/// use pb_param::tokenize;
///
/// assert_eq!(tokenize("!1b1!!2i5!"), vec!["1b1", "2i5"]);
/// assert!(tokenize("!!!").is_empty());
/// ```
#[must_use]
pub fn tokenize(wire: &str) -> Vec<&str> {
    wire.split(DELIMITER).filter(|t| !t.is_empty()).collect()
}

/// A classified token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Header { tag: &'a str, count: &'a str },
    Scalar { tag: &'a str, ty: ScalarType, value: &'a str },
}

impl<'a> Token<'a> {
    /// Classifies a single token, or returns `None` if it has neither shape.
    ///
    /// A header only needs to start with `<digits>m<digits>`; characters after
    /// the count are ignored.
    pub(crate) fn classify(token: &'a str) -> Option<Self> {
        let (tag, rest) = split_tag(token);
        if tag.is_empty() {
            return None;
        }
        if let Some(after) = rest.strip_prefix('m') {
            let (count, _) = split_tag(after);
            if !count.is_empty() {
                return Some(Token::Header { tag, count });
            }
        }
        let mut chars = rest.chars();
        let ty = chars.next().and_then(ScalarType::from_char)?;
        Some(Token::Scalar {
            tag,
            ty,
            value: chars.as_str(),
        })
    }
}

/// The wire string decoder.
///
/// Holds the token list of one wire string. Created via
/// [`Decoder::from_str`] or [`Decoder::with_options`].
pub struct Decoder<'de> {
    tokens: Vec<&'de str>,
    options: CodecOptions,
}

impl<'de> Decoder<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, CodecOptions::default())
    }

    pub fn with_options(input: &'de str, options: CodecOptions) -> Self {
        Decoder {
            tokens: tokenize(input),
            options,
        }
    }

    /// Number of non-empty tokens in the input.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Decodes the whole token list into a [`Document`].
    pub fn decode(&self) -> Result<Document> {
        debug!(tokens = self.tokens.len(), "decoding pb parameter");
        self.parse_range(0, self.tokens.len(), 0).map_err(|err| {
            debug!(%err, "pb parameter rejected");
            err
        })
    }

    /// Parses `tokens[start..end]` into one document.
    ///
    /// Every call owns its own duplicate counter, so `_<n>` suffixes restart at
    /// each nesting level.
    fn parse_range(&self, start: usize, end: usize, depth: usize) -> Result<Document> {
        let mut doc = Document::new();
        let mut duplicate_index = 1;
        let mut i = start;

        while i < end {
            let token = self.tokens[i];
            match Token::classify(token) {
                Some(Token::Header { tag, count }) => {
                    let available = end - i - 1;
                    let len = count
                        .parse::<usize>()
                        .ok()
                        .filter(|len| *len <= available)
                        .ok_or_else(|| Error::truncated(i, token, count, available))?;
                    if depth >= self.options.max_depth {
                        return Err(Error::depth_limit(self.options.max_depth));
                    }

                    trace!(tag, len, depth, "nested message");
                    let nested = self.parse_range(i + 1, i + 1 + len, depth + 1)?;
                    doc.insert_occurrence(tag, Field::Message(nested), &mut duplicate_index);
                    i += 1 + len;
                }
                Some(Token::Scalar { tag, ty, value }) => {
                    doc.insert_occurrence(
                        tag,
                        Field::Scalar(Scalar::new(ty, value)),
                        &mut duplicate_index,
                    );
                    i += 1;
                }
                None => return Err(Error::unknown_token(i, token)),
            }
        }

        Ok(doc)
    }
}
