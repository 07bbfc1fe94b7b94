//! # pb_param
//!
//! Encoder and decoder for the `pb` request parameter used by Google Maps web
//! endpoints (`/maps/preview/place`, `/maps/preview/entitylist/getlist`, ...).
//!
//! ## What is the pb parameter?
//!
//! It is a text rendering of a protocol-buffer-like message. Every field is a
//! token `<tag><type><value>` and tokens are joined with `!`. Nested messages
//! become a header token `<tag>m<count>` followed by `<count>` tokens of
//! content, so the whole tree is one flat token stream:
//!
//! ```text
//! !1m4!1sXYZ!2e1!3m1!1e1!2e2!4i500
//! ```
//!
//! decodes to
//!
//! ```text
//! 1 -> { 1 -> "sXYZ", 2 -> "e1", 3 -> { 1 -> "e1" } }
//! 2 -> "e2"
//! 4 -> "i500"
//! ```
//!
//! ## Key Features
//!
//! - **Exact round trips**: field order and repeated tags are preserved, so
//!   a captured parameter decodes and re-encodes byte for byte
//! - **Repeated fields**: the second and later occurrences of a tag are kept
//!   under `<tag>_<n>` keys and written back under the plain tag
//! - **Hardened decoding**: header counts are bounds-checked and nesting depth
//!   is limited, so hostile input fails with an error instead of a panic
//! - **Serde interop**: documents convert to and from JSON objects of
//!   type-prefixed strings (`{"1": "i50"}`)
//!
//! ## Quick Start
//!
//! ```rust
//! use pb_param::{decode, encode};
//!
//! let wire = "!1m4!1sXYZ!2e1!3m1!1e1!2e2!4i500";
//! let doc = decode(wire).unwrap();
//!
//! let list_id = doc.get_path(&["1", "1"]).and_then(|f| f.as_scalar());
//! assert_eq!(list_id.and_then(|s| s.as_str()), Some("XYZ"));
//!
//! assert_eq!(encode(&doc), wire);
//! ```
//!
//! ### Building a request
//!
//! ```rust
//! use pb_param::{document, encode, Scalar};
//!
//! let doc = document!({
//!     "2": { "1": Scalar::string("session"), "7": Scalar::enumeration(81) },
//!     "7": { "1": Scalar::int(50) }
//! });
//! assert_eq!(encode(&doc), "!2m2!1ssession!7e81!7m1!1i50");
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Header counts are validated against the enclosing token range
//! - Proper error propagation with `Result` types
//! - `encode` cannot fail; `decode` never panics on any input

pub mod de;
pub mod error;
pub mod format;
pub mod key;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::{tokenize, Decoder, DELIMITER};
pub use error::{Error, Result};
pub use key::FieldKey;
pub use map::Document;
pub use options::{CodecOptions, ListDetection, DEFAULT_MAX_DEPTH};
pub use ser::Encoder;
pub use value::{Field, Scalar, ScalarType};

use std::io;

/// Decodes a wire string into a [`Document`] with default options.
///
/// Empty segments (`!!`, leading or trailing `!`) are ignored.
///
/// # Examples
///
/// ```rust
/// use pb_param::decode;
///
/// let doc = decode("!1b1!1b0").unwrap();
/// let keys: Vec<_> = doc.keys().cloned().collect();
/// assert_eq!(keys, vec!["1", "1_1"]);
/// ```
///
/// # Errors
///
/// Returns [`Error::UnknownToken`] for a token of neither shape,
/// [`Error::Truncated`] when a header claims more tokens than remain, and
/// [`Error::DepthLimit`] when nesting exceeds [`DEFAULT_MAX_DEPTH`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(wire: &str) -> Result<Document> {
    decode_with_options(wire, &CodecOptions::default())
}

/// Decodes a wire string into a [`Document`] with custom options.
///
/// # Errors
///
/// See [`decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options(wire: &str, options: &CodecOptions) -> Result<Document> {
    Decoder::with_options(wire, options.clone()).decode()
}

/// Encodes a [`Document`] into a wire string with default options.
///
/// The result always starts with `!` and never ends with one.
///
/// # Examples
///
/// ```rust
/// use pb_param::{encode, Document, Scalar};
///
/// let mut doc = Document::new();
/// doc.insert("1", Scalar::string("test"));
/// assert_eq!(encode(&doc), "!1stest");
/// ```
///
/// # Panics
///
/// Debug builds assert that every key is a decimal tag, optionally with a
/// `_<n>` duplicate suffix.
#[must_use]
pub fn encode(doc: &Document) -> String {
    encode_with_options(doc, &CodecOptions::default())
}

/// Encodes a [`Document`] into a wire string with custom options.
#[must_use]
pub fn encode_with_options(doc: &Document, options: &CodecOptions) -> String {
    let mut encoder = Encoder::new(options.clone());
    encoder.encode_document(doc);
    encoder.into_inner()
}

/// Returns the number of tokens `doc` occupies once encoded, excluding the
/// leading `!` and any header of an enclosing message.
///
/// # Examples
///
/// ```rust
/// use pb_param::{count_elements, decode, tokenize};
///
/// let wire = "!6m2!1ifoo!2dbar!7b1";
/// let doc = decode(wire).unwrap();
/// assert_eq!(count_elements(&doc), tokenize(wire).len());
/// ```
#[must_use]
pub fn count_elements(doc: &Document) -> usize {
    count_elements_with_options(doc, &CodecOptions::default())
}

#[must_use]
pub fn count_elements_with_options(doc: &Document, options: &CodecOptions) -> usize {
    Encoder::new(options.clone()).count_elements(doc)
}

/// Writes the encoding of `doc` to `writer`.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, doc: &Document) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, doc, &CodecOptions::default())
}

/// Writes the encoding of `doc` to `writer` with custom options.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, doc: &Document, options: &CodecOptions) -> Result<()>
where
    W: io::Write,
{
    let wire = encode_with_options(doc, options);
    writer
        .write_all(wire.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Decodes a wire string read from an I/O stream.
///
/// Surrounding whitespace (such as a trailing newline) is ignored.
///
/// # Examples
///
/// ```rust
/// use pb_param::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"!1i5\n")).unwrap();
/// assert_eq!(doc.get_scalar("1").map(|s| s.value()), Some("5"));
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the input is not a valid wire string.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    decode(string.trim())
}

/// Decodes a wire string from bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or not a valid wire string.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Document> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    decode(s)
}
