//! Configuration options for encoding and decoding.
//!
//! - [`CodecOptions`]: main configuration struct
//! - [`ListDetection`]: whether `"0".."n-1"` keyed messages are flattened
//!
//! ## Examples
//!
//! ```rust
//! use pb_param::{encode_with_options, CodecOptions, Document, ListDetection, Scalar};
//!
//! let mut items = Document::new();
//! items.insert("0", Scalar::int(1));
//! items.insert("1", Scalar::int(2));
//! let mut doc = Document::new();
//! doc.insert("3", items);
//!
//! // Default: every message keeps its own header
//! assert_eq!(encode_with_options(&doc, &CodecOptions::new()), "!3m2!0i1!1i2");
//!
//! // Contiguous: list items become siblings under the parent tag
//! let options = CodecOptions::new().with_list_detection(ListDetection::Contiguous);
//! assert_eq!(encode_with_options(&doc, &options), "!3i1!3i2");
//! ```

use crate::Document;

/// Default limit on message nesting accepted by the decoder.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How the encoder treats messages whose keys are `"0"`, `"1"`, … `"n-1"`.
///
/// # Examples
///
/// ```rust
/// use pb_param::ListDetection;
///
/// assert_eq!(ListDetection::default(), ListDetection::Disabled);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ListDetection {
    /// Every message is written with its own `m<count>` header.
    ///
    /// This is what the web client's request builders have always produced.
    #[default]
    Disabled,
    /// Messages keyed `"0".."n-1"` are written as repeated siblings under
    /// the parent field's tag, without a header of their own.
    Contiguous,
}

/// Configuration options for the codec.
///
/// # Examples
///
/// ```rust
/// use pb_param::{CodecOptions, ListDetection};
///
/// let options = CodecOptions::new()
///     .with_list_detection(ListDetection::Contiguous)
///     .with_max_depth(16);
/// assert_eq!(options.max_depth, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecOptions {
    pub list_detection: ListDetection,
    /// Deepest message nesting `decode` accepts before failing with
    /// [`Error::DepthLimit`](crate::Error::DepthLimit).
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            list_detection: ListDetection::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CodecOptions {
    /// Creates default options (list detection off, depth limit [`DEFAULT_MAX_DEPTH`]).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_list_detection(mut self, list_detection: ListDetection) -> Self {
        self.list_detection = list_detection;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns `true` if `doc` is encoded as a repeated-field group under these options.
    #[inline]
    #[must_use]
    pub fn treats_as_list(&self, doc: &Document) -> bool {
        match self.list_detection {
            ListDetection::Disabled => false,
            ListDetection::Contiguous => doc.is_list(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;

    #[test]
    fn test_treats_as_list() {
        let mut doc = Document::new();
        doc.insert("0", Scalar::int(1));

        assert!(!CodecOptions::new().treats_as_list(&doc));
        let options = CodecOptions::new().with_list_detection(ListDetection::Contiguous);
        assert!(options.treats_as_list(&doc));
        assert!(!options.treats_as_list(&Document::new()));
    }
}
