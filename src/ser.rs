//! Wire string encoding.
//!
//! The [`Encoder`] flattens a [`Document`] into `!`-separated tokens. Nested
//! messages are written as a `<tag>m<count>` header followed by their
//! contents, where `<count>` comes from [`Encoder::count_elements`] and is
//! exactly the number of tokens the decoder will consume for that message.
//!
//! ## Usage
//!
//! ```rust
//! use pb_param::{document, encode, Scalar};
//!
//! let doc = document!({
//!     "7": { "1": Scalar::int(50) },
//!     "23": { "1": Scalar::int(50), "3": Scalar::bool(true) }
//! });
//! assert_eq!(encode(&doc), "!7m1!1i50!23m2!1i50!3b1");
//! ```
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use pb_param::{CodecOptions, Document, Encoder, Scalar};
//!
//! let mut doc = Document::new();
//! doc.insert("1", Scalar::string("test"));
//!
//! let mut encoder = Encoder::new(CodecOptions::new());
//! encoder.encode_document(&doc);
//! assert_eq!(encoder.into_inner(), "!1stest");
//! ```

use crate::de::DELIMITER;
use crate::key::wire_tag;
use crate::map::has_valid_keys;
use crate::{CodecOptions, Document, Field};
use tracing::debug;

/// The wire string encoder.
pub struct Encoder {
    output: String,
    options: CodecOptions,
}

impl Encoder {
    pub fn new(options: CodecOptions) -> Self {
        Encoder {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends the encoding of a top-level document, leading `!` included.
    ///
    /// An empty document encodes as a lone `!`.
    pub fn encode_document(&mut self, doc: &Document) {
        debug_assert!(has_valid_keys(doc), "document keys must be decimal tags");
        let start = self.output.len();
        self.output.push(DELIMITER);
        self.write_fields(doc, None);
        debug!(
            fields = doc.len(),
            bytes = self.output.len() - start,
            "encoded pb parameter"
        );
    }

    /// Returns the number of tokens `doc` occupies once flattened, not
    /// counting the header of the message that contains it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pb_param::{decode, CodecOptions, Encoder};
    ///
    /// let doc = decode("!1m3!2m1!3i1!4b0!5sx").unwrap();
    /// let encoder = Encoder::new(CodecOptions::new());
    /// assert_eq!(encoder.count_elements(&doc), 5);
    /// assert_eq!(encoder.count_elements(doc.get_message("1").unwrap()), 3);
    /// ```
    #[must_use]
    pub fn count_elements(&self, doc: &Document) -> usize {
        doc.values()
            .map(|field| match field {
                Field::Scalar(_) => 1,
                Field::Message(inner) if self.options.treats_as_list(inner) => {
                    self.count_elements(inner)
                }
                Field::Message(inner) => 1 + self.count_elements(inner),
            })
            .sum()
    }

    /// Writes the fields of `doc` joined by `!`.
    ///
    /// `override_tag` is set while writing the items of a repeated-field
    /// group; every item then goes out under the group's tag. A group nested
    /// inside a group takes the wire tag of its own key instead.
    fn write_fields(&mut self, doc: &Document, override_tag: Option<&str>) {
        for (index, (key, field)) in doc.iter().enumerate() {
            if index > 0 {
                self.output.push(DELIMITER);
            }
            let tag = override_tag.unwrap_or_else(|| wire_tag(key));

            match field {
                Field::Message(inner) if self.options.treats_as_list(inner) => {
                    self.write_fields(inner, Some(wire_tag(key)));
                }
                Field::Message(inner) => {
                    let count = self.count_elements(inner);
                    self.output.push_str(tag);
                    self.output.push('m');
                    self.output.push_str(&count.to_string());
                    if !inner.is_empty() {
                        self.output.push(DELIMITER);
                        self.write_fields(inner, None);
                    }
                }
                Field::Scalar(scalar) => {
                    self.output.push_str(tag);
                    self.output.push(scalar.ty().as_char());
                    self.output.push_str(scalar.value());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ListDetection, Scalar};

    fn encoder(list_detection: ListDetection) -> Encoder {
        Encoder::new(CodecOptions::new().with_list_detection(list_detection))
    }

    fn encode(doc: &Document, list_detection: ListDetection) -> String {
        let mut encoder = encoder(list_detection);
        encoder.encode_document(doc);
        encoder.into_inner()
    }

    fn list(items: Vec<Field>) -> Document {
        items
            .into_iter()
            .enumerate()
            .map(|(i, field)| (i.to_string(), field))
            .collect()
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(encode(&Document::new(), ListDetection::Disabled), "!");
    }

    #[test]
    fn test_empty_message_has_no_children() {
        let mut doc = Document::new();
        doc.insert("4", Document::new());
        doc.insert("5", Scalar::int(1));
        assert_eq!(encode(&doc, ListDetection::Disabled), "!4m0!5i1");
    }

    #[test]
    fn test_duplicate_suffix_stripped() {
        let mut inner = Document::new();
        inner.insert("1", Scalar::enumeration(3));
        inner.insert("1_1", Scalar::enumeration(6));
        let mut doc = Document::new();
        doc.insert("20", inner);
        assert_eq!(encode(&doc, ListDetection::Disabled), "!20m2!1e3!1e6");
    }

    #[test]
    fn test_list_of_messages_under_parent_tag() {
        let mut first = Document::new();
        first.insert("1", Scalar::enumeration(1));
        first.insert("2", Scalar::bool(false));
        let mut second = Document::new();
        second.insert("1", Scalar::enumeration(2));

        let mut doc = Document::new();
        doc.insert("7", list(vec![first.into(), second.into()]));
        doc.insert("9", Scalar::bool(true));

        let enc = encoder(ListDetection::Contiguous);
        assert_eq!(enc.count_elements(&doc), 6);
        assert_eq!(
            encode(&doc, ListDetection::Contiguous),
            "!7m2!1e1!2b0!7m1!1e2!9b1"
        );
    }

    #[test]
    fn test_nested_list_uses_item_key() {
        let inner = list(vec![Scalar::int(1).into(), Scalar::int(2).into()]);
        let outer = list(vec![inner.into(), Scalar::int(3).into()]);
        let mut doc = Document::new();
        doc.insert("4_2", outer);
        assert_eq!(encode(&doc, ListDetection::Contiguous), "!0i1!0i2!4i3");
        assert_eq!(encoder(ListDetection::Contiguous).count_elements(&doc), 3);
    }

    #[test]
    fn test_list_detection_disabled_keeps_headers() {
        let mut doc = Document::new();
        doc.insert("3", list(vec![Scalar::int(1).into(), Scalar::int(2).into()]));
        let enc = encoder(ListDetection::Disabled);
        assert_eq!(enc.count_elements(&doc), 3);
        assert_eq!(encode(&doc, ListDetection::Disabled), "!3m2!0i1!1i2");
    }

    #[test]
    fn test_count_matches_token_count() {
        let doc = crate::decode("!1m5!2m0!3m2!4i1!5b1!6sx!7e1").unwrap();
        let enc = encoder(ListDetection::Disabled);
        let message = doc.get_message("1").unwrap();
        assert_eq!(enc.count_elements(message), 5);
        assert_eq!(enc.count_elements(&doc), 7);
    }
}
