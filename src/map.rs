//! The [`Document`] type: an ordered map from field keys to fields.
//!
//! Keys are decimal tags (`"1"`, `"15"`). A tag that occurs more than once at
//! the same level is stored once under its plain key and then under
//! synthesized keys `"<tag>_<n>"`. Within one level `n` is a single counter
//! shared by every repeated tag, so `1i1!1i2!2i3!2i4` decodes to the keys
//! `1`, `1_1`, `2`, `2_2`.
//!
//! ## Why IndexMap?
//!
//! The encoder emits fields in insertion order, so `IndexMap` keeps a
//! decode → encode cycle byte-identical to the captured parameter.
//!
//! ## Examples
//!
//! ```rust
//! use pb_param::{Document, Scalar};
//!
//! let mut doc = Document::new();
//! doc.insert("1", Scalar::string("list-id"));
//! doc.push("4", Scalar::int(1));
//! doc.push("4", Scalar::int(2));
//!
//! let keys: Vec<_> = doc.keys().cloned().collect();
//! assert_eq!(keys, vec!["1", "4", "4_1"]);
//! assert_eq!(doc.occurrences("4").count(), 2);
//! ```

use crate::key::FieldKey;
use crate::{Error, Field, Scalar};
use indexmap::IndexMap;
use serde::de::{self, MapAccess};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ordered map of field keys to [`Field`]s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document(IndexMap<String, Field>);

impl Document {
    /// Creates an empty `Document`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pb_param::Document;
    ///
    /// let doc = Document::new();
    /// assert!(doc.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Document(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Document(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field under `key`, returning the previous field if the key was present.
    ///
    /// The key is stored as given. Use [`Document::push`] to append a repeated
    /// occurrence of a tag without spelling its suffix.
    pub fn insert(&mut self, key: impl Into<String>, field: impl Into<Field>) -> Option<Field> {
        self.0.insert(key.into(), field.into())
    }

    /// Appends `field` as the next occurrence of `tag` and returns the key it was stored under.
    ///
    /// The first occurrence gets the plain tag. Later ones get `<tag>_<n>`,
    /// numbered with the same shared counter the decoder uses, so a document
    /// built with `push` in wire order equals the decoded form of its encoding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pb_param::{decode, encode, Document, Scalar};
    ///
    /// let mut doc = Document::new();
    /// doc.push("1", Scalar::int(1));
    /// doc.push("1", Scalar::int(2));
    /// doc.push("2", Scalar::int(3));
    /// assert_eq!(doc.push("2", Scalar::int(4)), "2_2");
    ///
    /// assert_eq!(decode(&encode(&doc)).unwrap(), doc);
    /// ```
    pub fn push(&mut self, tag: &str, field: impl Into<Field>) -> String {
        let mut counter = 1 + self
            .0
            .keys()
            .filter(|k| FieldKey::parse(k).and_then(|k| k.duplicate()).is_some())
            .count();
        let key = self.next_free_key(tag, &mut counter);
        self.0.insert(key.clone(), field.into());
        key
    }

    /// Stores one decoded occurrence of `tag`, advancing the shared counter on repeats.
    pub(crate) fn insert_occurrence(&mut self, tag: &str, field: Field, counter: &mut usize) {
        let key = self.next_free_key(tag, counter);
        self.0.insert(key, field);
    }

    fn next_free_key(&self, tag: &str, counter: &mut usize) -> String {
        if !self.0.contains_key(tag) {
            return tag.to_string();
        }
        loop {
            let key = format!("{}_{}", tag, counter);
            *counter += 1;
            if !self.0.contains_key(&key) {
                return key;
            }
        }
    }

    /// Returns a reference to the field stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.0.get(key)
    }

    /// Returns the scalar stored under `key`, if that field is a scalar.
    #[must_use]
    pub fn get_scalar(&self, key: &str) -> Option<&Scalar> {
        self.get(key).and_then(Field::as_scalar)
    }

    /// Returns the message stored under `key`, if that field is a message.
    #[must_use]
    pub fn get_message(&self, key: &str) -> Option<&Document> {
        self.get(key).and_then(Field::as_message)
    }

    /// Follows `path` through nested messages. Any miss, or a scalar in the
    /// middle of the path, yields `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pb_param::decode;
    ///
    /// let doc = decode("!1m3!4m2!3d44.4!4d26.1").unwrap();
    /// let lat = doc.get_path(&["1", "4", "3"]).and_then(|f| f.as_scalar());
    /// assert_eq!(lat.and_then(|s| s.as_f64()), Some(44.4));
    /// assert!(doc.get_path(&["1", "9"]).is_none());
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Field> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for key in parents {
            current = current.get_message(key)?;
        }
        current.get(last)
    }

    /// Iterates every occurrence of `tag` at this level, in insertion order.
    pub fn occurrences<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.0.iter().filter_map(move |(k, field)| {
            FieldKey::parse(k)
                .filter(|k| k.tag() == tag)
                .map(|_| field)
        })
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Field> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when the keys are exactly `"0"`, `"1"`, … `"n-1"` in
    /// order and the document is not empty.
    ///
    /// Such a document is a repeated-field group: with
    /// [`ListDetection::Contiguous`](crate::ListDetection) its items are
    /// written as siblings under the parent's tag.
    #[must_use]
    pub fn is_list(&self) -> bool {
        !self.is_empty()
            && self
                .0
                .keys()
                .enumerate()
                .all(|(i, key)| *key == i.to_string())
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Field> {
        self.0.keys()
    }

    /// Returns an iterator over the fields, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Field> {
        self.0.values()
    }

    /// Returns an iterator over the key-field pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Field> {
        self.0.iter()
    }

    pub(crate) fn from_map_access<'de, A>(mut map: A) -> Result<Self, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut doc = Document::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, field)) = map.next_entry::<String, Field>()? {
            if FieldKey::parse(&key).is_none() {
                return Err(de::Error::custom(Error::invalid_key(&key)));
            }
            doc.0.insert(key, field);
        }
        Ok(doc)
    }
}

/// Returns `true` if every key of `doc` (recursively) is a valid field key.
pub(crate) fn has_valid_keys(doc: &Document) -> bool {
    doc.iter().all(|(k, field)| {
        FieldKey::parse(k).is_some() && field.as_message().map_or(true, has_valid_keys)
    })
}

impl IntoIterator for Document {
    type Item = (String, Field);
    type IntoIter = indexmap::map::IntoIter<String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Field);
    type IntoIter = indexmap::map::Iter<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Field)> for Document {
    fn from_iter<T: IntoIterator<Item = (K, Field)>>(iter: T) -> Self {
        Document(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DocumentVisitor;

        impl<'de> de::Visitor<'de> for DocumentVisitor {
            type Value = Document;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of field keys to fields")
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                Document::from_map_access(map)
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}
