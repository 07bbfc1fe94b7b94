//! Field keys and tag scanning.
//!
//! A document key is either a plain tag (`"12"`) or a tag carrying a
//! duplicate suffix (`"12_3"`). The suffix only exists so repeated fields can
//! live in a map with unique keys; it never reaches the wire.

use std::fmt;

/// A parsed document key.
///
/// # Examples
///
/// ```rust
/// use pb_param::FieldKey;
///
/// let key = FieldKey::parse("12_3").unwrap();
/// assert_eq!(key.tag(), "12");
/// assert_eq!(key.duplicate(), Some(3));
///
/// assert_eq!(FieldKey::parse("7").unwrap().duplicate(), None);
/// assert!(FieldKey::parse("a7").is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldKey<'a> {
    tag: &'a str,
    duplicate: Option<usize>,
}

impl<'a> FieldKey<'a> {
    /// Parses `<digits>` or `<digits>_<digits>`. Anything else yields `None`.
    #[must_use]
    pub fn parse(key: &'a str) -> Option<Self> {
        let (tag, rest) = split_tag(key);
        if tag.is_empty() {
            return None;
        }
        if rest.is_empty() {
            return Some(FieldKey {
                tag,
                duplicate: None,
            });
        }
        let suffix = rest.strip_prefix('_')?;
        let (digits, trailing) = split_tag(suffix);
        if digits.is_empty() || !trailing.is_empty() {
            return None;
        }
        let duplicate = digits.parse().ok()?;
        Some(FieldKey {
            tag,
            duplicate: Some(duplicate),
        })
    }

    /// The wire tag, without any duplicate suffix.
    #[must_use]
    pub const fn tag(&self) -> &'a str {
        self.tag
    }

    /// The duplicate counter, if this key names a repeated occurrence.
    #[must_use]
    pub const fn duplicate(&self) -> Option<usize> {
        self.duplicate
    }
}

impl fmt::Display for FieldKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.duplicate {
            Some(n) => write!(f, "{}_{}", self.tag, n),
            None => f.write_str(self.tag),
        }
    }
}

/// Returns the tag to put on the wire for `key`.
///
/// Keys starting with `<digits>_<digits>` lose everything from the underscore
/// on; every other key is returned unchanged.
#[must_use]
pub fn wire_tag(key: &str) -> &str {
    let (tag, rest) = split_tag(key);
    match rest.strip_prefix('_') {
        Some(suffix) if !tag.is_empty() && suffix.starts_with(|c: char| c.is_ascii_digit()) => tag,
        _ => key,
    }
}

/// Returns `true` if `s` is a non-empty run of ASCII digits.
#[inline]
#[must_use]
pub fn is_tag(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Splits `s` after its leading ASCII digits.
#[inline]
pub(crate) fn split_tag(s: &str) -> (&str, &str) {
    let end = s
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_duplicate() {
        let key = FieldKey::parse("4").unwrap();
        assert_eq!(key.tag(), "4");
        assert_eq!(key.duplicate(), None);
        assert_eq!(key.to_string(), "4");

        let key = FieldKey::parse("1_12").unwrap();
        assert_eq!(key.tag(), "1");
        assert_eq!(key.duplicate(), Some(12));
        assert_eq!(key.to_string(), "1_12");
    }

    #[test]
    fn test_parse_rejects() {
        assert!(FieldKey::parse("").is_none());
        assert!(FieldKey::parse("_1").is_none());
        assert!(FieldKey::parse("1_").is_none());
        assert!(FieldKey::parse("1_a").is_none());
        assert!(FieldKey::parse("1_2x").is_none());
        assert!(FieldKey::parse("1m2").is_none());
    }

    #[test]
    fn test_wire_tag() {
        assert_eq!(wire_tag("15"), "15");
        assert_eq!(wire_tag("15_2"), "15");
        assert_eq!(wire_tag("1_3_4"), "1");
        assert_eq!(wire_tag("1_"), "1_");
        assert_eq!(wire_tag("x_1"), "x_1");
    }

    #[test]
    fn test_split_tag() {
        assert_eq!(split_tag("12m3"), ("12", "m3"));
        assert_eq!(split_tag("abc"), ("", "abc"));
        assert_eq!(split_tag("42"), ("42", ""));
    }
}
