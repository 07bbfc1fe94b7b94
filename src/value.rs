//! Field values: scalars and nested messages.
//!
//! ## Core Types
//!
//! - [`Field`]: either a [`Scalar`] or a nested [`Document`] (a message)
//! - [`Scalar`]: a one-character [`ScalarType`] plus an opaque payload
//! - [`ScalarType`]: the type characters accepted on the wire
//!
//! The codec never interprets scalar payloads. The typed constructors and
//! accessors on [`Scalar`] are conveniences for callers building requests or
//! reading responses; what goes on the wire is always `type char + payload`.
//!
//! ## Examples
//!
//! ```rust
//! use pb_param::{Field, Scalar, ScalarType};
//!
//! let scalar: Scalar = "i50".parse().unwrap();
//! assert_eq!(scalar.ty(), ScalarType::Int);
//! assert_eq!(scalar.value(), "50");
//! assert_eq!(scalar.as_i64(), Some(50));
//!
//! let field = Field::from(Scalar::bool(true));
//! assert_eq!(field.to_string(), "b1");
//! ```

use crate::{Document, Error};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Type character of a scalar token.
///
/// Only the character matters to the codec. The variant names follow the
/// meaning the service gives the well-known characters; `x`, `y` and `z` are
/// carried without any assumed meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Bool,
    Double,
    Enum,
    Float,
    Int,
    String,
    Unsigned,
    Varint,
    X,
    Y,
    Z,
}

impl ScalarType {
    /// All type characters in wire order.
    pub const ALL: [ScalarType; 11] = [
        ScalarType::Bool,
        ScalarType::Double,
        ScalarType::Enum,
        ScalarType::Float,
        ScalarType::Int,
        ScalarType::String,
        ScalarType::Unsigned,
        ScalarType::Varint,
        ScalarType::X,
        ScalarType::Y,
        ScalarType::Z,
    ];

    /// Maps a wire character to its type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pb_param::ScalarType;
    ///
    /// assert_eq!(ScalarType::from_char('s'), Some(ScalarType::String));
    /// assert_eq!(ScalarType::from_char('m'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'b' => Some(ScalarType::Bool),
            'd' => Some(ScalarType::Double),
            'e' => Some(ScalarType::Enum),
            'f' => Some(ScalarType::Float),
            'i' => Some(ScalarType::Int),
            's' => Some(ScalarType::String),
            'u' => Some(ScalarType::Unsigned),
            'v' => Some(ScalarType::Varint),
            'x' => Some(ScalarType::X),
            'y' => Some(ScalarType::Y),
            'z' => Some(ScalarType::Z),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            ScalarType::Bool => 'b',
            ScalarType::Double => 'd',
            ScalarType::Enum => 'e',
            ScalarType::Float => 'f',
            ScalarType::Int => 'i',
            ScalarType::String => 's',
            ScalarType::Unsigned => 'u',
            ScalarType::Varint => 'v',
            ScalarType::X => 'x',
            ScalarType::Y => 'y',
            ScalarType::Z => 'z',
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A typed, opaque scalar value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scalar {
    ty: ScalarType,
    value: String,
}

impl Scalar {
    pub fn new(ty: ScalarType, value: impl Into<String>) -> Self {
        Scalar {
            ty,
            value: value.into(),
        }
    }

    /// A string scalar (`s`). The payload is written as given.
    pub fn string(value: impl Into<String>) -> Self {
        Scalar::new(ScalarType::String, value)
    }

    pub fn int(value: i64) -> Self {
        Scalar::new(ScalarType::Int, value.to_string())
    }

    pub fn unsigned(value: u64) -> Self {
        Scalar::new(ScalarType::Unsigned, value.to_string())
    }

    pub fn enumeration(value: i64) -> Self {
        Scalar::new(ScalarType::Enum, value.to_string())
    }

    /// A boolean scalar, encoded as `b1` / `b0`.
    pub fn bool(value: bool) -> Self {
        Scalar::new(ScalarType::Bool, if value { "1" } else { "0" })
    }

    pub fn double(value: f64) -> Self {
        Scalar::new(ScalarType::Double, value.to_string())
    }

    pub fn float(value: f32) -> Self {
        Scalar::new(ScalarType::Float, value.to_string())
    }

    #[inline]
    #[must_use]
    pub const fn ty(&self) -> ScalarType {
        self.ty
    }

    /// The raw payload, without the type character.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Interprets a `b` scalar as a boolean.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pb_param::Scalar;
    ///
    /// assert_eq!("b1".parse::<Scalar>().unwrap().as_bool(), Some(true));
    /// assert_eq!("b0".parse::<Scalar>().unwrap().as_bool(), Some(false));
    /// assert_eq!("i1".parse::<Scalar>().unwrap().as_bool(), None);
    /// ```
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match (self.ty, self.value.as_str()) {
            (ScalarType::Bool, "1") => Some(true),
            (ScalarType::Bool, "0") => Some(false),
            _ => None,
        }
    }

    /// Parses the payload as a signed integer, whatever the type character.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.value.parse().ok()
    }

    /// Parses the payload as a float, whatever the type character.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.value.parse().ok()
    }

    /// Returns the payload of an `s` scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self.ty {
            ScalarType::String => Some(&self.value),
            _ => None,
        }
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

/// Parses the literal form `<type char><payload>`, e.g. `"i50"` or `"sHello"`.
impl FromStr for Scalar {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let mut chars = s.chars();
        let ty = chars
            .next()
            .and_then(ScalarType::from_char)
            .ok_or_else(|| Error::invalid_scalar(s))?;
        Ok(Scalar::new(ty, chars.as_str()))
    }
}

/// Writes the literal form, which is also the scalar's wire form minus the tag.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.ty.as_char(), self.value)
    }
}

impl TryFrom<Scalar> for i64 {
    type Error = Error;

    fn try_from(scalar: Scalar) -> crate::Result<Self> {
        scalar
            .as_i64()
            .ok_or_else(|| Error::custom(format!("expected integer, found {}", scalar)))
    }
}

impl TryFrom<Scalar> for f64 {
    type Error = Error;

    fn try_from(scalar: Scalar) -> crate::Result<Self> {
        scalar
            .as_f64()
            .ok_or_else(|| Error::custom(format!("expected number, found {}", scalar)))
    }
}

impl TryFrom<Scalar> for bool {
    type Error = Error;

    fn try_from(scalar: Scalar) -> crate::Result<Self> {
        scalar
            .as_bool()
            .ok_or_else(|| Error::custom(format!("expected bool, found {}", scalar)))
    }
}

impl TryFrom<Scalar> for String {
    type Error = Error;

    fn try_from(scalar: Scalar) -> crate::Result<Self> {
        match scalar.ty {
            ScalarType::String => Ok(scalar.value),
            _ => Err(Error::custom(format!("expected string, found {}", scalar))),
        }
    }
}

/// One slot of a [`Document`].
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    Scalar(Scalar),
    Message(Document),
}

impl Field {
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Field::Scalar(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_message(&self) -> bool {
        matches!(self, Field::Message(_))
    }

    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Field::Scalar(scalar) => Some(scalar),
            Field::Message(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_message(&self) -> Option<&Document> {
        match self {
            Field::Message(doc) => Some(doc),
            Field::Scalar(_) => None,
        }
    }
}

/// Scalars print their literal form; messages print their wire encoding.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Scalar(scalar) => write!(f, "{}", scalar),
            Field::Message(doc) => write!(f, "{}", crate::encode(doc)),
        }
    }
}

impl From<Scalar> for Field {
    fn from(value: Scalar) -> Self {
        Field::Scalar(value)
    }
}

impl From<Document> for Field {
    fn from(value: Document) -> Self {
        Field::Message(value)
    }
}

impl Serialize for Field {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Field::Scalar(scalar) => serializer.collect_str(scalar),
            Field::Message(doc) => doc.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar literal such as \"i50\" or a nested message")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse().map(Field::Scalar).map_err(E::custom)
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                Document::from_map_access(map).map(Field::Message)
            }
        }

        deserializer.deserialize_any(FieldVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_type_chars() {
        for ty in ScalarType::ALL {
            assert_eq!(ScalarType::from_char(ty.as_char()), Some(ty));
        }
        assert_eq!(ScalarType::from_char('m'), None);
        assert_eq!(ScalarType::from_char('B'), None);
    }

    #[test]
    fn test_scalar_from_str() {
        let scalar: Scalar = "sHello world".parse().unwrap();
        assert_eq!(scalar.ty(), ScalarType::String);
        assert_eq!(scalar.value(), "Hello world");
        assert_eq!(scalar.as_str(), Some("Hello world"));

        let empty: Scalar = "s".parse().unwrap();
        assert_eq!(empty.value(), "");

        assert_eq!(
            "q1".parse::<Scalar>(),
            Err(Error::InvalidScalar("q1".to_string()))
        );
        assert!("".parse::<Scalar>().is_err());
    }

    #[test]
    fn test_constructors() {
        assert_eq!(Scalar::int(-3).to_string(), "i-3");
        assert_eq!(Scalar::unsigned(7).to_string(), "u7");
        assert_eq!(Scalar::enumeration(81).to_string(), "e81");
        assert_eq!(Scalar::bool(false).to_string(), "b0");
        assert_eq!(Scalar::double(44.4268).to_string(), "d44.4268");
        assert_eq!(Scalar::float(1.5).to_string(), "f1.5");
        assert_eq!(Scalar::string("a b").to_string(), "sa b");
    }

    #[test]
    fn test_tryfrom() {
        assert_eq!(i64::try_from(Scalar::int(42)).unwrap(), 42);
        assert_eq!(f64::try_from(Scalar::double(2.5)).unwrap(), 2.5);
        assert!(bool::try_from(Scalar::bool(true)).unwrap());
        assert!(bool::try_from(Scalar::int(1)).is_err());
        assert_eq!(String::try_from(Scalar::string("x")).unwrap(), "x");
        assert!(String::try_from(Scalar::int(1)).is_err());
        assert!(i64::try_from(Scalar::string("abc")).is_err());
    }

    #[test]
    fn test_field_accessors() {
        let scalar = Field::from(Scalar::int(1));
        assert!(scalar.is_scalar());
        assert!(scalar.as_message().is_none());

        let message = Field::from(Document::new());
        assert!(message.is_message());
        assert_eq!(message.as_message().map(Document::len), Some(0));
    }
}
