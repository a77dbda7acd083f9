//! Attribute - A named, single- or multi-valued property of a Role
//!
//! Arity is part of the type. `AttributeValue::Single("1")` and
//! `AttributeValue::Multi(["1"])` are different values and stay different
//! through every store adapter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building attribute values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// A multi-valued attribute mixed scalar types
    #[error("multi-valued attribute expects {expected} elements, found {found} at position {position}")]
    MixedScalarTypes {
        expected: ScalarType,
        found: ScalarType,
        position: usize,
    },

    /// Text could not be read as the requested scalar type
    #[error("'{text}' is not a valid {expected}")]
    InvalidScalar { text: String, expected: ScalarType },
}

/// The primitive type carried by a [`Scalar`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Integer,
    Boolean,
}

impl ScalarType {
    /// Parse `text` into a scalar of this type
    pub fn parse(self, text: &str) -> Result<Scalar, AttributeError> {
        let invalid = || AttributeError::InvalidScalar {
            text: text.to_string(),
            expected: self,
        };

        match self {
            ScalarType::String => Ok(Scalar::String(text.to_string())),
            ScalarType::Integer => text.trim().parse().map(Scalar::Integer).map_err(|_| invalid()),
            ScalarType::Boolean => match text.trim() {
                "true" => Ok(Scalar::Boolean(true)),
                "false" => Ok(Scalar::Boolean(false)),
                _ => Err(invalid()),
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Integer => "integer",
            ScalarType::Boolean => "boolean",
        }
    }
}

impl core::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single primitive attribute value
///
/// Serialized untagged, so JSON `"1"`, `1` and `true` map to the three
/// variants without any type annotation in the stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl Scalar {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Scalar::Boolean(_) => ScalarType::Boolean,
            Scalar::Integer(_) => ScalarType::Integer,
            Scalar::String(_) => ScalarType::String,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl PartialEq<str> for Scalar {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Scalar {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl core::fmt::Display for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

/// Ordered sequence of scalars that all share one [`ScalarType`]
///
/// The element type is checked on construction and on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Scalar>", into = "Vec<Scalar>")]
pub struct ScalarList(Vec<Scalar>);

impl ScalarList {
    pub fn new<I, V>(values: I) -> Result<Self, AttributeError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        Self::try_from(values.into_iter().map(Into::into).collect::<Vec<_>>())
    }

    /// Element type, `None` for an empty list
    pub fn element_type(&self) -> Option<ScalarType> {
        self.0.first().map(Scalar::scalar_type)
    }

    pub fn as_slice(&self) -> &[Scalar] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Scalar> {
        self.0
    }
}

impl TryFrom<Vec<Scalar>> for ScalarList {
    type Error = AttributeError;

    fn try_from(values: Vec<Scalar>) -> Result<Self, Self::Error> {
        if let Some(first) = values.first() {
            let expected = first.scalar_type();
            if let Some((position, odd)) = values
                .iter()
                .enumerate()
                .find(|(_, v)| v.scalar_type() != expected)
            {
                return Err(AttributeError::MixedScalarTypes {
                    expected,
                    found: odd.scalar_type(),
                    position,
                });
            }
        }
        Ok(Self(values))
    }
}

impl From<ScalarList> for Vec<Scalar> {
    fn from(list: ScalarList) -> Self {
        list.0
    }
}

impl core::ops::Deref for ScalarList {
    type Target = [Scalar];

    fn deref(&self) -> &[Scalar] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ScalarList {
    type Item = &'a Scalar;
    type IntoIter = core::slice::Iter<'a, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Value of an attribute: one scalar, or an ordered list of scalars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(Scalar),
    Multi(ScalarList),
}

impl AttributeValue {
    pub fn single(value: impl Into<Scalar>) -> Self {
        AttributeValue::Single(value.into())
    }

    pub fn multi<I, V>(values: I) -> Result<Self, AttributeError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        ScalarList::new(values).map(AttributeValue::Multi)
    }

    pub fn is_multi_valued(&self) -> bool {
        matches!(self, AttributeValue::Multi(_))
    }

    pub fn as_single(&self) -> Option<&Scalar> {
        match self {
            AttributeValue::Single(s) => Some(s),
            AttributeValue::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> Option<&[Scalar]> {
        match self {
            AttributeValue::Single(_) => None,
            AttributeValue::Multi(list) => Some(list.as_slice()),
        }
    }

    /// Number of scalars held (1 for a single value)
    pub fn len(&self) -> usize {
        match self {
            AttributeValue::Single(_) => 1,
            AttributeValue::Multi(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl core::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AttributeValue::Single(s) => write!(f, "{}", s),
            AttributeValue::Multi(list) => {
                f.write_str("[")?;
                for (i, v) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A named attribute owned by exactly one Role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: AttributeValue,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Single-valued attribute
    pub fn single(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::new(name, AttributeValue::single(value))
    }

    /// Multi-valued attribute; fails if the values mix scalar types
    pub fn multi<I, V>(name: impl Into<String>, values: I) -> Result<Self, AttributeError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        Ok(Self::new(name, AttributeValue::multi(values)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    /// Replace the whole value, arity included
    pub fn set_value(&mut self, value: AttributeValue) {
        self.value = value;
    }

    pub fn into_value(self) -> AttributeValue {
        self.value
    }

    pub fn is_multi_valued(&self) -> bool {
        self.value.is_multi_valued()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_is_not_one_element_multi() {
        let single = AttributeValue::single("1");
        let multi = AttributeValue::multi(["1"]).unwrap();

        assert_ne!(single, multi);
        assert!(!single.is_multi_valued());
        assert!(multi.is_multi_valued());
        assert_eq!(multi.len(), 1);
    }

    #[test]
    fn test_multi_rejects_mixed_types() {
        let err = AttributeValue::multi([Scalar::from("a"), Scalar::from(2i64)]).unwrap_err();
        assert_eq!(
            err,
            AttributeError::MixedScalarTypes {
                expected: ScalarType::String,
                found: ScalarType::Integer,
                position: 1,
            }
        );
    }

    #[test]
    fn test_empty_multi_is_allowed() {
        let empty = AttributeValue::multi(Vec::<Scalar>::new()).unwrap();
        assert!(empty.is_multi_valued());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_set_value_replaces_entirely() {
        let mut attr = Attribute::multi("multi-valued", ["1", "2", "3"]).unwrap();
        attr.set_value(AttributeValue::multi(["3", "4"]).unwrap());

        let values = attr.value().as_multi().unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], "3");
        assert_eq!(values[1], "4");
    }

    #[test]
    fn test_scalar_type_parse() {
        assert_eq!(ScalarType::Integer.parse("42").unwrap(), Scalar::Integer(42));
        assert_eq!(ScalarType::Boolean.parse("true").unwrap(), Scalar::Boolean(true));
        assert_eq!(ScalarType::String.parse("42").unwrap(), Scalar::from("42"));
        assert!(ScalarType::Integer.parse("forty-two").is_err());
        assert!(ScalarType::Boolean.parse("yes").is_err());
    }

    #[test]
    fn test_json_keeps_arity_and_type() {
        let values = [
            AttributeValue::single("1"),
            AttributeValue::single(1i64),
            AttributeValue::single(true),
            AttributeValue::multi(["1"]).unwrap(),
            AttributeValue::multi([1i64, 2, 3]).unwrap(),
        ];

        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            let back: AttributeValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value, "round trip through {}", json);
        }
    }

    #[test]
    fn test_json_rejects_mixed_array() {
        let result: Result<AttributeValue, _> = serde_json::from_str(r#"["a", 1]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(AttributeValue::single("x").to_string(), "x");
        assert_eq!(
            AttributeValue::multi(["1", "2", "3"]).unwrap().to_string(),
            "[1, 2, 3]"
        );
    }
}
