//! Typed document identifiers

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{Error as DeError, Visitor},
};

/// Backend document key tagged with the record type it identifies.
///
/// Keys are opaque strings. Numeric keys (as used by the bundled sample
/// catalog) are accepted on deserialization and stored in decimal form.
pub struct TypedId<T>(String, PhantomData<fn() -> T>);

impl<T> TypedId<T> {
    /// Wrap a raw key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into(), PhantomData)
    }

    /// Borrow the raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the raw key.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        Self::new(self.0.clone())
    }
}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> AsRef<str> for TypedId<T> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<T> From<String> for TypedId<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T> From<&str> for TypedId<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> From<u64> for TypedId<T> {
    fn from(value: u64) -> Self {
        Self::new(value.to_string())
    }
}

impl<T> Serialize for TypedId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, T> Deserialize<'de> for TypedId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IdVisitor(PhantomData))
    }
}

struct IdVisitor<T>(PhantomData<fn() -> T>);

impl<T> Visitor<'_> for IdVisitor<T> {
    type Value = TypedId<T>;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a string or non-negative integer key")
    }

    fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
        Ok(TypedId::new(value))
    }

    fn visit_string<E: DeError>(self, value: String) -> Result<Self::Value, E> {
        Ok(TypedId::new(value))
    }

    fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
        Ok(TypedId::from(value))
    }

    fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
        u64::try_from(value)
            .map(TypedId::from)
            .map_err(|_err| E::custom(format!("negative key: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    struct Marker;

    #[test]
    fn numeric_keys_deserialize_as_decimal_strings() -> TestResult {
        let id: TypedId<Marker> = serde_json::from_str("42")?;

        assert_eq!(id.as_str(), "42");

        Ok(())
    }

    #[test]
    fn keys_serialize_as_plain_strings() -> TestResult {
        let id = TypedId::<Marker>::new("abc");

        assert_eq!(serde_json::to_string(&id)?, "\"abc\"");

        Ok(())
    }

    #[test]
    fn negative_keys_are_rejected() {
        let result = serde_json::from_str::<TypedId<Marker>>("-1");

        assert!(result.is_err(), "negative numeric keys should not parse");
    }
}
