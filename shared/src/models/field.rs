use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One stored attribute of a character.
///
/// Payloads are kept verbatim, so an attribute can be missing, explicitly
/// null, or a number that failed to parse, besides holding a value. These are
/// distinct states: they compare differently and serialize differently.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Field<T> {
    #[default]
    Missing,
    Null,
    NotANumber,
    Value(T),
}

impl<T: PartialEq> Field<T> {
    /// Strict equality: missing equals missing and null equals null, but
    /// not-a-number equals nothing, itself included.
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Field::NotANumber, _) | (_, Field::NotANumber) => false,
            _ => self == other,
        }
    }

    /// Whether this field holds exactly `value`.
    pub fn is(&self, value: &T) -> bool {
        matches!(self, Field::Value(v) if v == value)
    }
}

impl<T> Field<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Value(value)
    }
}

impl From<&str> for Field<String> {
    fn from(value: &str) -> Self {
        Field::Value(value.to_string())
    }
}

// Null and not-a-number both go out as JSON null; missing fields are skipped
// by the containing struct.
impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => v.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}

// Absent keys never reach this; the containing struct defaults them to Missing.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Field::Value(v),
            None => Field::Null,
        })
    }
}
