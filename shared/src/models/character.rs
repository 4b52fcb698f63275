use super::field::Field;
use serde::{Deserialize, Serialize};

/// A stored character. Fields are kept exactly as they were supplied; missing
/// fields are left out of the JSON output and unknown keys are dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub job: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub weapon: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub level: Field<i64>,
}

impl Character {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        job: impl Into<String>,
        weapon: impl Into<String>,
        level: i64,
    ) -> Self {
        Self {
            id: Field::Value(id),
            name: Field::Value(name.into()),
            job: Field::Value(job.into()),
            weapon: Field::Value(weapon.into()),
            level: Field::Value(level),
        }
    }

    /// Whether this record clashes with `other` on id or on name.
    pub fn collides_with(&self, other: &Character) -> bool {
        self.id.strict_eq(&other.id) || self.name.strict_eq(&other.name)
    }
}

/// Raw fields of the `/new` HTML form, before any coercion.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct NewCharacterForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub job: Option<String>,
    pub weapon: Option<String>,
    pub level: Option<String>,
}

impl NewCharacterForm {
    /// Picks the known fields out of decoded form pairs. The first occurrence
    /// of a repeated key wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        Self {
            id: get("id"),
            name: get("name"),
            job: get("job"),
            weapon: get("weapon"),
            level: get("level"),
        }
    }
}
