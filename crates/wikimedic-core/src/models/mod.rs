//! Domain models for the WikiMedic core.

mod appointment;
mod category;
mod intake;
mod medicine;
mod user;

pub use appointment::*;
pub use category::*;
pub use intake::*;
pub use medicine::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

/// The remote service is inconsistent about identifier types: some ids come
/// back as JSON numbers, others as strings. Both become `String` locally.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

pub(crate) fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(Into::into)
}

/// Optional id; empty strings and `null` both mean "no reference".
pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(String::from).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "id_from_string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "optional_id")]
        other: Option<String>,
    }

    #[test]
    fn test_numeric_and_text_ids() {
        let a: Probe = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(a.id, "42");
        assert_eq!(a.other, None);

        let b: Probe = serde_json::from_str(r#"{"id": "abc", "other": ""}"#).unwrap();
        assert_eq!(b.id, "abc");
        assert_eq!(b.other, None);

        let c: Probe = serde_json::from_str(r#"{"id": "abc", "other": 7}"#).unwrap();
        assert_eq!(c.other, Some("7".into()));
    }
}
