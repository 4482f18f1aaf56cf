// Draft data model: players, teams, picks, and the draft state document.

pub mod pick;
pub mod player;
pub mod state;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use self::player::Player;
use self::state::DraftState;

/// One complete read of both backing documents.
///
/// Serializes to the retrieval document shape: `{ "players": [...], "state": {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub players: Vec<Player>,
    pub state: DraftState,
}

impl DraftSnapshot {
    pub fn new(players: Vec<Player>, state: DraftState) -> Self {
        DraftSnapshot { players, state }
    }
}

// ---------------------------------------------------------------------------
// Lenient scalar decoding
// ---------------------------------------------------------------------------

/// Decode a string field that may have been written as a number or boolean.
///
/// Hand-edited draft files regularly contain `"playerId": 17` instead of
/// `"playerId": "17"`; both decode to the same string.
pub(crate) fn string_like<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(value)
        .ok_or_else(|| de::Error::custom("expected a string, number, or boolean"))
}

/// Optional variant of [`string_like`]; `null` and a missing key both decode to `None`.
pub(crate) fn opt_string_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_to_string(value)
            .map(Some)
            .ok_or_else(|| de::Error::custom("expected a string, number, or boolean")),
    }
}

/// Decode a field whose explicit `null` means the same as leaving it out.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode an optional rating written as a number or a numeric string.
///
/// `null`, a missing key, and strings that are not numbers (`""`, `"N/A"`)
/// all decode to `None`.
pub(crate) fn opt_number_like<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => Ok(s.trim().parse::<f64>().ok().filter(|r| r.is_finite())),
        Some(_) => Err(de::Error::custom("expected a number or numeric string")),
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Scalars {
        #[serde(deserialize_with = "string_like")]
        value: String,
        #[serde(default, deserialize_with = "opt_string_like")]
        maybe: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Lenient {
        #[serde(default, deserialize_with = "null_as_default")]
        list: Vec<u32>,
        #[serde(default, deserialize_with = "null_as_default")]
        count: u32,
        #[serde(default, deserialize_with = "opt_number_like")]
        rating: Option<f64>,
    }

    #[test]
    fn string_like_accepts_strings_numbers_and_bools() {
        let p: Scalars = serde_json::from_str(r#"{"value": "abc"}"#).unwrap();
        assert_eq!(p.value, "abc");
        let p: Scalars = serde_json::from_str(r#"{"value": 42}"#).unwrap();
        assert_eq!(p.value, "42");
        let p: Scalars = serde_json::from_str(r#"{"value": true}"#).unwrap();
        assert_eq!(p.value, "true");
    }

    #[test]
    fn string_like_rejects_structures() {
        assert!(serde_json::from_str::<Scalars>(r#"{"value": [1]}"#).is_err());
        assert!(serde_json::from_str::<Scalars>(r#"{"value": {"a": 1}}"#).is_err());
        assert!(serde_json::from_str::<Scalars>(r#"{"value": null}"#).is_err());
    }

    #[test]
    fn opt_string_like_treats_null_and_missing_as_none() {
        let p: Scalars = serde_json::from_str(r#"{"value": "x"}"#).unwrap();
        assert!(p.maybe.is_none());
        let p: Scalars = serde_json::from_str(r#"{"value": "x", "maybe": null}"#).unwrap();
        assert!(p.maybe.is_none());
        let p: Scalars = serde_json::from_str(r#"{"value": "x", "maybe": 7}"#).unwrap();
        assert_eq!(p.maybe.as_deref(), Some("7"));
    }

    #[test]
    fn null_as_default_covers_null_and_missing() {
        let l: Lenient = serde_json::from_str(r#"{"list": null, "count": null}"#).unwrap();
        assert!(l.list.is_empty());
        assert_eq!(l.count, 0);
        let l: Lenient = serde_json::from_str(r#"{}"#).unwrap();
        assert!(l.list.is_empty());
        let l: Lenient = serde_json::from_str(r#"{"list": [1, 2], "count": 3}"#).unwrap();
        assert_eq!(l.list, vec![1, 2]);
        assert_eq!(l.count, 3);
        assert!(serde_json::from_str::<Lenient>(r#"{"list": "none"}"#).is_err());
    }

    #[test]
    fn opt_number_like_reads_numbers_and_numeric_strings() {
        let rating = |json: &str| serde_json::from_str::<Lenient>(json).unwrap().rating;
        assert_eq!(rating(r#"{"rating": 8}"#), Some(8.0));
        assert_eq!(rating(r#"{"rating": 6.5}"#), Some(6.5));
        assert_eq!(rating(r#"{"rating": " 8 "}"#), Some(8.0));
        assert_eq!(rating(r#"{"rating": "N/A"}"#), None);
        assert_eq!(rating(r#"{"rating": ""}"#), None);
        assert_eq!(rating(r#"{"rating": null}"#), None);
        assert_eq!(rating(r#"{}"#), None);
        assert!(serde_json::from_str::<Lenient>(r#"{"rating": [8]}"#).is_err());
    }

    #[test]
    fn snapshot_serializes_as_retrieval_document() {
        let snapshot = DraftSnapshot::new(Vec::new(), DraftState::default());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("players").unwrap().is_array());
        assert!(json.get("state").unwrap().is_object());
    }
}
