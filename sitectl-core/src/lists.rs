//! List coercion for upstream fields that are not reliably arrays.
//!
//! GROQ projections return `null` for an absent array and editors can leave
//! a single object where a list is expected. Every list field in the
//! content records goes through [`one_or_many`] so consumers only ever see
//! a `Vec`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Deserialize `null` as `[]`, a lone value as `[value]`, an array as-is.
///
/// Pair with `#[serde(default)]` so a missing key also yields `[]`.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<OneOrMany<T>> = Option::deserialize(deserializer)?;
    Ok(match value {
        None => Vec::new(),
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
    })
}

/// Decode a top-level query result that should be a list.
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, serde_json::Error> {
    one_or_many(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "one_or_many")]
        items: Vec<u32>,
    }

    #[test]
    fn null_missing_scalar_and_array() {
        let h: Holder = serde_json::from_value(json!({ "items": null })).unwrap();
        assert!(h.items.is_empty());

        let h: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(h.items.is_empty());

        let h: Holder = serde_json::from_value(json!({ "items": 7 })).unwrap();
        assert_eq!(h.items, vec![7]);

        let h: Holder = serde_json::from_value(json!({ "items": [1, 2] })).unwrap();
        assert_eq!(h.items, vec![1, 2]);
    }

    #[test]
    fn decode_list_top_level() {
        let empty: Vec<String> = decode_list(Value::Null).unwrap();
        assert!(empty.is_empty());

        let one: Vec<String> = decode_list(json!("solo")).unwrap();
        assert_eq!(one, vec!["solo".to_string()]);
    }

    #[test]
    fn wrong_element_type_is_an_error() {
        assert!(serde_json::from_value::<Holder>(json!({ "items": ["x"] })).is_err());
    }
}
