//! JSON column helpers.
//!
//! Entities store list-valued fields as JSON text in a single column.
//! `FromRow` implementations use these to decode the stored text, and
//! writers use [`to_json`] to produce it.

use serde::{de::DeserializeOwned, Serialize};

/// Serializes a value to the JSON text stored in a column. Falls back to
/// `"null"` when the value cannot be serialized.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Decodes JSON column text, substituting the default on malformed input.
pub fn from_json<T: DeserializeOwned + Default>(s: &str) -> T {
    serde_json::from_str(s).unwrap_or_default()
}

/// Decodes a nullable JSON column. Missing rows, empty text and literal
/// `null` all map to `None`.
pub fn from_optional_json<T: DeserializeOwned>(result: rusqlite::Result<String>) -> Option<T> {
    match result {
        Ok(s) if !s.is_empty() && s != "null" => serde_json::from_str(&s).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_json_falls_back_to_default() {
        let tags: Vec<String> = from_json("not json");
        assert!(tags.is_empty());
    }

    #[test]
    fn optional_json_treats_null_and_empty_as_none() {
        assert_eq!(from_optional_json::<Vec<String>>(Ok("null".to_string())), None);
        assert_eq!(from_optional_json::<Vec<String>>(Ok(String::new())), None);
        assert_eq!(
            from_optional_json::<Vec<String>>(Ok("[\"a\"]".to_string())),
            Some(vec!["a".to_string()])
        );
    }
}
