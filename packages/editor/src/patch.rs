//! Merging JSON patches into typed values.
//!
//! A patch is a JSON object. Values are round-tripped through JSON, merged,
//! and decoded back into their typed form; a patch that no longer decodes is
//! rejected without touching the document.

use crate::mutations::MutationError;
use mailblocks_style::normalize_or;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// How nested objects in a patch combine with existing values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchMode {
    /// Top-level keys replace whole values, nested objects included
    #[default]
    Shallow,
    /// Nested objects are merged key by key
    Deep,
}

/// Merge `patch` into `target` in place.
pub fn merge(target: &mut Map<String, Value>, patch: &Map<String, Value>, mode: PatchMode) {
    for (key, value) in patch {
        match (mode, target.get_mut(key), value) {
            (PatchMode::Deep, Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge(existing, incoming, mode);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Replace malformed shorthand strings under `keys` with `fallback`.
///
/// Only keys present in `patch` are inspected; stored values are left as
/// loaded.
pub(crate) fn normalize_shorthands(
    merged: &mut Map<String, Value>,
    patch: &Map<String, Value>,
    keys: &[&str],
    fallback: &str,
) {
    for key in keys {
        if !patch.contains_key(*key) {
            continue;
        }
        if let Some(Value::String(value)) = merged.get_mut(*key) {
            let normalized = normalize_or(value, fallback);
            if normalized != *value {
                warn!(key = *key, value = %value, fallback, "Malformed shorthand replaced");
                *value = normalized;
            }
        }
    }
}

pub(crate) fn as_object<'a>(
    patch: &'a Value,
    target: &str,
) -> Result<&'a Map<String, Value>, MutationError> {
    patch.as_object().ok_or_else(|| MutationError::InvalidPatch {
        target: target.to_string(),
        message: "patch must be a JSON object".to_string(),
    })
}

/// Encode `current`, merge `patch`, normalise shorthands and decode.
pub(crate) fn apply_patch<T>(
    current: &T,
    patch: &Value,
    mode: PatchMode,
    shorthand_keys: &[&str],
    fallback: &str,
    target: &str,
) -> Result<T, MutationError>
where
    T: Serialize + DeserializeOwned,
{
    let patch = as_object(patch, target)?;
    let mut merged = encode(current, target)?;
    merge(&mut merged, patch, mode);
    normalize_shorthands(&mut merged, patch, shorthand_keys, fallback);
    decode(merged, target)
}

pub(crate) fn encode<T: Serialize>(value: &T, target: &str) -> Result<Map<String, Value>, MutationError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(invalid(target, "values are not an object")),
        Err(e) => Err(invalid(target, e)),
    }
}

pub(crate) fn decode<T: DeserializeOwned>(
    map: Map<String, Value>,
    target: &str,
) -> Result<T, MutationError> {
    serde_json::from_value(Value::Object(map)).map_err(|e| invalid(target, e))
}

pub(crate) fn invalid(target: &str, message: impl ToString) -> MutationError {
    MutationError::InvalidPatch {
        target: target.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_shallow_merge_replaces_nested_objects() {
        let mut target = object(json!({ "border": { "borderTopWidth": "1px", "borderTopColor": "#000" } }));
        merge(
            &mut target,
            &object(json!({ "border": { "borderTopWidth": "2px" } })),
            PatchMode::Shallow,
        );
        assert_eq!(Value::Object(target), json!({ "border": { "borderTopWidth": "2px" } }));
    }

    #[test]
    fn test_deep_merge_keeps_siblings() {
        let mut target = object(json!({ "border": { "borderTopWidth": "1px", "borderTopColor": "#000" } }));
        merge(
            &mut target,
            &object(json!({ "border": { "borderTopWidth": "2px" } })),
            PatchMode::Deep,
        );
        assert_eq!(
            Value::Object(target),
            json!({ "border": { "borderTopWidth": "2px", "borderTopColor": "#000" } })
        );
    }

    #[test]
    fn test_normalize_only_patched_keys() {
        let patch = object(json!({ "padding": "1px 2px" }));
        let mut merged = object(json!({ "padding": "1px 2px", "containerPadding": "3px 4px" }));
        normalize_shorthands(&mut merged, &patch, &["padding", "containerPadding"], "0px");

        assert_eq!(merged["padding"], json!("0px"));
        assert_eq!(merged["containerPadding"], json!("3px 4px"));
    }

    #[test]
    fn test_non_object_patch_is_rejected() {
        assert!(matches!(
            as_object(&json!([1, 2]), "row"),
            Err(MutationError::InvalidPatch { .. })
        ));
    }
}
