//! Serde helpers for column configuration coming from the host viewer.
//!
//! Column configuration is persisted by the host and can be stale or partially hand-edited.
//! Fields use `#[serde(default, deserialize_with = "crate::serde_helpers::lenient")]` so a value
//! that doesn't parse becomes "unset" instead of failing the whole column.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional field, mapping `null` and unparseable values to `None`.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    match T::deserialize(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            log::debug!(
                "ignoring unparseable column setting {raw}: {err} (expected {})",
                std::any::type_name::<T>()
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Default)]
    #[serde(default)]
    struct Probe {
        #[serde(deserialize_with = "lenient")]
        fixed: Option<u32>,
        #[serde(deserialize_with = "lenient")]
        label: Option<String>,
    }

    #[test]
    fn keeps_valid_values_and_drops_invalid_ones() {
        let probe: Probe = serde_json::from_str(r#"{"fixed": "three", "label": "x"}"#).unwrap();
        assert_eq!(probe.fixed, None);
        assert_eq!(probe.label.as_deref(), Some("x"));

        let probe: Probe = serde_json::from_str(r#"{"fixed": 3, "label": null}"#).unwrap();
        assert_eq!(probe.fixed, Some(3));
        assert_eq!(probe.label, None);

        let probe: Probe = serde_json::from_str(r#"{"fixed": -1}"#).unwrap();
        assert_eq!(probe.fixed, None);
    }
}
