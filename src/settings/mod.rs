//! Key/value settings provider.
//!
//! The host application owns configuration; this engine only reads it.
//! Every component receives a `SettingsReader` explicitly, so tests can
//! substitute fixed configuration.
//!
//! | Module | Purpose                                  |
//! |--------|------------------------------------------|
//! | `keys` | Namespaced key builders and defaults     |
//! | `map`  | In-memory `MapSettings` implementation   |

pub mod keys;
mod map;

pub use map::MapSettings;

use serde_json::Value as JsonValue;

use crate::debug;

/// Read-only access to host settings
///
/// Only `get` is required; the typed accessors never fail and fall back to
/// the supplied default on missing or malformed values.
pub trait SettingsReader: Send + Sync {
    /// Raw string value for `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// String value, `default` when missing or blank.
    fn string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => default.to_string(),
        }
    }

    /// Non-blank string value.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Boolean value (`true/false/1/0/yes/no/on/off`), `default` otherwise.
    fn bool(&self, key: &str, default: bool) -> bool {
        let Some(raw) = self.get(key) else {
            return default;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            _ => {
                debug!("settings"; "`{}` is not a boolean: {:?}", key, raw);
                default
            }
        }
    }

    /// Float value, `None` when missing or unparsable.
    fn float(&self, key: &str) -> Option<f32> {
        let raw = self.get(key)?;
        match raw.trim().parse::<f32>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                debug!("settings"; "`{}` is not a number: {:?}", key, raw);
                None
            }
        }
    }

    /// JSON array value, `None` when missing or malformed.
    fn json_array(&self, key: &str) -> Option<Vec<JsonValue>> {
        let raw = self.get(key)?;
        match serde_json::from_str::<JsonValue>(&raw) {
            Ok(JsonValue::Array(items)) => Some(items),
            Ok(_) => {
                debug!("settings"; "`{}` is not a JSON array, using default", key);
                None
            }
            Err(e) => {
                debug!("settings"; "`{}` is malformed JSON ({}), using default", key, e);
                None
            }
        }
    }

    /// JSON array of strings; non-string items are dropped.
    fn string_list(&self, key: &str) -> Option<Vec<String>> {
        self.json_array(key).map(|items| {
            items
                .into_iter()
                .filter_map(|v| match v {
                    JsonValue::String(s) => Some(s),
                    _ => None,
                })
                .collect()
        })
    }
}
