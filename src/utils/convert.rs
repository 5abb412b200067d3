//! TOML → JSON value conversion.
//!
//! Settings and front-matter are both modelled as JSON internally; TOML
//! datetimes have no JSON counterpart and become their string form.

use serde_json::{Map, Number, Value};

/// Convert a TOML value into the equivalent JSON value.
pub fn to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(to_json).collect()),
        toml::Value::Table(table) => Value::Object(table_to_json(table)),
    }
}

/// Convert a TOML table into a JSON object map.
pub fn table_to_json(table: toml::Table) -> Map<String, Value> {
    table.into_iter().map(|(k, v)| (k, to_json(v))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        let table: toml::Table = toml::from_str(
            "s = \"x\"\ni = 3\nf = 0.5\nb = true\nd = 2024-06-15",
        )
        .unwrap();
        let map = table_to_json(table);
        assert_eq!(map["s"], json!("x"));
        assert_eq!(map["i"], json!(3));
        assert_eq!(map["f"], json!(0.5));
        assert_eq!(map["b"], json!(true));
        assert_eq!(map["d"], json!("2024-06-15"));
    }

    #[test]
    fn test_nested() {
        let table: toml::Table =
            toml::from_str("list = [\"a\", 1]\n[inner]\nkey = \"v\"").unwrap();
        let map = table_to_json(table);
        assert_eq!(map["list"], json!(["a", 1]));
        assert_eq!(map["inner"], json!({"key": "v"}));
    }
}
