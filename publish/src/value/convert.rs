//! Conversions between [`Value`] and Rust / `serde_json` types.

use super::{Object, Value};

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Object> for Value {
    fn from(entries: Object) -> Self {
        Self::Object(entries)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                // u64 above i64::MAX and real numbers both land here
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => items.into_iter().map(Self::from).collect(),
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Non-finite floats have no JSON representation and become `null`.
impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::None => Self::Null,
            Value::Boolean(b) => Self::Bool(*b),
            Value::Integer(i) => Self::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f).map_or(Self::Null, Self::Number),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_json_object() {
        let json = serde_json::json!({"zeta": 1, "alpha": 2.5, "mid": [true, null]});
        let value = Value::from(json);

        assert_eq!(value.object_len().unwrap(), 3);
        assert_eq!(value.object_get("zeta").unwrap(), Some(&Value::Integer(1)));
        assert_eq!(value.object_get("alpha").unwrap(), Some(&Value::Float(2.5)));
        assert_eq!(
            value.object_get("mid").unwrap(),
            Some(&Value::Array(vec![Value::Boolean(true), Value::None]))
        );
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let value = Value::from(serde_json::json!(u64::MAX));
        assert_eq!(value.value_type(), crate::value::ValueType::Float);
    }

    #[test]
    fn test_non_finite_float_to_json_is_null() {
        assert_eq!(serde_json::Value::from(&Value::Float(f64::NAN)), serde_json::Value::Null);
        assert_eq!(
            serde_json::Value::from(&Value::Float(f64::INFINITY)),
            serde_json::Value::Null
        );
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<i64>), Value::None);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_string()));
    }

    #[test]
    fn test_display_renders_json() {
        let value: Value = vec![Value::from(1_i64), Value::from("a")].into();
        assert_eq!(value.to_string(), r#"[1,"a"]"#);
    }
}
