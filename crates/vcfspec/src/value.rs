//! value representation
//!
//! A tfvars file assigns each variable one of the following data types
//! - boolean (true/false)
//! - number, either an integer (i64) or a decimal (f64)
//! - string (utf-8, kept verbatim: escape sequences are not interpreted)
//! - null
//! - list (ordered sequence of values)
//! - object (order-preserving "map"/"dictionary", where the key is of type string)
//!
//! Additionally:
//! - a number is a decimal if and only if its source text contains a `.`
//! - decimals are always finite, anything else stays a string
//!
use indexmap::IndexMap;
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serializer,
};

/// Order-preserving object body
pub type Object = IndexMap<String, Value>;

/// All possible value types
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(Number),
    String(String),
    Null,
    List(Vec<Value>),
    Object(Object),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Decimal(f64),
}

impl Number {
    /// Parse a bare numeric literal
    ///
    /// The presence of a `.` decides between decimal and integer, there is no
    /// fallback from one to the other.
    pub fn parse(text: &str) -> Option<Number> {
        if text.contains('.') {
            text.parse::<f64>()
                .ok()
                .filter(|decimal| decimal.is_finite())
                .map(Number::Decimal)
        } else {
            text.parse::<i64>().ok().map(Number::Integer)
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(int) => write!(f, "{int}"),
            // keep the decimal point so `1.0` does not turn into `1`
            Number::Decimal(decimal) if decimal.fract() == 0.0 && decimal.abs() < 1e16 => {
                write!(f, "{decimal:.1}")
            }
            Number::Decimal(decimal) => write!(f, "{decimal}"),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Decimal(value)
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Text form of a scalar
    ///
    /// Numbers and booleans are rendered, `null`, lists and objects have no text form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::List(_) | Value::Object(_) => None,
        }
    }

    /// Short name of the variant, used in log output
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Null => "null",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Decimal(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<K: ToString, V: Into<Value>> From<IndexMap<K, V>> for Value {
    fn from(value: IndexMap<K, V>) -> Self {
        Value::Object(
            value
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

impl serde::ser::Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::Integer(value) => serializer.serialize_i64(*value),
            Number::Decimal(value) => serializer.serialize_f64(*value),
        }
    }
}

impl serde::ser::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Number(value) => serde::ser::Serialize::serialize(value, serializer),
            Value::String(value) => serializer.serialize_str(value),
            Value::Null => serializer.serialize_unit(),
            Value::List(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Value::Object(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn number_kind_follows_decimal_point() {
        assert_eq!(Number::parse("42"), Some(Number::Integer(42)));
        assert_eq!(Number::parse("-7"), Some(Number::Integer(-7)));
        assert_eq!(Number::parse("1.25"), Some(Number::Decimal(1.25)));
        assert_eq!(Number::parse("1e5"), None);
        assert_eq!(Number::parse("10.1.1.1"), None);
        assert_eq!(Number::parse("inf"), None);
        assert_eq!(Number::parse(""), None);
    }

    #[test]
    fn number_text_keeps_decimal_point() {
        assert_eq!(Value::from(18_i64).to_text().as_deref(), Some("18"));
        assert_eq!(Value::from(1.0).to_text().as_deref(), Some("1.0"));
        assert_eq!(Value::from(2.5).to_text().as_deref(), Some("2.5"));
        assert_eq!(Value::from(true).to_text().as_deref(), Some("true"));
        assert_eq!(Value::Null.to_text(), None);
    }

    #[test]
    fn serializes_to_json() {
        let mut object = Object::new();
        object.insert("b".into(), Value::Null);
        object.insert("a".into(), vec![Value::from(1_i64), Value::from(0.5)].into());

        let json = serde_json::to_string(&Value::Object(object)).unwrap();
        assert_eq!(json, r#"{"b":null,"a":[1,0.5]}"#);
    }
}
