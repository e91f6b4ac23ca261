//! parsed variables and shape-checked lookups
//!
//! [Variables] is the result of parsing a tfvars document: an order-preserving map from variable name to [Value].
//!
//! Reading values back out goes through [Lookup::field]. A [Field] never fails, it answers "give me this as X or
//! fall back to the default". `null` counts as absent and a value of the wrong shape is ignored (and logged at
//! `debug` level).
use crate::value::{Number, Object, Value};
use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    entries: IndexMap<String, Value>,
}

impl Variables {
    /// Assign a variable
    ///
    /// Reassigning a name replaces its value but keeps its original position. Returns the replaced value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Variables {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut variables = Variables::default();
        for (name, value) in iter {
            variables.insert(name, value);
        }
        variables
    }
}

impl serde::ser::Serialize for Variables {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut ser = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            ser.serialize_entry(name, value)?;
        }
        ser.end()
    }
}

/// Anything values can be looked up in by key
pub trait Lookup {
    fn lookup(&self, key: &str) -> Option<&Value>;

    fn field<'a>(&'a self, key: &'a str) -> Field<'a> {
        Field::new(key, self.lookup(key))
    }
}

impl Lookup for Variables {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

impl Lookup for Object {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// A looked up value, `null` already mapped to absent
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    key: &'a str,
    value: Option<&'a Value>,
}

impl<'a> Field<'a> {
    pub fn new(key: &'a str, value: Option<&'a Value>) -> Self {
        Self {
            key,
            value: value.filter(|value| !value.is_null()),
        }
    }

    pub fn value(self) -> Option<&'a Value> {
        self.value
    }

    /// Scalar as text, numbers and booleans are rendered
    pub fn string(self) -> Option<String> {
        let value = self.value?;
        let text = value.to_text();
        if text.is_none() {
            self.mismatch("scalar");
        }
        text
    }

    pub fn string_or(self, default: &str) -> String {
        self.string().unwrap_or_else(|| default.to_string())
    }

    pub fn bool_or(self, default: bool) -> bool {
        match self.value {
            Some(Value::Bool(flag)) => *flag,
            Some(_) => {
                self.mismatch("bool");
                default
            }
            None => default,
        }
    }

    /// Numbers pass through, numeric strings are converted
    pub fn number_or(self, default: i64) -> Number {
        let number = match self.value {
            Some(Value::Number(number)) => Some(*number),
            Some(Value::String(text)) => Number::parse(text.trim()),
            _ => None,
        };

        number.unwrap_or_else(|| {
            self.mismatch("number");
            Number::Integer(default)
        })
    }

    pub fn list(self) -> Option<&'a [Value]> {
        let value = self.value?;
        let list = value.as_list();
        if list.is_none() {
            self.mismatch("list");
        }
        list
    }

    pub fn non_empty_list(self) -> Option<&'a [Value]> {
        self.list().filter(|list| !list.is_empty())
    }

    /// The list as given, or the default strings
    pub fn list_or(self, default: &[String]) -> Vec<Value> {
        match self.list() {
            Some(list) => list.to_vec(),
            None => default.iter().map(|item| item.as_str().into()).collect(),
        }
    }

    pub fn object(self) -> Option<&'a Object> {
        let value = self.value?;
        let object = value.as_object();
        if object.is_none() {
            self.mismatch("object");
        }
        object
    }

    /// Object elements of a list, everything else is skipped
    pub fn objects(self) -> impl Iterator<Item = &'a Object> {
        self.list()
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_object)
    }

    /// Feature flags only count when they are literally `true`
    pub fn is_true(self) -> bool {
        matches!(self.value, Some(Value::Bool(true)))
    }

    fn mismatch(self, expected: &str) {
        if let Some(value) = self.value {
            tracing::debug!(
                key = self.key,
                expected,
                found = value.kind(),
                "ignoring value with unexpected shape"
            );
        }
    }
}

/// Utility macro to create [Variables]
///
/// Parse a tfvars document
/// ```
/// # use vcfspec::variables;
/// let variables = variables!("instance_id = \"lab\"");
/// assert_eq!(variables.get("instance_id"), Some(&"lab".into()));
/// ```
///
/// Assign values directly
/// ```
/// # use vcfspec::variables;
/// let variables = variables! {
///   "instance_id" => "lab",
///   "ceip_enabled" => false
/// };
/// assert_eq!(variables.len(), 2);
/// ```
#[macro_export]
macro_rules! variables {
    {} => {
        $crate::variables::Variables::default()
    };
    // parse a document
    { $text:expr } => {
        $crate::parser::parse($text).variables
    };
    // assign values
    { $($name:expr => $value:expr),+ $(,)? } => {{
        let mut variables = $crate::variables::Variables::default();
        $(
            variables.insert($name, $crate::value::Value::from($value));
        )+

        variables
    }};
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reassignment_keeps_position() {
        let mut variables = Variables::default();
        variables.insert("a", 1_i64.into());
        variables.insert("b", 2_i64.into());
        let previous = variables.insert("a", 3_i64.into());

        assert_eq!(previous, Some(1_i64.into()));
        let names: Vec<_> = variables.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(variables.get("a"), Some(&3_i64.into()));
    }

    #[test]
    fn null_counts_as_absent() {
        let variables = variables! { "hostname" => Value::Null };
        assert_eq!(variables.field("hostname").string_or("fallback"), "fallback");
        assert!(variables.field("hostname").value().is_none());
    }

    #[test]
    fn wrong_shape_falls_back() {
        let variables = variables! {
            "hosts" => "not a list",
            "flag" => "true",
            "size" => vec!["a"]
        };

        assert!(variables.field("hosts").list().is_none());
        assert_eq!(variables.field("hosts").objects().count(), 0);
        assert!(!variables.field("flag").bool_or(false));
        assert!(!variables.field("flag").is_true());
        assert_eq!(variables.field("size").string_or("medium"), "medium");
    }

    #[test]
    fn scalars_render_as_text() {
        let variables = variables! { "vlan" => 18_i64, "flag" => true };
        assert_eq!(variables.field("vlan").string_or("0"), "18");
        assert_eq!(variables.field("flag").string_or(""), "true");
    }

    #[test]
    fn numeric_strings_become_numbers() {
        let variables = variables! { "mtu" => "9000", "bad" => "jumbo" };
        assert_eq!(variables.field("mtu").number_or(1500), Number::Integer(9000));
        assert_eq!(variables.field("bad").number_or(1500), Number::Integer(1500));
        assert_eq!(variables.field("missing").number_or(1500), Number::Integer(1500));
    }

    #[test]
    fn objects_skip_non_objects() {
        let mut host = Object::new();
        host.insert("hostname".into(), "esx01".into());
        let variables = variables! {
            "hosts" => vec![Value::from("junk"), Value::Object(host.clone()), Value::Null]
        };

        let hosts: Vec<_> = variables.field("hosts").objects().collect();
        assert_eq!(hosts, [&host]);
        assert_eq!(hosts[0].field("hostname").string_or(""), "esx01");
    }
}
