//! Generic item/attribute lookup on records.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Target of an item lookup: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Mapping key
    Name(String),
    /// Sequence index (negative counts from the end)
    Index(i64),
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index as i64)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Name(name) => write_quoted(f, name),
            Key::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Write `text` as a double-quoted string using the escapes the path
/// parser reads back: `\\`, `\"`, `\n`, `\t`, `\r` and `\u{..}`.
pub(crate) fn write_quoted(f: &mut std::fmt::Formatter<'_>, text: &str) -> std::fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c if c.is_control() => write!(f, "\\u{{{:x}}}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// A record values can be pulled out of.
///
/// Item lookup is the `record[key]` style (mapping keys, sequence indices);
/// attribute lookup is the `record.name` style. Types where the two
/// coincide, such as JSON objects, can answer both from the same storage.
pub trait Lookup {
    /// Look up by key or index. `None` when the record has no such item.
    fn item(&self, key: &Key) -> Option<Value>;

    /// Look up a named attribute. `None` when there is no such attribute.
    fn attr(&self, name: &str) -> Option<Value>;

    /// The whole record as a value (used by the identity accessor).
    fn to_value(&self) -> Value;
}

/// Resolve a possibly negative index against a sequence length.
fn normalize_index(index: i64, len: usize) -> Option<usize> {
    if index >= 0 {
        let index = index as usize;
        (index < len).then_some(index)
    } else {
        len.checked_sub(index.unsigned_abs() as usize)
    }
}

impl Lookup for Value {
    fn item(&self, key: &Key) -> Option<Value> {
        match (self, key) {
            (Value::Object(map), key) => map.item(key),
            (Value::Array(items), Key::Index(index)) => {
                normalize_index(*index, items.len()).map(|i| items[i].clone())
            }
            _ => None,
        }
    }

    fn attr(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.attr(name),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Lookup for Map<String, Value> {
    fn item(&self, key: &Key) -> Option<Value> {
        match key {
            Key::Name(name) => self.get(name).cloned(),
            // Object keys are strings; integer keys match their decimal form
            Key::Index(index) => self.get(&index.to_string()).cloned(),
        }
    }

    fn attr(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }

    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_item_and_attr() {
        let record = json!({"name": "Alice", "age": 30});
        assert_eq!(record.item(&Key::from("name")), Some(json!("Alice")));
        assert_eq!(record.attr("age"), Some(json!(30)));
        assert_eq!(record.item(&Key::from("missing")), None);
    }

    #[test]
    fn test_array_index() {
        let record = json!(["foo", "bar", "baz"]);
        assert_eq!(record.item(&Key::Index(1)), Some(json!("bar")));
        assert_eq!(record.item(&Key::Index(-1)), Some(json!("baz")));
        assert_eq!(record.item(&Key::Index(3)), None);
        assert_eq!(record.item(&Key::Index(-4)), None);
    }

    #[test]
    fn test_array_has_no_attributes() {
        let record = json!([1, 2]);
        assert_eq!(record.attr("len"), None);
        assert_eq!(record.item(&Key::from("0")), None);
    }

    #[test]
    fn test_scalar_lookup_misses() {
        assert_eq!(json!("foo").item(&Key::Index(0)), None);
        assert_eq!(json!(12).attr("a"), None);
    }

    #[test]
    fn test_integer_key_on_object() {
        let record = json!({"1": "one"});
        assert_eq!(record.item(&Key::Index(1)), Some(json!("one")));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::from("price").to_string(), "\"price\"");
        assert_eq!(Key::from(2usize).to_string(), "2");
        assert_eq!(Key::from("a\"b\\c\r").to_string(), r#""a\"b\\c\r""#);
        assert_eq!(Key::from("\u{1b}[0m").to_string(), r#""\u{1b}[0m""#);
    }
}
