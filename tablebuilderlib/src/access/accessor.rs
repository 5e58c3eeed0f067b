//! Accessor expressions: how a field pulls its raw value out of a record.

use std::sync::Arc;

use serde_json::Value;

use super::lookup::{Key, Lookup};
use super::path::Path;
use crate::error::BoxError;
use crate::field::Field;

/// User accessor callback. Receives the record and the field being extracted.
pub type AccessorFn<R> = Arc<dyn Fn(&R, &Field<R>) -> Result<Value, BoxError> + Send + Sync>;

/// Rule for extracting a raw value from one record.
pub enum Accessor<R = Value> {
    /// Flat key: item lookup first, then attribute lookup.
    Key(Key),
    /// Chained lookups. The empty path is the identity.
    Path(Path),
    /// User function. Errors it returns are fatal for the build.
    Function(AccessorFn<R>),
}

impl<R> Accessor<R> {
    /// The identity accessor (the whole record).
    pub fn identity() -> Self {
        Accessor::Path(Path::root())
    }

    /// Wrap a closure as a function accessor.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&R, &Field<R>) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Accessor::Function(Arc::new(f))
    }
}

impl<R: Lookup> Accessor<R> {
    /// Resolve against a record.
    ///
    /// `Ok(None)` is a miss (the caller substitutes the field default);
    /// `Err` only comes from function accessors.
    pub fn resolve(&self, record: &R, field: &Field<R>) -> Result<Option<Value>, BoxError> {
        match self {
            Accessor::Key(key) => Ok(record.item(key).or_else(|| match key {
                Key::Name(name) => record.attr(name),
                Key::Index(_) => None,
            })),
            Accessor::Path(path) => Ok(path.resolve(record)),
            Accessor::Function(f) => f(record, field).map(Some),
        }
    }
}

impl<R> Default for Accessor<R> {
    fn default() -> Self {
        Accessor::identity()
    }
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Key(key) => Accessor::Key(key.clone()),
            Accessor::Path(path) => Accessor::Path(path.clone()),
            Accessor::Function(f) => Accessor::Function(Arc::clone(f)),
        }
    }
}

impl<R> std::fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accessor::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Accessor::Path(path) => write!(f, "Path({})", path),
            Accessor::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl<R> From<&str> for Accessor<R> {
    fn from(key: &str) -> Self {
        Accessor::Key(Key::from(key))
    }
}

impl<R> From<String> for Accessor<R> {
    fn from(key: String) -> Self {
        Accessor::Key(Key::from(key))
    }
}

impl<R> From<Key> for Accessor<R> {
    fn from(key: Key) -> Self {
        Accessor::Key(key)
    }
}

impl<R> From<Path> for Accessor<R> {
    fn from(path: Path) -> Self {
        Accessor::Path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn field() -> Field<Value> {
        Field::new("Test")
    }

    #[test]
    fn test_flat_key_found() {
        let accessor: Accessor = "name".into();
        let found = accessor.resolve(&json!({"name": "Alice"}), &field()).unwrap();
        assert_eq!(found, Some(json!("Alice")));
    }

    #[test]
    fn test_flat_key_missing() {
        let accessor: Accessor = "name".into();
        let found = accessor.resolve(&json!({"other": 1}), &field()).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_flat_index_key() {
        let accessor: Accessor = Key::Index(0).into();
        let found = accessor.resolve(&json!(["first"]), &field()).unwrap();
        assert_eq!(found, Some(json!("first")));
    }

    #[test]
    fn test_identity() {
        let accessor: Accessor = Accessor::identity();
        let found = accessor.resolve(&json!("whole"), &field()).unwrap();
        assert_eq!(found, Some(json!("whole")));
    }

    #[test]
    fn test_function_receives_field() {
        let accessor: Accessor =
            Accessor::function(|record: &Value, field: &Field| {
                Ok(json!(format!("{}:{}", field.header_text().unwrap_or_default(), record["x"])))
            });
        let found = accessor.resolve(&json!({"x": 1}), &field()).unwrap();
        assert_eq!(found, Some(json!("Test:1")));
    }

    #[test]
    fn test_function_error_propagates() {
        let accessor: Accessor = Accessor::function(|_: &Value, _: &Field| Err("boom".into()));
        let err = accessor.resolve(&json!({}), &field()).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_map_records() {
        let mut record = Map::new();
        record.insert("a".to_string(), json!({"b": [10, 20]}));
        let accessor: Accessor<Map<String, Value>> =
            Path::root().attr("a").item("b").index(-1).into();
        let found = accessor.resolve(&record, &Field::new("")).unwrap();
        assert_eq!(found, Some(json!(20)));
    }
}
