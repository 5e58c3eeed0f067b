//! Sectioning: split records into runs of equal keys.

use std::sync::Arc;

use serde_json::Value;

use crate::access::{Key, Lookup, Path};
use crate::error::{BoxError, TableError};
use crate::output::Section;
use crate::Result;

/// Section key callback.
pub type SectionFn<R> = Arc<dyn Fn(&R) -> std::result::Result<Value, BoxError> + Send + Sync>;

/// How the section key of a record is computed.
pub enum SectionKey<R = Value> {
    /// Resolve a path; a miss keys the record as `null`.
    Path(Path),
    /// User function; errors abort the build.
    Function(SectionFn<R>),
}

impl<R> SectionKey<R> {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&R) -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    {
        SectionKey::Function(Arc::new(f))
    }
}

impl<R: Lookup> SectionKey<R> {
    /// The key of one record.
    pub fn key_of(&self, record: &R) -> std::result::Result<Value, BoxError> {
        match self {
            SectionKey::Path(path) => Ok(path.resolve(record).unwrap_or(Value::Null)),
            SectionKey::Function(f) => f(record),
        }
    }
}

impl<R> Clone for SectionKey<R> {
    fn clone(&self) -> Self {
        match self {
            SectionKey::Path(path) => SectionKey::Path(path.clone()),
            SectionKey::Function(f) => SectionKey::Function(Arc::clone(f)),
        }
    }
}

impl<R> std::fmt::Debug for SectionKey<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKey::Path(path) => write!(f, "Path({})", path),
            SectionKey::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl<R> From<Path> for SectionKey<R> {
    fn from(path: Path) -> Self {
        SectionKey::Path(path)
    }
}

impl<R> From<&str> for SectionKey<R> {
    fn from(key: &str) -> Self {
        SectionKey::Path(Path::root().item(Key::from(key)))
    }
}

/// Split records into consecutive runs of equal keys.
///
/// Order is preserved and only adjacent records merge: `[A, A, B, A]`
/// gives three sections. No records means no sections. Numeric keys
/// compare by value, so `1` and `1.0` share a section.
pub fn partition<R: Lookup>(records: &[R], key: &SectionKey<R>) -> Result<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let value = key
            .key_of(record)
            .map_err(|source| TableError::SectionKey {
                record: index,
                source,
            })?;
        match sections.last_mut() {
            Some(current) if same_key(&current.key, &value) => current.len += 1,
            _ => sections.push(Section {
                start: index,
                len: 1,
                key: value,
            }),
        }
    }
    Ok(sections)
}

fn same_key(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_key(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| same_key(x, y)))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sizes(sections: &[Section]) -> Vec<usize> {
        sections.iter().map(|s| s.len).collect()
    }

    #[test]
    fn test_adjacent_runs_only() {
        let records: Vec<Value> = ["A", "A", "B", "B", "B", "A"]
            .iter()
            .map(|k| json!(k))
            .collect();
        let sections = partition(&records, &SectionKey::Path(Path::root())).unwrap();
        assert_eq!(sizes(&sections), vec![2, 3, 1]);
        assert_eq!(
            sections.iter().map(|s| s.start).collect::<Vec<_>>(),
            vec![0, 2, 5]
        );
        assert_eq!(sections[2].key, json!("A"));
    }

    #[test]
    fn test_key_by_field() {
        let records = vec![
            json!({"cat": "fruit"}),
            json!({"cat": "fruit"}),
            json!({"cat": "veg"}),
        ];
        let sections = partition(&records, &SectionKey::from("cat")).unwrap();
        assert_eq!(sizes(&sections), vec![2, 1]);
    }

    #[test]
    fn test_missing_keys_group_as_null() {
        let records = vec![json!({}), json!({"cat": null}), json!({"cat": 1})];
        let sections = partition(&records, &SectionKey::from("cat")).unwrap();
        assert_eq!(sizes(&sections), vec![2, 1]);
        assert_eq!(sections[0].key, Value::Null);
    }

    #[test]
    fn test_numeric_keys_compare_by_value() {
        let records = vec![
            json!({"k": 1}),
            json!({"k": 1.0}),
            json!({"k": [2, {"n": 3}]}),
            json!({"k": [2.0, {"n": 3.0}]}),
            json!({"k": "1"}),
        ];
        let sections = partition(&records, &SectionKey::from("k")).unwrap();
        assert_eq!(sizes(&sections), vec![2, 2, 1]);
        assert_eq!(sections[0].key, json!(1));
    }

    #[test]
    fn test_empty_records() {
        let records: Vec<Value> = vec![];
        assert!(partition(&records, &SectionKey::from("cat")).unwrap().is_empty());
    }

    #[test]
    fn test_function_error_names_record() {
        let records = vec![json!(1), json!(2)];
        let key = SectionKey::function(|r: &Value| {
            if r == &json!(2) {
                Err("bad record".into())
            } else {
                Ok(r.clone())
            }
        });
        let err = partition(&records, &key).unwrap_err();
        assert!(matches!(err, TableError::SectionKey { record: 1, .. }));
    }
}
