//! Header/footer aggregates: a literal, or a reducer over the column.

use std::sync::Arc;

use serde_json::Value;

use crate::error::BoxError;

/// Reducer callback: the column's raw values (record order) to one raw value.
pub type ReducerFn = Arc<dyn Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync>;

/// Content of a header or footer cell.
#[derive(Clone)]
pub enum Aggregate {
    /// Display text used verbatim, whatever the row count.
    Literal(String),
    /// Computed from the column's raw values, then formatted like a body cell.
    Reducer(ReducerFn),
}

impl Aggregate {
    /// Wrap a closure or function as a reducer.
    pub fn reducer<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Aggregate::Reducer(Arc::new(f))
    }

    /// Literal text, if this is a literal.
    pub fn literal(&self) -> Option<&str> {
        match self {
            Aggregate::Literal(text) => Some(text),
            Aggregate::Reducer(_) => None,
        }
    }
}

impl Default for Aggregate {
    fn default() -> Self {
        Aggregate::Literal(String::new())
    }
}

impl From<&str> for Aggregate {
    fn from(text: &str) -> Self {
        Aggregate::Literal(text.to_string())
    }
}

impl From<String> for Aggregate {
    fn from(text: String) -> Self {
        Aggregate::Literal(text)
    }
}

impl From<ReducerFn> for Aggregate {
    fn from(f: ReducerFn) -> Self {
        Aggregate::Reducer(f)
    }
}

impl std::fmt::Debug for Aggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Aggregate::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Aggregate::Reducer(_) => f.write_str("Reducer(..)"),
        }
    }
}
