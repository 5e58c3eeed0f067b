//! Value formatting and justification.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BoxError, TableError};

/// Formatter callback: raw value to display text.
pub type FormatterFn = Arc<dyn Fn(&Value) -> Result<String, BoxError> + Send + Sync>;

/// Generic string conversion used when a field declares no formatter.
///
/// Strings are shown without quotes, `null` as empty text, and
/// compound values as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

pub(crate) fn default_formatter() -> FormatterFn {
    Arc::new(|value: &Value| Ok(display_value(value)))
}

/// Horizontal justification of a field's cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for Justify {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Justify::Left),
            "center" | "centre" => Ok(Justify::Center),
            "right" => Ok(Justify::Right),
            _ => Err(TableError::InvalidJustify(s.to_string())),
        }
    }
}
