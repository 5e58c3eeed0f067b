//! Per-build memo of value → style token assignments.

use std::collections::HashMap;

use serde_json::Value;
use tracing::trace;

use super::palette::Palette;

/// Canonical text of a value for hashing: string contents unquoted,
/// everything else as compact JSON.
pub fn canonical_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Assigns consistent style tokens to values within one build.
///
/// The token itself is a pure function of the value's canonical text
/// (see [`Palette::token_for`]); the cache only avoids rehashing repeats
/// and is dropped with the build.
#[derive(Debug, Clone, Default)]
pub struct ValueStyler {
    palette: Palette,
    seen: HashMap<String, String>,
}

impl ValueStyler {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            seen: HashMap::new(),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Style token for a value.
    pub fn style_for(&mut self, value: &Value) -> String {
        let text = canonical_text(value);
        if let Some(token) = self.seen.get(&text) {
            return token.clone();
        }
        let token = self.palette.token_for(&text).to_string();
        trace!(value = %text, token = %token, "assigned style token");
        self.seen.insert(text, token.clone());
        token
    }

    /// Number of distinct values seen so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
