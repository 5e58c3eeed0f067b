//! Field declarations: one column (or, transposed, one row) of a table.

use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

use super::aggregate::Aggregate;
use super::format::{default_formatter, FormatterFn, Justify};
use crate::access::{Accessor, Lookup};
use crate::error::{BoxError, Slot, TableError};
use crate::style::ValueStyler;
use crate::Result;

/// Declarative definition of one table field.
///
/// Built with consuming setters and then registered in a
/// [`FieldSet`](super::FieldSet), which assigns its name. A field is never
/// mutated by a build and can be shared across any number of them.
///
/// # Example
///
/// ```rust
/// use tablebuilderlib::{reducers, Field, Justify};
///
/// let quantity: Field = Field::new("Quantity")
///     .key("quantity")
///     .footer_with(reducers::sum)
///     .justify(Justify::Right);
/// assert_eq!(quantity.header_text(), Some("Quantity"));
/// ```
pub struct Field<R = Value> {
    pub(crate) name: String,
    pub(crate) header: Aggregate,
    pub(crate) footer: Aggregate,
    pub(crate) accessor: Accessor<R>,
    pub(crate) default: Value,
    pub(crate) formatter: FormatterFn,
    pub(crate) style: String,
    pub(crate) color_by_value: bool,
    pub(crate) header_style: String,
    pub(crate) footer_style: String,
    pub(crate) justify: Justify,
}

impl<R> Field<R> {
    /// Create a field with the given header; everything else defaults.
    pub fn new(header: impl Into<Aggregate>) -> Self {
        Self {
            name: String::new(),
            header: header.into(),
            footer: Aggregate::default(),
            accessor: Accessor::identity(),
            default: Value::Null,
            formatter: default_formatter(),
            style: String::new(),
            color_by_value: false,
            header_style: String::new(),
            footer_style: String::new(),
            justify: Justify::Left,
        }
    }

    /// Set the header (literal or reducer).
    pub fn header(mut self, header: impl Into<Aggregate>) -> Self {
        self.header = header.into();
        self
    }

    /// Use a reducer over the column's values as the header.
    pub fn header_with<F>(self, f: F) -> Self
    where
        F: Fn(&[Value]) -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.header(Aggregate::reducer(f))
    }

    /// Set the footer (literal or reducer).
    pub fn footer(mut self, footer: impl Into<Aggregate>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Use a reducer over the column's values as the footer.
    pub fn footer_with<F>(self, f: F) -> Self
    where
        F: Fn(&[Value]) -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.footer(Aggregate::reducer(f))
    }

    /// Set the accessor: a key (`"name"`), a [`Path`](crate::Path), or an [`Accessor`].
    pub fn key(mut self, accessor: impl Into<Accessor<R>>) -> Self {
        self.accessor = accessor.into();
        self
    }

    /// Compute the value with a function of the record and this field.
    pub fn compute<F>(mut self, f: F) -> Self
    where
        F: Fn(&R, &Field<R>) -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.accessor = Accessor::function(f);
        self
    }

    /// Value substituted when the accessor misses.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    /// Set the formatter (raw value → display text).
    pub fn formatter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> std::result::Result<String, BoxError> + Send + Sync + 'static,
    {
        self.formatter = Arc::new(f);
        self
    }

    /// Static style token for body cells.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Colour body cells by value, consistently within a build.
    pub fn color_by_value(mut self) -> Self {
        self.color_by_value = true;
        self
    }

    pub fn header_style(mut self, style: impl Into<String>) -> Self {
        self.header_style = style.into();
        self
    }

    pub fn footer_style(mut self, style: impl Into<String>) -> Self {
        self.footer_style = style.into();
        self
    }

    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Name assigned at registration (empty until then)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Literal header text, if the header isn't a reducer
    pub fn header_text(&self) -> Option<&str> {
        self.header.literal()
    }

    pub fn accessor(&self) -> &Accessor<R> {
        &self.accessor
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn justification(&self) -> Justify {
        self.justify
    }

    pub fn is_value_styled(&self) -> bool {
        self.color_by_value
    }

    /// Format a raw value for display.
    pub fn format(&self, raw: &Value) -> Result<String> {
        (self.formatter)(raw).map_err(|source| TableError::Format {
            field: self.name.clone(),
            value: raw.clone(),
            source,
        })
    }

    /// Style token for a body cell holding `raw`.
    ///
    /// The field's static style (or `fallback` when it has none), joined
    /// with the palette token when the field is coloured by value.
    pub fn style_for(&self, raw: &Value, fallback: &str, styler: &mut ValueStyler) -> String {
        let base = if self.style.is_empty() {
            fallback
        } else {
            self.style.as_str()
        };
        if !self.color_by_value {
            return base.to_string();
        }
        let token = styler.style_for(raw);
        if base.is_empty() {
            token
        } else {
            format!("{} {}", base, token)
        }
    }

    /// Compute a header or footer: `(raw, display text)`.
    ///
    /// Literals come back verbatim. Reducer output goes through the
    /// formatter unless it is `null`, which displays as empty text.
    pub fn aggregate(&self, slot: Slot, values: &[Value]) -> Result<(Value, String)> {
        let aggregate = match slot {
            Slot::Header => &self.header,
            Slot::Footer => &self.footer,
        };
        match aggregate {
            Aggregate::Literal(text) => Ok((Value::String(text.clone()), text.clone())),
            Aggregate::Reducer(reduce) => {
                let raw = reduce(values).map_err(|source| TableError::Reduce {
                    field: self.name.clone(),
                    slot,
                    count: values.len(),
                    source,
                })?;
                let text = if raw.is_null() {
                    String::new()
                } else {
                    self.format(&raw)?
                };
                Ok((raw, text))
            }
        }
    }
}

impl<R: Lookup> Field<R> {
    /// Extract the raw value for one record, substituting the default on a miss.
    ///
    /// `null` counts as a miss. `index` identifies the record in errors.
    pub fn extract(&self, record: &R, index: usize) -> Result<Value> {
        let found = self
            .accessor
            .resolve(record, self)
            .map_err(|source| TableError::Resolution {
                field: self.name.clone(),
                record: index,
                source,
            })?;
        match found {
            Some(value) if !value.is_null() => Ok(value),
            _ => {
                trace!(field = %self.name, record = index, "value missing, using default");
                Ok(self.default.clone())
            }
        }
    }
}

impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            header: self.header.clone(),
            footer: self.footer.clone(),
            accessor: self.accessor.clone(),
            default: self.default.clone(),
            formatter: Arc::clone(&self.formatter),
            style: self.style.clone(),
            color_by_value: self.color_by_value,
            header_style: self.header_style.clone(),
            footer_style: self.footer_style.clone(),
            justify: self.justify,
        }
    }
}

impl<R> std::fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("header", &self.header)
            .field("footer", &self.footer)
            .field("accessor", &self.accessor)
            .field("default", &self.default)
            .field("style", &self.style)
            .field("color_by_value", &self.color_by_value)
            .field("justify", &self.justify)
            .finish_non_exhaustive()
    }
}
