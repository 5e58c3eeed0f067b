//! Table declarations loaded from JSON.
//!
//! ```json
//! {
//!   "options": {"title": "Cart", "show_footer": true, "section_by": "kind"},
//!   "fields": [
//!     {"name": "name", "header": "Item", "footer": "Total", "color_by_value": true},
//!     {"name": "qty", "key": "quantity", "footer": {"reduce": "sum"}, "justify": "right"},
//!     {"name": "city", "path": "address.city", "default": "-"}
//!   ]
//! }
//! ```

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use tablebuilderlib::{
    display_value, Aggregate, BuildOptions, Field, FieldSet, Justify, Key, Palette, Path,
    ReducerName, TableOptions, Value,
};

/// A whole declaration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    #[serde(default)]
    pub options: DeclaredOptions,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// Build switches plus table options, all in one object.
#[derive(Debug, Default, Deserialize)]
pub struct DeclaredOptions {
    #[serde(default)]
    pub transposed: Option<bool>,
    /// Path expression, e.g. `"kind"` or `"meta.group"`
    #[serde(default)]
    pub section_by: Option<String>,
    #[serde(default)]
    pub palette: Option<Palette>,
    #[serde(flatten)]
    pub table: TableOptions,
}

/// Header/footer content: a literal or a named reducer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AggregateDecl {
    Literal(String),
    Reduce { reduce: ReducerName },
}

impl From<AggregateDecl> for Aggregate {
    fn from(decl: AggregateDecl) -> Self {
        match decl {
            AggregateDecl::Literal(text) => Aggregate::Literal(text),
            AggregateDecl::Reduce { reduce } => Aggregate::Reducer(reduce.reducer()),
        }
    }
}

/// One field entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,
    pub header: Option<AggregateDecl>,
    pub footer: Option<AggregateDecl>,
    /// Flat key; defaults to the field name
    pub key: Option<Key>,
    /// Path expression; exclusive with `key`
    pub path: Option<String>,
    pub default: Option<Value>,
    pub justify: Option<Justify>,
    pub style: Option<String>,
    pub header_style: Option<String>,
    pub footer_style: Option<String>,
    #[serde(default)]
    pub color_by_value: bool,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    /// Decimal places for numbers
    pub precision: Option<usize>,
}

impl FieldDecl {
    pub fn to_field(&self) -> Result<Field> {
        let header = self
            .header
            .clone()
            .map(Aggregate::from)
            .unwrap_or_else(|| Aggregate::Literal(self.name.clone()));
        let mut field = Field::new(header);

        field = match (&self.key, &self.path) {
            (Some(_), Some(_)) => bail!("field '{}': set either key or path, not both", self.name),
            (Some(key), None) => field.key(key.clone()),
            (None, Some(path)) => field.key(
                Path::parse(path).with_context(|| format!("field '{}'", self.name))?,
            ),
            (None, None) => field.key(self.name.as_str()),
        };

        if let Some(footer) = &self.footer {
            field = field.footer(Aggregate::from(footer.clone()));
        }
        if let Some(default) = &self.default {
            field = field.with_default(default.clone());
        }
        if let Some(justify) = self.justify {
            field = field.justify(justify);
        }
        if let Some(style) = &self.style {
            field = field.style(style.as_str());
        }
        if let Some(style) = &self.header_style {
            field = field.header_style(style.as_str());
        }
        if let Some(style) = &self.footer_style {
            field = field.footer_style(style.as_str());
        }
        if self.color_by_value {
            field = field.color_by_value();
        }
        if self.prefix.is_some() || self.suffix.is_some() || self.precision.is_some() {
            let prefix = self.prefix.clone().unwrap_or_default();
            let suffix = self.suffix.clone().unwrap_or_default();
            let precision = self.precision;
            field = field.formatter(move |value| {
                if value.is_null() {
                    return Ok(String::new());
                }
                let text = match (precision, value.as_f64()) {
                    (Some(places), Some(n)) => format!("{:.*}", places, n),
                    _ => display_value(value),
                };
                Ok(format!("{}{}{}", prefix, text, suffix))
            });
        }
        Ok(field)
    }
}

impl Declaration {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid table declaration")
    }

    /// Fields in declaration order.
    pub fn field_set(&self) -> Result<FieldSet> {
        let mut fields = FieldSet::new();
        for decl in &self.fields {
            fields.push(decl.name.clone(), decl.to_field()?)?;
        }
        Ok(fields)
    }

    /// Declaration-time build options.
    pub fn build_options(&self) -> Result<BuildOptions> {
        let mut options = BuildOptions::new().table(self.options.table.clone());
        options.transposed = self.options.transposed;
        options.palette = self.options.palette.clone();
        if let Some(expr) = &self.options.section_by {
            options = options.section_by(Path::parse(expr).context("section_by")?);
        }
        Ok(options)
    }
}

/// Fields guessed from the first record: one per key, in key order.
///
/// Scalar records give a single `value` field showing the whole record;
/// no records give no fields.
pub fn infer_fields(records: &[Value]) -> Result<FieldSet> {
    let mut fields = FieldSet::new();
    let first = match records.first() {
        Some(first) => first,
        None => return Ok(fields),
    };
    match first {
        Value::Object(map) => {
            for (key, value) in map {
                let mut field = Field::new(key.as_str()).key(key.as_str());
                if value.is_number() {
                    field = field.justify(Justify::Right);
                }
                fields.push(key.clone(), field)?;
            }
        }
        _ => fields.push("value", Field::new("Value"))?,
    }
    Ok(fields)
}

/// Records must be a JSON array.
pub fn parse_records(text: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(text).context("records are not valid JSON")? {
        Value::Array(records) => Ok(records),
        other => Err(anyhow!(
            "records must be a JSON array, got {}",
            match other {
                Value::Object(_) => "an object",
                Value::String(_) => "a string",
                Value::Number(_) => "a number",
                Value::Bool(_) => "a boolean",
                _ => "null",
            }
        )),
    }
}
