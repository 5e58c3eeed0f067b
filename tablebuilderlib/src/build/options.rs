//! Build options: declaration-time defaults merged with call-time overrides.
//!
//! Every option is optional so two option sets can be merged field by
//! field, the call-time set winning wherever it says something.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::section::SectionKey;
use crate::style::Palette;

/// Header row shown unless disabled
pub const DEFAULT_SHOW_HEADER: bool = true;
/// Footer row hidden unless enabled
pub const DEFAULT_SHOW_FOOTER: bool = false;
/// Header/footer style when neither field nor table sets one
pub const DEFAULT_AGGREGATE_STYLE: &str = "bold";

/// Table-level display options, forwarded to the render adapter.
///
/// Unknown keys land in `extra` untouched; the adapter decides whether to
/// honour or reject them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Fixed total width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_header: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_footer: Option<bool>,
    /// Draw the outer border
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_edge: Option<bool>,
    /// Rule between every body row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_lines: Option<bool>,
    /// Spaces on each side of a cell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<usize>,
    /// Default style for body cells
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_style: Option<String>,
    /// Border glyph set, interpreted by the adapter (e.g. "ascii", "rounded")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<String>,
    /// Options this crate doesn't interpret
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

macro_rules! setters {
    (text: $($text:ident),*; plain: $($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $text(mut self, value: impl Into<String>) -> Self {
                self.$text = Some(value.into());
                self
            }
        )*
        $(
            pub fn $name(mut self, value: $ty) -> Self {
                self.$name = Some(value);
                self
            }
        )*
    };
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        text: title, caption, style, header_style, footer_style, border_style,
            title_style, caption_style, borders;
        plain: width: usize, min_width: usize, show_header: bool, show_footer: bool,
            show_edge: bool, show_lines: bool, padding: usize,
    }

    /// Add a passthrough option.
    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Field-by-field merge; values set in `overrides` win.
    pub fn merge(&self, overrides: &TableOptions) -> TableOptions {
        fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
            over.clone().or_else(|| base.clone())
        }

        let mut extra = self.extra.clone();
        extra.extend(overrides.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        TableOptions {
            title: pick(&self.title, &overrides.title),
            caption: pick(&self.caption, &overrides.caption),
            width: pick(&self.width, &overrides.width),
            min_width: pick(&self.min_width, &overrides.min_width),
            show_header: pick(&self.show_header, &overrides.show_header),
            show_footer: pick(&self.show_footer, &overrides.show_footer),
            show_edge: pick(&self.show_edge, &overrides.show_edge),
            show_lines: pick(&self.show_lines, &overrides.show_lines),
            padding: pick(&self.padding, &overrides.padding),
            style: pick(&self.style, &overrides.style),
            header_style: pick(&self.header_style, &overrides.header_style),
            footer_style: pick(&self.footer_style, &overrides.footer_style),
            border_style: pick(&self.border_style, &overrides.border_style),
            title_style: pick(&self.title_style, &overrides.title_style),
            caption_style: pick(&self.caption_style, &overrides.caption_style),
            borders: pick(&self.borders, &overrides.borders),
            extra,
        }
    }

    /// Fill in the defaults for anything still unset.
    pub fn resolved(mut self) -> Self {
        self.show_header.get_or_insert(DEFAULT_SHOW_HEADER);
        self.show_footer.get_or_insert(DEFAULT_SHOW_FOOTER);
        self.header_style
            .get_or_insert_with(|| DEFAULT_AGGREGATE_STYLE.to_string());
        self.footer_style
            .get_or_insert_with(|| DEFAULT_AGGREGATE_STYLE.to_string());
        self
    }

    pub fn is_header_shown(&self) -> bool {
        self.show_header.unwrap_or(DEFAULT_SHOW_HEADER)
    }

    pub fn is_footer_shown(&self) -> bool {
        self.show_footer.unwrap_or(DEFAULT_SHOW_FOOTER)
    }

    /// Default body style ("" when unset)
    pub fn body_style(&self) -> &str {
        self.style.as_deref().unwrap_or("")
    }
}

/// Options for one build: layout switches plus table-level options.
pub struct BuildOptions<R = Value> {
    pub transposed: Option<bool>,
    pub section_by: Option<SectionKey<R>>,
    pub palette: Option<Palette>,
    pub table: TableOptions,
}

impl<R> BuildOptions<R> {
    pub fn new() -> Self {
        Self {
            transposed: None,
            section_by: None,
            palette: None,
            table: TableOptions::default(),
        }
    }

    /// Lay fields out as rows instead of columns.
    pub fn transposed(mut self, transposed: bool) -> Self {
        self.transposed = Some(transposed);
        self
    }

    /// Group consecutive records with equal keys into sections.
    pub fn section_by(mut self, key: impl Into<SectionKey<R>>) -> Self {
        self.section_by = Some(key.into());
        self
    }

    /// Palette for value-coloured fields.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn table(mut self, table: TableOptions) -> Self {
        self.table = table;
        self
    }

    /// Field-by-field merge; values set in `overrides` win.
    pub fn merge(&self, overrides: &BuildOptions<R>) -> BuildOptions<R> {
        BuildOptions {
            transposed: overrides.transposed.or(self.transposed),
            section_by: overrides
                .section_by
                .clone()
                .or_else(|| self.section_by.clone()),
            palette: overrides.palette.clone().or_else(|| self.palette.clone()),
            table: self.table.merge(&overrides.table),
        }
    }
}

impl<R> Default for BuildOptions<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for BuildOptions<R> {
    fn clone(&self) -> Self {
        Self {
            transposed: self.transposed,
            section_by: self.section_by.clone(),
            palette: self.palette.clone(),
            table: self.table.clone(),
        }
    }
}

impl<R> std::fmt::Debug for BuildOptions<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildOptions")
            .field("transposed", &self.transposed)
            .field("section_by", &self.section_by)
            .field("palette", &self.palette)
            .field("table", &self.table)
            .finish()
    }
}
