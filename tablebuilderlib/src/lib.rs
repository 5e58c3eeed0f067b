//! # tablebuilderlib
//!
//! A declarative table builder: describe the fields once, then build
//! render-ready grids from any number of record sequences.
//!
//! ## Overview
//!
//! A table is declared as an ordered [`FieldSet`]. Each [`Field`] says where
//! its value comes from and how it is shown:
//!
//! - **Accessor**: a flat key, a chained [`Path`], or a function of the record
//! - **Default**: substituted when the record doesn't have the value
//! - **Formatter**: raw value to display text
//! - **Header / footer**: a literal, or a reducer over the field's values
//! - **Style**: a static token, optionally combined with a colour picked
//!   deterministically from the value itself
//!
//! A build resolves every cell, computes the aggregates, optionally splits
//! the records into sections and transposes, and emits a [`Grid`]. Drawing
//! is left to a [`RenderAdapter`].
//!
//! Records are anything implementing [`Lookup`]; `serde_json::Value` works
//! out of the box.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use tablebuilderlib::{reducers, Field, FieldSet, TableBuilder, Value};
//!
//! let fields = FieldSet::new()
//!     .field("name", Field::new("Name").key("name").footer("Total"))?
//!     .field("quantity", Field::new("Quantity").key("quantity").footer_with(reducers::sum))?
//!     .field(
//!         "subtotal",
//!         Field::new("Subtotal")
//!             .compute(|r: &Value, _| {
//!                 let quantity = r["quantity"].as_f64().ok_or("no quantity")?;
//!                 let price = r["price"].as_f64().ok_or("no price")?;
//!                 Ok(json!(quantity * price))
//!             })
//!             .footer_with(reducers::sum),
//!     )?;
//!
//! let records = vec![
//!     json!({"name": "Item 1", "quantity": 1, "price": 10}),
//!     json!({"name": "Item 2", "quantity": 2, "price": 20}),
//! ];
//! let grid = TableBuilder::new(fields).build(&records)?;
//! assert_eq!(grid.body_text()[1], vec!["Item 2", "2", "40.0"]);
//! assert_eq!(grid.footers()[1].text, "3");
//! # Ok::<(), tablebuilderlib::TableError>(())
//! ```

pub mod access;
pub mod build;
pub mod error;
pub mod field;
pub mod output;
pub mod style;

pub use access::{Accessor, Key, Lookup, Path, Step};
pub use build::{build_table, BuildOptions, SectionKey, TableBuilder, TableOptions};
pub use error::{BoxError, Slot, TableError};
pub use field::{display_value, reducers, Aggregate, Field, FieldSet, Justify, ReducerName};
pub use output::{Cell, Grid, Lane, Orientation, RenderAdapter, Section};
pub use serde_json::Value;
pub use style::{Palette, ValueStyler};

/// Result type for tablebuilderlib operations
pub type Result<T> = std::result::Result<T, TableError>;
