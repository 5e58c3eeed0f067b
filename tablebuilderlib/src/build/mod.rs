//! Building: turn records into a grid.
//!
//! This module handles the middle of the pipeline. It provides:
//!
//! - **TableBuilder**: a field declaration plus declaration-time options
//! - **BuildOptions / TableOptions**: layout switches and table-level
//!   options, merged field by field with call-time overrides
//! - **SectionKey**: how records are grouped into consecutive sections
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use tablebuilderlib::{BuildOptions, Field, FieldSet, TableBuilder};
//!
//! let fields = FieldSet::new().field("kind", Field::new("Kind").key("kind"))?;
//! let records = vec![json!({"kind": "a"}), json!({"kind": "a"}), json!({"kind": "b"})];
//!
//! let grid = TableBuilder::new(fields)
//!     .build_with(&records, &BuildOptions::new().section_by("kind").transposed(true))?;
//! assert_eq!(grid.boundaries(), vec![2]);
//! assert_eq!(grid.dimensions(), (1, 3));
//! # Ok::<(), tablebuilderlib::TableError>(())
//! ```

pub mod builder;
mod context;
pub mod options;
pub mod section;

pub use builder::{build_table, TableBuilder};
pub use options::{BuildOptions, TableOptions};
pub use section::{partition, SectionKey};
