//! Value access: pull raw values out of arbitrary records.
//!
//! This module handles the first stage of the pipeline. It provides:
//!
//! - **Lookup**: the trait records implement (item and attribute lookup)
//! - **Path**: chained lookups built fluently or parsed from text
//! - **Accessor**: flat key, path, or user function, as attached to a field
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use tablebuilderlib::Path;
//!
//! let record = json!({"user": {"address": {"street": "Main St"}}});
//! let street = Path::root().attr("user").attr("address").attr("street");
//! assert_eq!(street.resolve(&record), Some(json!("Main St")));
//! ```

pub mod accessor;
pub mod lookup;
pub mod path;

pub use accessor::{Accessor, AccessorFn};
pub use lookup::{Key, Lookup};
pub use path::{Path, Step};
