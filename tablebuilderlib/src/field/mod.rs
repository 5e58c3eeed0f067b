//! Field declarations: what each column holds and how it is shown.
//!
//! This module handles the declaration side of the pipeline. It provides:
//!
//! - **Field**: header, footer, accessor, default, formatter, styles, justification
//! - **FieldSet**: the ordered, uniquely named table shape
//! - **Aggregate**: literal or reducer content for header/footer cells
//! - **reducers**: stock reducers (`sum`, `count`, `mean`, `min`, `max`)

pub mod aggregate;
pub mod collection;
pub mod format;
pub mod reducers;
pub mod spec;

pub use aggregate::{Aggregate, ReducerFn};
pub use collection::FieldSet;
pub use format::{display_value, FormatterFn, Justify};
pub use reducers::ReducerName;
pub use spec::Field;
