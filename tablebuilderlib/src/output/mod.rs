//! Output: the finished grid and the render-adapter seam.
//!
//! This module handles the last stage of the pipeline. It provides:
//!
//! - **Grid**: lanes (one per field) of formatted, styled cells plus
//!   header/footer cells, section runs and merged table options
//! - **RenderAdapter**: the trait external renderers implement
//!
//! The grid is a pure presentation structure: nothing is computed after
//! it is emitted, and it serializes directly to JSON.

pub mod adapter;
pub mod grid;

pub use adapter::RenderAdapter;
pub use grid::{Cell, Grid, Lane, Orientation, Section};
