//! Deterministic value styling.
//!
//! Maps arbitrary values onto a fixed palette of style tokens so repeated
//! values always render the same way. The mapping is a pure hash of the
//! value's text; only the memo ([`ValueStyler`]) carries state, and it
//! lives for a single build.

pub mod palette;
pub mod styler;

pub use palette::{stable_hash, Palette, RAINBOW};
pub use styler::{canonical_text, ValueStyler};
