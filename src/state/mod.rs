//! State Module - runtime state that outlives a single layout pass.
//!
//! - **Scroll** - per-container offsets, extents, chaining, thumbs

mod scroll;

pub use scroll::*;
