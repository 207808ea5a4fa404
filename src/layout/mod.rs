//! Layout Module
//!
//! Deterministic row/column/block layout with padding, spacing, responsive
//! overrides and scroll offsets.
//!
//! # Architecture
//!
//! 1. Responsive resolution turns a node's properties into a
//!    [`LayoutContext`] for the active viewport class
//! 2. Sizing runs bottom-up over layout-dirty nodes; leaves go through the
//!    renderer's [`Measure`] callback
//! 3. Positioning runs top-down from each dirty root
//!
//! Anomalies (negative padding, failed measures) never abort a pass. They
//! come back as diagnostics in the [`LayoutReport`].
//!
//! # Example
//!
//! ```ignore
//! use spark_scene::layout::{compute_layout, MonospaceMeasure};
//!
//! let report = compute_layout(&mut tree, &class, &MonospaceMeasure::default(), &mut scroll);
//! assert!(report.diagnostics.is_empty());
//! ```

mod engine;
mod measure;
mod responsive;
mod types;

pub use engine::{compute_layout, content_size};
pub use measure::{string_width, Measure, MonospaceMeasure};
pub use responsive::{resolve_context, resolve_prop};
pub use types::{LayoutContext, LayoutReport};
