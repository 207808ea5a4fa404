//! Layout types.

use crate::error::LayoutDiagnostic;
use crate::types::{LayoutMode, ScrollAxis};

/// Resolved layout rules of one node for the current pass.
///
/// Built from the node's properties after responsive overrides and clamping.
/// Cached on the node and rebuilt whenever it is layout-dirty.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutContext {
    pub mode: LayoutMode,
    pub padding: f32,
    pub spacing: f32,
    pub scroll: Option<ScrollAxis>,
    /// Explicit width, overriding the intrinsic one.
    pub width: Option<f32>,
    /// Explicit height, overriding the intrinsic one.
    pub height: Option<f32>,
}

/// Outcome of one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutReport {
    /// Nodes whose size was recomputed.
    pub nodes_sized: usize,
    /// Nodes whose geometry was (re)assigned.
    pub nodes_placed: usize,
    /// Recoverable anomalies, in discovery order.
    pub diagnostics: Vec<LayoutDiagnostic>,
}
