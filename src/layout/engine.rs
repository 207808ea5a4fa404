//! Layout pass - intrinsic sizing and positioning.
//!
//! # Algorithm
//!
//! 1. Pre-order walk from the root (parents before children).
//! 2. Sizing, reverse pre-order (children before parents), only for
//!    layout-dirty nodes. Clean nodes keep the size cached by the last pass.
//!    - leaves: `Measure(node)`
//!    - `row`: Σ widths + (n-1)·spacing + 2·padding, max height + 2·padding
//!    - `column`: the same with the axes swapped
//!    - block (no `layout`): max width/height + 2·padding
//!    - explicit `width`/`height` override the intrinsic size per axis
//!    - scroll containers report content/viewport extents to the
//!      [`ScrollController`], which re-clamps the offset
//! 3. Positioning, top-down from every dirty root. Children start at the
//!    content origin `(x + padding, y + padding)` shifted back by the scroll
//!    offset, and advance along the main axis by size + spacing. A subtree is
//!    skipped when its node neither moved nor is dirty and nothing below it
//!    is dirty either.

use taffy::geometry::Size;
use tracing::{debug, warn};

use crate::engine::NodeTree;
use crate::error::LayoutDiagnostic;
use crate::state::ScrollController;
use crate::types::{DirtyFlags, Geometry, LayoutMode, ScrollAxis, ViewportClass};

use super::measure::Measure;
use super::responsive::resolve_context;
use super::types::{LayoutContext, LayoutReport};

const ZERO: Size<f32> = Size {
    width: 0.0,
    height: 0.0,
};

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Run one layout pass over the dirty parts of the tree.
///
/// Dirty flags are left in place; the scheduler clears them on commit.
pub fn compute_layout(
    tree: &mut NodeTree,
    class: &ViewportClass,
    measure: &dyn Measure,
    scroll: &mut ScrollController,
) -> LayoutReport {
    let mut report = LayoutReport::default();
    let Some(root) = tree.root() else {
        return report;
    };

    // =========================================================================
    // PASS 1: Sizing (children before parents)
    // =========================================================================

    let order = tree.preorder(root);
    for &index in order.iter().rev() {
        if size_node(tree, index, class, measure, scroll, &mut report.diagnostics) {
            report.nodes_sized += 1;
        }
    }

    // =========================================================================
    // PASS 2: Positioning (parents before children)
    // =========================================================================

    let pending = dirty_below(tree);
    for dirty_root in tree.dirty_roots() {
        let origin = if dirty_root == root {
            (0.0, 0.0)
        } else {
            tree.get(dirty_root).map_or((0.0, 0.0), |n| (n.geometry.x, n.geometry.y))
        };
        report.nodes_placed += place_subtree(tree, dirty_root, origin, scroll, &pending);
    }

    for diagnostic in &report.diagnostics {
        warn!(node = diagnostic.node_id(), ?diagnostic, "layout anomaly");
    }
    debug!(
        sized = report.nodes_sized,
        placed = report.nodes_placed,
        class = %class,
        "layout pass"
    );

    report
}

// =============================================================================
// Sizing
// =============================================================================

/// Recompute one node's size if it is layout-dirty. Returns whether it did.
fn size_node(
    tree: &mut NodeTree,
    index: usize,
    class: &ViewportClass,
    measure: &dyn Measure,
    scroll: &mut ScrollController,
    diagnostics: &mut Vec<LayoutDiagnostic>,
) -> bool {
    let Some(node) = tree.get(index) else {
        return false;
    };
    if !node.dirty.contains(DirtyFlags::LAYOUT) {
        return false;
    }

    let ctx = resolve_context(&node.id, &node.props, class, diagnostics);
    let is_leaf = node.kind.is_leaf() && node.children.is_empty();

    let content = if is_leaf {
        if ctx.width.is_some() && ctx.height.is_some() {
            ZERO
        } else {
            match measure.measure(node) {
                Ok(size) => sanitize(size),
                Err(err) => {
                    diagnostics.push(LayoutDiagnostic::MeasureFailure {
                        node_id: node.id.clone(),
                        reason: err.to_string(),
                    });
                    ZERO
                }
            }
        }
    } else {
        let child_sizes: Vec<Size<f32>> = node
            .children
            .iter()
            .filter_map(|&child| tree.get(child).map(|c| c.measured))
            .collect();
        content_size(&ctx, &child_sizes)
    };

    let measured = Size {
        width: ctx.width.unwrap_or(content.width),
        height: ctx.height.unwrap_or(content.height),
    };

    match ctx.scroll.filter(|_| !is_leaf) {
        Some(axis) => {
            let (content_extent, viewport_extent) = match axis {
                ScrollAxis::Vertical => (content.height, measured.height),
                ScrollAxis::Horizontal => (content.width, measured.width),
            };
            scroll.set_extents(index, axis, content_extent, viewport_extent);
        }
        None => {
            scroll.remove(index);
        }
    }

    if let Some(node) = tree.get_mut(index) {
        node.context = ctx;
        node.measured = measured;
    }
    true
}

/// Size of a container's content box plus padding.
pub fn content_size(ctx: &LayoutContext, children: &[Size<f32>]) -> Size<f32> {
    let pad = 2.0 * ctx.padding;
    let gaps = ctx.spacing * children.len().saturating_sub(1) as f32;
    let sum_w: f32 = children.iter().map(|s| s.width).sum();
    let sum_h: f32 = children.iter().map(|s| s.height).sum();
    let max_w = children.iter().map(|s| s.width).fold(0.0, f32::max);
    let max_h = children.iter().map(|s| s.height).fold(0.0, f32::max);

    match ctx.mode {
        LayoutMode::Row => Size {
            width: sum_w + gaps + pad,
            height: max_h + pad,
        },
        LayoutMode::Column => Size {
            width: max_w + pad,
            height: sum_h + gaps + pad,
        },
        LayoutMode::Block => Size {
            width: max_w + pad,
            height: max_h + pad,
        },
    }
}

fn sanitize(size: Size<f32>) -> Size<f32> {
    let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Size {
        width: clean(size.width),
        height: clean(size.height),
    }
}

// =============================================================================
// Positioning
// =============================================================================

const PLACEMENT: DirtyFlags = DirtyFlags::LAYOUT.union(DirtyFlags::POSITION);

/// Per node index: whether some strict descendant needs placement.
fn dirty_below(tree: &NodeTree) -> Vec<bool> {
    let mut pending = vec![false; tree.len()];
    for (index, node) in tree.iter() {
        if !node.dirty.intersects(PLACEMENT) {
            continue;
        }
        for ancestor in tree.ancestors(index) {
            if std::mem::replace(&mut pending[ancestor], true) {
                break;
            }
        }
    }
    pending
}

/// Place `from` at `origin` and everything below it that moved or is dirty.
///
/// Clean, unmoved nodes are still walked through when `pending` says a
/// descendant needs placement. Returns the number of nodes placed.
fn place_subtree(
    tree: &mut NodeTree,
    from: usize,
    origin: (f32, f32),
    scroll: &ScrollController,
    pending: &[bool],
) -> usize {
    let mut placed = 0;
    let mut stack = vec![(from, origin.0, origin.1, true)];

    while let Some((index, x, y, force)) = stack.pop() {
        let Some(node) = tree.get_mut(index) else {
            continue;
        };

        let geometry = Geometry::new(x, y, node.measured.width, node.measured.height);
        let moved = node.geometry != geometry;
        if force || moved || node.dirty.intersects(PLACEMENT) {
            node.geometry = geometry;
            placed += 1;
        } else if !pending.get(index).copied().unwrap_or(false) {
            continue;
        }

        let ctx = node.context;
        let mut cx = x + ctx.padding;
        let mut cy = y + ctx.padding;
        match ctx.scroll {
            Some(ScrollAxis::Vertical) => cy -= scroll.offset(index),
            Some(ScrollAxis::Horizontal) => cx -= scroll.offset(index),
            None => {}
        }

        let children = node.children.clone();
        for child in children {
            let Some(size) = tree.get(child).map(|c| c.measured) else {
                continue;
            };
            stack.push((child, cx, cy, false));
            match ctx.mode {
                LayoutMode::Row => cx += size.width + ctx.spacing,
                LayoutMode::Column => cy += size.height + ctx.spacing,
                LayoutMode::Block => {}
            }
        }
    }

    placed
}
