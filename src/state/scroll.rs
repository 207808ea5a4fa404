//! Scroll Controller
//!
//! Manages scrolling behavior:
//! - Per-container scroll offset (user state, survives layout passes)
//! - Content and viewport extents (written by the layout engine)
//! - Scroll operations with clamping
//! - Ancestor chaining for wheel-style deltas
//! - Scrollbar thumb geometry
//!
//! Invariant: `0 <= offset <= max(0, content - viewport)` after every
//! extent update and every scroll operation.

use std::collections::HashMap;

use tracing::trace;

use crate::engine::NodeTree;
use crate::types::{Geometry, ScrollAxis};

// =============================================================================
// Scroll State
// =============================================================================

/// Scroll state of one container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub axis: ScrollAxis,
    pub offset: f32,
    /// Extent of the laid-out children along the axis, padding included.
    pub content: f32,
    /// Visible extent along the axis (the container's own size).
    pub viewport: f32,
}

impl ScrollState {
    pub fn new(axis: ScrollAxis) -> Self {
        Self {
            axis,
            offset: 0.0,
            content: 0.0,
            viewport: 0.0,
        }
    }

    /// Largest valid offset.
    #[inline]
    pub fn max_offset(&self) -> f32 {
        (self.content - self.viewport).max(0.0)
    }

    /// Whether there is anything to scroll.
    #[inline]
    pub fn can_scroll(&self) -> bool {
        self.max_offset() > 0.0
    }

    fn clamp(&mut self) -> bool {
        let clamped = self.offset.clamp(0.0, self.max_offset());
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    /// Scrollbar thumb for a container at `container`.
    ///
    /// Vertical thumbs run along the right edge, horizontal thumbs along the
    /// bottom edge. `None` when the content fits.
    pub fn thumb(&self, container: Geometry, thickness: f32, min_length: f32) -> Option<Geometry> {
        if !self.can_scroll() || self.viewport <= 0.0 {
            return None;
        }

        let track = self.viewport;
        let length = (track * self.viewport / self.content).max(min_length).min(track);
        let travel = track - length;
        let position = travel * (self.offset / self.max_offset());

        Some(match self.axis {
            ScrollAxis::Vertical => Geometry::new(
                container.right() - thickness,
                container.y + position,
                thickness,
                length,
            ),
            ScrollAxis::Horizontal => Geometry::new(
                container.x + position,
                container.bottom() - thickness,
                length,
                thickness,
            ),
        })
    }
}

// =============================================================================
// Scroll Controller
// =============================================================================

/// Scroll states of every scrollable container, keyed by node index.
#[derive(Debug, Default)]
pub struct ScrollController {
    states: HashMap<usize, ScrollState>,
}

impl ScrollController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&ScrollState> {
        self.states.get(&index)
    }

    /// Current offset (0 for non-scrollable nodes).
    pub fn offset(&self, index: usize) -> f32 {
        self.states.get(&index).map_or(0.0, |s| s.offset)
    }

    /// Whether the node is a scroll container with overflowing content.
    pub fn is_scrollable(&self, index: usize) -> bool {
        self.states.get(&index).is_some_and(ScrollState::can_scroll)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ScrollState)> {
        self.states.iter().map(|(&index, state)| (index, state))
    }

    // =========================================================================
    // Extents (from layout)
    // =========================================================================

    /// Record extents measured by a layout pass and re-clamp the offset.
    ///
    /// Keeps the offset across passes; a changed axis resets it. Returns
    /// `true` if the offset had to move.
    pub fn set_extents(&mut self, index: usize, axis: ScrollAxis, content: f32, viewport: f32) -> bool {
        let state = self.states.entry(index).or_insert_with(|| ScrollState::new(axis));
        if state.axis != axis {
            *state = ScrollState::new(axis);
        }
        state.content = content.max(0.0);
        state.viewport = viewport.max(0.0);

        let changed = state.clamp();
        if changed {
            trace!(index, offset = state.offset, "scroll offset clamped after layout");
        }
        changed
    }

    /// Forget a node that is no longer a scroll container.
    pub fn remove(&mut self, index: usize) -> bool {
        self.states.remove(&index).is_some()
    }

    // =========================================================================
    // Scroll operations
    // =========================================================================

    /// Set the offset, clamped to the valid range.
    ///
    /// Returns `true` if the offset changed. Does nothing for nodes that are
    /// not scroll containers.
    pub fn set_offset(&mut self, index: usize, offset: f32) -> bool {
        let Some(state) = self.states.get_mut(&index) else {
            return false;
        };
        let previous = state.offset;
        state.offset = if offset.is_finite() { offset } else { previous };
        state.clamp();
        state.offset != previous
    }

    /// Scroll by a delta along the container's axis.
    ///
    /// Returns `true` if scrolling occurred, `false` if already at boundary.
    pub fn scroll_by(&mut self, index: usize, delta: f32) -> bool {
        let current = self.offset(index);
        self.set_offset(index, current + delta)
    }

    /// Scroll to the start of the content.
    pub fn scroll_to_start(&mut self, index: usize) -> bool {
        self.set_offset(index, 0.0)
    }

    /// Scroll to the end of the content.
    pub fn scroll_to_end(&mut self, index: usize) -> bool {
        let max = self.states.get(&index).map_or(0.0, ScrollState::max_offset);
        self.set_offset(index, max)
    }

    /// Scroll with ancestor chaining (for wheel deltas).
    ///
    /// Starts at `index` and walks up the tree. The first scroll container
    /// that can move along its axis takes the delta. Returns the index of the
    /// container that scrolled.
    pub fn scroll_by_with_chaining(&mut self, tree: &NodeTree, index: usize, dx: f32, dy: f32) -> Option<usize> {
        let chain = std::iter::once(index).chain(tree.ancestors(index));
        for candidate in chain {
            let Some(state) = self.states.get(&candidate) else {
                continue;
            };
            let delta = state.axis.component(dx, dy);
            if delta != 0.0 && self.scroll_by(candidate, delta) {
                trace!(index = candidate, offset = self.offset(candidate), "scrolled");
                return Some(candidate);
            }
        }
        None
    }
}
