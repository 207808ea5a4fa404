//! Update Scheduler - frame phases and the write queue drain.
//!
//! ```text
//! Idle ──(set / event)──▶ Collecting ──(tick)──▶ Resolving ──▶ Committed ──▶ Idle
//! ```
//!
//! - **Collecting**: signal writes pile up in the [`UpdateQueue`]; host
//!   events mark nodes dirty directly. Bound nodes are written and marked
//!   dirty when the queue is drained, not at `set` time.
//! - **Resolving** (once per tick): the queue is drained in FIFO order,
//!   then one layout pass covers every dirty root.
//! - **Committed**: the draw list is emitted and dirty flags are cleared.

use tracing::trace;

use crate::binding::UpdateQueue;
use crate::engine::{NodeTree, Slot};
use crate::types::DirtyFlags;

/// Scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Collecting,
    Resolving,
    Committed,
}

/// Work done by one committed frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    /// Queued writes that changed a slot.
    pub writes_applied: usize,
    /// Queued writes equal to the slot's current value.
    pub writes_suppressed: usize,
    pub nodes_sized: usize,
    pub nodes_placed: usize,
    pub draw_commands: usize,
}

/// Property names whose change can alter geometry.
///
/// Responsive overrides (`padding:mobile`) count as their base property.
pub fn affects_layout(key: &str) -> bool {
    let base = key.split_once(':').map_or(key, |(base, _)| base);
    matches!(
        base,
        "layout" | "padding" | "spacing" | "width" | "height" | "scroll" | "placeholder"
    )
}

/// Dirty flags a write into `slot` calls for.
pub fn dirty_for(slot: &Slot) -> DirtyFlags {
    match slot {
        Slot::Content => DirtyFlags::LAYOUT | DirtyFlags::PAINT,
        Slot::Prop(key) if affects_layout(key) => DirtyFlags::LAYOUT | DirtyFlags::PAINT,
        Slot::Prop(_) => DirtyFlags::PAINT,
    }
}

/// Phase machine of a scene.
#[derive(Debug, Default)]
pub struct Scheduler {
    phase: Phase,
    frame: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of committed frames.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub(crate) fn transition(&mut self, to: Phase) {
        if self.phase != to {
            trace!(from = ?self.phase, to = ?to, "scheduler phase");
            self.phase = to;
        }
    }

    /// Note that work arrived. No-op outside `Idle`.
    pub(crate) fn collect(&mut self) {
        if self.phase == Phase::Idle {
            self.transition(Phase::Collecting);
        }
    }

    /// Apply every pending write, oldest first, until the queue is empty.
    ///
    /// Returns `(applied, suppressed)`.
    pub(crate) fn drain(&mut self, queue: &UpdateQueue, tree: &mut NodeTree) -> (usize, usize) {
        let mut applied = 0;
        let mut suppressed = 0;

        while let Some(write) = queue.pop() {
            let Some(node) = tree.get_mut(write.node) else {
                continue;
            };
            if node.write_slot(&write.slot, &write.value) {
                applied += 1;
                tree.mark_dirty(write.node, dirty_for(&write.slot));
            } else {
                suppressed += 1;
            }
        }

        if applied + suppressed > 0 {
            trace!(applied, suppressed, "drained update queue");
        }
        (applied, suppressed)
    }

    /// Finish a committed frame and return to `Idle`. Returns the new frame number.
    pub(crate) fn commit(&mut self) -> u64 {
        self.transition(Phase::Committed);
        self.frame += 1;
        self.transition(Phase::Idle);
        self.frame
    }
}
