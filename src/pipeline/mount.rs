//! Mount API - scene lifecycle, ticking and event dispatch.
//!
//! # Example
//!
//! ```ignore
//! use spark_scene::pipeline::{mount, InputEvent};
//! use spark_scene::primitives::{app, input, text};
//! use spark_scene::layout::MonospaceMeasure;
//! use spark_scene::signal::StateNamespace;
//!
//! let mut state = StateNamespace::new();
//! let username = state.signal("username", "");
//!
//! let root = app()
//!     .child(input().id("input1").sync("username"))
//!     .child(text("").bind("username"));
//!
//! let mut scene = mount(root, &state, MonospaceMeasure::default())?;
//!
//! // Drive frames from your own loop
//! if let Some(draw_list) = scene.tick() {
//!     renderer.draw(&draw_list);
//! }
//!
//! scene.dispatch(&InputEvent::text_changed("input1", "Alice"))?;
//! assert_eq!(username.get().to_display(), "Alice");
//! ```

use taffy::geometry::Size;
use tracing::{debug, trace};

use crate::binding::{resolve, validate_element, BindingTable, UpdateQueue};
use crate::config::EngineConfig;
use crate::engine::{Node, NodeTree, PropValue, Slot};
use crate::error::{LayoutDiagnostic, Result, SceneError};
use crate::layout::{compute_layout, Measure};
use crate::primitives::{ClickEvent, Element};
use crate::signal::{StateNamespace, StateSignal};
use crate::state::{ScrollController, ScrollState};
use crate::types::{DirtyFlags, Geometry, ViewportClass};

use super::draw::{build_draw_list, DrawList, HitRegion};
use super::events::InputEvent;
use super::scheduler::{dirty_for, FrameStats, Phase, Scheduler};

// =============================================================================
// Scene
// =============================================================================

/// A mounted scene: node tree, bindings, scroll state and scheduler.
///
/// Dropping the scene unsubscribes every binding from its signal.
pub struct Scene {
    tree: NodeTree,
    state: StateNamespace,
    bindings: BindingTable,
    queue: UpdateQueue,
    scroll: ScrollController,
    scheduler: Scheduler,
    measure: Box<dyn Measure>,
    config: EngineConfig,
    class: ViewportClass,
    viewport: Option<Size<f32>>,
    /// Queue work from ticks that committed nothing, carried into the next frame.
    carried: FrameStats,
    last_stats: FrameStats,
    diagnostics: Vec<LayoutDiagnostic>,
    hit_regions: Vec<HitRegion>,
}

/// Mount a scene with the default configuration.
pub fn mount(root: Element, state: &StateNamespace, measure: impl Measure + 'static) -> Result<Scene> {
    mount_with_config(root, state, measure, EngineConfig::default())
}

/// Mount a scene.
///
/// Builds the node tree, resolves every binding against `state` and
/// schedules the first frame. Fails before anything is wired if the tree is
/// malformed or a binding names unknown state.
pub fn mount_with_config(
    root: Element,
    state: &StateNamespace,
    measure: impl Measure + 'static,
    config: EngineConfig,
) -> Result<Scene> {
    let mut tree = NodeTree::build(root)?;
    tree.validate()?;
    let root_index = tree.root().ok_or(SceneError::EmptyTree)?;

    let queue = UpdateQueue::new();
    let mut bindings = BindingTable::new();
    resolve(&mut tree, root_index, state, &queue, &mut bindings)?;

    let class = ViewportClass::new(config.default_class.clone());
    let mut scheduler = Scheduler::new();
    scheduler.collect();

    debug!(nodes = tree.len(), bindings = bindings.len(), "mounted scene");

    Ok(Scene {
        tree,
        state: state.clone(),
        bindings,
        queue,
        scroll: ScrollController::new(),
        scheduler,
        measure: Box::new(measure),
        config,
        class,
        viewport: None,
        carried: FrameStats::default(),
        last_stats: FrameStats::default(),
        diagnostics: Vec::new(),
        hit_regions: Vec::new(),
    })
}

impl Scene {
    // =========================================================================
    // Frames
    // =========================================================================

    /// Run one update cycle.
    ///
    /// Drains pending writes, lays out every dirty root once and returns the
    /// committed draw list. Returns `None` when nothing changed.
    pub fn tick(&mut self) -> Option<DrawList> {
        if self.scheduler.phase() == Phase::Idle && self.queue.is_empty() && !self.tree.has_dirty() {
            return None;
        }

        self.scheduler.transition(Phase::Resolving);
        let (applied, suppressed) = self.scheduler.drain(&self.queue, &mut self.tree);
        self.carried.writes_applied += applied;
        self.carried.writes_suppressed += suppressed;

        if !self.tree.has_dirty() {
            self.scheduler.transition(Phase::Idle);
            trace!("tick without dirty nodes");
            return None;
        }

        let report = compute_layout(&mut self.tree, &self.class, self.measure.as_ref(), &mut self.scroll);
        let viewport = self
            .viewport
            .map(|size| Geometry::new(0.0, 0.0, size.width, size.height));
        let mut list = build_draw_list(&self.tree, &self.scroll, &self.class, &self.config, viewport);

        self.tree.clear_dirty();
        let frame = self.scheduler.commit();
        list.frame = frame;

        let carried = std::mem::take(&mut self.carried);
        self.last_stats = FrameStats {
            frame,
            writes_applied: carried.writes_applied,
            writes_suppressed: carried.writes_suppressed,
            nodes_sized: report.nodes_sized,
            nodes_placed: report.nodes_placed,
            draw_commands: list.len(),
        };
        self.diagnostics = report.diagnostics;
        self.hit_regions = list.hit_regions.clone();

        debug!(
            frame,
            commands = list.len(),
            sized = self.last_stats.nodes_sized,
            applied = self.last_stats.writes_applied,
            "committed frame"
        );
        Some(list)
    }

    /// Current phase. Pending signal writes count as collecting.
    ///
    /// A `set` on a bound signal only queues the write: the node's slot and
    /// dirty flags change when the next [`tick`](Self::tick) drains the queue.
    pub fn phase(&self) -> Phase {
        match self.scheduler.phase() {
            Phase::Idle if !self.queue.is_empty() => Phase::Collecting,
            phase => phase,
        }
    }

    /// Number of committed frames.
    pub fn frame(&self) -> u64 {
        self.scheduler.frame()
    }

    /// Statistics of the last committed frame.
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Diagnostics of the last committed layout pass.
    pub fn diagnostics(&self) -> &[LayoutDiagnostic] {
        &self.diagnostics
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Dispatch a host input event. Returns whether it had any effect.
    pub fn dispatch(&mut self, event: &InputEvent) -> Result<bool> {
        let index = self.index(event.node_id())?;
        self.scheduler.collect();

        match event {
            InputEvent::Click(target) => Ok(self.dispatch_click(index, target)),
            InputEvent::TextChanged(_, value) => Ok(self.dispatch_text(index, value)),
            InputEvent::ScrollDelta(_, dx, dy) => Ok(self.dispatch_scroll(index, *dx, *dy)),
        }
    }

    fn dispatch_click(&mut self, index: usize, target: &str) -> bool {
        let chain = std::iter::once(index).chain(self.tree.ancestors(index));
        for candidate in chain {
            let Some(node) = self.tree.get(candidate) else {
                continue;
            };
            if let Some(handler) = node.on_click.clone() {
                let event = ClickEvent {
                    target: target.to_string(),
                    current: node.id.clone(),
                };
                trace!(target, current = %event.current, "click");
                handler(&event);
                return true;
            }
        }
        false
    }

    fn dispatch_text(&mut self, index: usize, value: &str) -> bool {
        if !self.mutate_slot(index, &Slot::Content, &PropValue::from(value)) {
            return false;
        }
        if let Some(handler) = self.tree.get(index).and_then(|n| n.on_change.clone()) {
            handler(value);
        }
        true
    }

    fn dispatch_scroll(&mut self, index: usize, dx: f32, dy: f32) -> bool {
        match self.scroll.scroll_by_with_chaining(&self.tree, index, dx, dy) {
            Some(container) => {
                self.tree.mark_dirty(container, DirtyFlags::POSITION | DirtyFlags::PAINT);
                true
            }
            None => false,
        }
    }

    /// Write a slot as if the user changed it: mark dirty, then run the
    /// slot's mutation hooks.
    fn mutate_slot(&mut self, index: usize, slot: &Slot, value: &PropValue) -> bool {
        let Some(node) = self.tree.get_mut(index) else {
            return false;
        };
        if !node.write_slot(slot, value) {
            return false;
        }
        let hooks: Vec<StateSignal> = node.hooks_for(slot).map(|hook| hook.signal.clone()).collect();
        self.tree.mark_dirty(index, dirty_for(slot));

        for signal in hooks {
            signal.set(value.resolved());
        }
        true
    }

    /// Host-side property change (a toggled checkbox, a slider).
    ///
    /// Runs `model:prop`/`sync:prop` hooks like user input would.
    pub fn set_prop(&mut self, node_id: &str, key: &str, value: impl Into<PropValue>) -> Result<bool> {
        let index = self.index(node_id)?;
        self.scheduler.collect();
        Ok(self.mutate_slot(index, &Slot::Prop(key.to_string()), &value.into()))
    }

    /// Deepest node whose visible region contains the point, from the last
    /// committed frame.
    pub fn node_at(&self, x: f32, y: f32) -> Option<&str> {
        self.hit_regions
            .iter()
            .rev()
            .find(|region| region.geometry.contains(x, y))
            .and_then(|region| self.tree.get(region.node))
            .map(Node::id)
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Resize the viewport. Returns `true` if the viewport class changed,
    /// in which case every node is re-laid-out.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> bool {
        let size = Size { width, height };
        let resized = self.viewport != Some(size);
        self.viewport = Some(size);

        let class = self.config.classify(width);
        let reclassified = class != self.class;
        if reclassified {
            debug!(from = %self.class, to = %class, "viewport class changed");
            self.class = class;
            self.tree.mark_all_dirty(DirtyFlags::LAYOUT | DirtyFlags::PAINT);
        } else if resized {
            if let Some(root) = self.tree.root() {
                self.tree.mark_dirty(root, DirtyFlags::PAINT);
            }
        }
        if reclassified || resized {
            self.scheduler.collect();
        }
        reclassified
    }

    pub fn viewport(&self) -> Option<Size<f32>> {
        self.viewport
    }

    /// Active viewport class.
    pub fn class(&self) -> &ViewportClass {
        &self.class
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    fn scrolled(&mut self, index: usize, moved: bool) -> bool {
        if moved {
            self.tree.mark_dirty(index, DirtyFlags::POSITION | DirtyFlags::PAINT);
            self.scheduler.collect();
        }
        moved
    }

    /// Scroll a container by `delta` along its axis (no chaining).
    pub fn scroll_by(&mut self, node_id: &str, delta: f32) -> Result<bool> {
        let index = self.index(node_id)?;
        let moved = self.scroll.scroll_by(index, delta);
        Ok(self.scrolled(index, moved))
    }

    /// Scroll by whole lines of [`EngineConfig::line_scroll`].
    pub fn scroll_lines(&mut self, node_id: &str, lines: f32) -> Result<bool> {
        self.scroll_by(node_id, lines * self.config.line_scroll)
    }

    /// Scroll by pages of [`EngineConfig::page_scroll_factor`] × viewport.
    pub fn scroll_pages(&mut self, node_id: &str, pages: f32) -> Result<bool> {
        let index = self.index(node_id)?;
        let viewport = self.scroll.get(index).map_or(0.0, |s| s.viewport);
        self.scroll_by(node_id, pages * viewport * self.config.page_scroll_factor)
    }

    pub fn scroll_to_start(&mut self, node_id: &str) -> Result<bool> {
        let index = self.index(node_id)?;
        let moved = self.scroll.scroll_to_start(index);
        Ok(self.scrolled(index, moved))
    }

    pub fn scroll_to_end(&mut self, node_id: &str) -> Result<bool> {
        let index = self.index(node_id)?;
        let moved = self.scroll.scroll_to_end(index);
        Ok(self.scrolled(index, moved))
    }

    pub fn set_scroll_offset(&mut self, node_id: &str, offset: f32) -> Result<bool> {
        let index = self.index(node_id)?;
        let moved = self.scroll.set_offset(index, offset);
        Ok(self.scrolled(index, moved))
    }

    /// Scroll state of a container (after its first layout pass).
    pub fn scroll_state(&self, node_id: &str) -> Option<ScrollState> {
        self.tree
            .index_of(node_id)
            .and_then(|index| self.scroll.get(index))
            .copied()
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Add a subtree under `parent_id` and wire its bindings.
    ///
    /// Returns the id of the new subtree root.
    pub fn append_child(&mut self, parent_id: &str, element: Element) -> Result<String> {
        let parent = self.index(parent_id)?;
        validate_element(&element, &self.state)?;

        let index = self.tree.append(parent, element)?;
        resolve(&mut self.tree, index, &self.state, &self.queue, &mut self.bindings)?;
        self.scheduler.collect();

        let id = self.tree.get(index).map(|n| n.id().to_string()).unwrap_or_default();
        debug!(parent = parent_id, node = %id, "appended subtree");
        Ok(id)
    }

    /// Re-parent a node as the last child of `new_parent_id`.
    pub fn move_node(&mut self, node_id: &str, new_parent_id: &str) -> Result<()> {
        let index = self.index(node_id)?;
        let parent = self.index(new_parent_id)?;
        self.tree.move_node(index, parent)?;
        self.scheduler.collect();
        Ok(())
    }

    fn index(&self, node_id: &str) -> Result<usize> {
        self.tree
            .index_of(node_id)
            .ok_or_else(|| SceneError::UnknownNode(node_id.to_string()))
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.tree.by_id(node_id)
    }

    /// Geometry of a node from the last committed frame.
    pub fn geometry(&self, node_id: &str) -> Option<Geometry> {
        self.node(node_id).map(Node::geometry)
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn state(&self) -> &StateNamespace {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.bindings.detach();
    }
}
