//! Node - one element of the scene tree.
//!
//! A node owns its property bag, leaf content, computed geometry and dirty
//! flags. Children and parent are arena indices into the owning
//! [`NodeTree`](super::NodeTree); the parent index is a non-owning back
//! reference used only for upward dirty marking.

use std::fmt;

use taffy::geometry::Size;

use crate::layout::LayoutContext;
use crate::primitives::{ChangeHandler, ClickHandler};
use crate::signal::StateSignal;
use crate::types::{DirtyFlags, Geometry, NodeKind};

use super::props::{PropValue, Props};

// =============================================================================
// Content + Slots
// =============================================================================

/// Leaf content of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    /// Opaque handle the renderer knows how to draw (image, icon, ...).
    Handle(u64),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Handle(_) => None,
        }
    }
}

/// Target of a binding: the node's content or a named property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    Content,
    Prop(String),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content => f.write_str("content"),
            Self::Prop(name) => f.write_str(name),
        }
    }
}

/// Node-side hook installed by two-way and reverse bindings.
///
/// When the node's `slot` is mutated by input, `signal` is set.
#[derive(Debug, Clone)]
pub struct MutationHook {
    pub slot: Slot,
    pub signal: StateSignal,
}

// =============================================================================
// Node
// =============================================================================

/// A scene node.
pub struct Node {
    pub(crate) id: String,
    pub(crate) tag: String,
    pub(crate) kind: NodeKind,
    pub(crate) props: Props,
    pub(crate) content: Option<Content>,
    pub(crate) children: Vec<usize>,
    pub(crate) parent: Option<usize>,
    pub(crate) geometry: Geometry,
    /// Size from the last sizing pass; valid while the node is not LAYOUT-dirty.
    pub(crate) measured: Size<f32>,
    /// Layout rules resolved by the last sizing pass.
    pub(crate) context: LayoutContext,
    pub(crate) dirty: DirtyFlags,
    pub(crate) on_click: Option<ClickHandler>,
    pub(crate) on_change: Option<ChangeHandler>,
    pub(crate) hooks: Vec<MutationHook>,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("props", &self.props)
            .field("content", &self.content)
            .field("children", &self.children)
            .field("parent", &self.parent)
            .field("geometry", &self.geometry)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Node {
    pub(crate) fn new(id: String, tag: String) -> Self {
        let kind = NodeKind::from_tag(&tag);
        Self {
            id,
            tag,
            kind,
            props: Props::new(),
            content: None,
            children: Vec::new(),
            parent: None,
            geometry: Geometry::default(),
            measured: Size {
                width: 0.0,
                height: 0.0,
            },
            context: LayoutContext::default(),
            dirty: DirtyFlags::LAYOUT | DirtyFlags::PAINT,
            on_click: None,
            on_change: None,
            hooks: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().and_then(Content::as_text)
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Geometry from the last committed layout pass.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Layout rules from the last sizing pass.
    pub fn layout_context(&self) -> &LayoutContext {
        &self.context
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn has_click_handler(&self) -> bool {
        self.on_click.is_some()
    }

    /// Hooks bound to `slot`.
    pub fn hooks_for<'a>(&'a self, slot: &'a Slot) -> impl Iterator<Item = &'a MutationHook> + 'a {
        self.hooks.iter().filter(move |hook| &hook.slot == slot)
    }

    // =========================================================================
    // Slot access
    // =========================================================================

    /// Current value held by a slot.
    pub fn slot_value(&self, slot: &Slot) -> Option<PropValue> {
        match slot {
            Slot::Content => match &self.content {
                Some(Content::Text(s)) => Some(PropValue::String(s.clone())),
                Some(Content::Handle(h)) => Some(PropValue::Number(*h as f64)),
                None => None,
            },
            Slot::Prop(name) => self.props.get(name).map(PropValue::resolved),
        }
    }

    /// Write a value into a slot.
    ///
    /// Returns `false` (and changes nothing) when the slot already shows the
    /// value.
    pub(crate) fn write_slot(&mut self, slot: &Slot, value: &PropValue) -> bool {
        match slot {
            Slot::Content => {
                let next = match (self.kind, value.resolved()) {
                    (NodeKind::Image, PropValue::Number(n)) if n >= 0.0 => Content::Handle(n as u64),
                    (_, resolved) => Content::Text(resolved.to_display()),
                };
                if self.content.as_ref() == Some(&next) {
                    return false;
                }
                self.content = Some(next);
                true
            }
            Slot::Prop(name) => {
                let next = value.resolved();
                if self.props.get(name).map(PropValue::resolved).as_ref() == Some(&next) {
                    return false;
                }
                self.props.insert(name.clone(), next);
                true
            }
        }
    }
}
