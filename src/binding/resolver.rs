//! Binding Resolver - wires node slots to state signals.
//!
//! | Attribute            | Mode    | Signal → node | Node → signal |
//! |----------------------|---------|---------------|---------------|
//! | `bind="name"`        | one-way | yes           | no            |
//! | `model="name"`       | two-way | yes           | yes           |
//! | `sync="name"`        | reverse | no            | yes           |
//! | `bind:prop="name"`   | one-way, on property `prop` (same for `model:`/`sync:`) |
//!
//! A property whose value is a signal reference is an implicit one-way
//! binding of that property.
//!
//! Resolution is all-or-nothing per call: every declaration in the subtree is
//! validated before anything is wired, so a failed mount leaves no dangling
//! subscriptions behind.

use std::collections::HashSet;

use tracing::debug;

use crate::engine::{MutationHook, NodeTree, PropValue, Props, Slot};
use crate::error::{Result, SceneError};
use crate::primitives::Element;
use crate::signal::{StateNamespace, StateSignal, SubscriptionHandle};

use super::queue::{PendingWrite, UpdateQueue};

// =============================================================================
// Binding Mode
// =============================================================================

/// Direction of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingMode {
    /// State → node.
    OneWay,
    /// State ↔ node.
    TwoWay,
    /// Node → state.
    Reverse,
}

impl BindingMode {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "bind" => Some(Self::OneWay),
            "model" => Some(Self::TwoWay),
            "sync" => Some(Self::Reverse),
            _ => None,
        }
    }

    /// Whether signal changes are written into the node.
    pub const fn writes_node(&self) -> bool {
        matches!(self, Self::OneWay | Self::TwoWay)
    }

    /// Whether node mutations are written back into the signal.
    pub const fn has_hook(&self) -> bool {
        matches!(self, Self::TwoWay | Self::Reverse)
    }
}

/// Split a property key into a binding mode and optional property name.
///
/// `"bind"` → `(OneWay, None)`, `"model:value"` → `(TwoWay, Some("value"))`.
/// Keys that are not binding attributes return `None`.
pub fn parse_binding_attribute(key: &str) -> Option<(BindingMode, Option<&str>)> {
    match key.split_once(':') {
        Some((prefix, prop)) => BindingMode::from_prefix(prefix).map(|mode| (mode, Some(prop))),
        None => BindingMode::from_prefix(key).map(|mode| (mode, None)),
    }
}

// =============================================================================
// Binding Table
// =============================================================================

/// A wired binding.
#[derive(Debug)]
pub struct Binding {
    pub node: usize,
    pub node_id: String,
    pub slot: Slot,
    /// State name. `None` for signal-valued properties.
    pub name: Option<String>,
    pub mode: BindingMode,
    signal: StateSignal,
    subscription: Option<SubscriptionHandle>,
}

impl Binding {
    pub fn signal(&self) -> &StateSignal {
        &self.signal
    }
}

/// Every binding of a scene. At most one per (node, slot).
#[derive(Debug, Default)]
pub struct BindingTable {
    bindings: Vec<Binding>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    /// The binding for a (node, slot) pair.
    pub fn get(&self, node: usize, slot: &Slot) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.node == node && &b.slot == slot)
    }

    /// Unsubscribe every binding and forget them.
    pub fn detach(&mut self) {
        for binding in self.bindings.drain(..) {
            if let Some(handle) = binding.subscription {
                binding.signal.unsubscribe(handle);
            }
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

struct Declaration {
    node: usize,
    node_id: String,
    /// Attribute to strip from the node once wired.
    attribute: Option<String>,
    slot: Slot,
    mode: BindingMode,
    name: Option<String>,
    signal: StateSignal,
}

/// Resolve every binding declared in the subtree rooted at `from`.
///
/// Returns the number of bindings wired.
pub fn resolve(
    tree: &mut NodeTree,
    from: usize,
    state: &StateNamespace,
    queue: &UpdateQueue,
    table: &mut BindingTable,
) -> Result<usize> {
    let mut seen: HashSet<(usize, Slot)> = table.iter().map(|b| (b.node, b.slot.clone())).collect();
    let mut declarations = Vec::new();

    for index in tree.preorder(from) {
        let Some(node) = tree.get(index) else {
            continue;
        };
        for decl in declarations_of(index, node.id(), node.props(), state)? {
            if !seen.insert((decl.node, decl.slot.clone())) {
                return Err(SceneError::DuplicateBinding {
                    node_id: decl.node_id,
                    slot: decl.slot.to_string(),
                });
            }
            declarations.push(decl);
        }
    }

    let count = declarations.len();
    for decl in declarations {
        wire(tree, decl, queue, table);
    }
    Ok(count)
}

/// Check the binding declarations of an element subtree without wiring
/// anything. Elements without an id are reported by tag.
pub fn validate_element(element: &Element, state: &StateNamespace) -> Result<()> {
    let mut pending = vec![element];
    while let Some(el) = pending.pop() {
        let node_id = el.id.as_deref().unwrap_or(&el.tag);
        let mut slots = HashSet::new();
        for decl in declarations_of(0, node_id, &el.props, state)? {
            if !slots.insert(decl.slot.clone()) {
                return Err(SceneError::DuplicateBinding {
                    node_id: decl.node_id,
                    slot: decl.slot.to_string(),
                });
            }
        }
        pending.extend(el.children.iter());
    }
    Ok(())
}

fn declarations_of(index: usize, node_id: &str, props: &Props, state: &StateNamespace) -> Result<Vec<Declaration>> {
    let mut out = Vec::new();

    for (key, value) in props {
        let Some((mode, prop)) = parse_binding_attribute(key) else {
            if let PropValue::Signal(signal) = value {
                out.push(Declaration {
                    node: index,
                    node_id: node_id.to_string(),
                    attribute: None,
                    slot: Slot::Prop(key.clone()),
                    mode: BindingMode::OneWay,
                    name: None,
                    signal: signal.clone(),
                });
            }
            continue;
        };

        let invalid = || SceneError::InvalidBindingAttribute {
            node_id: node_id.to_string(),
            attribute: key.clone(),
        };

        let slot = match prop.map(str::trim) {
            None => Slot::Content,
            Some("") => return Err(invalid()),
            Some(name) => Slot::Prop(name.to_string()),
        };

        let (name, signal) = match value {
            PropValue::Signal(signal) => (None, signal.clone()),
            PropValue::String(name) if !name.trim().is_empty() => {
                let name = name.trim();
                let signal = state
                    .get(name)
                    .ok_or_else(|| SceneError::UnknownBindingTarget {
                        node_id: node_id.to_string(),
                        name: name.to_string(),
                    })?;
                (Some(name.to_string()), signal.clone())
            }
            _ => return Err(invalid()),
        };

        out.push(Declaration {
            node: index,
            node_id: node_id.to_string(),
            attribute: Some(key.clone()),
            slot,
            mode,
            name,
            signal,
        });
    }

    Ok(out)
}

fn wire(tree: &mut NodeTree, decl: Declaration, queue: &UpdateQueue, table: &mut BindingTable) {
    let Some(node) = tree.get_mut(decl.node) else {
        return;
    };

    if let Some(attribute) = &decl.attribute {
        node.props.shift_remove(attribute);
    }

    if decl.mode.writes_node() {
        let initial = decl.signal.get().resolved();
        match &decl.slot {
            Slot::Prop(key) => {
                node.props.insert(key.clone(), initial);
            }
            Slot::Content => {
                node.write_slot(&Slot::Content, &initial);
            }
        }
    }

    if decl.mode.has_hook() {
        node.hooks.push(MutationHook {
            slot: decl.slot.clone(),
            signal: decl.signal.clone(),
        });
    }

    let subscription = decl.mode.writes_node().then(|| {
        let queue = queue.clone();
        let index = decl.node;
        let slot = decl.slot.clone();
        decl.signal.subscribe(move |value| {
            queue.push(PendingWrite {
                node: index,
                slot: slot.clone(),
                value: value.clone(),
            });
        })
    });

    debug!(
        node = %decl.node_id,
        slot = %decl.slot,
        name = decl.name.as_deref().unwrap_or("<signal>"),
        mode = ?decl.mode,
        "wired binding"
    );

    table.bindings.push(Binding {
        node: decl.node,
        node_id: decl.node_id,
        slot: decl.slot,
        name: decl.name,
        mode: decl.mode,
        signal: decl.signal,
        subscription,
    });
}
