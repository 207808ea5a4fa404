//! # spark-scene
//!
//! Reactive layout-and-update engine for declarative, web-like UI trees.
//!
//! A markup parser hands over a tree of typed [`Element`]s with binding
//! attributes (`bind`, `model`, `sync`). Mounting it against a
//! [`StateNamespace`] wires nodes to [`Signal`]s; every `set` is queued,
//! drained once per tick, laid out incrementally and committed as a
//! [`DrawList`] for the host's renderer.
//!
//! ## Architecture
//!
//! ```text
//! Element tree → NodeTree + bindings → Signal.set → UpdateQueue
//!              → dirty roots → layout pass → DrawList
//! ```
//!
//! Nodes are indices into one arena. Parent indices are non-owning back
//! references used for upward dirty propagation.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Geometry, Rgba, Style, LayoutMode, DirtyFlags, ...)
//! - [`signal`] - Reactive cells and the state namespace
//! - [`engine`] - Nodes, properties, the node tree
//! - [`binding`] - Binding resolution and the pending-write queue
//! - [`layout`] - Sizing and positioning with responsive overrides
//! - [`state`] - Scroll controller
//! - [`pipeline`] - Scheduler, draw emission, events, [`Scene`]
//! - [`primitives`] - Element builders

pub mod binding;
pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod signal;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{Breakpoint, EngineConfig};

pub use error::{LayoutDiagnostic, MeasureError, Result, SceneError};

pub use signal::{signal, Signal, StateNamespace, StateSignal, SubscriptionHandle};

pub use engine::{Content, Node, NodeTree, PropValue, Props, Slot};

pub use binding::{BindingMode, BindingTable};

pub use layout::{compute_layout, string_width, LayoutContext, LayoutReport, Measure, MonospaceMeasure};

pub use state::{ScrollController, ScrollState};

pub use pipeline::{
    mount, mount_with_config, DrawCommand, DrawList, FrameStats, HitRegion, InputEvent, Phase, Scene,
};

pub use primitives::{
    app, block, button, column, image, input, row, text, ChangeHandler, ClickEvent, ClickHandler,
    Element,
};
