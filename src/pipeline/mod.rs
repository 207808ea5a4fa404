//! Update Pipeline
//!
//! Connects state changes to committed frames.
//!
//! # Pipeline Architecture
//!
//! ```text
//! Signal.set → UpdateQueue → drain (dirty marking) → layout pass → DrawList
//! ```
//!
//! ## Data Flow
//!
//! 1. **Collecting** - binding subscribers queue writes; host events mark
//!    nodes dirty directly
//! 2. **Resolving** - [`Scene::tick`] drains the queue, then lays out every
//!    dirty root once
//! 3. **Committed** - the [`DrawList`] is emitted and dirty flags cleared
//!
//! ## Key Design Principles
//!
//! - **No re-entrant layout**: subscribers never touch the tree
//! - **Exactly once**: every queued write is applied in order before layout
//! - **Hit regions as data**: collected with the draw list, not as side effects

pub mod draw;
pub mod events;
pub mod mount;
pub mod scheduler;

pub use draw::{build_draw_list, style_of, DrawCommand, DrawList, HitRegion};
pub use events::InputEvent;
pub use mount::{mount, mount_with_config, Scene};
pub use scheduler::{affects_layout, FrameStats, Phase, Scheduler};
