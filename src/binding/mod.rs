//! Bindings between state signals and node slots.
//!
//! - [`resolve`]: turns `bind`/`model`/`sync` attributes into subscriptions
//!   and node-side mutation hooks
//! - [`UpdateQueue`]: where subscribers leave their writes for the scheduler

mod queue;
mod resolver;

pub use queue::{PendingWrite, UpdateQueue};
pub use resolver::{parse_binding_attribute, resolve, validate_element, Binding, BindingMode, BindingTable};
