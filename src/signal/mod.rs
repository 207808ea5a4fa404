//! Reactive state.
//!
//! - [`Signal`]: a shared cell with ordered, synchronous subscribers and a
//!   FIFO for re-entrant sets.
//! - [`StateNamespace`]: the application's name → signal registry that
//!   bindings resolve against.

mod cell;
mod state;

pub use cell::{signal, Signal, Subscriber, SubscriptionHandle};
pub use state::{StateNamespace, StateSignal};
