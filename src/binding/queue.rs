//! Pending writes from signal subscribers to node slots.
//!
//! Binding subscribers never touch the tree. They push a [`PendingWrite`]
//! and the scheduler drains the queue, in order, before resolving layout.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::engine::{PropValue, Slot};

/// A value on its way from a signal into a node slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingWrite {
    pub node: usize,
    pub slot: Slot,
    pub value: PropValue,
}

/// Shared FIFO of pending writes.
///
/// Cloning shares the queue.
#[derive(Debug, Clone, Default)]
pub struct UpdateQueue {
    inner: Rc<RefCell<VecDeque<PendingWrite>>>,
}

impl UpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, write: PendingWrite) {
        self.inner.borrow_mut().push_back(write);
    }

    /// Pop the oldest write. The queue is not borrowed once this returns,
    /// so applying the write may enqueue more.
    pub fn pop(&self) -> Option<PendingWrite> {
        self.inner.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}
