//! Signal - reactive state cell with ordered subscribers.
//!
//! # Invariants
//!
//! 1. `get()` returns the value passed to the most recent `set()`.
//! 2. Subscribers are notified in registration order, synchronously.
//! 3. Every `set()` notifies every current subscriber exactly once, even
//!    when the values are equal.
//! 4. A `set()` issued while the same signal is notifying is queued (FIFO)
//!    and delivered after the current pass. Every queued value is delivered,
//!    in order; nothing is coalesced.
//! 5. Unsubscribing is idempotent. A subscriber removed during a pass is not
//!    called for the remainder of that pass.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

// =============================================================================
// Subscription Handle
// =============================================================================

/// Handle returned by [`Signal::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

/// Subscriber callback type (Rc so a notification pass can run without
/// holding the signal borrowed).
pub type Subscriber<T> = Rc<dyn Fn(&T)>;

struct SubscriberEntry<T> {
    id: u64,
    callback: Subscriber<T>,
}

struct SignalInner<T> {
    value: T,
    subscribers: Vec<SubscriberEntry<T>>,
    next_id: u64,
    notifying: bool,
    pending: VecDeque<T>,
}

// =============================================================================
// Signal
// =============================================================================

/// A shared reactive cell.
///
/// Cloning a `Signal` clones the reference, not the value: every clone
/// observes and mutates the same cell.
pub struct Signal<T> {
    inner: Rc<RefCell<SignalInner<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Signal")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Create a new signal holding `value`.
pub fn signal<T: Clone + 'static>(value: T) -> Signal<T> {
    Signal::new(value)
}

impl<T: Clone + 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                value,
                subscribers: Vec::new(),
                next_id: 0,
                notifying: false,
                pending: VecDeque::new(),
            })),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify subscribers.
    ///
    /// Called from inside one of this signal's subscribers, the value is
    /// stored immediately but its notification is queued behind the pass in
    /// progress.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            if inner.notifying {
                inner.pending.push_back(value);
                return;
            }
            inner.notifying = true;
        }

        let _guard = NotifyGuard {
            inner: &self.inner,
        };

        let mut next = Some(value);
        while let Some(current) = next {
            self.notify(&current);
            next = self.inner.borrow_mut().pending.pop_front();
        }
    }

    /// Compute a new value from the current one and `set` it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let value = self.with(f);
        self.set(value);
    }

    /// Register a subscriber. It is not called for the current value.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriptionHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push(SubscriberEntry {
            id,
            callback: Rc::new(f),
        });
        SubscriptionHandle(id)
    }

    /// Remove a subscriber. Unknown or already removed handles are ignored.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|entry| entry.id != handle.0);
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Whether two handles point at the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self, value: &T) {
        // Snapshot so subscribers may subscribe/unsubscribe while we iterate.
        let snapshot: Vec<(u64, Subscriber<T>)> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|entry| (entry.id, Rc::clone(&entry.callback)))
            .collect();

        for (id, callback) in snapshot {
            let still_subscribed = self
                .inner
                .borrow()
                .subscribers
                .iter()
                .any(|entry| entry.id == id);
            if still_subscribed {
                callback(value);
            }
        }
    }
}

/// Clears the notifying flag even if a subscriber panics.
struct NotifyGuard<'a, T> {
    inner: &'a Rc<RefCell<SignalInner<T>>>,
}

impl<T> Drop for NotifyGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.notifying = false;
            inner.pending.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_get_returns_latest() {
        let s = signal(1);
        assert_eq!(s.get(), 1);
        s.set(2);
        s.set(3);
        assert_eq!(s.get(), 3);
    }

    #[test]
    fn test_subscribers_in_registration_order() {
        let s = signal(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let log = log.clone();
            s.subscribe(move |v: &i32| log.borrow_mut().push(format!("{tag}{v}")));
        }

        s.set(7);
        assert_eq!(*log.borrow(), vec!["a7", "b7", "c7"]);
    }

    #[test]
    fn test_equal_values_still_notify() {
        let s = signal(5);
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        s.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));

        s.set(5);
        s.set(5);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let s = signal(0);
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let handle = s.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));

        s.unsubscribe(handle);
        s.unsubscribe(handle);
        s.unsubscribe(SubscriptionHandle(999));
        s.set(1);

        assert_eq!(calls.get(), 0);
        assert_eq!(s.subscriber_count(), 0);
    }

    #[test]
    fn test_reentrant_set_is_queued_not_recursive() {
        let s = signal(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let depth = Rc::new(Cell::new(0));

        {
            let s2 = s.clone();
            let log = log.clone();
            let depth = depth.clone();
            s.subscribe(move |v: &i32| {
                depth.set(depth.get() + 1);
                assert_eq!(depth.get(), 1, "notification must not recurse");
                log.borrow_mut().push(("first", *v));
                if *v < 3 {
                    s2.set(v + 1);
                    // The value is visible right away even though delivery is deferred.
                    assert_eq!(s2.get(), v + 1);
                }
                depth.set(depth.get() - 1);
            });
        }
        {
            let log = log.clone();
            s.subscribe(move |v: &i32| log.borrow_mut().push(("second", *v)));
        }

        s.set(1);

        assert_eq!(
            *log.borrow(),
            vec![
                ("first", 1),
                ("second", 1),
                ("first", 2),
                ("second", 2),
                ("first", 3),
                ("second", 3),
            ]
        );
        assert_eq!(s.get(), 3);
    }

    #[test]
    fn test_every_queued_value_delivered_in_order() {
        let s = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let fired = Rc::new(Cell::new(false));

        {
            let s2 = s.clone();
            let fired = fired.clone();
            s.subscribe(move |_| {
                if !fired.get() {
                    fired.set(true);
                    s2.set(10);
                    s2.set(20);
                }
            });
        }
        {
            let seen = seen.clone();
            s.subscribe(move |v: &i32| seen.borrow_mut().push(*v));
        }

        s.set(1);
        assert_eq!(*seen.borrow(), vec![1, 10, 20]);
        assert_eq!(s.get(), 20);
    }

    #[test]
    fn test_unsubscribe_during_pass_skips_later_subscriber() {
        let s = signal(0);
        let handle_slot: Rc<Cell<Option<SubscriptionHandle>>> = Rc::new(Cell::new(None));
        let calls = Rc::new(Cell::new(0));

        {
            let s2 = s.clone();
            let handle_slot = handle_slot.clone();
            s.subscribe(move |_| {
                if let Some(h) = handle_slot.get() {
                    s2.unsubscribe(h);
                }
            });
        }
        let calls_clone = calls.clone();
        let second = s.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));
        handle_slot.set(Some(second));

        s.set(1);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_update_and_with() {
        let s = signal(String::from("ab"));
        s.update(|v| format!("{v}c"));
        assert_eq!(s.with(|v| v.len()), 3);
        assert_eq!(s.get(), "abc");
    }

    #[test]
    fn test_clone_shares_cell() {
        let a = signal(1);
        let b = a.clone();
        b.set(9);
        assert_eq!(a.get(), 9);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&signal(9)));
    }
}
