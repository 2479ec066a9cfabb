//! Listener registry and the change-notification channel.
//!
//! Listeners are zero-argument callbacks. They receive no payload and are
//! expected to re-read whatever state they care about through getters.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Handle returned by [`Listeners::watch`], used to deregister a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered change callback.
pub type Listener = Rc<dyn Fn()>;

/// Ordered registry of change listeners.
///
/// Cloning a `Listeners` yields another handle to the same registry, which
/// lets a listener hold on to the registry and unwatch itself (or watch
/// others) while a notification pass is running. Each pass delivers to the
/// listeners registered when the pass started.
#[derive(Clone, Default)]
pub struct Listeners {
    entries: Rc<RefCell<Vec<(ListenerId, Listener)>>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; registration order is notification order.
    pub fn watch<F>(&self, listener: F) -> ListenerId
    where
        F: Fn() + 'static,
    {
        let id = ListenerId::new();
        self.entries.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Deregister a listener. Returns `false` if `id` was not registered.
    pub fn unwatch(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke every registered listener in registration order.
    pub fn notify(&self) {
        let pass: Vec<Listener> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        tracing::trace!(listeners = pass.len(), "notifying listeners");

        for listener in pass {
            listener();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}

/// Anything that broadcasts change notifications.
pub trait Observable {
    /// The registry notified on every successful mutation.
    fn listeners(&self) -> &Listeners;

    fn watch<F>(&self, listener: F) -> ListenerId
    where
        F: Fn() + 'static,
        Self: Sized,
    {
        self.listeners().watch(listener)
    }

    fn unwatch(&self, id: ListenerId) -> bool {
        self.listeners().unwatch(id)
    }

    fn notify(&self) {
        self.listeners().notify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn notifies_in_registration_order() {
        let listeners = Listeners::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            listeners.watch(move || order.borrow_mut().push(label));
        }

        listeners.notify();
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unwatch_removes_only_that_listener() {
        let listeners = Listeners::new();
        let hits = Rc::new(Cell::new(0));

        let a = {
            let hits = Rc::clone(&hits);
            listeners.watch(move || hits.set(hits.get() + 1))
        };
        {
            let hits = Rc::clone(&hits);
            listeners.watch(move || hits.set(hits.get() + 10));
        }

        assert!(listeners.unwatch(a));
        listeners.notify();
        assert_eq!(hits.get(), 10);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn unwatch_unknown_is_noop() {
        let listeners = Listeners::new();
        listeners.watch(|| {});
        let stranger = Listeners::new().watch(|| {});

        assert!(!listeners.unwatch(stranger));
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn registration_during_pass_waits_for_next_pass() {
        let listeners = Listeners::new();
        let late_hits = Rc::new(Cell::new(0));

        {
            let registry = listeners.clone();
            let late_hits = Rc::clone(&late_hits);
            listeners.watch(move || {
                let late_hits = Rc::clone(&late_hits);
                registry.watch(move || late_hits.set(late_hits.get() + 1));
            });
        }

        listeners.notify();
        assert_eq!(late_hits.get(), 0);
        assert_eq!(listeners.len(), 2);

        listeners.notify();
        assert_eq!(late_hits.get(), 1);
    }

    #[test]
    fn removal_during_pass_does_not_skip_delivery() {
        let listeners = Listeners::new();
        let hits = Rc::new(Cell::new(0));
        let second_id = Rc::new(Cell::new(None));

        {
            let registry = listeners.clone();
            let second_id = Rc::clone(&second_id);
            listeners.watch(move || {
                if let Some(id) = second_id.get() {
                    registry.unwatch(id);
                }
            });
        }
        {
            let hits = Rc::clone(&hits);
            second_id.set(Some(listeners.watch(move || hits.set(hits.get() + 1))));
        }

        listeners.notify();
        assert_eq!(hits.get(), 1);

        listeners.notify();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn panicking_listener_leaves_registry_usable() {
        let listeners = Listeners::new();
        let before = Rc::new(Cell::new(0));
        {
            let before = Rc::clone(&before);
            listeners.watch(move || before.set(before.get() + 1));
        }
        let failing = listeners.watch(|| panic!("listener failure"));

        let result = panic::catch_unwind(AssertUnwindSafe(|| listeners.notify()));
        assert!(result.is_err());
        assert_eq!(before.get(), 1);

        let after = Rc::new(Cell::new(0));
        {
            let after = Rc::clone(&after);
            listeners.watch(move || after.set(after.get() + 1));
        }
        assert_eq!(listeners.len(), 3);

        // The failing listener is still registered, so the pass panics again
        // before reaching the later one.
        let result = panic::catch_unwind(AssertUnwindSafe(|| listeners.notify()));
        assert!(result.is_err());
        assert_eq!(before.get(), 2);
        assert_eq!(after.get(), 0);

        assert!(listeners.unwatch(failing));
        listeners.notify();
        assert_eq!(before.get(), 3);
        assert_eq!(after.get(), 1);
    }
}
