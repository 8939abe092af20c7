//! Multicast notifications.
//!
//! An [`Event`] is an ordered observer list. Every handler registered at the
//! time of an emission is invoked exactly once, synchronously, in
//! registration order.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Token returned by [`Event::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<A> = Rc<RefCell<dyn FnMut(&A)>>;

/// An ordered list of observers for notifications carrying `A`.
pub struct Event<A> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(HandlerId, Handler<A>)>>,
}

impl<A> Default for Event<A> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }
}

impl<A> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("handlers", &self.len())
            .finish()
    }
}

impl<A> Event<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. It runs after every handler registered before it.
    pub fn subscribe(&self, handler: impl FnMut(&A) + 'static) -> HandlerId {
        let id = HandlerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let handler: Handler<A> = Rc::new(RefCell::new(handler));
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    /// Remove a handler. Returns `false` if it was not registered, which
    /// makes a second unsubscribe a harmless no-op.
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(hid, _)| *hid != id);
        handlers.len() != before
    }

    /// Invoke every registered handler with `args`.
    ///
    /// The handler list is snapshotted first, so handlers may subscribe or
    /// unsubscribe (themselves included) while the event is being emitted.
    /// Handlers added during the emission wait for the next one; handlers
    /// removed during it are not called. A handler that triggers the same
    /// event again is skipped for the nested emission.
    pub fn emit(&self, args: &A) {
        let snapshot: Vec<(HandlerId, Handler<A>)> = self
            .handlers
            .borrow()
            .iter()
            .map(|(id, h)| (*id, Rc::clone(h)))
            .collect();
        for (id, handler) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut f) => (&mut *f)(args),
                Err(_) => log::warn!("Skipping re-entrant event handler"),
            }
        }
    }

    fn is_registered(&self, id: HandlerId) -> bool {
        self.handlers.borrow().iter().any(|(hid, _)| *hid == id)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Payload of value-change notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChanged<T> {
    pub old: T,
    pub new: T,
}
