//! Observable value holder for the current theme.
//!
//! [`Observable`] is a single-threaded cell that notifies registered listeners
//! whenever its value changes. Handles are cheap to clone and all point at the
//! same cell, so a UI layer can keep one around to read or subscribe while the
//! controller remains the only writer.
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use themeswitch::{MemoryRoot, StorageChoice, ThemeController, ThemeOptions};
//!
//! let options = ThemeOptions::new(["light", "dark"]).storage(StorageChoice::None);
//! let mut controller = ThemeController::new(options, MemoryRoot::new()).unwrap();
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! controller.state().subscribe(move |theme: &String| sink.borrow_mut().push(theme.clone()));
//!
//! controller.toggle_theme();
//! assert_eq!(*seen.borrow(), vec!["dark".to_string()]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Listener<T> = Box<dyn FnMut(&T)>;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct Inner<T> {
    value: T,
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
    // Listeners are moved out while being notified; removals requested in the
    // meantime are applied once they are put back.
    notifying: bool,
    removed: Vec<u64>,
}

/// A value that notifies subscribers on change.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Creates an observable holding `value`, with no subscribers.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                listeners: Vec::new(),
                next_id: 0,
                notifying: false,
                removed: Vec::new(),
            })),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Registers a listener called with the new value after every change.
    ///
    /// Listeners run in registration order. A listener added while others are
    /// being notified is first called on the next change.
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Box::new(listener)));
        Subscription(id)
    }

    /// Removes a listener. Returns `false` if it was not registered here.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut inner = self.inner.borrow_mut();
        if let Some(pos) = inner
            .listeners
            .iter()
            .position(|(id, _)| *id == subscription.0)
        {
            inner.listeners.remove(pos);
            return true;
        }
        if inner.notifying && subscription.0 < inner.next_id {
            inner.removed.push(subscription.0);
            return true;
        }
        false
    }

    /// Returns the number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        let inner = self.inner.borrow();
        inner.listeners.len()
    }

    /// Stores `value` and notifies listeners if it differs from the current one.
    ///
    /// Returns whether the value changed.
    pub(crate) fn replace(&self, value: T) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
        }
        self.notify();
        true
    }

    fn notify(&self) {
        let (value, mut listeners) = {
            let mut inner = self.inner.borrow_mut();
            inner.notifying = true;
            (inner.value.clone(), std::mem::take(&mut inner.listeners))
        };

        for (_, listener) in listeners.iter_mut() {
            listener(&value);
        }

        let mut inner = self.inner.borrow_mut();
        let removed = std::mem::take(&mut inner.removed);
        listeners.retain(|(id, _)| !removed.contains(id));
        listeners.append(&mut inner.listeners);
        inner.listeners = listeners;
        inner.notifying = false;
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("subscribers", &inner.listeners.len())
            .finish()
    }
}
