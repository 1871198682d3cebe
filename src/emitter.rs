// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named-event registry with synchronous, registration-ordered dispatch

use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A subscriber callback for event dispatch.
///
/// Cheap to clone; all clones of one registration share identity. Identity
/// (`Callback::ptr_eq`) is the removal key for [`Emitter::off`] — two
/// separately constructed callbacks are never equal, even when built from
/// identical closures. Context from the call site travels by closure capture.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&[Value])>);

impl Callback {
    pub fn new(f: impl Fn(&[Value]) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback with positional arguments.
    pub fn call(&self, args: &[Value]) {
        (self.0)(args)
    }

    /// Reference identity: true only for clones of the same registration.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// A single registration record for an event.
#[derive(Clone, Debug)]
pub struct Listener {
    pub callback: Callback,
    /// One-shot listeners unregister themselves before their only invocation
    pub once: bool,
}

/// Named-event publish/subscribe registry.
///
/// Dispatch is synchronous and in registration order. `Clone` shares the
/// registry, so an emitter handle can be captured inside its own callbacks;
/// [`Emitter::emit`] iterates a snapshot, which keeps that re-entrancy safe.
///
/// Single cooperative execution context only: state lives behind
/// `Rc<RefCell<..>>` and no locking is provided.
#[derive(Clone, Default)]
pub struct Emitter {
    listeners: Rc<RefCell<HashMap<String, Vec<Listener>>>>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a persistent event handler. Chainable.
    pub fn on(&self, event: &str, callback: Callback) -> &Self {
        self.attach(event, callback, false);
        self
    }

    /// Attach a handler that fires at most once. Chainable.
    pub fn once(&self, event: &str, callback: Callback) -> &Self {
        self.attach(event, callback, true);
        self
    }

    fn attach(&self, event: &str, callback: Callback, once: bool) {
        let mut listeners = self.listeners.borrow_mut();
        listeners
            .entry(event.to_string())
            .or_default()
            .push(Listener { callback, once });
    }

    /// Detach event handlers.
    ///
    /// With `None`, removes every handler for `event`. With `Some(cb)`,
    /// removes only records whose callback is [`Callback::ptr_eq`] to `cb`;
    /// an event whose list empties is dropped from the registry entirely,
    /// which is observably the same as an empty list. Unknown events and
    /// unknown callbacks are no-ops.
    pub fn off(&self, event: &str, callback: Option<&Callback>) {
        let mut listeners = self.listeners.borrow_mut();
        let Some(callback) = callback else {
            listeners.remove(event);
            return;
        };
        if let Some(records) = listeners.get_mut(event) {
            records.retain(|r| !Callback::ptr_eq(&r.callback, callback));
            if records.is_empty() {
                listeners.remove(event);
            }
        }
    }

    /// Return a snapshot of the current listeners for `event`, in
    /// registration order, or an empty vec if none are registered.
    /// Mutating the returned vec does not affect the registry.
    pub fn listeners(&self, event: &str) -> Vec<Listener> {
        self.listeners
            .borrow()
            .get(event)
            .cloned()
            .unwrap_or_default()
    }

    /// Synchronously invoke every listener registered for `event`, in
    /// registration order, passing `args` to each.
    ///
    /// Iterates over a snapshot taken at call time: handlers attached or
    /// detached by a callback mid-emit do not change the set invoked by this
    /// call. One-shot listeners are unregistered immediately before their
    /// invocation. Emitting with zero listeners is a no-op.
    pub fn emit(&self, event: &str, args: &[Value]) {
        let snapshot = self.listeners(event);
        if snapshot.is_empty() {
            return;
        }
        tracing::trace!(event, count = snapshot.len(), "emit");
        for listener in snapshot {
            if listener.once {
                self.off(event, Some(&listener.callback));
            }
            listener.callback.call(args);
        }
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        f.debug_struct("Emitter")
            .field("events", &listeners.len())
            .finish()
    }
}

/// Mixin granting a type the emitter capability set.
///
/// Implementors supply the backing emitter; `on`/`once`/`off`/`emit`/
/// `listeners` are provided by delegation, so any struct holding an
/// [`Emitter`] field can expose the full surface:
///
/// ```
/// use eventual::{Emits, Emitter};
///
/// struct Widget {
///     events: Emitter,
/// }
///
/// impl Emits for Widget {
///     fn emitter(&self) -> &Emitter {
///         &self.events
///     }
/// }
/// ```
pub trait Emits {
    /// The backing emitter all provided methods delegate to.
    fn emitter(&self) -> &Emitter;

    fn on(&self, event: &str, callback: Callback) -> &Self
    where
        Self: Sized,
    {
        self.emitter().on(event, callback);
        self
    }

    fn once(&self, event: &str, callback: Callback) -> &Self
    where
        Self: Sized,
    {
        self.emitter().once(event, callback);
        self
    }

    fn off(&self, event: &str, callback: Option<&Callback>) {
        self.emitter().off(event, callback);
    }

    fn listeners(&self, event: &str) -> Vec<Listener> {
        self.emitter().listeners(event)
    }

    fn emit(&self, event: &str, args: &[Value]) {
        self.emitter().emit(event, args);
    }
}

#[cfg(test)]
#[path = "emitter_tests.rs"]
mod tests;
