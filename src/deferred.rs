// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deferred: a single-assignment future value with a progress side-channel
//!
//! A deferred starts pending and settles exactly once, to resolved or
//! rejected. Settlement arguments are stored so observers that subscribe
//! after the fact replay the original payload. Notification fan-out rides on
//! a private [`Emitter`] with four channels: `resolved`, `rejected`,
//! `always`, and `progress`.

use crate::emitter::{Callback, Emitter};
use crate::error::FrozenError;
use crate::promise::Promise;
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

const RESOLVED: &str = "resolved";
const REJECTED: &str = "rejected";
const ALWAYS: &str = "always";
const PROGRESS: &str = "progress";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pending,
    Resolved,
    Rejected,
}

struct Settlement {
    phase: Phase,
    /// Arguments captured at the freezing transition, replayed to late subscribers
    params: Vec<Value>,
}

/// A three-state future value: pending until resolved or rejected, frozen
/// thereafter.
///
/// `Clone` produces another handle to the same deferred. Every construction
/// is fully isolated: fresh emitter, fresh state, no shared module state.
#[derive(Clone)]
pub struct Deferred {
    emitter: Emitter,
    settlement: Rc<RefCell<Settlement>>,
}

impl Deferred {
    pub fn new() -> Self {
        Self {
            emitter: Emitter::new(),
            settlement: Rc::new(RefCell::new(Settlement {
                phase: Phase::Pending,
                params: Vec::new(),
            })),
        }
    }

    /// Mark the deferred resolved, storing `args` for replay.
    ///
    /// Fires the always channel, then the resolved channel. Errors with
    /// [`FrozenError`] if the deferred has already settled either way.
    pub fn resolve(&self, args: &[Value]) -> Result<(), FrozenError> {
        self.settle(Phase::Resolved, RESOLVED, args)
    }

    /// Mark the deferred rejected, storing `args` for replay.
    ///
    /// Fires the always channel, then the rejected channel. Errors with
    /// [`FrozenError`] if the deferred has already settled either way.
    pub fn reject(&self, args: &[Value]) -> Result<(), FrozenError> {
        self.settle(Phase::Rejected, REJECTED, args)
    }

    fn settle(
        &self,
        phase: Phase,
        channel: &'static str,
        args: &[Value],
    ) -> Result<(), FrozenError> {
        {
            let mut settlement = self.settlement.borrow_mut();
            if settlement.phase != Phase::Pending {
                return Err(FrozenError);
            }
            settlement.phase = phase;
            settlement.params = args.to_vec();
        }
        tracing::debug!(channel, "deferred settled");
        // Always fires before the state-specific channel on the same transition
        self.emitter.emit(ALWAYS, args);
        self.emitter.emit(channel, args);
        Ok(())
    }

    /// Fire the progress channel with `args`. No-op once settled; progress
    /// history is not retained.
    pub fn notify(&self, args: &[Value]) {
        if self.is_frozen() {
            return;
        }
        self.emitter.emit(PROGRESS, args);
    }

    /// Attach a one-shot callback for resolution. If already resolved, the
    /// callback fires immediately with the stored arguments. Chainable.
    pub fn done(&self, callback: impl Fn(&[Value]) + 'static) -> &Self {
        self.subscribe_resolution(Callback::new(callback));
        self
    }

    /// Attach a one-shot callback for rejection. If already rejected, the
    /// callback fires immediately with the stored arguments. Chainable.
    pub fn fail(&self, callback: impl Fn(&[Value]) + 'static) -> &Self {
        self.subscribe_rejection(Callback::new(callback));
        self
    }

    /// Attach a one-shot callback that fires on either settlement. If
    /// already frozen, the callback fires immediately with the stored
    /// arguments. Chainable.
    pub fn always(&self, callback: impl Fn(&[Value]) + 'static) -> &Self {
        self.emitter.once(ALWAYS, Callback::new(callback));
        if self.is_frozen() {
            self.replay(ALWAYS);
        }
        self
    }

    /// Attach a persistent callback for progress notifications.
    ///
    /// Returns `None` without subscribing when the deferred is already
    /// frozen; progress is meaningless after settlement. The asymmetry with
    /// the other subscribe operations (which always chain) is deliberate.
    pub fn progress(&self, callback: impl Fn(&[Value]) + 'static) -> Option<&Self> {
        if self.is_frozen() {
            return None;
        }
        self.emitter.on(PROGRESS, Callback::new(callback));
        Some(self)
    }

    pub fn is_resolved(&self) -> bool {
        self.settlement.borrow().phase == Phase::Resolved
    }

    pub fn is_rejected(&self) -> bool {
        self.settlement.borrow().phase == Phase::Rejected
    }

    /// True once the deferred has settled either way.
    pub fn is_frozen(&self) -> bool {
        self.settlement.borrow().phase != Phase::Pending
    }

    /// Return a read-only view exposing only the observer operations.
    pub fn promise(&self) -> Promise {
        Promise::new(self.clone())
    }

    pub(crate) fn subscribe_resolution(&self, callback: Callback) {
        self.emitter.once(RESOLVED, callback);
        if self.is_resolved() {
            self.replay(RESOLVED);
        }
    }

    pub(crate) fn subscribe_rejection(&self, callback: Callback) {
        self.emitter.once(REJECTED, callback);
        if self.is_rejected() {
            self.replay(REJECTED);
        }
    }

    /// Re-emit a channel with the stored settlement arguments. Listeners
    /// consumed at the original transition are one-shot and already gone, so
    /// only late subscribers fire.
    fn replay(&self, channel: &str) {
        let params = self.settlement.borrow().params.clone();
        self.emitter.emit(channel, &params);
    }
}

impl Default for Deferred {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settlement = self.settlement.borrow();
        f.debug_struct("Deferred")
            .field("phase", &settlement.phase)
            .finish()
    }
}

#[cfg(test)]
#[path = "deferred_tests.rs"]
mod tests;
