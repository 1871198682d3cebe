// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Promise: read-only observer view over a [`Deferred`]

use crate::deferred::Deferred;
use serde_json::Value;
use std::fmt;

/// Read-only projection of a [`Deferred`].
///
/// Forwards exactly the observer surface: `done`, `fail`, `progress`, and
/// the state queries. The mutators (`resolve`, `reject`, `notify`) and
/// `always` are intentionally absent; a promise is a narrower capability,
/// not a structural subtype of its deferred. It holds no state of its own.
#[derive(Clone)]
pub struct Promise {
    deferred: Deferred,
}

impl Promise {
    pub(crate) fn new(deferred: Deferred) -> Self {
        Self { deferred }
    }

    /// Attach a one-shot callback for resolution. Chainable.
    pub fn done(&self, callback: impl Fn(&[Value]) + 'static) -> &Self {
        self.deferred.done(callback);
        self
    }

    /// Attach a one-shot callback for rejection. Chainable.
    pub fn fail(&self, callback: impl Fn(&[Value]) + 'static) -> &Self {
        self.deferred.fail(callback);
        self
    }

    /// Attach a persistent progress callback; `None` once frozen.
    pub fn progress(&self, callback: impl Fn(&[Value]) + 'static) -> Option<&Self> {
        self.deferred.progress(callback)?;
        Some(self)
    }

    pub fn is_resolved(&self) -> bool {
        self.deferred.is_resolved()
    }

    pub fn is_rejected(&self) -> bool {
        self.deferred.is_rejected()
    }

    pub fn is_frozen(&self) -> bool {
        self.deferred.is_frozen()
    }

    pub(crate) fn deferred(&self) -> &Deferred {
        &self.deferred
    }
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("deferred", &self.deferred)
            .finish()
    }
}

#[cfg(test)]
#[path = "promise_tests.rs"]
mod tests;
