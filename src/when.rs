// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `when`: fan-in aggregation of many inputs into one promise
//!
//! Combines N deferred-like or plain-value inputs into a single derived
//! [`Deferred`], exposed as its [`Promise`]. Resolution waits for all
//! inputs; rejection short-circuits on the first failure.

use crate::deferred::Deferred;
use crate::emitter::Callback;
use crate::promise::Promise;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// The capability an aggregation input must offer: one-shot subscription to
/// its resolution and rejection outcomes, with immediate replay when the
/// input has already settled.
pub trait Awaitable {
    fn on_done(&self, callback: Callback);
    fn on_fail(&self, callback: Callback);
}

impl Awaitable for Deferred {
    fn on_done(&self, callback: Callback) {
        self.subscribe_resolution(callback);
    }

    fn on_fail(&self, callback: Callback) {
        self.subscribe_rejection(callback);
    }
}

impl Awaitable for Promise {
    fn on_done(&self, callback: Callback) {
        self.deferred().subscribe_resolution(callback);
    }

    fn on_fail(&self, callback: Callback) {
        self.deferred().subscribe_rejection(callback);
    }
}

/// One input to [`when`], classified at collection time rather than by
/// structural inspection: either something awaitable or a plain value that
/// counts as already resolved.
pub enum WhenInput {
    Awaitable(Rc<dyn Awaitable>),
    Plain(Value),
}

impl From<Deferred> for WhenInput {
    fn from(deferred: Deferred) -> Self {
        WhenInput::Awaitable(Rc::new(deferred))
    }
}

impl From<Promise> for WhenInput {
    fn from(promise: Promise) -> Self {
        WhenInput::Awaitable(Rc::new(promise))
    }
}

impl From<Value> for WhenInput {
    fn from(value: Value) -> Self {
        WhenInput::Plain(value)
    }
}

impl From<&str> for WhenInput {
    fn from(value: &str) -> Self {
        WhenInput::Plain(Value::from(value))
    }
}

impl From<i64> for WhenInput {
    fn from(value: i64) -> Self {
        WhenInput::Plain(Value::from(value))
    }
}

impl From<bool> for WhenInput {
    fn from(value: bool) -> Self {
        WhenInput::Plain(Value::from(value))
    }
}

/// Combine `inputs` into one promise.
///
/// The result resolves once every input has resolved, with one positional
/// argument per input in registration order: an input that resolved with a
/// single argument contributes it as-is, zero arguments contribute `Null`,
/// and multiple arguments collapse into one array. The result rejects with
/// the arguments of the first rejecting input; later rejections are dropped
/// silently. Zero inputs resolve immediately with no arguments.
///
/// Inputs that settled before aggregation complete synchronously through
/// the ordinary replay path of their subscriptions.
pub fn when(inputs: Vec<WhenInput>) -> Promise {
    let count = inputs.len();
    let combined = Deferred::new();
    let results: Rc<RefCell<Vec<Value>>> = Rc::new(RefCell::new(Vec::with_capacity(count)));

    let record = {
        let combined = combined.clone();
        let results = Rc::clone(&results);
        Callback::new(move |args: &[Value]| {
            let mut buffer = results.borrow_mut();
            match args {
                [] => buffer.push(Value::Null),
                [only] => buffer.push(only.clone()),
                many => buffer.push(Value::Array(many.to_vec())),
            }
            if buffer.len() == count && !combined.is_frozen() {
                let params = buffer.clone();
                // Release the buffer before settlement dispatch re-enters
                // subscriber callbacks
                drop(buffer);
                tracing::debug!(count, "aggregate resolved");
                let _ = combined.resolve(&params);
            }
        })
    };

    if count == 0 {
        let _ = combined.resolve(&[]);
    }

    for input in inputs {
        match input {
            WhenInput::Plain(value) => record.call(&[value]),
            WhenInput::Awaitable(item) => {
                item.on_done(record.clone());
                let reject = {
                    let combined = combined.clone();
                    Callback::new(move |args: &[Value]| {
                        // First rejection wins; later ones are swallowed
                        if !combined.is_frozen() {
                            tracing::debug!("aggregate rejected");
                            let _ = combined.reject(args);
                        }
                    })
                };
                item.on_fail(reject);
            }
        }
    }

    combined.promise()
}

#[cfg(test)]
#[path = "when_tests.rs"]
mod tests;
