//! eventual: event emitter and deferred/promise primitives for
//! single-threaded cooperative coordination
//!
//! This crate provides:
//! - `Emitter` - Named-event registry with synchronous, registration-ordered dispatch
//! - `Deferred` - Single-assignment future value with a progress side-channel
//! - `Promise` - Read-only observer view over a `Deferred`
//! - `when` - Fan-in combinator producing one `Promise` from many inputs
//!
//! All dispatch is synchronous and all types are intended for a single
//! cooperative execution context; handles are cheap clones sharing state.

pub mod deferred;
pub mod emitter;
pub mod error;
pub mod promise;
pub mod when;

// Re-exports
pub use deferred::Deferred;
pub use emitter::{Callback, Emits, Emitter, Listener};
pub use error::FrozenError;
pub use promise::Promise;
pub use when::{when, Awaitable, WhenInput};
