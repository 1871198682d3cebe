// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for deferred state transitions

use thiserror::Error;

/// Attempted to settle a deferred that is already resolved or rejected.
///
/// This is the only error in the core: every other operation degrades to a
/// no-op or a well-defined immediate result. The display message is stable
/// so integrators can match on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("Can't change state of frozen deferred")]
pub struct FrozenError;
