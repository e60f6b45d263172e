// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! `StructuredLog` to emit it with typed fields at its designated level.
//!
//! # Organization
//!
//! * `registry` - backend registration and removal
//! * `resolver` - availability probing and selection
//! * `dispatch` - request handoff to a backend
//! * `runtime` - runtimes owned by switchyard backends
//! * `validation` - configuration validation failures

use tracing::Span;

pub mod dispatch;
pub mod registry;
pub mod resolver;
pub mod runtime;
pub mod validation;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
