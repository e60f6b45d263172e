// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for request handoff.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A request cycle handed to a backend.
///
/// # Log Level
/// `trace!` - Emitted once per dispatched request
///
/// # Example
/// ```
/// use switchyard::observability::messages::dispatch::RequestDispatched;
///
/// let msg = RequestDispatched {
///     requested_engine: None,
///     backend: "inline",
///     connection_id: 7,
/// };
///
/// assert_eq!(msg.to_string(), "Dispatching connection 7 to backend 'inline' (engine: auto)");
/// ```
pub struct RequestDispatched<'a> {
    pub requested_engine: Option<&'a str>,
    pub backend: &'a str,
    pub connection_id: u64,
}

impl Display for RequestDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dispatching connection {} to backend '{}' (engine: {})",
            self.connection_id,
            self.backend,
            self.requested_engine.unwrap_or("auto")
        )
    }
}

impl StructuredLog for RequestDispatched<'_> {
    fn log(&self) {
        tracing::trace!(
            requested_engine = self.requested_engine,
            backend = self.backend,
            connection_id = self.connection_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "dispatch",
            span_name = name,
            requested_engine = self.requested_engine,
            backend = self.backend,
            connection_id = self.connection_id,
        )
    }
}

/// A spawned request task ended without producing a response.
///
/// # Log Level
/// `error!` - The request was lost
pub struct RequestTaskFailed<'a> {
    pub backend: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for RequestTaskFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Request task on backend '{}' failed: {}",
            self.backend, self.error
        )
    }
}

impl StructuredLog for RequestTaskFailed<'_> {
    fn log(&self) {
        tracing::error!(backend = self.backend, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "request_task_failed",
            span_name = name,
            backend = self.backend,
            error = %self.error,
        )
    }
}
