// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for Tokio runtimes used by the built-in backends.
//!
//! This module contains message types for logging events related to:
//! * Runtimes built and owned by switchyard backends
//! * Ambient runtime backends invoked outside of a runtime

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Owned runtime built on first use.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use switchyard::observability::messages::runtime::OwnedRuntimeBuilt;
///
/// let msg = OwnedRuntimeBuilt {
///     flavor: "multi_thread",
///     worker_threads: Some(4),
///     thread_name: "switchyard-worker",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct OwnedRuntimeBuilt<'a> {
    pub flavor: &'a str,
    pub worker_threads: Option<usize>,
    pub thread_name: &'a str,
}

impl Display for OwnedRuntimeBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.worker_threads {
            Some(workers) => write!(
                f,
                "Built {} runtime '{}' with {} worker threads",
                self.flavor, self.thread_name, workers
            ),
            None => write!(
                f,
                "Built {} runtime '{}' with default worker threads",
                self.flavor, self.thread_name
            ),
        }
    }
}

impl StructuredLog for OwnedRuntimeBuilt<'_> {
    fn log(&self) {
        tracing::info!(
            flavor = self.flavor,
            worker_threads = self.worker_threads,
            thread_name = self.thread_name,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "owned_runtime_built",
            span_name = name,
            flavor = self.flavor,
            worker_threads = self.worker_threads,
            thread_name = self.thread_name,
        )
    }
}

/// Owned runtime could not be built. The backend reports itself unavailable.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct OwnedRuntimeBuildFailed<'a> {
    pub flavor: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for OwnedRuntimeBuildFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to build {} runtime: {}", self.flavor, self.error)
    }
}

impl StructuredLog for OwnedRuntimeBuildFailed<'_> {
    fn log(&self) {
        tracing::error!(flavor = self.flavor, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "owned_runtime_build_failed",
            span_name = name,
            flavor = self.flavor,
            error = %self.error,
        )
    }
}

/// A runtime backend ran somewhere it cannot spawn, so the host was called inline.
///
/// # Log Level
/// `warn!` - Usually an unverified lookup of the wrong engine
pub struct RuntimeUnreachable<'a> {
    pub backend: &'a str,
    pub reason: &'a str,
}

impl Display for RuntimeUnreachable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Backend '{}' cannot reach its runtime ({}), running request inline",
            self.backend, self.reason
        )
    }
}

impl StructuredLog for RuntimeUnreachable<'_> {
    fn log(&self) {
        tracing::warn!(backend = self.backend, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "runtime_unreachable",
            span_name = name,
            backend = self.backend,
            reason = self.reason,
        )
    }
}
