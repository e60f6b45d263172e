// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for backend resolution.
//!
//! This module contains message types for logging events related to:
//! * Lookups of engines that are not registered
//! * Verified lookups that fell back to the default backend
//! * Fallback searches and their result

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Lookup of an engine with no registered backend.
///
/// # Log Level
/// `debug!` - Resolution detail, the default backend takes over
pub struct EngineNotRegistered<'a> {
    pub engine: &'a str,
    pub fallback: &'a str,
}

impl Display for EngineNotRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine '{}' is not registered, using '{}'",
            self.engine, self.fallback
        )
    }
}

impl StructuredLog for EngineNotRegistered<'_> {
    fn log(&self) {
        tracing::debug!(engine = self.engine, fallback = self.fallback, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "engine_not_registered",
            span_name = name,
            engine = self.engine,
            fallback = self.fallback,
        )
    }
}

/// Verified lookup found the backend unavailable and substituted the default.
///
/// # Log Level
/// `debug!` - Resolution detail
///
/// # Example
/// ```
/// use switchyard::observability::messages::resolver::BackendUnavailable;
///
/// let msg = BackendUnavailable {
///     engine: "tokio-current-thread",
///     backend: "tokio_current_thread",
///     fallback: "inline",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct BackendUnavailable<'a> {
    pub engine: &'a str,
    pub backend: &'a str,
    pub fallback: &'a str,
}

impl Display for BackendUnavailable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Backend '{}' for engine '{}' is unavailable, using '{}'",
            self.backend, self.engine, self.fallback
        )
    }
}

impl StructuredLog for BackendUnavailable<'_> {
    fn log(&self) {
        tracing::debug!(
            engine = self.engine,
            backend = self.backend,
            fallback = self.fallback,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "backend_unavailable",
            span_name = name,
            engine = self.engine,
            backend = self.backend,
            fallback = self.fallback,
        )
    }
}

/// Fallback search picked an engine.
///
/// # Log Level
/// `trace!` - Emitted for every dispatch without an explicit engine
pub struct BackendSelected<'a> {
    pub engine: &'a str,
    pub backend: &'a str,
    pub probed: usize,
}

impl Display for BackendSelected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Selected backend '{}' for engine '{}' after probing {} candidates",
            self.backend, self.engine, self.probed
        )
    }
}

impl StructuredLog for BackendSelected<'_> {
    fn log(&self) {
        tracing::trace!(
            engine = self.engine,
            backend = self.backend,
            probed = self.probed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "backend_selected",
            span_name = name,
            engine = self.engine,
            backend = self.backend,
            probed = self.probed,
        )
    }
}

/// Fallback search found no available backend.
///
/// # Log Level
/// `debug!` - The default backend takes over
pub struct NoBackendAvailable<'a> {
    pub candidates: usize,
    pub fallback: &'a str,
}

impl Display for NoBackendAvailable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "None of {} registered backends is available, using '{}'",
            self.candidates, self.fallback
        )
    }
}

impl StructuredLog for NoBackendAvailable<'_> {
    fn log(&self) {
        tracing::debug!(
            candidates = self.candidates,
            fallback = self.fallback,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "no_backend_available",
            span_name = name,
            candidates = self.candidates,
            fallback = self.fallback,
        )
    }
}
