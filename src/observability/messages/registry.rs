// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for backend registry mutations.
//!
//! This module contains message types for logging events related to:
//! * Registry initialization
//! * Backend registration, including rejected duplicates
//! * Backend removal

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Registry populated at startup.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use switchyard::observability::messages::registry::RegistryInitialized;
///
/// let msg = RegistryInitialized {
///     backend_count: 4,
///     with_defaults: true,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RegistryInitialized {
    pub backend_count: usize,
    pub with_defaults: bool,
}

impl Display for RegistryInitialized {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Backend registry initialized with {} backends (defaults: {})",
            self.backend_count, self.with_defaults
        )
    }
}

impl StructuredLog for RegistryInitialized {
    fn log(&self) {
        tracing::info!(
            backend_count = self.backend_count,
            with_defaults = self.with_defaults,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "registry_initialized",
            span_name = name,
            backend_count = self.backend_count,
            with_defaults = self.with_defaults,
        )
    }
}

/// Backend added to the end of the registry.
///
/// # Log Level
/// `debug!` - Administrative detail
pub struct BackendRegistered<'a> {
    pub engine: &'a str,
    pub backend: &'a str,
    pub position: usize,
}

impl Display for BackendRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered backend '{}' for engine '{}' at priority {}",
            self.backend, self.engine, self.position
        )
    }
}

impl StructuredLog for BackendRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            engine = self.engine,
            backend = self.backend,
            position = self.position,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "backend_registered",
            span_name = name,
            engine = self.engine,
            backend = self.backend,
            position = self.position,
        )
    }
}

/// Registration refused because the engine already has a backend.
///
/// # Log Level
/// `debug!` - The caller receives the outcome and decides how loud to be
///
/// # Example
/// ```
/// use switchyard::observability::messages::registry::BackendAlreadyPresent;
///
/// let msg = BackendAlreadyPresent {
///     engine: "tokio-multi-thread",
///     existing: "tokio_multi_thread",
///     rejected: "inline",
/// };
///
/// assert!(msg.to_string().contains("already handled"));
/// ```
pub struct BackendAlreadyPresent<'a> {
    pub engine: &'a str,
    pub existing: &'a str,
    pub rejected: &'a str,
}

impl Display for BackendAlreadyPresent<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine '{}' is already handled by '{}', ignoring '{}'",
            self.engine, self.existing, self.rejected
        )
    }
}

impl StructuredLog for BackendAlreadyPresent<'_> {
    fn log(&self) {
        tracing::debug!(
            engine = self.engine,
            existing = self.existing,
            rejected = self.rejected,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "backend_already_present",
            span_name = name,
            engine = self.engine,
            existing = self.existing,
            rejected = self.rejected,
        )
    }
}

/// Backend removed from the registry.
///
/// # Log Level
/// `info!` - Changes selection priority for every later dispatch
pub struct BackendRemoved<'a> {
    pub engine: &'a str,
    pub backend: &'a str,
}

impl Display for BackendRemoved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Removed backend '{}' for engine '{}'",
            self.backend, self.engine
        )
    }
}

impl StructuredLog for BackendRemoved<'_> {
    fn log(&self) {
        tracing::info!(engine = self.engine, backend = self.backend, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "backend_removed",
            span_name = name,
            engine = self.engine,
            backend = self.backend,
        )
    }
}
