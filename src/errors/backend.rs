// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for backend construction.

use thiserror::Error;

/// Errors that can occur while the factory builds a backend from configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendFactoryError {
    /// No built-in backend implementation has this name.
    #[error("Unknown backend implementation: '{0}'")]
    UnknownImplementation(String),

    /// The requested worker thread count cannot be used.
    #[error("Invalid worker thread count {worker_threads} for '{implementation}'")]
    InvalidWorkerThreads {
        implementation: String,
        worker_threads: usize,
    },
}
