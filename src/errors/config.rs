// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use thiserror::Error;

use crate::config::EngineId;
use crate::errors::{BackendFactoryError, ResolveError};

/// Errors found while validating a switchyard configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two backend entries claim the same engine identifier
    DuplicateEngine {
        engine: EngineId,
    },
    /// A configured backend names an implementation no factory knows
    UnknownImplementation {
        engine: EngineId,
        implementation: String,
    },
    /// `disabled` lists something that is not a built-in engine
    UnknownDisabledEngine {
        engine: EngineId,
    },
    /// `worker_threads` is zero or above the accepted maximum
    InvalidWorkerThreads {
        /// `None` for the shared `owned_runtime` section
        engine: Option<EngineId>,
        worker_threads: usize,
    },
    /// `strict` is set but the preferred engine will not be registered
    StrictEngineUnregistered {
        engine: EngineId,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateEngine { engine } => {
                write!(f, "Engine '{}' is registered more than once", engine)
            }
            ValidationError::UnknownImplementation {
                engine,
                implementation,
            } => {
                write!(
                    f,
                    "Engine '{}' uses unknown backend implementation '{}'",
                    engine, implementation
                )
            }
            ValidationError::UnknownDisabledEngine { engine } => {
                write!(
                    f,
                    "Cannot disable '{}': it is not a built-in engine",
                    engine
                )
            }
            ValidationError::InvalidWorkerThreads {
                engine,
                worker_threads,
            } => match engine {
                Some(engine) => write!(
                    f,
                    "Engine '{}' has invalid worker_threads {}",
                    engine, worker_threads
                ),
                None => write!(
                    f,
                    "owned_runtime has invalid worker_threads {}",
                    worker_threads
                ),
            },
            ValidationError::StrictEngineUnregistered { engine } => {
                write!(
                    f,
                    "Strict mode requires engine '{}' but it is not registered",
                    engine
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Rejected engine identifier strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineIdError {
    #[error("Engine identifier must not be empty")]
    Empty,
}

/// Errors raised while loading configuration and building a registry from it.
///
/// All of these are fatal: a process should not start serving traffic with a
/// registry it could not build as configured.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML syntax or shape error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML syntax or shape error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// One or more validation failures, reported together.
    #[error("Configuration validation failed:\n{}", join_lines(.0))]
    Validation(Vec<ValidationError>),

    /// A configured backend could not be constructed.
    #[error("Backend construction failed: {0}")]
    Backend(#[from] BackendFactoryError),

    /// Strict mode found the preferred engine unusable.
    #[error("Preferred engine rejected: {0}")]
    Resolve(#[from] ResolveError),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
