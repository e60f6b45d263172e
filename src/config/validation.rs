// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation for backend registries.
//!
//! Validation runs before any backend is constructed so that a bad config
//! never starts a runtime. Every check runs and every problem is collected,
//! in the following order:
//!
//! 1. **Disabled engines**: only built-in engines can be disabled
//! 2. **Worker threads**: `owned_runtime` and per-backend counts must be in `1..=MAX_WORKER_THREADS`
//! 3. **Implementations**: every backend `type` must be known to `BackendFactory`
//! 4. **Uniqueness**: no engine may be registered twice, counting enabled defaults
//! 5. **Strict preference**: with `strict`, the preferred engine must end up registered
//!
//! Availability of the preferred engine depends on where the process runs, so
//! it is checked later by `RuntimeBuilder::from_config`, not here.
//!
//! # Examples
//! ```rust
//! use switchyard::config::{validate_config, Config};
//! use switchyard::errors::ValidationError;
//!
//! let cfg = Config::from_yaml_str("engine: edge-pool\nstrict: true").unwrap();
//!
//! let errors = validate_config(&cfg).unwrap_err();
//! assert!(matches!(errors[0], ValidationError::StrictEngineUnregistered { .. }));
//! ```

use std::collections::HashSet;

use crate::backends::factory::BackendFactory;
use crate::config::consts::MAX_WORKER_THREADS;
use crate::config::{Config, EngineId};
use crate::errors::ValidationError;

/// Validate a configuration, returning every problem found.
pub fn validate_config(cfg: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for engine in &cfg.disabled {
        if !engine.is_built_in() {
            errors.push(ValidationError::UnknownDisabledEngine {
                engine: engine.clone(),
            });
        }
    }

    if let Some(worker_threads) = cfg.owned_runtime.worker_threads {
        if !valid_worker_threads(worker_threads) {
            errors.push(ValidationError::InvalidWorkerThreads {
                engine: None,
                worker_threads,
            });
        }
    }

    for backend in &cfg.backends {
        if let Some(worker_threads) = backend.worker_threads {
            if !valid_worker_threads(worker_threads) {
                errors.push(ValidationError::InvalidWorkerThreads {
                    engine: Some(backend.engine.clone()),
                    worker_threads,
                });
            }
        }

        if !BackendFactory::is_implementation_available(&backend.implementation) {
            errors.push(ValidationError::UnknownImplementation {
                engine: backend.engine.clone(),
                implementation: backend.implementation.clone(),
            });
        }
    }

    errors.extend(find_duplicates(cfg));

    if cfg.strict {
        if let Some(engine) = &cfg.engine {
            if !cfg.registered_engines().contains(engine) {
                errors.push(ValidationError::StrictEngineUnregistered {
                    engine: engine.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn valid_worker_threads(worker_threads: usize) -> bool {
    (1..=MAX_WORKER_THREADS).contains(&worker_threads)
}

/// One error per engine that appears more than once, reported at its first repeat.
fn find_duplicates(cfg: &Config) -> Vec<ValidationError> {
    let mut seen: HashSet<EngineId> = HashSet::new();
    let mut reported: HashSet<EngineId> = HashSet::new();
    let mut errors = Vec::new();

    for engine in cfg.registered_engines() {
        if !seen.insert(engine.clone()) && reported.insert(engine.clone()) {
            errors.push(ValidationError::DuplicateEngine { engine });
        }
    }

    errors
}
