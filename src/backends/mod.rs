// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concurrency backend implementations for Switchyard.
//!
//! Each backend implements the `Backend` trait: it can tell whether its engine
//! is usable from the calling thread and it can run one request cycle by
//! handing the application host to that engine.
//!
//! # Available Backends
//!
//! ## Ambient runtime (`tokio_multi_thread`, `tokio_current_thread`)
//! Detects a Tokio runtime the caller is already running inside and spawns the
//! host call onto it. Available only when the detected runtime has the
//! backend's flavor.
//!
//! ## Owned runtime (`owned_multi_thread`, `owned_current_thread`)
//! Switchyard's own runtime, built lazily on first probe. Available when the
//! caller is not inside any Tokio runtime.
//!
//! ## Inline (`inline`)
//! Calls the host on the calling thread. Always available and used as the
//! default whenever nothing registered qualifies. Never stored in a registry.
//!
//! ## Stub Backend (Test-Only)
//! Scriptable availability and responses for registry and dispatcher tests.
//!
//! # Default priority
//!
//! ```text
//! tokio-multi-thread → switchyard-multi-thread → tokio-current-thread → switchyard-current-thread
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{EngineId, OwnedRuntimeConfig};
use crate::traits::Backend;

pub mod ambient;
pub mod factory;
pub mod inline;
pub mod owned;
#[cfg(test)]
pub mod stub;

pub use ambient::AmbientRuntimeBackend;
pub use factory::BackendFactory;
pub use inline::InlineBackend;
pub use owned::OwnedRuntimeBackend;

/// Scheduler flavor of a Tokio runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeFlavor {
    MultiThread,
    CurrentThread,
}

impl RuntimeFlavor {
    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeFlavor::MultiThread => "multi_thread",
            RuntimeFlavor::CurrentThread => "current_thread",
        }
    }

    /// Whether a running Tokio runtime has this flavor.
    pub fn matches(self, flavor: tokio::runtime::RuntimeFlavor) -> bool {
        matches!(
            (self, flavor),
            (RuntimeFlavor::MultiThread, tokio::runtime::RuntimeFlavor::MultiThread)
                | (RuntimeFlavor::CurrentThread, tokio::runtime::RuntimeFlavor::CurrentThread)
        )
    }
}

/// Backend for a built-in engine. `None` for custom engines.
pub fn built_in(engine: &EngineId, runtime: &OwnedRuntimeConfig) -> Option<Arc<dyn Backend>> {
    let backend: Arc<dyn Backend> = match engine {
        EngineId::TokioMultiThread => Arc::new(AmbientRuntimeBackend::multi_thread()),
        EngineId::OwnedMultiThread => Arc::new(OwnedRuntimeBackend::new(
            RuntimeFlavor::MultiThread,
            runtime.worker_threads,
            runtime.thread_name(),
        )),
        EngineId::TokioCurrentThread => Arc::new(AmbientRuntimeBackend::current_thread()),
        EngineId::OwnedCurrentThread => Arc::new(OwnedRuntimeBackend::new(
            RuntimeFlavor::CurrentThread,
            None,
            runtime.thread_name(),
        )),
        EngineId::Custom(_) => return None,
    };
    Some(backend)
}

/// All built-in engines with their backends, in default priority order.
pub fn built_in_backends(runtime: &OwnedRuntimeConfig) -> Vec<(EngineId, Arc<dyn Backend>)> {
    EngineId::BUILT_IN
        .into_iter()
        .filter_map(|engine| built_in(&engine, runtime).map(|backend| (engine, backend)))
        .collect()
}
