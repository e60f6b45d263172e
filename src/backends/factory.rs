// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::{AmbientRuntimeBackend, InlineBackend, OwnedRuntimeBackend, RuntimeFlavor};
use crate::config::consts::MAX_WORKER_THREADS;
use crate::config::{BackendConfig, OwnedRuntimeConfig};
use crate::errors::BackendFactoryError;
use crate::traits::Backend;

/// Factory for creating backend instances from configuration
pub struct BackendFactory;

impl BackendFactory {
    /// Create a backend instance by implementation name
    ///
    /// - "inline" -> InlineBackend
    /// - "tokio_multi_thread" -> AmbientRuntimeBackend (multi-thread)
    /// - "tokio_current_thread" -> AmbientRuntimeBackend (current-thread)
    /// - "owned_multi_thread" -> OwnedRuntimeBackend (multi-thread, honors `worker_threads`)
    /// - "owned_current_thread" -> OwnedRuntimeBackend (current-thread)
    pub fn create(
        implementation: &str,
        worker_threads: Option<usize>,
        thread_name: &str,
    ) -> Result<Arc<dyn Backend>, BackendFactoryError> {
        if let Some(workers) = worker_threads {
            if workers == 0 || workers > MAX_WORKER_THREADS {
                return Err(BackendFactoryError::InvalidWorkerThreads {
                    implementation: implementation.to_string(),
                    worker_threads: workers,
                });
            }
        }

        match implementation {
            "inline" => Ok(Arc::new(InlineBackend)),
            "tokio_multi_thread" => Ok(Arc::new(AmbientRuntimeBackend::multi_thread())),
            "tokio_current_thread" => Ok(Arc::new(AmbientRuntimeBackend::current_thread())),
            "owned_multi_thread" => Ok(Arc::new(OwnedRuntimeBackend::new(
                RuntimeFlavor::MultiThread,
                worker_threads,
                thread_name,
            ))),
            "owned_current_thread" => Ok(Arc::new(OwnedRuntimeBackend::new(
                RuntimeFlavor::CurrentThread,
                None,
                thread_name,
            ))),
            _ => Err(BackendFactoryError::UnknownImplementation(
                implementation.to_string(),
            )),
        }
    }

    /// Create a backend for a configured entry, inheriting unset runtime
    /// options from the shared `owned_runtime` section.
    pub fn create_from_config(
        config: &BackendConfig,
        runtime: &OwnedRuntimeConfig,
    ) -> Result<Arc<dyn Backend>, BackendFactoryError> {
        let worker_threads = config.worker_threads.or(runtime.worker_threads);
        let thread_name = config
            .thread_name
            .as_deref()
            .unwrap_or_else(|| runtime.thread_name());
        Self::create(&config.implementation, worker_threads, thread_name)
    }

    /// List all backend implementation names
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec![
            "inline",
            "tokio_multi_thread",
            "tokio_current_thread",
            "owned_multi_thread",
            "owned_current_thread",
        ]
    }

    /// Check if an implementation name is known
    pub fn is_implementation_available(implementation: &str) -> bool {
        Self::list_available_implementations().contains(&implementation)
    }
}
