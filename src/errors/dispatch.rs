// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::config::EngineId;

/// Strict resolution failures. These abort startup rather than fall back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Engine '{0}' is not registered")]
    Unregistered(EngineId),

    #[error("Engine '{engine}' is registered to backend '{backend}' but is not available in this process")]
    Unavailable {
        engine: EngineId,
        backend: &'static str,
    },
}

/// Errors surfaced when collecting the response of a dispatched request.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The runtime task running the request cycle panicked or was cancelled.
    #[error("Request task on backend '{backend}' failed: {source}")]
    TaskFailed {
        backend: &'static str,
        #[source]
        source: tokio::task::JoinError,
    },
}
