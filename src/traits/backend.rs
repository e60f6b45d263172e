// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::dispatch::RunOutcome;
use crate::http::{Connection, Request};
use crate::traits::ApplicationHost;

/// A concurrency backend the dispatcher can hand request cycles to.
///
/// Both capabilities are required to implement the trait, so anything that can
/// be registered is able to report its availability and run a request. A type
/// missing either method cannot be admitted into a registry:
///
/// ```compile_fail
/// use switchyard::config::EngineId;
/// use switchyard::registry::BackendRegistry;
///
/// struct NotABackend;
///
/// let registry = BackendRegistry::new();
/// let _ = registry.add_backend(EngineId::custom("broken").unwrap(), NotABackend);
/// ```
pub trait Backend: Send + Sync {
    /// Short name used in logs and registry listings.
    fn name(&self) -> &'static str;

    /// Whether this engine can run in the current process, on the calling thread.
    fn available(&self) -> bool;

    /// Run one request cycle for `request` on `connection` using this engine.
    fn run(
        &self,
        host: Arc<dyn ApplicationHost>,
        connection: Connection,
        request: Request,
    ) -> RunOutcome;
}
