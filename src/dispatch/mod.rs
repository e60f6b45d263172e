// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Request-path handoff from the server loop to the selected backend.
//!
//! The dispatcher does exactly two things per call: resolve a backend and
//! invoke its entry point. It neither transforms, buffers nor retries what the
//! backend returns.

use std::sync::Arc;

use crate::config::EngineId;
use crate::errors::ResolveError;
use crate::http::{Connection, Request};
use crate::observability::messages::dispatch::RequestDispatched;
use crate::observability::messages::StructuredLog;
use crate::registry::{BackendRegistry, Resolver};
use crate::traits::{ApplicationHost, Backend};

mod outcome;

pub use outcome::RunOutcome;

/// Routes connection/request pairs to a backend chosen from a registry.
///
/// ```
/// use std::sync::Arc;
/// use switchyard::dispatch::Dispatcher;
/// use switchyard::http::{Connection, Request, Response};
/// use switchyard::registry::BackendRegistry;
/// use switchyard::traits::ApplicationHost;
///
/// // No registered engines: requests run inline on the calling thread.
/// let dispatcher = Dispatcher::new(Arc::new(BackendRegistry::new()));
/// let host: Arc<dyn ApplicationHost> =
///     Arc::new(|_: &Connection, req: Request| Response::ok(req.path));
///
/// let outcome = dispatcher.dispatch(host, Connection::new(1), Request::new("GET", "/hi"), None);
/// assert_eq!(outcome.completed(), Some(&Response::ok("/hi")));
/// ```
#[derive(Clone, Debug)]
pub struct Dispatcher {
    resolver: Resolver,
    preferred: Option<EngineId>,
}

impl Dispatcher {
    pub fn new(registry: Arc<BackendRegistry>) -> Self {
        Self {
            resolver: Resolver::new(registry),
            preferred: None,
        }
    }

    /// Engine used by [`Dispatcher::dispatch_default`]. `None` means fallback search.
    pub fn with_engine(mut self, engine: Option<EngineId>) -> Self {
        self.preferred = engine;
        self
    }

    pub fn preferred_engine(&self) -> Option<&EngineId> {
        self.preferred.as_ref()
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn registry(&self) -> &Arc<BackendRegistry> {
        self.resolver.registry()
    }

    /// The backend a dispatch with `engine` would use right now.
    pub fn resolve(&self, engine: Option<&EngineId>) -> Arc<dyn Backend> {
        match engine {
            Some(engine) => self.resolver.lookup(engine, true),
            None => self.resolver.find_best_backend(),
        }
    }

    /// Hand one request cycle to the backend for `engine`, or to the best
    /// available backend when no engine is given.
    pub fn dispatch(
        &self,
        host: Arc<dyn ApplicationHost>,
        connection: Connection,
        request: Request,
        engine: Option<&EngineId>,
    ) -> RunOutcome {
        let backend = self.resolve(engine);
        self.run_on(&backend, engine, host, connection, request)
    }

    /// Hand one request cycle to a backend already chosen by [`Dispatcher::resolve`].
    ///
    /// No probe runs here, so the request lands on exactly that backend.
    pub fn run_on(
        &self,
        backend: &Arc<dyn Backend>,
        engine: Option<&EngineId>,
        host: Arc<dyn ApplicationHost>,
        connection: Connection,
        request: Request,
    ) -> RunOutcome {
        let msg = RequestDispatched {
            requested_engine: engine.map(EngineId::as_str),
            backend: backend.name(),
            connection_id: connection.id,
        };
        let span = msg.span("dispatch");
        let _guard = span.enter();
        msg.log();

        backend.run(host, connection, request)
    }

    /// [`Dispatcher::dispatch`] with the preferred engine from configuration.
    pub fn dispatch_default(
        &self,
        host: Arc<dyn ApplicationHost>,
        connection: Connection,
        request: Request,
    ) -> RunOutcome {
        self.dispatch(host, connection, request, self.preferred.as_ref())
    }

    /// Fail unless the preferred engine is registered and available.
    /// Without a preferred engine there is nothing to check.
    pub fn verify_preferred(&self) -> Result<(), ResolveError> {
        match &self.preferred {
            Some(engine) => self.resolver.require(engine).map(|_| ()),
            None => Ok(()),
        }
    }
}
