// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::{Arc, OnceLock};

use tokio::runtime::{Builder, Handle, Runtime};

use crate::backends::RuntimeFlavor;
use crate::dispatch::RunOutcome;
use crate::http::{Connection, Request};
use crate::observability::messages::runtime::{
    OwnedRuntimeBuildFailed, OwnedRuntimeBuilt, RuntimeUnreachable,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{ApplicationHost, Backend};

/// A Tokio runtime built and owned by the backend itself.
///
/// The runtime is built the first time the backend is probed or run and lives
/// as long as the backend. A failed build is remembered and the backend then
/// reports itself unavailable for good.
///
/// The backend is only available to callers outside of any Tokio runtime: the
/// current-thread flavor drives requests with `block_on`, which Tokio forbids
/// from within a runtime.
pub struct OwnedRuntimeBackend {
    flavor: RuntimeFlavor,
    worker_threads: Option<usize>,
    thread_name: String,
    runtime: OnceLock<Option<Runtime>>,
}

impl OwnedRuntimeBackend {
    /// `worker_threads` only applies to the multi-thread flavor and must be non-zero.
    pub fn new(
        flavor: RuntimeFlavor,
        worker_threads: Option<usize>,
        thread_name: impl Into<String>,
    ) -> Self {
        Self {
            flavor,
            worker_threads,
            thread_name: thread_name.into(),
            runtime: OnceLock::new(),
        }
    }

    pub fn flavor(&self) -> RuntimeFlavor {
        self.flavor
    }

    /// Whether the runtime has been built yet.
    pub fn is_started(&self) -> bool {
        matches!(self.runtime.get(), Some(Some(_)))
    }

    fn runtime(&self) -> Option<&Runtime> {
        self.runtime
            .get_or_init(|| {
                let built = OwnedRuntimeBuilt {
                    flavor: self.flavor.as_str(),
                    worker_threads: self.worker_threads,
                    thread_name: &self.thread_name,
                };
                let span = built.span("owned_runtime_build");
                let _guard = span.enter();
                self.build_logged(built)
            })
            .as_ref()
    }

    fn build_logged(&self, built: OwnedRuntimeBuilt<'_>) -> Option<Runtime> {
        match self.build() {
            Ok(runtime) => {
                built.log();
                Some(runtime)
            }
            Err(error) => {
                OwnedRuntimeBuildFailed {
                    flavor: self.flavor.as_str(),
                    error: &error,
                }
                .log();
                None
            }
        }
    }

    fn build(&self) -> std::io::Result<Runtime> {
        let mut builder = match self.flavor {
            RuntimeFlavor::MultiThread => Builder::new_multi_thread(),
            RuntimeFlavor::CurrentThread => Builder::new_current_thread(),
        };
        builder.enable_all().thread_name(self.thread_name.clone());
        if let (RuntimeFlavor::MultiThread, Some(workers)) = (self.flavor, self.worker_threads) {
            builder.worker_threads(workers);
        }
        builder.build()
    }

    fn run_inline(
        &self,
        reason: &str,
        host: Arc<dyn ApplicationHost>,
        connection: Connection,
        request: Request,
    ) -> RunOutcome {
        RuntimeUnreachable {
            backend: self.name(),
            reason,
        }
        .log();
        RunOutcome::Completed(host.on_message(&connection, request))
    }
}

impl Backend for OwnedRuntimeBackend {
    fn name(&self) -> &'static str {
        match self.flavor {
            RuntimeFlavor::MultiThread => "owned_multi_thread",
            RuntimeFlavor::CurrentThread => "owned_current_thread",
        }
    }

    fn available(&self) -> bool {
        Handle::try_current().is_err() && self.runtime().is_some()
    }

    fn run(
        &self,
        host: Arc<dyn ApplicationHost>,
        connection: Connection,
        request: Request,
    ) -> RunOutcome {
        let Some(runtime) = self.runtime() else {
            return self.run_inline("runtime failed to build", host, connection, request);
        };

        match self.flavor {
            RuntimeFlavor::MultiThread => RunOutcome::spawned(
                self.name(),
                runtime.spawn(async move { host.on_message(&connection, request) }),
            ),
            RuntimeFlavor::CurrentThread => {
                if Handle::try_current().is_ok() {
                    return self.run_inline(
                        "cannot block inside another Tokio runtime",
                        host,
                        connection,
                        request,
                    );
                }
                RunOutcome::Completed(
                    runtime.block_on(async move { host.on_message(&connection, request) }),
                )
            }
        }
    }
}

impl fmt::Debug for OwnedRuntimeBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedRuntimeBackend")
            .field("flavor", &self.flavor)
            .field("worker_threads", &self.worker_threads)
            .field("thread_name", &self.thread_name)
            .field("started", &self.is_started())
            .finish()
    }
}

impl Drop for OwnedRuntimeBackend {
    // Dropping a Runtime from async context panics; the registry may be
    // dropped from inside some other runtime.
    fn drop(&mut self) {
        if let Some(Some(runtime)) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::CapturedLogs;
    use crate::http::Response;

    fn thread_name_host() -> Arc<dyn ApplicationHost> {
        Arc::new(|_: &Connection, _: Request| {
            let name = std::thread::current().name().unwrap_or_default().to_string();
            Response::ok(name)
        })
    }

    #[test]
    fn test_runtime_built_lazily_on_probe() {
        let backend = OwnedRuntimeBackend::new(RuntimeFlavor::MultiThread, Some(1), "lazy-worker");
        assert!(!backend.is_started());

        assert!(backend.available());
        assert!(backend.is_started());
    }

    #[test]
    fn test_multi_thread_spawns_on_owned_workers() {
        let backend =
            OwnedRuntimeBackend::new(RuntimeFlavor::MultiThread, Some(2), "owned-worker");
        let outcome = backend.run(thread_name_host(), Connection::new(1), Request::new("GET", "/"));
        assert!(outcome.is_spawned());

        let waiter = Builder::new_current_thread().build().unwrap();
        let response = waiter.block_on(outcome.into_response()).unwrap();
        assert_eq!(response.body, b"owned-worker".to_vec());
    }

    #[test]
    fn test_current_thread_completes_on_calling_thread() {
        let backend = OwnedRuntimeBackend::new(RuntimeFlavor::CurrentThread, None, "unused");
        let caller = std::thread::current().name().unwrap_or_default().to_string();

        let outcome = backend.run(thread_name_host(), Connection::new(2), Request::new("GET", "/"));

        assert_eq!(outcome.completed(), Some(&Response::ok(caller)));
    }

    #[tokio::test]
    async fn test_unavailable_inside_another_runtime() {
        let backend = OwnedRuntimeBackend::new(RuntimeFlavor::MultiThread, Some(1), "nested");
        assert!(!backend.available());
        // The probe bails out before building anything.
        assert!(!backend.is_started());
    }

    #[tokio::test]
    async fn test_current_thread_inside_runtime_runs_inline() {
        let backend = OwnedRuntimeBackend::new(RuntimeFlavor::CurrentThread, None, "nested");
        let outcome = backend.run(thread_name_host(), Connection::new(5), Request::new("GET", "/"));

        assert!(!outcome.is_spawned());
        // Dropping here exercises shutdown_background from async context.
        drop(backend);
    }

    #[test]
    fn test_runtime_build_logged_inside_build_span() {
        let logs = CapturedLogs::default();
        let backend = OwnedRuntimeBackend::new(RuntimeFlavor::MultiThread, Some(1), "span-worker");

        let available = tracing::subscriber::with_default(logs.subscriber(), || backend.available());

        assert!(available);
        let output = logs.contents();
        let built = output
            .lines()
            .find(|line| line.contains("Built multi_thread runtime"))
            .unwrap_or_else(|| panic!("no build event in:\n{}", output));
        assert!(built.contains("owned_runtime_built{"), "missing span in: {}", built);
    }
}
