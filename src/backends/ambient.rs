// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::backends::RuntimeFlavor;
use crate::dispatch::RunOutcome;
use crate::http::{Connection, Request};
use crate::observability::messages::runtime::RuntimeUnreachable;
use crate::observability::messages::StructuredLog;
use crate::traits::{ApplicationHost, Backend};

/// Uses a Tokio runtime the caller is already running inside.
///
/// The probe checks the current thread's runtime context, so the answer
/// depends on where dispatch is called from, not on process-wide state.
#[derive(Debug, Clone, Copy)]
pub struct AmbientRuntimeBackend {
    flavor: RuntimeFlavor,
}

impl AmbientRuntimeBackend {
    pub fn new(flavor: RuntimeFlavor) -> Self {
        Self { flavor }
    }

    pub fn multi_thread() -> Self {
        Self::new(RuntimeFlavor::MultiThread)
    }

    pub fn current_thread() -> Self {
        Self::new(RuntimeFlavor::CurrentThread)
    }

    pub fn flavor(&self) -> RuntimeFlavor {
        self.flavor
    }
}

impl Backend for AmbientRuntimeBackend {
    fn name(&self) -> &'static str {
        match self.flavor {
            RuntimeFlavor::MultiThread => "tokio_multi_thread",
            RuntimeFlavor::CurrentThread => "tokio_current_thread",
        }
    }

    fn available(&self) -> bool {
        Handle::try_current()
            .map(|handle| self.flavor.matches(handle.runtime_flavor()))
            .unwrap_or(false)
    }

    fn run(
        &self,
        host: Arc<dyn ApplicationHost>,
        connection: Connection,
        request: Request,
    ) -> RunOutcome {
        match Handle::try_current() {
            Ok(handle) => RunOutcome::spawned(
                self.name(),
                handle.spawn(async move { host.on_message(&connection, request) }),
            ),
            Err(_) => {
                RuntimeUnreachable {
                    backend: self.name(),
                    reason: "no Tokio runtime on this thread",
                }
                .log();
                RunOutcome::Completed(host.on_message(&connection, request))
            }
        }
    }
}
