// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::dispatch::RunOutcome;
use crate::http::{Connection, Request};
use crate::traits::{ApplicationHost, Backend};

/// Runs the host directly on the calling thread.
///
/// This is the default backend: always available, never registered.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineBackend;

impl Backend for InlineBackend {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn available(&self) -> bool {
        true
    }

    fn run(
        &self,
        host: Arc<dyn ApplicationHost>,
        connection: Connection,
        request: Request,
    ) -> RunOutcome {
        RunOutcome::Completed(host.on_message(&connection, request))
    }
}
