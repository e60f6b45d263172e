// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::dispatch::RunOutcome;
use crate::http::{Connection, Request, Response};
use crate::traits::{ApplicationHost, Backend};

/// A backend with scripted availability for registry and dispatcher tests.
///
/// Without a canned response it forwards to the host on the calling thread.
pub struct StubBackend {
    pub name: &'static str,
    available: AtomicBool,
    response: Option<Response>,
    probes: AtomicUsize,
    runs: AtomicUsize,
}

impl StubBackend {
    pub fn new(name: &'static str, available: bool) -> Self {
        Self {
            name,
            available: AtomicBool::new(available),
            response: None,
            probes: AtomicUsize::new(0),
            runs: AtomicUsize::new(0),
        }
    }

    /// Return `response` from every run instead of calling the host.
    pub fn with_response(mut self, response: Response) -> Self {
        self.response = Some(response);
        self
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn run_count(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl Backend for StubBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn available(&self) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.available.load(Ordering::SeqCst)
    }

    fn run(
        &self,
        host: Arc<dyn ApplicationHost>,
        connection: Connection,
        request: Request,
    ) -> RunOutcome {
        self.runs.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(response) => RunOutcome::Completed(response.clone()),
            None => RunOutcome::Completed(host.on_message(&connection, request)),
        }
    }
}

/// A host that answers every request with the request path and counts calls.
pub struct EchoHost {
    calls: AtomicUsize,
}

impl EchoHost {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ApplicationHost for EchoHost {
    fn on_message(&self, connection: &Connection, request: Request) -> Response {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Response::ok(format!("{}:{}", connection.id, request.path))
    }
}

/// Collects formatted tracing output, span context included.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// A subscriber writing every level into this buffer.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let logs = self.clone();
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || logs.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
