// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use tokio::task::JoinHandle;

use crate::errors::DispatchError;
use crate::http::Response;
use crate::observability::messages::dispatch::RequestTaskFailed;
use crate::observability::messages::StructuredLog;

/// What a backend hands back from one request cycle.
///
/// The dispatcher returns this untouched. Callers on the request path that
/// need the response itself await [`RunOutcome::into_response`].
pub enum RunOutcome {
    /// The host ran on the calling thread and produced this response.
    Completed(Response),
    /// The host call was handed to a runtime task.
    Spawned {
        backend: &'static str,
        handle: JoinHandle<Response>,
    },
}

impl RunOutcome {
    pub fn spawned(backend: &'static str, handle: JoinHandle<Response>) -> Self {
        RunOutcome::Spawned { backend, handle }
    }

    /// The response, if the request cycle already completed.
    pub fn completed(&self) -> Option<&Response> {
        match self {
            RunOutcome::Completed(response) => Some(response),
            RunOutcome::Spawned { .. } => None,
        }
    }

    pub fn is_spawned(&self) -> bool {
        matches!(self, RunOutcome::Spawned { .. })
    }

    /// Wait for the response, whichever way the backend ran the request.
    pub async fn into_response(self) -> Result<Response, DispatchError> {
        match self {
            RunOutcome::Completed(response) => Ok(response),
            RunOutcome::Spawned { backend, handle } => handle.await.map_err(|source| {
                RequestTaskFailed {
                    backend,
                    error: &source,
                }
                .log();
                DispatchError::TaskFailed { backend, source }
            }),
        }
    }
}

impl fmt::Debug for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Completed(response) => {
                f.debug_tuple("Completed").field(response).finish()
            }
            RunOutcome::Spawned { backend, handle } => f
                .debug_struct("Spawned")
                .field("backend", backend)
                .field("finished", &handle.is_finished())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completed_outcome_returns_response() {
        let outcome = RunOutcome::Completed(Response::ok("done"));
        assert!(!outcome.is_spawned());
        assert_eq!(outcome.completed(), Some(&Response::ok("done")));
        assert_eq!(outcome.into_response().await.unwrap(), Response::ok("done"));
    }

    #[tokio::test]
    async fn test_spawned_outcome_awaits_task() {
        let handle = tokio::spawn(async { Response::new(201, "created") });
        let outcome = RunOutcome::spawned("test", handle);

        assert!(outcome.is_spawned());
        assert!(outcome.completed().is_none());
        assert_eq!(outcome.into_response().await.unwrap().status, 201);
    }

    #[tokio::test]
    async fn test_panicking_task_reports_backend() {
        let handle: JoinHandle<Response> = tokio::spawn(async { panic!("host exploded") });
        let outcome = RunOutcome::spawned("exploding", handle);

        match outcome.into_response().await {
            Err(DispatchError::TaskFailed { backend, source }) => {
                assert_eq!(backend, "exploding");
                assert!(source.is_panic());
            }
            other => panic!("Expected TaskFailed, got {:?}", other),
        }
    }
}
