// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::http::{Connection, Request, Response};

/// The web application that turns a request into a response.
///
/// Backends call into the host from whatever thread or task their engine
/// schedules the request cycle on, hence the `Send + Sync` bound.
pub trait ApplicationHost: Send + Sync {
    fn on_message(&self, connection: &Connection, request: Request) -> Response;
}

impl<F> ApplicationHost for F
where
    F: Fn(&Connection, Request) -> Response + Send + Sync,
{
    fn on_message(&self, connection: &Connection, request: Request) -> Response {
        self(connection, request)
    }
}
