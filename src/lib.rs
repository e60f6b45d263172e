// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // built-in concurrency backends
pub mod config;     // config + engine identifiers
pub mod dispatch;   // request-path handoff
pub mod errors;     // error handling
pub mod http;       // opaque connection/request payloads
pub mod observability;
pub mod registry;   // backend table + resolver
pub mod traits;     // unified abstractions
