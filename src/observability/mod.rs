// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic line switchyard emits is a message type with a `Display`
//! implementation, so wording lives in one place instead of being scattered
//! across call sites.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::registry` - backend registration and removal
//! * `messages::resolver` - availability probing and selection
//! * `messages::dispatch` - request handoff to a backend
//! * `messages::runtime` - runtimes built and owned by switchyard backends
//! * `messages::validation` - configuration validation failures
//!
//! # Usage
//!
//! ```rust
//! use switchyard::observability::messages::registry::BackendRemoved;
//! use switchyard::observability::messages::StructuredLog;
//!
//! let msg = BackendRemoved {
//!     engine: "tokio-multi-thread",
//!     backend: "tokio_multi_thread",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
