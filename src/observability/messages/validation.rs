// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation errors.

use crate::errors::ValidationError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A single validation problem found in a configuration.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ValidationIssue<'a> {
    pub issue: &'a ValidationError,
}

impl Display for ValidationIssue<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Invalid configuration: {}", self.issue)
    }
}

impl StructuredLog for ValidationIssue<'_> {
    fn log(&self) {
        tracing::error!(issue = %self.issue, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            issue = %self.issue,
        )
    }
}

/// Configuration rejected after validation.
///
/// # Log Level
/// `error!` - Startup will abort
///
/// # Example
/// ```
/// use switchyard::observability::messages::validation::ConfigurationRejected;
///
/// let msg = ConfigurationRejected {
///     source: "configs/broken.yaml",
///     issue_count: 2,
/// };
///
/// assert_eq!(msg.to_string(), "Configuration 'configs/broken.yaml' rejected with 2 issues");
/// ```
pub struct ConfigurationRejected<'a> {
    pub source: &'a str,
    pub issue_count: usize,
}

impl Display for ConfigurationRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration '{}' rejected with {} issues",
            self.source, self.issue_count
        )
    }
}

impl StructuredLog for ConfigurationRejected<'_> {
    fn log(&self) {
        tracing::error!(
            source = self.source,
            issue_count = self.issue_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            source = self.source,
            issue_count = self.issue_count,
        )
    }
}
