// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::consts::{
    OWNED_CURRENT_THREAD, OWNED_MULTI_THREAD, TOKIO_CURRENT_THREAD, TOKIO_MULTI_THREAD,
};
use crate::errors::EngineIdError;

/// Identifier of a concurrency backend family.
///
/// The four built-in engines are variants; anything else registered at runtime
/// or through configuration is `Custom`. The string form is only used at the
/// configuration boundary:
///
/// ```
/// use switchyard::config::EngineId;
///
/// let engine: EngineId = "tokio-multi-thread".parse().unwrap();
/// assert_eq!(engine, EngineId::TokioMultiThread);
/// assert_eq!(EngineId::custom("edge-pool").unwrap().to_string(), "edge-pool");
/// ```
///
/// Custom identifiers only come from [`EngineId::custom`] or parsing, so a
/// built-in name or an empty string can never end up in `Custom`:
///
/// ```compile_fail
/// use switchyard::config::{CustomEngine, EngineId};
///
/// let engine = EngineId::Custom(CustomEngine("tokio-multi-thread".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EngineId {
    /// The caller is already inside a Tokio multi-thread runtime
    TokioMultiThread,
    /// A multi-thread runtime built and owned by switchyard
    OwnedMultiThread,
    /// The caller is already inside a Tokio current-thread runtime
    TokioCurrentThread,
    /// A current-thread runtime built and owned by switchyard
    OwnedCurrentThread,
    /// Any other engine, registered at runtime or through configuration
    Custom(CustomEngine),
}

/// Name of a non built-in engine: trimmed, non-empty, never a built-in name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomEngine(String);

impl CustomEngine {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl EngineId {
    /// Built-in engines in default priority order.
    pub const BUILT_IN: [EngineId; 4] = [
        EngineId::TokioMultiThread,
        EngineId::OwnedMultiThread,
        EngineId::TokioCurrentThread,
        EngineId::OwnedCurrentThread,
    ];

    /// Build an identifier from its configuration name.
    ///
    /// Surrounding whitespace is ignored, empty names are rejected and known
    /// built-in names map to their variant.
    pub fn custom(name: impl AsRef<str>) -> Result<Self, EngineIdError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(EngineIdError::Empty);
        }
        Ok(Self::built_in(name).unwrap_or_else(|| EngineId::Custom(CustomEngine(name.to_string()))))
    }

    pub fn as_str(&self) -> &str {
        match self {
            EngineId::TokioMultiThread => TOKIO_MULTI_THREAD,
            EngineId::OwnedMultiThread => OWNED_MULTI_THREAD,
            EngineId::TokioCurrentThread => TOKIO_CURRENT_THREAD,
            EngineId::OwnedCurrentThread => OWNED_CURRENT_THREAD,
            EngineId::Custom(name) => name.as_str(),
        }
    }

    pub fn is_built_in(&self) -> bool {
        !matches!(self, EngineId::Custom(_))
    }

    fn built_in(name: &str) -> Option<Self> {
        match name {
            TOKIO_MULTI_THREAD => Some(EngineId::TokioMultiThread),
            OWNED_MULTI_THREAD => Some(EngineId::OwnedMultiThread),
            TOKIO_CURRENT_THREAD => Some(EngineId::TokioCurrentThread),
            OWNED_CURRENT_THREAD => Some(EngineId::OwnedCurrentThread),
            _ => None,
        }
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineId {
    type Err = EngineIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngineId::custom(s)
    }
}

impl TryFrom<String> for EngineId {
    type Error = EngineIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EngineId::custom(value)
    }
}

impl From<EngineId> for String {
    fn from(engine: EngineId) -> Self {
        match engine {
            EngineId::Custom(name) => name.as_str().to_string(),
            other => other.as_str().to_string(),
        }
    }
}
