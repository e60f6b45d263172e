// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::DEFAULT_THREAD_NAME;
use crate::config::EngineId;
use crate::errors::ConfigError;
use crate::observability::messages::validation::{ConfigurationRejected, ValidationIssue};
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure for backend selection.
///
/// Describes which engines the registry starts with, which engine dispatch
/// should prefer, and how strictly that preference is enforced at startup.
///
/// # Fields
/// * `engine` - Preferred engine for dispatch (optional, fallback search when unset)
/// * `strict` - Abort startup if `engine` is unregistered or unavailable (defaults to false)
/// * `defaults` - Pre-populate the four built-in engines (defaults to true)
/// * `disabled` - Built-in engines to leave out
/// * `owned_runtime` - Options for runtimes owned by switchyard backends
/// * `backends` - Additional backends, appended after the defaults in order
///
/// # Example
/// ```yaml
/// engine: tokio-multi-thread
/// strict: false
/// disabled: [switchyard-current-thread]
/// owned_runtime:
///   worker_threads: 4
/// backends:
///   - engine: edge-pool
///     type: owned_multi_thread
///     worker_threads: 2
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: Option<EngineId>,
    #[serde(default)]
    pub strict: bool,
    #[serde(default = "default_true")]
    pub defaults: bool,
    #[serde(default)]
    pub disabled: Vec<EngineId>,
    #[serde(default)]
    pub owned_runtime: OwnedRuntimeConfig,
    #[serde(default)]
    pub backends: Vec<BackendConfig>,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: None,
            strict: false,
            defaults: true,
            disabled: Vec::new(),
            owned_runtime: OwnedRuntimeConfig::default(),
            backends: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Engines that will be registered, in priority order.
    pub fn registered_engines(&self) -> Vec<EngineId> {
        let defaults = if self.defaults {
            EngineId::BUILT_IN
                .into_iter()
                .filter(|engine| !self.disabled.contains(engine))
                .collect()
        } else {
            Vec::new()
        };

        defaults
            .into_iter()
            .chain(self.backends.iter().map(|b| b.engine.clone()))
            .collect()
    }
}

/// Options for the runtimes owned by `switchyard-*` backends.
///
/// # Fields
/// * `worker_threads` - Worker count for multi-thread runtimes (Tokio's default when unset)
/// * `thread_name` - Name given to runtime threads (defaults to `switchyard-worker`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OwnedRuntimeConfig {
    pub worker_threads: Option<usize>,
    pub thread_name: Option<String>,
}

impl OwnedRuntimeConfig {
    /// Get the thread name, using the built-in default if not configured.
    pub fn thread_name(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(DEFAULT_THREAD_NAME)
    }
}

/// Configuration for one additional backend.
///
/// # Fields
/// * `engine` - Engine identifier the backend is registered under
/// * `implementation` - Built-in implementation name, see `BackendFactory`
/// * `worker_threads` - Overrides `owned_runtime.worker_threads` for this backend
/// * `thread_name` - Overrides `owned_runtime.thread_name` for this backend
///
/// # Example
/// ```yaml
/// engine: edge-pool
/// type: owned_multi_thread
/// worker_threads: 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendConfig {
    pub engine: EngineId,
    #[serde(rename = "type")]
    pub implementation: String,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default)]
    pub thread_name: Option<String>,
}

/// Load a config from a YAML file, or TOML when the extension is `.toml`
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        Config::from_toml_str(&content)
    } else {
        Config::from_yaml_str(&content)
    }
}

/// Load and validate a config file
///
/// Every validation problem is logged and returned together so an operator
/// can fix them in one pass.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(&path)?;

    if let Err(validation_errors) = crate::config::validate_config(&cfg) {
        for issue in &validation_errors {
            ValidationIssue { issue }.log();
        }
        ConfigurationRejected {
            source: &path.as_ref().display().to_string(),
            issue_count: validation_errors.len(),
        }
        .log();
        return Err(ConfigError::Validation(validation_errors));
    }

    Ok(cfg)
}
