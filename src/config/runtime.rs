// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::{self, BackendFactory};
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::errors::{ConfigError, ValidationError};
use crate::observability::messages::registry::RegistryInitialized;
use crate::observability::messages::StructuredLog;
use crate::registry::BackendRegistry;

/// Dispatch runtime builder - orchestrates registry and dispatcher creation from configuration.
///
/// Expects a configuration that already passed `validate_config`; construction
/// errors that validation would have caught are still returned, never ignored.
///
/// # Examples
///
/// ## Building a dispatcher from configuration
/// ```
/// use switchyard::config::{Config, EngineId, RuntimeBuilder};
///
/// let config = Config::from_yaml_str(
///     "engine: direct\nbackends:\n  - engine: direct\n    type: inline\n",
/// )
/// .unwrap();
///
/// let dispatcher = RuntimeBuilder::from_config(&config).unwrap();
///
/// assert_eq!(dispatcher.preferred_engine(), Some(&EngineId::custom("direct").unwrap()));
/// assert_eq!(dispatcher.registry().len(), 5);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build the registry described by `cfg`.
    ///
    /// Enabled built-ins come first in default priority order, followed by the
    /// configured backends in file order.
    pub fn registry_from_config(cfg: &Config) -> Result<BackendRegistry, ConfigError> {
        let registry = BackendRegistry::new();

        if cfg.defaults {
            for (engine, backend) in backends::built_in_backends(&cfg.owned_runtime) {
                if !cfg.disabled.contains(&engine) {
                    let _ = registry.add(engine, backend);
                }
            }
        }

        for backend_cfg in &cfg.backends {
            let backend = BackendFactory::create_from_config(backend_cfg, &cfg.owned_runtime)?;
            if !registry.add(backend_cfg.engine.clone(), backend).is_added() {
                return Err(ConfigError::Validation(vec![ValidationError::DuplicateEngine {
                    engine: backend_cfg.engine.clone(),
                }]));
            }
        }

        RegistryInitialized {
            backend_count: registry.len(),
            with_defaults: cfg.defaults,
        }
        .log();

        Ok(registry)
    }

    /// Build a dispatcher over a freshly built registry.
    ///
    /// With `strict`, the preferred engine must be registered and available
    /// from the calling context, otherwise startup fails.
    pub fn from_config(cfg: &Config) -> Result<Dispatcher, ConfigError> {
        let registry = Self::registry_from_config(cfg)?;
        let dispatcher = Dispatcher::new(Arc::new(registry)).with_engine(cfg.engine.clone());

        if cfg.strict {
            dispatcher.verify_preferred()?;
        }

        Ok(dispatcher)
    }
}
