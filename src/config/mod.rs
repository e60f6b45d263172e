// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod engine_id;
mod loader;
mod runtime;
mod validation;

pub mod consts;

pub use engine_id::{CustomEngine, EngineId};
pub use loader::{
    load_and_validate_config, load_config, BackendConfig, Config, OwnedRuntimeConfig,
};
pub use runtime::RuntimeBuilder;
pub use validation::validate_config;
