// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod backend;
mod config;
mod dispatch;

pub use backend::BackendFactoryError;
pub use config::{ConfigError, EngineIdError, ValidationError};
pub use dispatch::{DispatchError, ResolveError};
