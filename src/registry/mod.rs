// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The backend registry and the resolver that selects from it.
//!
//! The registry is an insertion-ordered table from [`EngineId`] to backend.
//! Order is priority: the resolver's fallback search returns the first
//! available entry. Built-in defaults are inserted first, so backends added
//! later only win when none of the defaults is available, unless a default is
//! removed and re-added behind them.
//!
//! The table is swapped as a whole on every mutation. Readers clone an
//! `Arc` snapshot under a short read lock and probe or invoke backends without
//! holding any lock, so registry administration never stalls dispatch.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::backends::{self, InlineBackend};
use crate::config::{EngineId, OwnedRuntimeConfig};
use crate::observability::messages::registry::{
    BackendAlreadyPresent, BackendRegistered, BackendRemoved,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Backend;

mod resolver;

pub use resolver::{Resolver, Selection};

/// One row of the registry table.
#[derive(Clone)]
pub struct RegistryEntry {
    pub engine: EngineId,
    pub backend: Arc<dyn Backend>,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("engine", &self.engine)
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Outcome of [`BackendRegistry::add`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// The engine already had a backend. Nothing changed.
    AlreadyPresent,
}

impl Registration {
    pub fn is_added(self) -> bool {
        matches!(self, Registration::Added)
    }
}

/// A read-only view of the registry table, in priority order.
#[derive(Clone, Default)]
pub struct RegistrySnapshot(Arc<Vec<RegistryEntry>>);

impl RegistrySnapshot {
    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, engine: &EngineId) -> Option<&Arc<dyn Backend>> {
        self.0
            .iter()
            .find(|entry| &entry.engine == engine)
            .map(|entry| &entry.backend)
    }

    pub fn contains(&self, engine: &EngineId) -> bool {
        self.get(engine).is_some()
    }

    /// Engine identifiers in priority order.
    pub fn engines(&self) -> Vec<EngineId> {
        self.0.iter().map(|entry| entry.engine.clone()).collect()
    }
}

impl fmt::Debug for RegistrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Diagnostic row produced by [`BackendRegistry::describe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendInfo {
    pub priority: usize,
    pub engine: EngineId,
    pub backend: &'static str,
    pub available: bool,
}

/// Ordered table of engine identifiers to backends.
///
/// Owned by whatever bootstraps the server and shared with the dispatch path
/// through an `Arc`.
///
/// ```
/// use switchyard::backends::InlineBackend;
/// use switchyard::config::EngineId;
/// use switchyard::registry::{BackendRegistry, Registration};
///
/// let registry = BackendRegistry::with_defaults();
/// assert_eq!(registry.len(), 4);
///
/// let edge = EngineId::custom("edge-pool").unwrap();
/// assert_eq!(registry.add_backend(edge.clone(), InlineBackend), Registration::Added);
/// assert_eq!(registry.add_backend(edge.clone(), InlineBackend), Registration::AlreadyPresent);
///
/// assert!(registry.remove(&edge));
/// assert!(!registry.remove(&edge));
/// ```
pub struct BackendRegistry {
    entries: RwLock<RegistrySnapshot>,
    fallback: Arc<dyn Backend>,
}

impl BackendRegistry {
    /// An empty registry. Resolution falls through to the inline backend.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(RegistrySnapshot::default()),
            fallback: Arc::new(InlineBackend),
        }
    }

    /// A registry holding the four built-in engines in default priority order.
    pub fn with_defaults() -> Self {
        Self::with_runtime_options(&OwnedRuntimeConfig::default())
    }

    /// Like [`BackendRegistry::with_defaults`], with explicit options for the owned runtimes.
    pub fn with_runtime_options(runtime: &OwnedRuntimeConfig) -> Self {
        let registry = Self::new();
        for (engine, backend) in backends::built_in_backends(runtime) {
            let _ = registry.add(engine, backend);
        }
        registry
    }

    /// Append `backend` for `engine`. Existing mappings are never overwritten.
    pub fn add(&self, engine: EngineId, backend: Arc<dyn Backend>) -> Registration {
        let mut entries = self.write();

        if let Some(existing) = entries.get(&engine) {
            BackendAlreadyPresent {
                engine: engine.as_str(),
                existing: existing.name(),
                rejected: backend.name(),
            }
            .log();
            return Registration::AlreadyPresent;
        }

        BackendRegistered {
            engine: engine.as_str(),
            backend: backend.name(),
            position: entries.len(),
        }
        .log();
        Arc::make_mut(&mut entries.0).push(RegistryEntry { engine, backend });
        Registration::Added
    }

    /// Convenience for [`BackendRegistry::add`] with an owned backend value.
    pub fn add_backend<B>(&self, engine: EngineId, backend: B) -> Registration
    where
        B: Backend + 'static,
    {
        self.add(engine, Arc::new(backend))
    }

    /// Delete the mapping for `engine`. Returns whether anything was removed.
    pub fn remove(&self, engine: &EngineId) -> bool {
        let mut entries = self.write();
        let Some(position) = entries.iter().position(|entry| &entry.engine == engine) else {
            return false;
        };

        let removed = Arc::make_mut(&mut entries.0).remove(position);
        BackendRemoved {
            engine: removed.engine.as_str(),
            backend: removed.backend.name(),
        }
        .log();
        true
    }

    /// Snapshot of the current table in insertion order.
    pub fn list(&self) -> RegistrySnapshot {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn contains(&self, engine: &EngineId) -> bool {
        self.read().contains(engine)
    }

    /// The backend used when nothing in the table qualifies. Never part of the table.
    pub fn fallback(&self) -> Arc<dyn Backend> {
        Arc::clone(&self.fallback)
    }

    /// Probe every registered backend from the calling thread.
    pub fn describe(&self) -> Vec<BackendInfo> {
        self.list()
            .iter()
            .enumerate()
            .map(|(priority, entry)| BackendInfo {
                priority,
                engine: entry.engine.clone(),
                backend: entry.backend.name(),
                available: entry.backend.available(),
            })
            .collect()
    }

    // Mutations never panic while holding the lock, so a poisoned lock still
    // guards a consistent table.
    fn read(&self) -> RwLockReadGuard<'_, RegistrySnapshot> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistrySnapshot> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.list();
        f.debug_struct("BackendRegistry")
            .field("backend_count", &snapshot.len())
            .field("engines", &snapshot.engines())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::StubBackend;

    fn engine(name: &str) -> EngineId {
        EngineId::custom(name).unwrap()
    }

    #[test]
    fn test_defaults_in_priority_order() {
        let registry = BackendRegistry::with_defaults();
        assert_eq!(registry.list().engines(), EngineId::BUILT_IN.to_vec());
        assert!(!registry.list().contains(&engine("inline")));
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = BackendRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.fallback().name(), "inline");
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let registry = BackendRegistry::new();
        for name in ["c", "a", "b"] {
            assert_eq!(
                registry.add_backend(engine(name), StubBackend::new("stub", true)),
                Registration::Added
            );
        }

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.list().engines(),
            vec![engine("c"), engine("a"), engine("b")]
        );
    }

    #[test]
    fn test_duplicate_add_never_overwrites() {
        let registry = BackendRegistry::new();
        let _ = registry.add_backend(engine("a"), StubBackend::new("first", true));
        let _ = registry.add_backend(engine("b"), StubBackend::new("second", true));

        let before = registry.list().engines();
        let outcome = registry.add_backend(engine("a"), StubBackend::new("intruder", false));

        assert_eq!(outcome, Registration::AlreadyPresent);
        assert!(!outcome.is_added());
        assert_eq!(registry.list().engines(), before);
        assert_eq!(registry.list().get(&engine("a")).unwrap().name(), "first");
    }

    #[test]
    fn test_duplicate_built_in_rejected() {
        let registry = BackendRegistry::with_defaults();
        let outcome = registry.add_backend(EngineId::TokioMultiThread, InlineBackend);

        assert_eq!(outcome, Registration::AlreadyPresent);
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.list().get(&EngineId::TokioMultiThread).unwrap().name(),
            "tokio_multi_thread"
        );
    }

    #[test]
    fn test_built_in_name_as_custom_engine_is_same_key() {
        let registry = BackendRegistry::with_defaults();

        for name in ["tokio-multi-thread", "  tokio-multi-thread\t"] {
            let outcome = registry.add_backend(engine(name), InlineBackend);
            assert_eq!(outcome, Registration::AlreadyPresent, "adding {:?}", name);
        }

        let _ = registry.add_backend(engine("edge"), InlineBackend);
        assert_eq!(
            registry.add_backend(engine(" edge "), InlineBackend),
            Registration::AlreadyPresent
        );

        let names: Vec<String> = registry
            .describe()
            .into_iter()
            .map(|info| info.engine.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "tokio-multi-thread",
                "switchyard-multi-thread",
                "tokio-current-thread",
                "switchyard-current-thread",
                "edge",
            ]
        );
    }

    #[test]
    fn test_empty_engine_cannot_be_registered() {
        assert_eq!(EngineId::custom(""), Err(crate::errors::EngineIdError::Empty));
        assert!(EngineId::custom("   ").is_err());
    }

    #[test]
    fn test_remove_present_and_absent() {
        let registry = BackendRegistry::with_defaults();

        assert!(registry.remove(&EngineId::OwnedMultiThread));
        assert_eq!(registry.len(), 3);
        assert!(!registry.contains(&EngineId::OwnedMultiThread));

        assert!(!registry.remove(&EngineId::OwnedMultiThread));
        assert!(!registry.remove(&engine("never-registered")));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_remove_then_readd_moves_to_back() {
        let registry = BackendRegistry::with_defaults();
        assert!(registry.remove(&EngineId::TokioMultiThread));
        let _ = registry.add_backend(EngineId::TokioMultiThread, InlineBackend);

        assert_eq!(
            registry.list().engines(),
            vec![
                EngineId::OwnedMultiThread,
                EngineId::TokioCurrentThread,
                EngineId::OwnedCurrentThread,
                EngineId::TokioMultiThread,
            ]
        );
    }

    #[test]
    fn test_snapshot_unaffected_by_later_mutation() {
        let registry = BackendRegistry::new();
        let _ = registry.add_backend(engine("a"), StubBackend::new("a", true));

        let snapshot = registry.list();
        let _ = registry.add_backend(engine("b"), StubBackend::new("b", true));
        assert!(registry.remove(&engine("a")));

        assert_eq!(snapshot.engines(), vec![engine("a")]);
        assert_eq!(registry.list().engines(), vec![engine("b")]);
    }

    #[test]
    fn test_describe_reports_availability() {
        let registry = BackendRegistry::new();
        let _ = registry.add_backend(engine("down"), StubBackend::new("down", false));
        let _ = registry.add_backend(engine("up"), StubBackend::new("up", true));

        let info = registry.describe();
        assert_eq!(
            info,
            vec![
                BackendInfo {
                    priority: 0,
                    engine: engine("down"),
                    backend: "down",
                    available: false,
                },
                BackendInfo {
                    priority: 1,
                    engine: engine("up"),
                    backend: "up",
                    available: true,
                },
            ]
        );

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json[1]["engine"], "up");
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let registry = Arc::new(BackendRegistry::new());
        let writer = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for i in 0..100 {
                    let _ = registry.add_backend(engine(&format!("e{}", i)), StubBackend::new("w", true));
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let snapshot = registry.list();
                        // Insertion order holds in every snapshot.
                        for (i, entry) in snapshot.iter().enumerate() {
                            assert_eq!(entry.engine, engine(&format!("e{}", i)));
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(registry.len(), 100);
    }
}
