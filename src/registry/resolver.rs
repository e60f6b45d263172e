// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use crate::config::EngineId;
use crate::errors::ResolveError;
use crate::observability::messages::resolver::{
    BackendSelected, BackendUnavailable, EngineNotRegistered, NoBackendAvailable,
};
use crate::observability::messages::StructuredLog;
use crate::registry::BackendRegistry;
use crate::traits::Backend;

/// Result of a fallback search.
#[derive(Clone)]
pub struct Selection {
    /// `None` when nothing registered was available.
    pub engine: Option<EngineId>,
    pub backend: Arc<dyn Backend>,
}

impl Selection {
    /// Whether the search fell through to the registry's fallback backend.
    pub fn is_fallback(&self) -> bool {
        self.engine.is_none()
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("engine", &self.engine)
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Chooses a backend from a registry.
///
/// Every call works on a fresh snapshot, so selection reflects registry
/// changes immediately and probes run on the caller's thread without any lock
/// held. Probes are evaluated once per call and never retried.
#[derive(Clone, Debug)]
pub struct Resolver {
    registry: Arc<BackendRegistry>,
}

impl Resolver {
    pub fn new(registry: Arc<BackendRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<BackendRegistry> {
        &self.registry
    }

    /// The backend registered for `engine`, or the fallback if there is none.
    ///
    /// With `verify`, an unavailable backend is also replaced by the fallback.
    pub fn lookup(&self, engine: &EngineId, verify: bool) -> Arc<dyn Backend> {
        let snapshot = self.registry.list();
        let Some(backend) = snapshot.get(engine) else {
            let fallback = self.registry.fallback();
            EngineNotRegistered {
                engine: engine.as_str(),
                fallback: fallback.name(),
            }
            .log();
            return fallback;
        };

        if verify && !backend.available() {
            let fallback = self.registry.fallback();
            BackendUnavailable {
                engine: engine.as_str(),
                backend: backend.name(),
                fallback: fallback.name(),
            }
            .log();
            return fallback;
        }

        Arc::clone(backend)
    }

    /// First registered backend, in priority order, whose probe succeeds.
    pub fn find_best(&self) -> Selection {
        let snapshot = self.registry.list();

        for (index, entry) in snapshot.iter().enumerate() {
            if entry.backend.available() {
                BackendSelected {
                    engine: entry.engine.as_str(),
                    backend: entry.backend.name(),
                    probed: index + 1,
                }
                .log();
                return Selection {
                    engine: Some(entry.engine.clone()),
                    backend: Arc::clone(&entry.backend),
                };
            }
        }

        let fallback = self.registry.fallback();
        NoBackendAvailable {
            candidates: snapshot.len(),
            fallback: fallback.name(),
        }
        .log();
        Selection {
            engine: None,
            backend: fallback,
        }
    }

    /// Engine of the first available backend, `None` if nothing qualifies.
    pub fn find_best_engine(&self) -> Option<EngineId> {
        self.find_best().engine
    }

    /// First available backend, or the fallback if nothing qualifies.
    pub fn find_best_backend(&self) -> Arc<dyn Backend> {
        self.find_best().backend
    }

    /// Strict lookup for startup checks: no substitution, errors instead.
    pub fn require(&self, engine: &EngineId) -> Result<Arc<dyn Backend>, ResolveError> {
        let snapshot = self.registry.list();
        let backend = snapshot
            .get(engine)
            .ok_or_else(|| ResolveError::Unregistered(engine.clone()))?;

        if !backend.available() {
            return Err(ResolveError::Unavailable {
                engine: engine.clone(),
                backend: backend.name(),
            });
        }

        Ok(Arc::clone(backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::StubBackend;

    fn engine(name: &str) -> EngineId {
        EngineId::custom(name).unwrap()
    }

    fn resolver_with(backends: Vec<(&str, Arc<StubBackend>)>) -> Resolver {
        let registry = BackendRegistry::new();
        for (name, backend) in backends {
            let _ = registry.add(engine(name), backend);
        }
        Resolver::new(Arc::new(registry))
    }

    #[test]
    fn test_find_best_returns_only_available_entry_table_driven() {
        for count in 1..=5 {
            for k in 0..count {
                let stubs: Vec<Arc<StubBackend>> = (0..count)
                    .map(|i| Arc::new(StubBackend::new("stub", i == k)))
                    .collect();
                let names: Vec<String> = (0..count).map(|i| format!("engine-{}", i)).collect();
                let resolver = resolver_with(
                    names
                        .iter()
                        .map(String::as_str)
                        .zip(stubs.iter().cloned())
                        .collect(),
                );

                let selection = resolver.find_best();
                assert_eq!(
                    selection.engine,
                    Some(engine(&names[k])),
                    "{} backends, available index {}",
                    count,
                    k
                );
                // Nothing after the winner is probed.
                for stub in &stubs[k + 1..] {
                    assert_eq!(stub.probe_count(), 0);
                }
            }
        }
    }

    #[test]
    fn test_find_best_prefers_earlier_registration() {
        let first = Arc::new(StubBackend::new("first", true));
        let second = Arc::new(StubBackend::new("second", true));
        let resolver = resolver_with(vec![("a", first), ("b", second)]);

        assert_eq!(resolver.find_best_engine(), Some(engine("a")));
        assert_eq!(resolver.find_best_backend().name(), "first");
    }

    #[test]
    fn test_find_best_falls_back_to_default() {
        let resolver = resolver_with(vec![
            ("a", Arc::new(StubBackend::new("a", false))),
            ("b", Arc::new(StubBackend::new("b", false))),
        ]);

        let selection = resolver.find_best();
        assert!(selection.is_fallback());
        assert_eq!(resolver.find_best_engine(), None);
        assert_eq!(resolver.find_best_backend().name(), "inline");
    }

    #[test]
    fn test_find_best_on_empty_registry() {
        let resolver = resolver_with(vec![]);
        assert_eq!(resolver.find_best_engine(), None);
        assert_eq!(resolver.find_best_backend().name(), "inline");
    }

    #[test]
    fn test_find_best_follows_availability_changes() {
        let flaky = Arc::new(StubBackend::new("flaky", false));
        let steady = Arc::new(StubBackend::new("steady", true));
        let resolver = resolver_with(vec![("flaky", flaky.clone()), ("steady", steady)]);

        assert_eq!(resolver.find_best_engine(), Some(engine("steady")));
        flaky.set_available(true);
        assert_eq!(resolver.find_best_engine(), Some(engine("flaky")));
    }

    #[test]
    fn test_lookup_table_driven() {
        struct TestCase {
            name: &'static str,
            engine: &'static str,
            verify: bool,
            expected_backend: &'static str,
        }

        let cases = vec![
            TestCase {
                name: "registered and available",
                engine: "up",
                verify: true,
                expected_backend: "up",
            },
            TestCase {
                name: "unavailable with verify substitutes default",
                engine: "down",
                verify: true,
                expected_backend: "inline",
            },
            TestCase {
                name: "unavailable without verify is returned as is",
                engine: "down",
                verify: false,
                expected_backend: "down",
            },
            TestCase {
                name: "unregistered without verify",
                engine: "missing",
                verify: false,
                expected_backend: "inline",
            },
            TestCase {
                name: "unregistered with verify",
                engine: "missing",
                verify: true,
                expected_backend: "inline",
            },
        ];

        let resolver = resolver_with(vec![
            ("up", Arc::new(StubBackend::new("up", true))),
            ("down", Arc::new(StubBackend::new("down", false))),
        ]);

        for case in cases {
            let backend = resolver.lookup(&engine(case.engine), case.verify);
            assert_eq!(
                backend.name(),
                case.expected_backend,
                "Test case '{}'",
                case.name
            );
        }
    }

    #[test]
    fn test_lookup_without_verify_skips_probe() {
        let stub = Arc::new(StubBackend::new("quiet", true));
        let resolver = resolver_with(vec![("quiet", stub.clone())]);

        let _ = resolver.lookup(&engine("quiet"), false);
        assert_eq!(stub.probe_count(), 0);

        let _ = resolver.lookup(&engine("quiet"), true);
        assert_eq!(stub.probe_count(), 1);
    }

    #[test]
    fn test_require_reports_unregistered_and_unavailable() {
        let resolver = resolver_with(vec![
            ("up", Arc::new(StubBackend::new("up", true))),
            ("down", Arc::new(StubBackend::new("down", false))),
        ]);

        assert_eq!(resolver.require(&engine("up")).unwrap().name(), "up");
        assert_eq!(
            resolver.require(&engine("missing")).err(),
            Some(ResolveError::Unregistered(engine("missing")))
        );
        assert_eq!(
            resolver.require(&engine("down")).err(),
            Some(ResolveError::Unavailable {
                engine: engine("down"),
                backend: "down",
            })
        );
    }

    #[tokio::test]
    async fn test_defaults_select_current_thread_runtime() {
        let resolver = Resolver::new(Arc::new(BackendRegistry::with_defaults()));
        assert_eq!(resolver.find_best_engine(), Some(EngineId::TokioCurrentThread));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_defaults_select_multi_thread_runtime() {
        let resolver = Resolver::new(Arc::new(BackendRegistry::with_defaults()));
        assert_eq!(resolver.find_best_engine(), Some(EngineId::TokioMultiThread));
    }

    #[test]
    fn test_defaults_select_owned_runtime_outside_tokio() {
        let resolver = Resolver::new(Arc::new(BackendRegistry::with_defaults()));
        let selection = resolver.find_best();

        assert_eq!(selection.engine, Some(EngineId::OwnedMultiThread));
        assert_eq!(selection.backend.name(), "owned_multi_thread");
    }
}
