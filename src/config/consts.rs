/// Engine identifier for an ambient Tokio multi-thread runtime
pub const TOKIO_MULTI_THREAD: &str = "tokio-multi-thread";
/// Engine identifier for switchyard's own multi-thread runtime
pub const OWNED_MULTI_THREAD: &str = "switchyard-multi-thread";
/// Engine identifier for an ambient Tokio current-thread runtime
pub const TOKIO_CURRENT_THREAD: &str = "tokio-current-thread";
/// Engine identifier for switchyard's own current-thread runtime
pub const OWNED_CURRENT_THREAD: &str = "switchyard-current-thread";

/// Thread name prefix for runtimes owned by switchyard backends
pub const DEFAULT_THREAD_NAME: &str = "switchyard-worker";
/// Upper bound on `worker_threads` accepted from configuration
pub const MAX_WORKER_THREADS: usize = 1024;
