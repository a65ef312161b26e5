//! # Runtime
//!
//! Tokio runtime profiles for the dashboard binaries.
//!
//! The dashboard serves one request/response interaction at a time and does no
//! background work, so the default profile is a current-thread scheduler. A
//! multi-threaded profile is kept for deployments serving many concurrent users.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[agrisk_runtime::main(single_threaded)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use agrisk_derive::main;
pub use anyhow::Result;

use anyhow::Context;
use std::thread::available_parallelism;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Worker count used when the available parallelism cannot be detected.
const FALLBACK_WORKER_THREADS: usize = 4;
/// Upper bound for configured worker threads.
const MAX_WORKER_THREADS: usize = 256;
/// Default stack size for runtime threads (2 `MiB`).
const DEFAULT_STACK_SIZE: usize = 2 * 1024 * 1024;
/// Minimum allowed stack size (1 `MiB`).
const MIN_STACK_SIZE: usize = 1024 * 1024;
/// Maximum allowed stack size (16 `MiB`).
const MAX_STACK_SIZE: usize = 16 * 1024 * 1024;
/// How long an idle blocking thread stays alive.
const THREAD_KEEP_ALIVE: Duration = Duration::from_secs(60);

/// Scheduler flavor of the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Everything runs on the thread that calls `block_on`.
    CurrentThread,
    /// Work-stealing scheduler with a fixed number of workers.
    MultiThread { workers: usize },
}

/// Configuration for the Tokio runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub flavor: Flavor,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::single_threaded()
    }
}

impl RuntimeConfig {
    /// Current-thread profile used by the dashboard server.
    #[must_use]
    pub fn single_threaded() -> Self {
        Self {
            flavor: Flavor::CurrentThread,
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: "agrisk-main".to_owned(),
            thread_keep_alive: THREAD_KEEP_ALIVE,
        }
    }

    /// Multi-threaded profile sized from `TOKIO_WORKER_THREADS` or the host parallelism.
    #[must_use]
    pub fn multi_threaded() -> Self {
        Self {
            flavor: Flavor::MultiThread { workers: detect_worker_threads() },
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: "agrisk-worker".to_owned(),
            thread_keep_alive: THREAD_KEEP_ALIVE,
        }
    }

    /// Switches to a multi-threaded scheduler with `workers` threads.
    #[must_use]
    pub fn with_worker_threads(mut self, workers: usize) -> Self {
        self.flavor = Flavor::MultiThread { workers: workers.clamp(1, MAX_WORKER_THREADS) };
        self
    }

    #[must_use]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.thread_name = name;
        }
        self
    }
}

fn detect_worker_threads() -> usize {
    std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0 && n <= MAX_WORKER_THREADS)
        .unwrap_or_else(|| {
            available_parallelism().map(std::num::NonZero::get).unwrap_or(FALLBACK_WORKER_THREADS)
        })
}

/// Builds a Tokio runtime for the given profile.
///
/// All drivers (I/O and time) are enabled.
///
/// # Errors
///
/// Returns an error if the operating system refuses to create the runtime threads.
pub fn build_runtime(config: &RuntimeConfig) -> Result<Runtime> {
    let mut builder = match config.flavor {
        Flavor::CurrentThread => Builder::new_current_thread(),
        Flavor::MultiThread { workers } => {
            let mut builder = Builder::new_multi_thread();
            builder.worker_threads(workers.clamp(1, MAX_WORKER_THREADS));
            builder
        },
    };

    let runtime = builder
        .enable_all()
        .thread_name(config.thread_name.clone())
        .thread_stack_size(config.stack_size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE))
        .thread_keep_alive(config.thread_keep_alive)
        .build()
        .context("Failed to build Tokio runtime")?;

    debug!(flavor = ?config.flavor, thread_name = %config.thread_name, "Runtime built");

    Ok(runtime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_current_thread() {
        let config = RuntimeConfig::default();
        assert_eq!(config.flavor, Flavor::CurrentThread);
        assert_eq!(config.stack_size, DEFAULT_STACK_SIZE);
    }

    #[test]
    fn builders_clamp_values() {
        let config = RuntimeConfig::single_threaded()
            .with_worker_threads(0)
            .with_stack_size(1)
            .with_thread_name("  ");

        assert_eq!(config.flavor, Flavor::MultiThread { workers: 1 });
        assert_eq!(config.stack_size, MIN_STACK_SIZE);
        assert_eq!(config.thread_name, "agrisk-main");
    }

    #[test]
    fn both_profiles_build_and_run() {
        for config in [RuntimeConfig::single_threaded(), RuntimeConfig::multi_threaded()] {
            let rt = build_runtime(&config).expect("runtime should build");
            let value = rt.block_on(async { 21 * 2 });
            assert_eq!(value, 42);
        }
    }
}
