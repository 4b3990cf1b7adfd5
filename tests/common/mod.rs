#![allow(dead_code)]
#![allow(unused_imports)]
//! Shared integration test utilities.
//!
//! Import with:
//! ```
//! mod common;
//! use common::*;
//! ```

use proptest::prelude::ProptestConfig;
use proptest::test_runner::RngSeed;
use remote_data_stream::{Observable, RemoteData, StreamError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use tracing_subscriber::fmt::format::FmtSpan;

static INIT_LOGGING: Once = Once::new();

/// Default seed for property tests when running under CI.
pub const DEFAULT_PROPTEST_SEED: u64 = 0x5EED_5EED;

const PROPTEST_SEED_ENV: &str = "REMOTE_DATA_STREAM_PROPTEST_SEED";

/// Build a ProptestConfig with deterministic seed support for CI.
#[must_use]
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    let mut config = ProptestConfig::with_cases(cases);
    // Honor an explicit PROPTEST_RNG_SEED, otherwise apply our own.
    if matches!(config.rng_seed, RngSeed::Random) {
        if let Some(seed) = read_proptest_seed() {
            config.rng_seed = RngSeed::Fixed(seed);
        }
    }
    config
}

fn read_proptest_seed() -> Option<u64> {
    if let Ok(value) = std::env::var(PROPTEST_SEED_ENV) {
        return value.parse::<u64>().ok();
    }
    if std::env::var("CI").is_ok() {
        return Some(DEFAULT_PROPTEST_SEED);
    }
    None
}

/// Initialize test logging with trace-level output.
pub fn init_test_logging() {
    init_test_logging_with_level(tracing::Level::TRACE);
}

/// Initialize test logging with a custom level.
pub fn init_test_logging_with_level(level: tracing::Level) {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .try_init();
    });
}

/// Subscribes, runs to completion and returns the last emission.
///
/// Panics if the observable faults or completes without emitting.
pub fn resolve<T: Send + 'static>(observable: &Observable<T>) -> T {
    futures_lite::future::block_on(observable.last())
        .expect("observable faulted")
        .expect("observable completed without emitting")
}

/// Runs to completion and returns every emission.
pub fn resolve_all<T: Send + 'static>(observable: &Observable<T>) -> Vec<T> {
    futures_lite::future::block_on(observable.to_vec()).expect("observable faulted")
}

/// Runs to completion and returns the fault, if any.
pub fn resolve_fault<T: Send + 'static>(observable: &Observable<T>) -> Option<StreamError> {
    futures_lite::future::block_on(observable.last()).err()
}

/// Counts acquisitions and releases of a tracked resource.
#[derive(Debug, Clone, Default)]
pub struct ResourceCounter {
    acquired: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl ResourceCounter {
    /// Creates a counter with no acquisitions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires a guard that is released on drop.
    #[must_use]
    pub fn acquire(&self) -> ResourceGuard {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        ResourceGuard {
            released: Arc::clone(&self.released),
        }
    }

    /// Number of guards acquired so far.
    #[must_use]
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    /// Number of guards released so far.
    #[must_use]
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Guards acquired and not yet released.
    #[must_use]
    pub fn live(&self) -> usize {
        self.acquired() - self.released()
    }
}

/// Releases its slot in a [`ResourceCounter`] when dropped.
#[derive(Debug)]
pub struct ResourceGuard {
    released: Arc<AtomicUsize>,
}

impl Drop for ResourceGuard {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Log a test phase transition with a visual separator.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(phase = %$name, "========================================");
        tracing::info!(phase = %$name, "TEST PHASE: {}", $name);
        tracing::info!(phase = %$name, "========================================");
    };
}

/// Log a section within a test phase.
#[macro_export]
macro_rules! test_section {
    ($name:expr) => {
        tracing::debug!(section = %$name, "--- {} ---", $name);
    };
}

/// Log test completion with summary.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        tracing::info!(test = %$name, "test completed successfully: {}", $name);
    };
    ($name:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::info!(
            test = %$name,
            $($key = %$value,)*
            "test completed successfully: {}",
            $name
        );
    };
}

/// Log before assertions for context.
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {
        tracing::debug!(
            expected = ?$expected,
            actual = ?$actual,
            "Asserting: {}",
            $msg
        );
        assert!($cond, "{}: expected {:?}, got {:?}", $msg, $expected, $actual);
    };
}

/// Assert that a status is `Success` with a specific value.
#[macro_export]
macro_rules! assert_success {
    ($status:expr, $expected:expr) => {
        match $status {
            ::remote_data_stream::RemoteData::Success(v) => assert_eq!(v, $expected),
            other => panic!("expected RemoteData::Success({:?}), got {:?}", $expected, other),
        }
    };
}

/// Assert that a status is `Failure`.
#[macro_export]
macro_rules! assert_failure {
    ($status:expr) => {
        match $status {
            ::remote_data_stream::RemoteData::Failure(_) => {}
            other => panic!("expected RemoteData::Failure, got {:?}", other),
        }
    };
}
