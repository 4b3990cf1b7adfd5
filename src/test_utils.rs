//! Test utilities for remote-data-stream.
//!
//! This module provides shared helpers for unit tests:
//! - Consistent tracing-based logging initialization
//! - Phase/section macros for readable test output
//! - Manual polling helpers (noop waker, drain to completion)
//! - RemoteData assertion macros

use crate::stream::Stream;
use std::pin::Pin;
use std::sync::{Arc, Mutex, Once};
use std::task::{Context, Poll, Wake, Waker};
use tracing_subscriber::fmt::format::FmtSpan;

static INIT_LOGGING: Once = Once::new();
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Initialize test logging with trace-level output.
///
/// Safe to call multiple times; only initializes once.
pub fn init_test_logging() {
    init_test_logging_with_level(tracing::Level::TRACE);
}

/// Initialize test logging with a custom level.
///
/// The first call wins; later calls are no-ops.
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

/// Acquire the global environment lock for tests that mutate env vars.
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

struct NoopWaker;

impl Wake for NoopWaker {
    fn wake(self: Arc<Self>) {}
}

/// A waker that does nothing when woken.
pub fn noop_waker() -> Waker {
    Waker::from(Arc::new(NoopWaker))
}

/// Polls a stream until it ends or returns `Pending`, collecting items.
///
/// Returns the items and whether the stream ended.
pub fn drain_ready<S>(stream: &mut S) -> (Vec<S::Item>, bool)
where
    S: Stream + Unpin,
{
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    let mut items = Vec::new();
    loop {
        match Pin::new(&mut *stream).poll_next(&mut cx) {
            Poll::Ready(Some(item)) => items.push(item),
            Poll::Ready(None) => return (items, true),
            Poll::Pending => return (items, false),
        }
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
            $crate::types::RemoteData::Success(v) => assert_eq!(v, $expected),
            other => panic!("expected RemoteData::Success({:?}), got {:?}", $expected, other),
        }
    };
}

/// Assert that a status is `Failure`.
#[macro_export]
macro_rules! assert_failure {
    ($status:expr) => {
        match $status {
            $crate::types::RemoteData::Failure(_) => {}
            other => panic!("expected RemoteData::Failure, got {:?}", other),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::types::RemoteData;

    #[test]
    fn assert_success_accepts_matching_value() {
        crate::assert_success!(RemoteData::<String, i32>::Success(3), 3);
        crate::assert_failure!(RemoteData::<String, i32>::Failure("no".to_string()));
    }

    #[test]
    #[should_panic(expected = "expected RemoteData::Success(3), got Pending(None)")]
    fn assert_success_panics_on_other_status() {
        crate::assert_success!(RemoteData::<String, i32>::Pending(None), 3);
    }

    #[test]
    #[should_panic(expected = "expected RemoteData::Failure, got Initial")]
    fn assert_failure_panics_on_other_status() {
        crate::assert_failure!(RemoteData::<String, i32>::Initial);
    }
}
