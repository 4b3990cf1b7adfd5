//! Process-wide configuration tests.
//!
//! Installing a config changes global state, so this binary holds a single
//! test that walks through each strategy in turn.

#[macro_use]
mod common;

use common::init_test_logging;
use futures_lite::future::{block_on, poll_once};
use remote_data_stream::observable_remote_data as ord;
use remote_data_stream::prelude::*;
use remote_data_stream::{FlattenStrategy, StreamConfig, StreamError};
use std::pin::Pin;
use std::task::{Context, Poll};

fn init_test(name: &str) {
    init_test_logging();
    test_phase!(name);
}

/// Emits one success, then stays open.
struct ThenStall {
    status: Option<RemoteData<String, i32>>,
}

impl Stream for ThenStall {
    type Item = Result<RemoteData<String, i32>, StreamError>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.get_mut().status.take() {
            Some(status) => Poll::Ready(Some(Ok(status))),
            None => Poll::Pending,
        }
    }
}

/// Two synchronous outer successes, each chained into an inner that never ends.
fn fan_out() -> ObservableRemoteData<String, i32> {
    let outer = Observable::from_iter(vec![RemoteData::Success(1), RemoteData::Success(2)]);
    outer.pipe(ord::chain(|n: i32| {
        Observable::new(move || ThenStall {
            status: Some(RemoteData::Success(n * 10)),
        })
    }))
}

/// Collects the successes a fresh subscription has ready.
fn ready_successes(observable: &ObservableRemoteData<String, i32>) -> Vec<i32> {
    let mut subscription = observable.subscribe();
    let mut values = Vec::new();
    while let Some(Some(Ok(status))) = block_on(poll_once(subscription.next())) {
        values.extend(status.success_value());
    }
    values
}

#[test]
fn installed_config_selects_chain_flattening() {
    init_test("installed_config_selects_chain_flattening");

    test_section!("concat");
    StreamConfig::install(StreamConfig::default().flatten(FlattenStrategy::Concat));
    let current = StreamConfig::current();
    assert_with_log!(
        current.flatten == FlattenStrategy::Concat,
        "install wins",
        FlattenStrategy::Concat,
        current.flatten
    );
    let concatenated = fan_out();
    let values = ready_successes(&concatenated);
    // Concat waits on the first inner, which never ends.
    assert_with_log!(values == vec![10], "concat blocks on open inner", vec![10], values);

    test_section!("switch");
    StreamConfig::install(StreamConfig::default().log_subscriptions(true));
    let switched = fan_out();
    let values = ready_successes(&switched);
    assert_with_log!(values == vec![10, 20], "switch moves to latest", vec![10, 20], values);

    // The strategy is captured when the observable is built.
    let still_concat = ready_successes(&concatenated);
    assert_with_log!(
        still_concat == vec![10],
        "built observables keep their strategy",
        vec![10],
        still_concat
    );
    test_complete!("installed_config_selects_chain_flattening");
}
