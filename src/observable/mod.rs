//! Cold, multi-shot observables.
//!
//! An [`Observable`] is a recipe for a stream. Nothing runs until
//! [`Observable::subscribe`] is called, and every call builds an
//! independent [`Subscription`] with its own upstream state. Dropping a
//! subscription drops every stream it created, which cancels that
//! execution without affecting any other subscription.
//!
//! Subscriptions yield `Result<T, StreamError>`. An `Err` item is a
//! mechanical fault in the stream itself; it is forwarded once and ends the
//! subscription.
//!
//! # Example
//!
//! ```ignore
//! use remote_data_stream::observable::Observable;
//!
//! let numbers = Observable::from_iter(vec![1, 2, 3]).map(|n| n * 10);
//! let last = futures_lite::future::block_on(numbers.last());
//! assert_eq!(last.unwrap(), Some(30));
//! ```

mod kind;

pub use kind::ObservableKind;

use crate::config::{FlattenStrategy, StreamConfig};
use crate::error::StreamError;
use crate::stream::{self, BoxStream, Stream, StreamExt};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

type Factory<T> = Arc<dyn Fn() -> BoxStream<'static, Result<T, StreamError>> + Send + Sync>;

/// A lazy stream factory; see the [module docs](self).
pub struct Observable<T> {
    factory: Factory<T>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable").finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Observable<T> {
    /// Creates an observable that calls `factory` on every subscription.
    pub fn new<S, F>(factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Stream<Item = Result<T, StreamError>> + Send + 'static,
    {
        Self {
            factory: Arc::new(move || factory().boxed()),
        }
    }

    /// Emits `value` once, then completes.
    pub fn of(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Self::new(move || stream::iter(std::iter::once(Ok(value.clone()))))
    }

    /// Emits every item of `items` in order, then completes.
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
        I::IntoIter: Send + 'static,
    {
        Self::new(move || stream::iter(items.clone().into_iter().map(Ok)))
    }

    /// Completes without emitting.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(stream::empty)
    }

    /// Never emits and never completes.
    #[must_use]
    pub fn never() -> Self {
        Self::new(stream::never)
    }

    /// Faults with `error` on every subscription.
    #[must_use]
    pub fn fail(error: StreamError) -> Self {
        Self::new(move || stream::iter(std::iter::once(Err(error.clone()))))
    }

    /// Emits the result of `f`, called once per subscription when first polled.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::new(move || {
            let f = Arc::clone(&f);
            stream::iter(std::iter::once_with(move || Ok(f())))
        })
    }

    /// Emits the output of the future `f` builds, once per subscription.
    pub fn from_future<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self::new(move || stream::once_future(f()).map(Ok::<T, StreamError>))
    }

    /// Builds the observable with `f` on every subscription.
    pub fn defer<F>(f: F) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
    {
        Self::new(move || f().subscribe())
    }

    /// Applies `f` to every value.
    pub fn map<U, F>(&self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Observable::new(move || {
            let f = Arc::clone(&f);
            source.subscribe().map(move |item| item.map(|value| f(value)))
        })
    }

    /// Maps every value to an observable, following only the newest one.
    ///
    /// The previous inner subscription is dropped when a new value arrives.
    /// Values the inner already had ready are forwarded first.
    pub fn switch_map<U, F>(&self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Observable<U> + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Observable::new(move || {
            let f = Arc::clone(&f);
            source
                .subscribe()
                .try_switch_map(move |value| f(value).subscribe())
        })
    }

    /// Maps every value to an observable, running them one after another.
    pub fn concat_map<U, F>(&self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Observable<U> + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Observable::new(move || {
            let f = Arc::clone(&f);
            source
                .subscribe()
                .try_concat_map(move |value| f(value).subscribe())
        })
    }

    /// Flattens with the given strategy.
    pub fn flat_map_with<U, F>(&self, strategy: FlattenStrategy, f: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Observable<U> + Send + Sync + 'static,
    {
        match strategy {
            FlattenStrategy::Switch => self.switch_map(f),
            FlattenStrategy::Concat => self.concat_map(f),
        }
    }

    /// Emits `f(latest self, latest other)` whenever either side emits,
    /// once both have emitted.
    pub fn combine_latest<U, V, F>(&self, other: &Observable<U>, f: F) -> Observable<V>
    where
        U: Send + 'static,
        V: Send + 'static,
        F: Fn(&T, &U) -> V + Send + Sync + 'static,
    {
        let left = self.clone();
        let right = other.clone();
        let f = Arc::new(f);
        Observable::new(move || {
            let f = Arc::clone(&f);
            stream::try_combine_latest(left.subscribe(), right.subscribe(), move |a: &T, b: &U| {
                f(a, b)
            })
        })
    }

    /// Emits the latest values of every source, in source order.
    ///
    /// An empty list completes without emitting.
    pub fn combine_latest_all(sources: Vec<Self>) -> Observable<Vec<T>>
    where
        T: Clone + Sync,
    {
        Observable::new(move || {
            stream::try_combine_latest_all(sources.iter().map(Self::subscribe).collect())
        })
    }

    /// Starts a new, independent execution.
    pub fn subscribe(&self) -> Subscription<T> {
        let id = NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed);
        let verbose = StreamConfig::current().log_subscriptions;
        log_event(verbose, id, "subscribed");
        Subscription {
            id,
            stream: (self.factory)(),
            verbose,
            finished: false,
        }
    }

    /// Resolves to the last value once the observable completes.
    ///
    /// Returns `Ok(None)` if nothing was emitted, and the fault if one occurred.
    pub async fn last(&self) -> Result<Option<T>, StreamError> {
        let mut subscription = self.subscribe();
        let mut last = None;
        while let Some(item) = subscription.next().await {
            last = Some(item?);
        }
        Ok(last)
    }

    /// Resolves to every value once the observable completes.
    pub async fn to_vec(&self) -> Result<Vec<T>, StreamError> {
        let mut subscription = self.subscribe();
        let mut values = Vec::new();
        while let Some(item) = subscription.next().await {
            values.push(item?);
        }
        Ok(values)
    }
}

/// One execution of an [`Observable`]. Dropping it cancels the execution.
#[must_use = "streams do nothing unless polled"]
pub struct Subscription<T> {
    id: u64,
    stream: BoxStream<'static, Result<T, StreamError>>,
    verbose: bool,
    finished: bool,
}

impl<T> Subscription<T> {
    /// Process-unique identifier, used in log events.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns true once the execution completed or faulted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl<T> Stream for Subscription<T> {
    type Item = Result<T, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }
        match this.stream.as_mut().poll_next(cx) {
            Poll::Ready(Some(Err(err))) => {
                tracing::debug!(subscription = this.id, error = %err, "subscription faulted");
                this.finished = true;
                Poll::Ready(Some(Err(err)))
            }
            Poll::Ready(None) => {
                log_event(this.verbose, this.id, "completed");
                this.finished = true;
                Poll::Ready(None)
            }
            other => other,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            self.stream.size_hint()
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if !self.finished {
            log_event(self.verbose, self.id, "cancelled");
        }
    }
}

fn log_event(verbose: bool, id: u64, event: &'static str) {
    if verbose {
        tracing::debug!(subscription = id, event, "observable subscription");
    } else {
        tracing::trace!(subscription = id, event, "observable subscription");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{drain_ready, init_test_logging};
    use std::sync::atomic::AtomicUsize;

    fn init_test(name: &str) {
        init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn subscriptions_are_independent() {
        init_test("subscriptions_are_independent");
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = Observable::from_fn(move || counter.fetch_add(1, Ordering::SeqCst));

        let mut first = source.subscribe();
        let mut second = source.subscribe();
        crate::assert_with_log!(first.id() != second.id(), "distinct ids", "!=", second.id());

        let (a, _) = drain_ready(&mut first);
        let (b, _) = drain_ready(&mut second);
        let calls_made = calls.load(Ordering::SeqCst);
        crate::assert_with_log!(calls_made == 2, "one call per subscription", 2, calls_made);
        crate::assert_with_log!(a.len() == 1 && b.len() == 1, "one value each", 1, a.len());
        crate::test_complete!("subscriptions_are_independent");
    }

    #[test]
    fn from_fn_is_lazy() {
        init_test("from_fn_is_lazy");
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = Observable::from_fn(move || counter.fetch_add(1, Ordering::SeqCst));
        let subscription = source.subscribe();
        let calls_made = calls.load(Ordering::SeqCst);
        crate::assert_with_log!(calls_made == 0, "not called before poll", 0, calls_made);
        drop(subscription);
        crate::test_complete!("from_fn_is_lazy");
    }

    #[test]
    fn last_and_to_vec() {
        init_test("last_and_to_vec");
        let source = Observable::from_iter(vec![1, 2, 3]).map(|n| n * 10);
        let last = futures_lite::future::block_on(source.last()).expect("no fault");
        crate::assert_with_log!(last == Some(30), "last", Some(30), last);
        let all = futures_lite::future::block_on(source.to_vec()).expect("no fault");
        crate::assert_with_log!(all == vec![10, 20, 30], "to_vec", vec![10, 20, 30], all);

        let nothing = futures_lite::future::block_on(Observable::<i32>::empty().last());
        crate::assert_with_log!(
            matches!(nothing, Ok(None)),
            "empty last",
            "Ok(None)",
            nothing
        );
        crate::test_complete!("last_and_to_vec");
    }

    #[test]
    fn fault_ends_subscription() {
        init_test("fault_ends_subscription");
        let source = Observable::<i32>::fail(StreamError::faulted("socket closed"));
        let mut subscription = source.subscribe();
        let (items, done) = drain_ready(&mut subscription);
        crate::assert_with_log!(items.len() == 1, "one fault", 1, items.len());
        crate::assert_with_log!(items[0].is_err(), "is fault", "Err", items[0]);
        crate::assert_with_log!(done, "ended", true, done);
        crate::assert_with_log!(
            subscription.is_finished(),
            "finished",
            true,
            subscription.is_finished()
        );

        let result = futures_lite::future::block_on(source.last());
        crate::assert_with_log!(result.is_err(), "last faults", "Err", result);
        crate::test_complete!("fault_ends_subscription");
    }

    #[test]
    fn switch_map_and_concat_map() {
        init_test("switch_map_and_concat_map");
        let outer = Observable::from_iter(vec![1, 2]);
        let switched = outer.switch_map(|n| Observable::from_iter(vec![n, n * 100]));
        let values = futures_lite::future::block_on(switched.to_vec()).expect("no fault");
        // Synchronous inners finish before the next outer value arrives.
        let expected = vec![1, 100, 2, 200];
        crate::assert_with_log!(values == expected, "switch", expected, values);

        let concatenated = outer.concat_map(|n| Observable::from_iter(vec![n, n * 100]));
        let values = futures_lite::future::block_on(concatenated.to_vec()).expect("no fault");
        let expected = vec![1, 100, 2, 200];
        crate::assert_with_log!(values == expected, "concat", expected, values);
        crate::test_complete!("switch_map_and_concat_map");
    }

    #[test]
    fn combine_latest_pairs_values() {
        init_test("combine_latest_pairs_values");
        let left = Observable::of(2);
        let right = Observable::from_iter(vec![10, 20]);
        let combined = left.combine_latest(&right, |a, b| a * b);
        let values = futures_lite::future::block_on(combined.to_vec()).expect("no fault");
        crate::assert_with_log!(values == vec![20, 40], "products", vec![20, 40], values);

        let all = Observable::combine_latest_all(vec![Observable::of(1), Observable::of(2)]);
        let values = futures_lite::future::block_on(all.last()).expect("no fault");
        crate::assert_with_log!(
            values == Some(vec![1, 2]),
            "all",
            Some(vec![1, 2]),
            values
        );
        crate::test_complete!("combine_latest_pairs_values");
    }

    #[test]
    fn from_future_and_defer() {
        init_test("from_future_and_defer");
        let source = Observable::from_future(|| async { 7 });
        let value = futures_lite::future::block_on(source.last()).expect("no fault");
        crate::assert_with_log!(value == Some(7), "future output", Some(7), value);

        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);
        let deferred = Observable::defer(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Observable::of("built")
        });
        let before = builds.load(Ordering::SeqCst);
        crate::assert_with_log!(before == 0, "not built yet", 0, before);
        let _ = futures_lite::future::block_on(deferred.last());
        let _ = futures_lite::future::block_on(deferred.last());
        let after = builds.load(Ordering::SeqCst);
        crate::assert_with_log!(after == 2, "built per subscription", 2, after);
        crate::test_complete!("from_future_and_defer");
    }
}
