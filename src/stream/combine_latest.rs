//! Combine-latest combinators.
//!
//! Each poll runs in rounds: every live source is polled once per round. A
//! round in which at least one source produced a value, and every source has
//! produced at least once, yields one combined item. Sources that are ready
//! together therefore collapse into a single emission.

use super::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Outcome of polling one source for one round.
enum Step<T, E> {
    Value(T),
    Failed(E),
    Finished,
    Idle,
}

fn step<S, T, E>(stream: &mut S, cx: &mut Context<'_>) -> Step<T, E>
where
    S: Stream<Item = Result<T, E>> + Unpin,
{
    match Pin::new(stream).poll_next(cx) {
        Poll::Ready(Some(Ok(value))) => Step::Value(value),
        Poll::Ready(Some(Err(err))) => Step::Failed(err),
        Poll::Ready(None) => Step::Finished,
        Poll::Pending => Step::Idle,
    }
}

/// Stream for the [`try_combine_latest`] function.
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct TryCombineLatest<A, B, F, T, U> {
    a: A,
    b: B,
    f: F,
    latest_a: Option<T>,
    latest_b: Option<U>,
    a_done: bool,
    b_done: bool,
    terminated: bool,
}

impl<A: Unpin, B: Unpin, F, T, U> Unpin for TryCombineLatest<A, B, F, T, U> {}

/// Combines the latest `Ok` values of two streams with `f`.
///
/// Nothing is emitted until both streams have produced a value. If either
/// stream ends before producing anything, the combined stream ends. The
/// first `Err` from either side is forwarded and ends the combined stream.
pub fn try_combine_latest<A, B, F, T, U, E, V>(a: A, b: B, f: F) -> TryCombineLatest<A, B, F, T, U>
where
    A: Stream<Item = Result<T, E>> + Unpin,
    B: Stream<Item = Result<U, E>> + Unpin,
    F: FnMut(&T, &U) -> V,
{
    TryCombineLatest {
        a,
        b,
        f,
        latest_a: None,
        latest_b: None,
        a_done: false,
        b_done: false,
        terminated: false,
    }
}

impl<A, B, F, T, U, E, V> Stream for TryCombineLatest<A, B, F, T, U>
where
    A: Stream<Item = Result<T, E>> + Unpin,
    B: Stream<Item = Result<U, E>> + Unpin,
    F: FnMut(&T, &U) -> V,
{
    type Item = Result<V, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if this.terminated {
                return Poll::Ready(None);
            }

            let mut progressed = false;
            let mut updated = false;

            if !this.a_done {
                match step(&mut this.a, cx) {
                    Step::Value(value) => {
                        this.latest_a = Some(value);
                        progressed = true;
                        updated = true;
                    }
                    Step::Failed(err) => {
                        this.terminated = true;
                        return Poll::Ready(Some(Err(err)));
                    }
                    Step::Finished => {
                        this.a_done = true;
                        progressed = true;
                    }
                    Step::Idle => {}
                }
            }

            if !this.b_done {
                match step(&mut this.b, cx) {
                    Step::Value(value) => {
                        this.latest_b = Some(value);
                        progressed = true;
                        updated = true;
                    }
                    Step::Failed(err) => {
                        this.terminated = true;
                        return Poll::Ready(Some(Err(err)));
                    }
                    Step::Finished => {
                        this.b_done = true;
                        progressed = true;
                    }
                    Step::Idle => {}
                }
            }

            if updated {
                if let (Some(a), Some(b)) = (this.latest_a.as_ref(), this.latest_b.as_ref()) {
                    return Poll::Ready(Some(Ok((this.f)(a, b))));
                }
            }

            let starved = (this.a_done && this.latest_a.is_none())
                || (this.b_done && this.latest_b.is_none());
            if starved || (this.a_done && this.b_done) {
                this.terminated = true;
                return Poll::Ready(None);
            }

            if !progressed {
                return Poll::Pending;
            }
        }
    }
}

/// Stream for the [`try_combine_latest_all`] function.
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct TryCombineLatestAll<S, T> {
    streams: Vec<S>,
    latest: Vec<Option<T>>,
    done: Vec<bool>,
    terminated: bool,
}

impl<S: Unpin, T> Unpin for TryCombineLatestAll<S, T> {}

/// Combines the latest `Ok` values of every stream into a `Vec`, in input order.
///
/// An empty input ends immediately without emitting.
pub fn try_combine_latest_all<S, T, E>(streams: Vec<S>) -> TryCombineLatestAll<S, T>
where
    S: Stream<Item = Result<T, E>> + Unpin,
    T: Clone,
{
    let len = streams.len();
    TryCombineLatestAll {
        streams,
        latest: std::iter::repeat_with(|| None).take(len).collect(),
        done: vec![false; len],
        terminated: len == 0,
    }
}

impl<S, T, E> Stream for TryCombineLatestAll<S, T>
where
    S: Stream<Item = Result<T, E>> + Unpin,
    T: Clone,
{
    type Item = Result<Vec<T>, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if this.terminated {
                return Poll::Ready(None);
            }

            let mut progressed = false;
            let mut updated = false;

            for (index, stream) in this.streams.iter_mut().enumerate() {
                if this.done[index] {
                    continue;
                }
                match step(stream, cx) {
                    Step::Value(value) => {
                        this.latest[index] = Some(value);
                        progressed = true;
                        updated = true;
                    }
                    Step::Failed(err) => {
                        this.terminated = true;
                        return Poll::Ready(Some(Err(err)));
                    }
                    Step::Finished => {
                        this.done[index] = true;
                        progressed = true;
                    }
                    Step::Idle => {}
                }
            }

            if updated {
                let snapshot: Option<Vec<T>> = this.latest.iter().cloned().collect();
                if let Some(values) = snapshot {
                    return Poll::Ready(Some(Ok(values)));
                }
            }

            let starved = this
                .done
                .iter()
                .zip(&this.latest)
                .any(|(done, latest)| *done && latest.is_none());
            if starved || this.done.iter().all(|done| *done) {
                this.terminated = true;
                return Poll::Ready(None);
            }

            if !progressed {
                return Poll::Pending;
            }
        }
    }
}
