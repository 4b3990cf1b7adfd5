//! Switch-map combinator.

use super::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream for the [`try_switch_map`](super::StreamExt::try_switch_map) method.
///
/// Every `Ok` value from the outer stream is turned into an inner stream with
/// `f`; only the newest inner stream is followed. The active inner stream is
/// drained of its ready items before the outer stream is polled again, so a
/// replacement only cuts off items the inner had not produced yet. An outer
/// `Err` is forwarded and ends the combinator. The combinator ends once the outer stream and the
/// active inner stream have both ended.
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct TrySwitchMap<S, F, I> {
    stream: S,
    f: F,
    inner: Option<I>,
    outer_done: bool,
    terminated: bool,
}

impl<S, F, I> TrySwitchMap<S, F, I> {
    pub(crate) fn new(stream: S, f: F) -> Self {
        Self {
            stream,
            f,
            inner: None,
            outer_done: false,
            terminated: false,
        }
    }

    /// Returns true while an inner stream is being followed.
    #[must_use]
    pub fn has_inner(&self) -> bool {
        self.inner.is_some()
    }
}

impl<S: Unpin, F, I: Unpin> Unpin for TrySwitchMap<S, F, I> {}

impl<S, F, I, T, E, U> Stream for TrySwitchMap<S, F, I>
where
    S: Stream<Item = Result<T, E>> + Unpin,
    F: FnMut(T) -> I,
    I: Stream<Item = Result<U, E>> + Unpin,
{
    type Item = Result<U, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if this.terminated {
                return Poll::Ready(None);
            }

            // The active inner yields what it has before the outer may replace it.
            if let Some(inner) = this.inner.as_mut() {
                match Pin::new(inner).poll_next(cx) {
                    Poll::Ready(Some(Ok(item))) => return Poll::Ready(Some(Ok(item))),
                    Poll::Ready(Some(Err(err))) => {
                        this.inner = None;
                        this.terminated = true;
                        return Poll::Ready(Some(Err(err)));
                    }
                    Poll::Ready(None) => this.inner = None,
                    Poll::Pending => {}
                }
            }

            if this.outer_done {
                if this.inner.is_some() {
                    return Poll::Pending;
                }
                this.terminated = true;
                return Poll::Ready(None);
            }

            match Pin::new(&mut this.stream).poll_next(cx) {
                Poll::Ready(Some(Ok(value))) => {
                    // Drop the previous inner before building the next one.
                    this.inner = None;
                    this.inner = Some((this.f)(value));
                }
                Poll::Ready(Some(Err(err))) => {
                    this.inner = None;
                    this.terminated = true;
                    return Poll::Ready(Some(Err(err)));
                }
                Poll::Ready(None) => this.outer_done = true,
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
