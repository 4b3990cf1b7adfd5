//! Concat-map combinator.

use super::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream for the [`try_concat_map`](super::StreamExt::try_concat_map) method.
///
/// Inner streams run to completion one at a time. The outer stream is not
/// polled while an inner stream is active, so outer values wait upstream
/// instead of being buffered here.
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct TryConcatMap<S, F, I> {
    stream: S,
    f: F,
    inner: Option<I>,
    outer_done: bool,
    terminated: bool,
}

impl<S, F, I> TryConcatMap<S, F, I> {
    pub(crate) fn new(stream: S, f: F) -> Self {
        Self {
            stream,
            f,
            inner: None,
            outer_done: false,
            terminated: false,
        }
    }
}

impl<S: Unpin, F, I: Unpin> Unpin for TryConcatMap<S, F, I> {}

impl<S, F, I, T, E, U> Stream for TryConcatMap<S, F, I>
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

            if let Some(inner) = this.inner.as_mut() {
                match Pin::new(inner).poll_next(cx) {
                    Poll::Ready(Some(Ok(item))) => return Poll::Ready(Some(Ok(item))),
                    Poll::Ready(Some(Err(err))) => {
                        this.inner = None;
                        this.terminated = true;
                        return Poll::Ready(Some(Err(err)));
                    }
                    Poll::Ready(None) => this.inner = None,
                    Poll::Pending => return Poll::Pending,
                }
            }

            if this.outer_done {
                this.terminated = true;
                return Poll::Ready(None);
            }

            match Pin::new(&mut this.stream).poll_next(cx) {
                Poll::Ready(Some(Ok(value))) => this.inner = Some((this.f)(value)),
                Poll::Ready(Some(Err(err))) => {
                    this.terminated = true;
                    return Poll::Ready(Some(Err(err)));
                }
                Poll::Ready(None) => this.outer_done = true,
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
