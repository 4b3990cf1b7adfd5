//! Single-future stream source.

use super::Stream;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream for the [`once_future`] function.
#[must_use = "streams do nothing unless polled"]
pub struct OnceFuture<Fut> {
    future: Option<Pin<Box<Fut>>>,
}

impl<Fut> std::fmt::Debug for OnceFuture<Fut> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnceFuture")
            .field("done", &self.future.is_none())
            .finish()
    }
}

impl<Fut: Future> Stream for OnceFuture<Fut> {
    type Item = Fut::Output;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let Some(future) = self.future.as_mut() else {
            return Poll::Ready(None);
        };

        match future.as_mut().poll(cx) {
            Poll::Ready(output) => {
                self.future = None;
                Poll::Ready(Some(output))
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.future.is_some());
        (remaining, Some(remaining))
    }
}

/// A stream that yields the output of `future`, then ends.
pub fn once_future<Fut: Future>(future: Fut) -> OnceFuture<Fut> {
    OnceFuture {
        future: Some(Box::pin(future)),
    }
}
