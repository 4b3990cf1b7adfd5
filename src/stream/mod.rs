//! Async stream processing primitives.
//!
//! This module provides the [`Stream`] trait and the combinators the
//! observable layer is built from.
//!
//! # Core Traits
//!
//! - [`Stream`]: The async equivalent of [`Iterator`], producing values over time
//! - [`StreamExt`]: Extension trait providing combinator methods
//!
//! # Combinators
//!
//! ## Sources
//! - [`iter`]: Yields the items of an iterator
//! - [`empty`]: Ends immediately
//! - [`never`]: Never yields and never ends
//! - [`once_future`]: Yields the output of a future, then ends
//!
//! ## Transformation
//! - [`Map`]: Transforms each item with a closure
//!
//! ## Flattening (streams of `Result`)
//! - [`TrySwitchMap`]: Follows only the latest inner stream
//! - [`TryConcatMap`]: Runs inner streams one after another
//!
//! ## Combination (streams of `Result`)
//! - [`TryCombineLatest`]: Latest values of two streams
//! - [`TryCombineLatestAll`]: Latest values of any number of streams
//!
//! An `Err` item is forwarded once by the `try_` combinators and ends them.
//!
//! # Examples
//!
//! ```ignore
//! use remote_data_stream::stream::{iter, StreamExt};
//!
//! async fn example() {
//!     let mut doubled = iter(vec![1, 2, 3]).map(|x| x * 2);
//!     assert_eq!(doubled.next().await, Some(2));
//! }
//! ```

mod combine_latest;
mod concat_map;
mod iter;
mod map;
mod next;
mod once;
#[allow(clippy::module_inception)]
mod stream;
mod switch_map;

pub use combine_latest::{
    try_combine_latest, try_combine_latest_all, TryCombineLatest, TryCombineLatestAll,
};
pub use concat_map::TryConcatMap;
pub use iter::{empty, iter, never, Empty, Iter, Never};
pub use map::Map;
pub use next::Next;
pub use once::{once_future, OnceFuture};
pub use stream::{BoxStream, Stream};
pub use switch_map::TrySwitchMap;

/// Extension trait providing combinator methods for streams.
///
/// This trait is automatically implemented for all types that implement [`Stream`].
pub trait StreamExt: Stream {
    /// Returns the next item from the stream.
    fn next(&mut self) -> Next<'_, Self>
    where
        Self: Unpin,
    {
        Next::new(self)
    }

    /// Transforms each item using a closure.
    fn map<T, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> T,
    {
        Map::new(self, f)
    }

    /// Erases the stream type.
    fn boxed<'a>(self) -> BoxStream<'a, Self::Item>
    where
        Self: Sized + Send + 'a,
    {
        Box::pin(self)
    }

    /// Maps each `Ok` value to an inner stream, following only the latest one.
    ///
    /// The outer stream is polled only while the active inner stream is
    /// pending or done. A new outer value drops the active inner stream before
    /// the next one is polled.
    fn try_switch_map<T, E, I, F>(self, f: F) -> TrySwitchMap<Self, F, I>
    where
        Self: Stream<Item = Result<T, E>> + Sized,
        F: FnMut(T) -> I,
        I: Stream,
    {
        TrySwitchMap::new(self, f)
    }

    /// Maps each `Ok` value to an inner stream, running inner streams in order.
    ///
    /// The outer stream is only polled once the active inner stream has ended.
    fn try_concat_map<T, E, I, F>(self, f: F) -> TryConcatMap<Self, F, I>
    where
        Self: Stream<Item = Result<T, E>> + Sized,
        F: FnMut(T) -> I,
        I: Stream,
    {
        TryConcatMap::new(self, f)
    }
}

// Blanket implementation for all Stream types
impl<S: Stream + ?Sized> StreamExt for S {}
