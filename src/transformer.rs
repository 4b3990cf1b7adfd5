//! Lifting the [`RemoteData`] algebra onto any stream capability.
//!
//! [`MonadStream`] describes what a stream implementation must offer.
//! [`RemoteDataT`] builds every RemoteData-aware operation from that
//! capability alone, so each operation works per emitted value:
//!
//! - value transforms (`map`, `bimap`, `map_left`) rewrite each emission;
//! - `ap` combines the latest emission of both sides with [`RemoteData::ap`];
//! - `chain` subscribes to `f(a)` for every `Success(a)` and forwards any
//!   other status unchanged without calling `f`;
//! - `alt` forwards `Success` and falls back to the alternative otherwise.

use crate::typeclass::{Element, Func};
use crate::types::{Progress, RemoteData};
use std::marker::PhantomData;
use std::sync::Arc;

/// A lazy, multi-shot stream capability.
pub trait MonadStream: 'static {
    /// The stream type carrying values of type `T`.
    type Stream<T: Element>: Element;

    /// A stream that emits `value` once.
    fn of<T: Element>(value: T) -> Self::Stream<T>;

    /// Applies `f` to every emission.
    fn map<T, U, F>(fa: Self::Stream<T>, f: F) -> Self::Stream<U>
    where
        T: Element,
        U: Element,
        F: Fn(T) -> U + Send + Sync + 'static;

    /// Maps every emission to an inner stream and flattens.
    fn chain<T, U, F>(fa: Self::Stream<T>, f: F) -> Self::Stream<U>
    where
        T: Element,
        U: Element,
        F: Fn(T) -> Self::Stream<U> + Send + Sync + 'static;

    /// Combines the latest emissions of two streams.
    fn combine<T, U, V, F>(fa: Self::Stream<T>, fb: Self::Stream<U>, f: F) -> Self::Stream<V>
    where
        T: Element,
        U: Element,
        V: Element,
        F: Fn(&T, &U) -> V + Send + Sync + 'static;

    /// Combines the latest emissions of every stream, in order.
    fn combine_all<T: Element>(items: Vec<Self::Stream<T>>) -> Self::Stream<Vec<T>>;

    /// Builds the stream with `f` on every subscription.
    fn defer<T, F>(f: F) -> Self::Stream<T>
    where
        T: Element,
        F: Fn() -> Self::Stream<T> + Send + Sync + 'static;
}

/// A stream of [`RemoteData`] values over the capability `M`.
pub type RemoteDataStream<M, E, A> = <M as MonadStream>::Stream<RemoteData<E, A>>;

/// RemoteData operations lifted onto the stream capability `M`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteDataT<M>(PhantomData<M>);

impl<M: MonadStream> RemoteDataT<M> {
    /// Emits `Success(a)` once.
    pub fn of<E: Element, A: Element>(a: A) -> RemoteDataStream<M, E, A> {
        M::of(RemoteData::<E, A>::Success(a))
    }

    /// Emits `Initial` once.
    pub fn initial<E: Element, A: Element>() -> RemoteDataStream<M, E, A> {
        M::of(RemoteData::<E, A>::Initial)
    }

    /// Emits `Pending` without progress once.
    pub fn pending<E: Element, A: Element>() -> RemoteDataStream<M, E, A> {
        M::of(RemoteData::<E, A>::Pending(None))
    }

    /// Emits `Pending` with `progress` once.
    pub fn progress<E: Element, A: Element>(progress: Progress) -> RemoteDataStream<M, E, A> {
        M::of(RemoteData::<E, A>::Pending(Some(progress)))
    }

    /// Emits `Failure(e)` once.
    pub fn failure<E: Element, A: Element>(e: E) -> RemoteDataStream<M, E, A> {
        M::of(RemoteData::<E, A>::Failure(e))
    }

    /// Wraps every emission of `ma` in `Success`.
    pub fn from_m<E: Element, A: Element>(ma: M::Stream<A>) -> RemoteDataStream<M, E, A> {
        M::map::<A, RemoteData<E, A>, _>(ma, RemoteData::Success)
    }

    /// `Some(a)` emits `Success(a)`; `None` emits `Failure(on_none())`.
    pub fn from_option<E, A, F>(option: Option<A>, on_none: F) -> RemoteDataStream<M, E, A>
    where
        E: Element,
        A: Element,
        F: FnOnce() -> E,
    {
        M::of(RemoteData::<E, A>::from_option(option, on_none))
    }

    /// Applies `f` inside `Success`.
    pub fn map<E, A, B, F>(fa: RemoteDataStream<M, E, A>, f: F) -> RemoteDataStream<M, E, B>
    where
        E: Element,
        A: Element,
        B: Element,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        M::map::<RemoteData<E, A>, RemoteData<E, B>, _>(fa, move |rd| rd.map(&f))
    }

    /// Applies `f` inside `Failure` and `g` inside `Success`.
    pub fn bimap<E, G, A, B, F1, F2>(
        fa: RemoteDataStream<M, E, A>,
        f: F1,
        g: F2,
    ) -> RemoteDataStream<M, G, B>
    where
        E: Element,
        G: Element,
        A: Element,
        B: Element,
        F1: Fn(E) -> G + Send + Sync + 'static,
        F2: Fn(A) -> B + Send + Sync + 'static,
    {
        M::map::<RemoteData<E, A>, RemoteData<G, B>, _>(fa, move |rd| rd.bimap(&f, &g))
    }

    /// Applies `f` inside `Failure`.
    pub fn map_left<E, G, A, F>(fa: RemoteDataStream<M, E, A>, f: F) -> RemoteDataStream<M, G, A>
    where
        E: Element,
        G: Element,
        A: Element,
        F: Fn(E) -> G + Send + Sync + 'static,
    {
        M::map::<RemoteData<E, A>, RemoteData<G, A>, _>(fa, move |rd| rd.map_left(&f))
    }

    /// Combines the latest function and argument with [`RemoteData::ap`].
    pub fn ap<E, A, B>(
        fab: RemoteDataStream<M, E, Func<A, B>>,
        fa: RemoteDataStream<M, E, A>,
    ) -> RemoteDataStream<M, E, B>
    where
        E: Element,
        A: Element,
        B: Element,
    {
        M::combine::<RemoteData<E, Func<A, B>>, RemoteData<E, A>, RemoteData<E, B>, _>(
            fab,
            fa,
            |rf, ra| rf.clone().map(|g| move |a: A| g(a)).ap(ra.clone()),
        )
    }

    /// Combines both sides, keeping the value of `fa`.
    pub fn ap_first<E, A, B>(
        fa: RemoteDataStream<M, E, A>,
        fb: RemoteDataStream<M, E, B>,
    ) -> RemoteDataStream<M, E, A>
    where
        E: Element,
        A: Element,
        B: Element,
    {
        M::combine::<RemoteData<E, A>, RemoteData<E, B>, RemoteData<E, A>, _>(fa, fb, |ra, rb| {
            ra.clone().map(|a| move |_: B| a).ap(rb.clone())
        })
    }

    /// Combines both sides, keeping the value of `fb`.
    pub fn ap_second<E, A, B>(
        fa: RemoteDataStream<M, E, A>,
        fb: RemoteDataStream<M, E, B>,
    ) -> RemoteDataStream<M, E, B>
    where
        E: Element,
        A: Element,
        B: Element,
    {
        M::combine::<RemoteData<E, A>, RemoteData<E, B>, RemoteData<E, B>, _>(fa, fb, |ra, rb| {
            ra.clone().map(|_| |b: B| b).ap(rb.clone())
        })
    }

    /// Subscribes to `f(a)` for every `Success(a)`.
    ///
    /// Any other status is forwarded unchanged and `f` is not called.
    pub fn chain<E, A, B, F>(fa: RemoteDataStream<M, E, A>, f: F) -> RemoteDataStream<M, E, B>
    where
        E: Element,
        A: Element,
        B: Element,
        F: Fn(A) -> RemoteDataStream<M, E, B> + Send + Sync + 'static,
    {
        M::chain::<RemoteData<E, A>, RemoteData<E, B>, _>(fa, move |rd| {
            match rd.into_success::<B>() {
                Ok(a) => f(a),
                Err(status) => M::of::<RemoteData<E, B>>(status),
            }
        })
    }

    /// Like [`chain`](Self::chain), but keeps the original value.
    pub fn chain_first<E, A, B, F>(
        fa: RemoteDataStream<M, E, A>,
        f: F,
    ) -> RemoteDataStream<M, E, A>
    where
        E: Element,
        A: Element,
        B: Element,
        F: Fn(A) -> RemoteDataStream<M, E, B> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::chain::<E, A, A, _>(fa, move |a: A| {
            let kept = a.clone();
            Self::map::<E, B, A, _>(f(a), move |_| kept.clone())
        })
    }

    /// Removes one level of nesting.
    pub fn flatten<E, A>(
        mma: RemoteDataStream<M, E, RemoteDataStream<M, E, A>>,
    ) -> RemoteDataStream<M, E, A>
    where
        E: Element,
        A: Element,
    {
        Self::chain::<E, RemoteDataStream<M, E, A>, A, _>(mma, |ma| ma)
    }

    /// Forwards `Success` emissions of `fa`; any other emission is replaced
    /// by the stream `f()` returns.
    pub fn alt<E, A, F>(fa: RemoteDataStream<M, E, A>, f: F) -> RemoteDataStream<M, E, A>
    where
        E: Element,
        A: Element,
        F: Fn() -> RemoteDataStream<M, E, A> + Send + Sync + 'static,
    {
        M::chain::<RemoteData<E, A>, RemoteData<E, A>, _>(fa, move |rd| {
            if rd.is_success() {
                M::of::<RemoteData<E, A>>(rd)
            } else {
                f()
            }
        })
    }

    /// Combines every stream with the [`RemoteData::ap`] policy, in order.
    ///
    /// An empty input emits `Success(vec![])`.
    pub fn sequence<E, A>(items: Vec<RemoteDataStream<M, E, A>>) -> RemoteDataStream<M, E, Vec<A>>
    where
        E: Element,
        A: Element,
    {
        if items.is_empty() {
            return Self::of::<E, Vec<A>>(Vec::new());
        }
        M::map::<Vec<RemoteData<E, A>>, RemoteData<E, Vec<A>>, _>(
            M::combine_all::<RemoteData<E, A>>(items),
            |statuses| RemoteData::sequence(statuses),
        )
    }

    /// Maps every item with `f`, then [`sequence`](Self::sequence)s.
    pub fn traverse<E, A, B, F>(items: Vec<A>, f: F) -> RemoteDataStream<M, E, Vec<B>>
    where
        E: Element,
        A: Element,
        B: Element,
        F: FnMut(A) -> RemoteDataStream<M, E, B>,
    {
        Self::sequence::<E, B>(items.into_iter().map(f).collect())
    }

    /// Builds the stream with `f` on every subscription.
    pub fn defer<E, A, F>(f: F) -> RemoteDataStream<M, E, A>
    where
        E: Element,
        A: Element,
        F: Fn() -> RemoteDataStream<M, E, A> + Send + Sync + 'static,
    {
        M::defer::<RemoteData<E, A>, F>(f)
    }
}
