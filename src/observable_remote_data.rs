//! [`RemoteData`] over [`Observable`].
//!
//! [`ObservableRemoteData<E, A>`] is an observable of statuses. The
//! [`ObservableRemoteDataM`] dictionary implements the typeclass traits for
//! it, so generic code such as [`typeclass::sequence`](crate::typeclass::sequence)
//! can be instantiated here. The free functions in this module are the
//! constructors and the data-last (pipeable) forms of each binary operation,
//! meant to be used with [`Pipe`](crate::pipe::Pipe):
//!
//! ```ignore
//! use remote_data_stream::observable_remote_data as ord;
//! use remote_data_stream::pipe::Pipe;
//!
//! let status = ord::of::<String, i32>(1)
//!     .pipe(ord::map(|n| n * 2))
//!     .pipe(ord::chain(|n| ord::of(n + 1)));
//! ```
//!
//! Two failure channels stay apart: `Failure(E)` is an ordinary emitted
//! value, while a fault of the stream itself arrives as an `Err` item on the
//! subscription. No operation here turns one into the other.

use crate::observable::{Observable, ObservableKind};
use crate::transformer::RemoteDataT;
use crate::typeclass::{
    Alt2, Applicative2, Apply2, Bifunctor2, Chain2, Element, Func, Functor2, Hkt2, Monad2,
    MonadObservable2, MonadThrow2,
};
use crate::types::{Progress, RemoteData};
use std::future::Future;
use std::sync::Arc;

/// Identifier of the kind.
pub const URI: &str = "ObservableRemoteData";

/// An observable of [`RemoteData`] statuses.
pub type ObservableRemoteData<E, A> = Observable<RemoteData<E, A>>;

type Lifted = RemoteDataT<ObservableKind>;

/// Typeclass dictionary for [`ObservableRemoteData`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ObservableRemoteDataM;

impl Hkt2 for ObservableRemoteDataM {
    const URI: &'static str = URI;

    type Kind<E: Element, A: Element> = ObservableRemoteData<E, A>;
}

impl Functor2 for ObservableRemoteDataM {
    fn map<E, A, B, F>(fa: ObservableRemoteData<E, A>, f: F) -> ObservableRemoteData<E, B>
    where
        E: Element,
        A: Element,
        B: Element,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        Lifted::map(fa, f)
    }
}

impl Bifunctor2 for ObservableRemoteDataM {
    fn bimap<E, G, A, B, F1, F2>(
        fea: ObservableRemoteData<E, A>,
        f: F1,
        g: F2,
    ) -> ObservableRemoteData<G, B>
    where
        E: Element,
        G: Element,
        A: Element,
        B: Element,
        F1: Fn(E) -> G + Send + Sync + 'static,
        F2: Fn(A) -> B + Send + Sync + 'static,
    {
        Lifted::bimap(fea, f, g)
    }

    fn map_left<E, G, A, F>(fea: ObservableRemoteData<E, A>, f: F) -> ObservableRemoteData<G, A>
    where
        E: Element,
        G: Element,
        A: Element,
        F: Fn(E) -> G + Send + Sync + 'static,
    {
        Lifted::map_left(fea, f)
    }
}

impl Apply2 for ObservableRemoteDataM {
    fn ap<E, A, B>(
        fab: ObservableRemoteData<E, Func<A, B>>,
        fa: ObservableRemoteData<E, A>,
    ) -> ObservableRemoteData<E, B>
    where
        E: Element,
        A: Element,
        B: Element,
    {
        Lifted::ap(fab, fa)
    }

    fn ap_first<E, A, B>(
        fa: ObservableRemoteData<E, A>,
        fb: ObservableRemoteData<E, B>,
    ) -> ObservableRemoteData<E, A>
    where
        E: Element,
        A: Element,
        B: Element,
    {
        Lifted::ap_first(fa, fb)
    }

    fn ap_second<E, A, B>(
        fa: ObservableRemoteData<E, A>,
        fb: ObservableRemoteData<E, B>,
    ) -> ObservableRemoteData<E, B>
    where
        E: Element,
        A: Element,
        B: Element,
    {
        Lifted::ap_second(fa, fb)
    }
}

impl Applicative2 for ObservableRemoteDataM {
    fn of<E: Element, A: Element>(a: A) -> ObservableRemoteData<E, A> {
        Lifted::of(a)
    }
}

impl Chain2 for ObservableRemoteDataM {
    fn chain<E, A, B, F>(fa: ObservableRemoteData<E, A>, f: F) -> ObservableRemoteData<E, B>
    where
        E: Element,
        A: Element,
        B: Element,
        F: Fn(A) -> ObservableRemoteData<E, B> + Send + Sync + 'static,
    {
        Lifted::chain(fa, f)
    }

    fn chain_first<E, A, B, F>(fa: ObservableRemoteData<E, A>, f: F) -> ObservableRemoteData<E, A>
    where
        E: Element,
        A: Element,
        B: Element,
        F: Fn(A) -> ObservableRemoteData<E, B> + Send + Sync + 'static,
    {
        Lifted::chain_first(fa, f)
    }

    fn flatten<E, A>(
        mma: ObservableRemoteData<E, ObservableRemoteData<E, A>>,
    ) -> ObservableRemoteData<E, A>
    where
        E: Element,
        A: Element,
    {
        Lifted::flatten(mma)
    }
}

impl Monad2 for ObservableRemoteDataM {}

impl Alt2 for ObservableRemoteDataM {
    fn alt<E, A, F>(fa: ObservableRemoteData<E, A>, f: F) -> ObservableRemoteData<E, A>
    where
        E: Element,
        A: Element,
        F: Fn() -> ObservableRemoteData<E, A> + Send + Sync + 'static,
    {
        Lifted::alt(fa, f)
    }
}

impl MonadThrow2 for ObservableRemoteDataM {
    fn throw_error<E: Element, A: Element>(e: E) -> ObservableRemoteData<E, A> {
        Lifted::failure(e)
    }
}

impl MonadObservable2 for ObservableRemoteDataM {
    fn from_observable<E: Element, A: Element>(ma: Observable<A>) -> ObservableRemoteData<E, A> {
        from_observable(ma)
    }

    fn from_task<E, A, F, Fut>(task: F) -> ObservableRemoteData<E, A>
    where
        E: Element,
        A: Element,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        from_task(task)
    }

    fn from_io<E, A, F>(io: F) -> ObservableRemoteData<E, A>
    where
        E: Element,
        A: Element,
        F: Fn() -> A + Send + Sync + 'static,
    {
        from_io(io)
    }
}

// Constructors

/// Emits `Success(a)` once.
pub fn of<E: Element, A: Element>(a: A) -> ObservableRemoteData<E, A> {
    Lifted::of(a)
}

/// Emits `Initial` once.
#[must_use]
pub fn initial<E: Element, A: Element>() -> ObservableRemoteData<E, A> {
    Lifted::initial()
}

/// Emits `Pending` once.
#[must_use]
pub fn pending<E: Element, A: Element>() -> ObservableRemoteData<E, A> {
    Lifted::pending()
}

/// Emits `Pending` with `progress` once.
pub fn progress<E: Element, A: Element>(progress: Progress) -> ObservableRemoteData<E, A> {
    Lifted::progress(progress)
}

/// Emits `Failure(e)` once.
pub fn failure<E: Element, A: Element>(e: E) -> ObservableRemoteData<E, A> {
    Lifted::failure(e)
}

/// Emits `Failure(e)` once.
pub fn throw_error<E: Element, A: Element>(e: E) -> ObservableRemoteData<E, A> {
    Lifted::failure(e)
}

/// Wraps every emission of `ma` in `Success`.
pub fn from_observable<E: Element, A: Element>(ma: Observable<A>) -> ObservableRemoteData<E, A> {
    Lifted::from_m(ma)
}

/// Runs `task` on every subscription and emits its output as `Success`.
pub fn from_task<E, A, F, Fut>(task: F) -> ObservableRemoteData<E, A>
where
    E: Element,
    A: Element,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = A> + Send + 'static,
{
    from_observable(Observable::from_future(task))
}

/// Calls `io` on every subscription and emits its result as `Success`.
pub fn from_io<E, A, F>(io: F) -> ObservableRemoteData<E, A>
where
    E: Element,
    A: Element,
    F: Fn() -> A + Send + Sync + 'static,
{
    from_observable(Observable::from_fn(io))
}

/// `Some(a)` emits `Success(a)`; `None` emits `Failure(on_none())`.
///
/// `on_none` is only called for `None`.
pub fn from_option<E, A, F>(option: Option<A>, on_none: F) -> ObservableRemoteData<E, A>
where
    E: Element,
    A: Element,
    F: FnOnce() -> E,
{
    Lifted::from_option(option, on_none)
}

/// Combines every status with the [`RemoteData::ap`] policy, in order.
pub fn sequence<E: Element, A: Element>(
    items: Vec<ObservableRemoteData<E, A>>,
) -> ObservableRemoteData<E, Vec<A>> {
    Lifted::sequence(items)
}

/// Maps every item with `f`, then [`sequence`]s.
pub fn traverse<E, A, B, F>(items: Vec<A>, f: F) -> ObservableRemoteData<E, Vec<B>>
where
    E: Element,
    A: Element,
    B: Element,
    F: FnMut(A) -> ObservableRemoteData<E, B>,
{
    Lifted::traverse(items, f)
}

// Pipeable operations

/// Data-last [`Alt2::alt`].
pub fn alt<E, A, F>(f: F) -> impl Fn(ObservableRemoteData<E, A>) -> ObservableRemoteData<E, A>
where
    E: Element,
    A: Element,
    F: Fn() -> ObservableRemoteData<E, A> + Send + Sync + 'static,
{
    let f = Arc::new(f);
    move |fa| {
        let f = Arc::clone(&f);
        Lifted::alt(fa, move || f())
    }
}

/// Data-last [`Apply2::ap`]: applies the piped function to `fa`.
pub fn ap<E, A, B>(
    fa: ObservableRemoteData<E, A>,
) -> impl Fn(ObservableRemoteData<E, Func<A, B>>) -> ObservableRemoteData<E, B>
where
    E: Element,
    A: Element,
    B: Element,
{
    move |fab| Lifted::ap(fab, fa.clone())
}

/// Data-last [`Apply2::ap_first`].
pub fn ap_first<E, A, B>(
    fb: ObservableRemoteData<E, B>,
) -> impl Fn(ObservableRemoteData<E, A>) -> ObservableRemoteData<E, A>
where
    E: Element,
    A: Element,
    B: Element,
{
    move |fa| Lifted::ap_first(fa, fb.clone())
}

/// Data-last [`Apply2::ap_second`].
pub fn ap_second<E, A, B>(
    fb: ObservableRemoteData<E, B>,
) -> impl Fn(ObservableRemoteData<E, A>) -> ObservableRemoteData<E, B>
where
    E: Element,
    A: Element,
    B: Element,
{
    move |fa| Lifted::ap_second(fa, fb.clone())
}

/// Data-last [`Bifunctor2::bimap`].
pub fn bimap<E, G, A, B, F1, F2>(
    f: F1,
    g: F2,
) -> impl Fn(ObservableRemoteData<E, A>) -> ObservableRemoteData<G, B>
where
    E: Element,
    G: Element,
    A: Element,
    B: Element,
    F1: Fn(E) -> G + Send + Sync + 'static,
    F2: Fn(A) -> B + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let g = Arc::new(g);
    move |fa| {
        let f = Arc::clone(&f);
        let g = Arc::clone(&g);
        Lifted::bimap(fa, move |e| f(e), move |a| g(a))
    }
}

/// Data-last [`Chain2::chain`].
pub fn chain<E, A, B, F>(f: F) -> impl Fn(ObservableRemoteData<E, A>) -> ObservableRemoteData<E, B>
where
    E: Element,
    A: Element,
    B: Element,
    F: Fn(A) -> ObservableRemoteData<E, B> + Send + Sync + 'static,
{
    let f = Arc::new(f);
    move |fa| {
        let f = Arc::clone(&f);
        Lifted::chain(fa, move |a| f(a))
    }
}

/// Data-last [`Chain2::chain_first`].
pub fn chain_first<E, A, B, F>(
    f: F,
) -> impl Fn(ObservableRemoteData<E, A>) -> ObservableRemoteData<E, A>
where
    E: Element,
    A: Element,
    B: Element,
    F: Fn(A) -> ObservableRemoteData<E, B> + Send + Sync + 'static,
{
    let f = Arc::new(f);
    move |fa| {
        let f = Arc::clone(&f);
        Lifted::chain_first(fa, move |a| f(a))
    }
}

/// [`Chain2::flatten`]; already data-last.
pub fn flatten<E: Element, A: Element>(
    mma: ObservableRemoteData<E, ObservableRemoteData<E, A>>,
) -> ObservableRemoteData<E, A> {
    Lifted::flatten(mma)
}

/// Data-last [`Functor2::map`].
pub fn map<E, A, B, F>(f: F) -> impl Fn(ObservableRemoteData<E, A>) -> ObservableRemoteData<E, B>
where
    E: Element,
    A: Element,
    B: Element,
    F: Fn(A) -> B + Send + Sync + 'static,
{
    let f = Arc::new(f);
    move |fa| {
        let f = Arc::clone(&f);
        Lifted::map(fa, move |a| f(a))
    }
}

/// Data-last [`Bifunctor2::map_left`].
pub fn map_left<E, G, A, F>(
    f: F,
) -> impl Fn(ObservableRemoteData<E, A>) -> ObservableRemoteData<G, A>
where
    E: Element,
    G: Element,
    A: Element,
    F: Fn(E) -> G + Send + Sync + 'static,
{
    let f = Arc::new(f);
    move |fa| {
        let f = Arc::clone(&f);
        Lifted::map_left(fa, move |e| f(e))
    }
}
