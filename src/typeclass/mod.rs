//! Typeclass dictionaries for two-parameter stream kinds.
//!
//! Each capability is a trait implemented by a zero-sized dictionary type.
//! Generic code names the dictionary as a type parameter and calls through
//! it, e.g. `M::map::<E, A, B, _>(fa, f)`:
//!
//! ```ignore
//! use remote_data_stream::prelude::*;
//!
//! fn double_all<M: Functor2>(fa: M::Kind<String, i32>) -> M::Kind<String, i32> {
//!     M::map::<String, i32, i32, _>(fa, |n| n * 2)
//! }
//! ```
//!
//! Calls usually need the turbofish: `Kind<E, A>` is an associated type, so
//! the compiler cannot recover `E` and `A` from an argument's concrete type.
//!
//! The hierarchy mirrors the usual one:
//!
//! ```text
//! Hkt2 ─ Functor2 ─ Apply2 ─ Applicative2 ─┐
//!   │        │         └──── Chain2 ───────┴─ Monad2 ─┬─ MonadThrow2
//!   │        └─ Alt2                                  └─ MonadObservable2
//!   └─ Bifunctor2
//! ```

mod traverse;

pub use traverse::{sequence, traverse};

use crate::observable::Observable;
use std::future::Future;
use std::sync::Arc;

/// Values that can flow through a stream kind.
///
/// Subscriptions may replay values to several consumers on any thread, so
/// elements must be cheaply shareable.
pub trait Element: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Element for T {}

/// A shareable function value, used where a kind must carry a function.
pub type Func<A, B> = Arc<dyn Fn(A) -> B + Send + Sync>;

/// Wraps a closure as a [`Func`].
pub fn func<A, B, F>(f: F) -> Func<A, B>
where
    F: Fn(A) -> B + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A type constructor of two parameters, identified by a URI.
pub trait Hkt2: 'static {
    /// Identifier of the kind.
    const URI: &'static str;

    /// The kind applied to an error type and a value type.
    type Kind<E: Element, A: Element>: Element;
}

/// Mapping over the value side.
pub trait Functor2: Hkt2 {
    /// Applies `f` to every value.
    fn map<E, A, B, F>(fa: Self::Kind<E, A>, f: F) -> Self::Kind<E, B>
    where
        E: Element,
        A: Element,
        B: Element,
        F: Fn(A) -> B + Send + Sync + 'static;
}

/// Mapping over both sides.
pub trait Bifunctor2: Hkt2 {
    /// Applies `f` to errors and `g` to values.
    fn bimap<E, G, A, B, F1, F2>(fea: Self::Kind<E, A>, f: F1, g: F2) -> Self::Kind<G, B>
    where
        E: Element,
        G: Element,
        A: Element,
        B: Element,
        F1: Fn(E) -> G + Send + Sync + 'static,
        F2: Fn(A) -> B + Send + Sync + 'static;

    /// Applies `f` to errors.
    fn map_left<E, G, A, F>(fea: Self::Kind<E, A>, f: F) -> Self::Kind<G, A>
    where
        E: Element,
        G: Element,
        A: Element,
        F: Fn(E) -> G + Send + Sync + 'static;
}

/// Applying a wrapped function to a wrapped value.
pub trait Apply2: Functor2 {
    /// Applies the function carried by `fab` to the value carried by `fa`.
    fn ap<E, A, B>(fab: Self::Kind<E, Func<A, B>>, fa: Self::Kind<E, A>) -> Self::Kind<E, B>
    where
        E: Element,
        A: Element,
        B: Element;

    /// Combines two kinds, keeping the value of the first.
    fn ap_first<E, A, B>(fa: Self::Kind<E, A>, fb: Self::Kind<E, B>) -> Self::Kind<E, A>
    where
        E: Element,
        A: Element,
        B: Element,
    {
        let keep = Self::map::<E, A, Func<B, A>, _>(fa, |a: A| func(move |_: B| a.clone()));
        Self::ap::<E, B, A>(keep, fb)
    }

    /// Combines two kinds, keeping the value of the second.
    fn ap_second<E, A, B>(fa: Self::Kind<E, A>, fb: Self::Kind<E, B>) -> Self::Kind<E, B>
    where
        E: Element,
        A: Element,
        B: Element,
    {
        let skip = Self::map::<E, A, Func<B, B>, _>(fa, |_: A| func(|b: B| b));
        Self::ap::<E, B, B>(skip, fb)
    }
}

/// Lifting a plain value.
pub trait Applicative2: Apply2 {
    /// Wraps `a` as a successful kind.
    fn of<E, A>(a: A) -> Self::Kind<E, A>
    where
        E: Element,
        A: Element;
}

/// Sequencing dependent computations.
pub trait Chain2: Apply2 {
    /// Feeds every value into `f` and flattens the result.
    fn chain<E, A, B, F>(fa: Self::Kind<E, A>, f: F) -> Self::Kind<E, B>
    where
        E: Element,
        A: Element,
        B: Element,
        F: Fn(A) -> Self::Kind<E, B> + Send + Sync + 'static;

    /// Runs `f` for its effect, keeping the original value.
    fn chain_first<E, A, B, F>(fa: Self::Kind<E, A>, f: F) -> Self::Kind<E, A>
    where
        E: Element,
        A: Element,
        B: Element,
        F: Fn(A) -> Self::Kind<E, B> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::chain::<E, A, A, _>(fa, move |a: A| {
            let kept = a.clone();
            Self::map::<E, B, A, _>(f(a), move |_: B| kept.clone())
        })
    }

    /// Removes one level of nesting.
    fn flatten<E, A>(mma: Self::Kind<E, Self::Kind<E, A>>) -> Self::Kind<E, A>
    where
        E: Element,
        A: Element,
    {
        Self::chain::<E, Self::Kind<E, A>, A, _>(mma, |ma| ma)
    }
}

/// A lawful monad.
pub trait Monad2: Applicative2 + Chain2 {}

/// Choosing an alternative.
pub trait Alt2: Functor2 {
    /// Keeps successful values of `fa`, falling back to `f()` otherwise.
    fn alt<E, A, F>(fa: Self::Kind<E, A>, f: F) -> Self::Kind<E, A>
    where
        E: Element,
        A: Element,
        F: Fn() -> Self::Kind<E, A> + Send + Sync + 'static;
}

/// Raising errors as values.
pub trait MonadThrow2: Monad2 {
    /// A kind carrying the error `e`.
    fn throw_error<E, A>(e: E) -> Self::Kind<E, A>
    where
        E: Element,
        A: Element;
}

/// Lifting observables, async tasks and synchronous effects.
pub trait MonadObservable2: Monad2 {
    /// Wraps every emission of `ma` as a success.
    fn from_observable<E, A>(ma: Observable<A>) -> Self::Kind<E, A>
    where
        E: Element,
        A: Element;

    /// Runs `task` once per subscription and wraps its output.
    fn from_task<E, A, F, Fut>(task: F) -> Self::Kind<E, A>
    where
        E: Element,
        A: Element,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = A> + Send + 'static;

    /// Calls `io` once per subscription and wraps its result.
    fn from_io<E, A, F>(io: F) -> Self::Kind<E, A>
    where
        E: Element,
        A: Element,
        F: Fn() -> A + Send + Sync + 'static;
}
