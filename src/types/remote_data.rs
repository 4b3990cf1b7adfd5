//! Four-variant status of a remote value.
//!
//! `RemoteData` represents where an asynchronous operation currently stands:
//!
//! - `Initial`: nothing has been requested yet
//! - `Pending(progress)`: a request is in flight, optionally reporting progress
//! - `Failure(E)`: the operation ended with a semantic failure
//! - `Success(A)`: the operation ended with a value
//!
//! When two statuses are combined with [`RemoteData::ap`], the more blocking
//! one wins: `Failure` > `Initial` > `Pending` > `Success`. Two pending
//! statuses merge their progress.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Progress reported by an in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Units transferred so far.
    pub loaded: u64,
    /// Total units, when known.
    pub total: Option<u64>,
}

impl Progress {
    /// Creates progress with a known total.
    #[must_use]
    pub const fn new(loaded: u64, total: u64) -> Self {
        Self {
            loaded,
            total: Some(total),
        }
    }

    /// Creates progress with an unknown total.
    #[must_use]
    pub const fn unbounded(loaded: u64) -> Self {
        Self {
            loaded,
            total: None,
        }
    }

    /// Merges the progress of two concurrent requests.
    ///
    /// Loaded amounts add up. The total is only known if both totals are.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        let total = match (self.total, other.total) {
            (Some(a), Some(b)) => Some(a.saturating_add(b)),
            _ => None,
        };
        Self {
            loaded: self.loaded.saturating_add(other.loaded),
            total,
        }
    }

    /// Returns the completed fraction in `[0, 1]`, if the total is known and non-zero.
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        match self.total {
            Some(0) | None => None,
            #[allow(clippy::cast_precision_loss)]
            Some(total) => Some((self.loaded.min(total) as f64) / (total as f64)),
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total {
            Some(total) => write!(f, "{}/{}", self.loaded, total),
            None => write!(f, "{}/?", self.loaded),
        }
    }
}

fn concat_pending(a: Option<Progress>, b: Option<Progress>) -> Option<Progress> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.combine(b)),
        (Some(p), None) | (None, Some(p)) => Some(p),
        (None, None) => None,
    }
}

/// The status of a remote value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RemoteData<E, A> {
    /// No request has been made.
    Initial,
    /// A request is in flight.
    Pending(Option<Progress>),
    /// The request failed.
    Failure(E),
    /// The request succeeded.
    Success(A),
}

impl<E, A> Default for RemoteData<E, A> {
    fn default() -> Self {
        Self::Initial
    }
}

impl<E, A> RemoteData<E, A> {
    /// The `Initial` status.
    #[must_use]
    pub const fn initial() -> Self {
        Self::Initial
    }

    /// A `Pending` status without progress.
    #[must_use]
    pub const fn pending() -> Self {
        Self::Pending(None)
    }

    /// A `Pending` status carrying progress.
    #[must_use]
    pub const fn progress(progress: Progress) -> Self {
        Self::Pending(Some(progress))
    }

    /// A `Failure` status.
    #[must_use]
    pub const fn failure(error: E) -> Self {
        Self::Failure(error)
    }

    /// A `Success` status.
    #[must_use]
    pub const fn success(value: A) -> Self {
        Self::Success(value)
    }

    /// Returns true if this is `Initial`.
    #[must_use]
    pub const fn is_initial(&self) -> bool {
        matches!(self, Self::Initial)
    }

    /// Returns true if this is `Pending`, with or without progress.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns true if this is `Failure`.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns true if this is `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the progress of a `Pending` status.
    #[must_use]
    pub const fn pending_progress(&self) -> Option<&Progress> {
        match self {
            Self::Pending(Some(progress)) => Some(progress),
            _ => None,
        }
    }

    /// Borrows the contents.
    pub const fn as_ref(&self) -> RemoteData<&E, &A> {
        match self {
            Self::Initial => RemoteData::Initial,
            Self::Pending(p) => RemoteData::Pending(*p),
            Self::Failure(e) => RemoteData::Failure(e),
            Self::Success(a) => RemoteData::Success(a),
        }
    }

    /// Maps the success value.
    pub fn map<B, F: FnOnce(A) -> B>(self, f: F) -> RemoteData<E, B> {
        match self {
            Self::Initial => RemoteData::Initial,
            Self::Pending(p) => RemoteData::Pending(p),
            Self::Failure(e) => RemoteData::Failure(e),
            Self::Success(a) => RemoteData::Success(f(a)),
        }
    }

    /// Maps the failure value.
    pub fn map_left<G, F: FnOnce(E) -> G>(self, f: F) -> RemoteData<G, A> {
        match self {
            Self::Initial => RemoteData::Initial,
            Self::Pending(p) => RemoteData::Pending(p),
            Self::Failure(e) => RemoteData::Failure(f(e)),
            Self::Success(a) => RemoteData::Success(a),
        }
    }

    /// Maps the failure with `f` and the success with `g`.
    pub fn bimap<G, B, F1, F2>(self, f: F1, g: F2) -> RemoteData<G, B>
    where
        F1: FnOnce(E) -> G,
        F2: FnOnce(A) -> B,
    {
        match self {
            Self::Initial => RemoteData::Initial,
            Self::Pending(p) => RemoteData::Pending(p),
            Self::Failure(e) => RemoteData::Failure(f(e)),
            Self::Success(a) => RemoteData::Success(g(a)),
        }
    }

    /// Returns the success value, or the same status retyped for another success type.
    ///
    /// This is the short-circuit step of `chain`: everything but `Success`
    /// passes through untouched.
    pub fn into_success<B>(self) -> Result<A, RemoteData<E, B>> {
        match self {
            Self::Initial => Err(RemoteData::Initial),
            Self::Pending(p) => Err(RemoteData::Pending(p)),
            Self::Failure(e) => Err(RemoteData::Failure(e)),
            Self::Success(a) => Ok(a),
        }
    }

    /// Chains a computation on the success value.
    pub fn and_then<B, F: FnOnce(A) -> RemoteData<E, B>>(self, f: F) -> RemoteData<E, B> {
        match self.into_success() {
            Ok(a) => f(a),
            Err(status) => status,
        }
    }

    /// Returns `self` if it is a success, otherwise the lazily computed alternative.
    pub fn alt<F: FnOnce() -> Self>(self, f: F) -> Self {
        if self.is_success() {
            self
        } else {
            f()
        }
    }

    /// Collapses every variant into one value.
    pub fn fold<R>(
        self,
        on_initial: impl FnOnce() -> R,
        on_pending: impl FnOnce(Option<Progress>) -> R,
        on_failure: impl FnOnce(E) -> R,
        on_success: impl FnOnce(A) -> R,
    ) -> R {
        match self {
            Self::Initial => on_initial(),
            Self::Pending(p) => on_pending(p),
            Self::Failure(e) => on_failure(e),
            Self::Success(a) => on_success(a),
        }
    }

    /// Returns the success value or computes a fallback.
    pub fn get_or_else<F: FnOnce() -> A>(self, f: F) -> A {
        match self {
            Self::Success(a) => a,
            _ => f(),
        }
    }

    /// Returns the success value, if any.
    pub fn success_value(self) -> Option<A> {
        match self {
            Self::Success(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the failure value, if any.
    pub fn failure_value(self) -> Option<E> {
        match self {
            Self::Failure(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true if this is a success whose value satisfies `pred`.
    pub fn exists<P: FnOnce(&A) -> bool>(&self, pred: P) -> bool {
        match self {
            Self::Success(a) => pred(a),
            _ => false,
        }
    }

    /// Turns a failure into a success when `f` produces a value.
    pub fn recover<F: FnOnce(&E) -> Option<A>>(self, f: F) -> Self {
        match self {
            Self::Failure(e) => match f(&e) {
                Some(a) => Self::Success(a),
                None => Self::Failure(e),
            },
            other => other,
        }
    }

    /// `Some(a)` becomes `Success(a)`; `None` becomes `Failure(on_none())`.
    ///
    /// `on_none` is only called on the `None` path.
    pub fn from_option<F: FnOnce() -> E>(option: Option<A>, on_none: F) -> Self {
        match option {
            Some(a) => Self::Success(a),
            None => Self::Failure(on_none()),
        }
    }

    /// `Success(value)` if `pred` holds, otherwise `Failure(on_false(value))`.
    pub fn from_predicate<P, F>(value: A, pred: P, on_false: F) -> Self
    where
        P: FnOnce(&A) -> bool,
        F: FnOnce(A) -> E,
    {
        if pred(&value) {
            Self::Success(value)
        } else {
            Self::Failure(on_false(value))
        }
    }

    /// Collects statuses into one, left to right, with [`RemoteData::ap`] precedence.
    ///
    /// The result is `Success` only if every element is; element order is kept.
    pub fn sequence<I>(items: I) -> RemoteData<E, Vec<A>>
    where
        I: IntoIterator<Item = Self>,
    {
        items
            .into_iter()
            .fold(RemoteData::Success(Vec::new()), |acc, item| {
                acc.map(|mut values: Vec<A>| {
                    move |value: A| {
                        values.push(value);
                        values
                    }
                })
                .ap(item)
            })
    }
}

impl<E, F> RemoteData<E, F> {
    /// Applies a wrapped function to a wrapped argument.
    ///
    /// Precedence, most blocking first: a `Failure` (function side checked
    /// first), then `Initial`, then `Pending` (two pending sides merge their
    /// progress), and finally `Success(f(a))`.
    pub fn ap<A, B>(self, fa: RemoteData<E, A>) -> RemoteData<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match (self, fa) {
            (Self::Failure(e), _) | (_, RemoteData::Failure(e)) => RemoteData::Failure(e),
            (Self::Initial, _) | (_, RemoteData::Initial) => RemoteData::Initial,
            (Self::Pending(a), RemoteData::Pending(b)) => RemoteData::Pending(concat_pending(a, b)),
            (Self::Pending(p), RemoteData::Success(_))
            | (Self::Success(_), RemoteData::Pending(p)) => RemoteData::Pending(p),
            (Self::Success(f), RemoteData::Success(a)) => RemoteData::Success(f(a)),
        }
    }
}

impl<E, A> From<Result<A, E>> for RemoteData<E, A> {
    fn from(result: Result<A, E>) -> Self {
        match result {
            Ok(a) => Self::Success(a),
            Err(e) => Self::Failure(e),
        }
    }
}

impl<E: fmt::Display, A: fmt::Display> fmt::Display for RemoteData<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => f.write_str("initial"),
            Self::Pending(None) => f.write_str("pending"),
            Self::Pending(Some(p)) => write!(f, "pending ({p})"),
            Self::Failure(e) => write!(f, "failure: {e}"),
            Self::Success(a) => write!(f, "success: {a}"),
        }
    }
}
