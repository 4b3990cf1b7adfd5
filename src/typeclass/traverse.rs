//! Sequencing a collection of kinds through any applicative.

use super::{func, Applicative2, Element, Func};

/// Turns a list of kinds into a kind of a list.
///
/// Elements are folded left to right with [`Apply2::ap`](super::Apply2::ap),
/// starting from `of(vec![])`, so the applicative's combination policy
/// decides which non-success value wins. Order is preserved.
pub fn sequence<M, E, A>(items: Vec<M::Kind<E, A>>) -> M::Kind<E, Vec<A>>
where
    M: Applicative2,
    E: Element,
    A: Element,
{
    items
        .into_iter()
        .fold(M::of::<E, Vec<A>>(Vec::new()), |acc, fa| {
            let push = M::map::<E, Vec<A>, Func<A, Vec<A>>, _>(acc, |values: Vec<A>| {
                func(move |a: A| {
                    let mut next = values.clone();
                    next.push(a);
                    next
                })
            });
            M::ap::<E, A, Vec<A>>(push, fa)
        })
}

/// Maps every item to a kind with `f`, then [`sequence`]s the results.
pub fn traverse<M, E, A, B, F>(items: Vec<A>, f: F) -> M::Kind<E, Vec<B>>
where
    M: Applicative2,
    E: Element,
    A: Element,
    B: Element,
    F: FnMut(A) -> M::Kind<E, B>,
{
    sequence::<M, E, B>(items.into_iter().map(f).collect())
}
