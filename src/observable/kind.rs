//! [`MonadStream`] instance for [`Observable`].

use super::Observable;
use crate::config::StreamConfig;
use crate::transformer::MonadStream;
use crate::typeclass::Element;

/// The [`Observable`] stream capability.
///
/// `chain` flattens with the strategy of the active [`StreamConfig`],
/// read when the chained observable is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ObservableKind;

impl MonadStream for ObservableKind {
    type Stream<T: Element> = Observable<T>;

    fn of<T: Element>(value: T) -> Observable<T> {
        Observable::of(value)
    }

    fn map<T, U, F>(fa: Observable<T>, f: F) -> Observable<U>
    where
        T: Element,
        U: Element,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        fa.map(f)
    }

    fn chain<T, U, F>(fa: Observable<T>, f: F) -> Observable<U>
    where
        T: Element,
        U: Element,
        F: Fn(T) -> Observable<U> + Send + Sync + 'static,
    {
        fa.flat_map_with(StreamConfig::current().flatten, f)
    }

    fn combine<T, U, V, F>(fa: Observable<T>, fb: Observable<U>, f: F) -> Observable<V>
    where
        T: Element,
        U: Element,
        V: Element,
        F: Fn(&T, &U) -> V + Send + Sync + 'static,
    {
        fa.combine_latest(&fb, f)
    }

    fn combine_all<T: Element>(items: Vec<Observable<T>>) -> Observable<Vec<T>> {
        Observable::combine_latest_all(items)
    }

    fn defer<T, F>(f: F) -> Observable<T>
    where
        T: Element,
        F: Fn() -> Observable<T> + Send + Sync + 'static,
    {
        Observable::defer(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_logging;
    use futures_lite::future::block_on;

    fn init_test(name: &str) {
        init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn kind_operations_delegate() {
        init_test("kind_operations_delegate");
        let doubled = ObservableKind::map(ObservableKind::of(21), |n: i32| n * 2);
        let value = block_on(doubled.last()).expect("no fault");
        crate::assert_with_log!(value == Some(42), "map", Some(42), value);

        let chained = ObservableKind::chain(ObservableKind::of(3), |n: i32| {
            Observable::from_iter(vec![n, n + 1])
        });
        let values = block_on(chained.to_vec()).expect("no fault");
        crate::assert_with_log!(values == vec![3, 4], "chain", vec![3, 4], values);

        let combined = ObservableKind::combine(
            ObservableKind::of(2),
            ObservableKind::of(5),
            |a: &i32, b: &i32| a + b,
        );
        let value = block_on(combined.last()).expect("no fault");
        crate::assert_with_log!(value == Some(7), "combine", Some(7), value);
        crate::test_complete!("kind_operations_delegate");
    }
}
