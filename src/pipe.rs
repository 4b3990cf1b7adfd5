//! Left-to-right function application.

/// Passes a value through a function, so data-last operations read in order:
///
/// ```ignore
/// use remote_data_stream::observable_remote_data::{map, of};
/// use remote_data_stream::pipe::Pipe;
///
/// let doubled = of::<String, i32>(1).pipe(map(|n| n * 2)).pipe(map(|n| n * 2));
/// ```
pub trait Pipe: Sized {
    /// Returns `f(self)`.
    fn pipe<R, F>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}
