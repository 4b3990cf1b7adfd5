//! RemoteData over lazy, cancelable streams.
//!
//! # Overview
//!
//! [`RemoteData`] is the status of an asynchronous value: not requested yet,
//! in flight (optionally with [`Progress`]), failed, or succeeded. This crate
//! lifts its algebra onto a cold, multi-shot stream abstraction so that a
//! stream of statuses can be mapped, chained, combined and sequenced like a
//! single status.
//!
//! # Core Guarantees
//!
//! - **Lazy**: nothing runs before a subscription is polled
//! - **Independent subscriptions**: each subscription owns its own upstream state
//! - **Cancel by drop**: dropping a subscription drops every stream it created
//! - **Separate failure channels**: `Failure(E)` is data; stream faults are `Err` items
//!
//! # Module Structure
//!
//! - [`types`]: The [`RemoteData`] status and [`Progress`]
//! - [`stream`]: Poll-based `Stream` trait and combinators
//! - [`observable`]: Cold observables and subscriptions
//! - [`transformer`]: The stream capability and the RemoteData transformer
//! - [`typeclass`]: Typeclass dictionaries and generic `sequence`/`traverse`
//! - [`observable_remote_data`]: RemoteData over observables
//! - [`pipe`]: Left-to-right application for data-last operations
//! - [`config`]: Flatten strategy and logging configuration
//! - [`error`]: Error types
//!
//! # Example
//!
//! ```ignore
//! use remote_data_stream::observable_remote_data as ord;
//! use remote_data_stream::prelude::*;
//!
//! let users = ord::of::<String, Vec<&str>>(vec!["ada", "grace"]);
//! let count = users.pipe(ord::map(|names| names.len()));
//! let status = futures_lite::future::block_on(count.last());
//! assert_eq!(status.unwrap(), Some(RemoteData::Success(2)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::type_complexity)]

pub mod config;
pub mod error;
pub mod observable;
pub mod observable_remote_data;
pub mod pipe;
pub mod stream;
pub mod transformer;
pub mod typeclass;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports for convenient access to core types
pub use config::{FlattenStrategy, StreamConfig};
pub use error::{ConfigError, Result, StreamError};
pub use observable::{Observable, ObservableKind, Subscription};
pub use observable_remote_data::{ObservableRemoteData, ObservableRemoteDataM};
pub use transformer::{MonadStream, RemoteDataT};
pub use types::{Progress, RemoteData};

/// Traits and types most callers need.
pub mod prelude {
    pub use crate::observable::Observable;
    pub use crate::observable_remote_data::{ObservableRemoteData, ObservableRemoteDataM};
    pub use crate::pipe::Pipe;
    pub use crate::stream::{Stream, StreamExt};
    pub use crate::transformer::MonadStream;
    pub use crate::typeclass::{
        func, Alt2, Applicative2, Apply2, Bifunctor2, Chain2, Element, Func, Functor2, Hkt2,
        Monad2, MonadObservable2, MonadThrow2,
    };
    pub use crate::types::{Progress, RemoteData};
}
