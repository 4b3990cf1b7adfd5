//! Error types for remote-data-stream.
//!
//! Two channels are kept apart:
//!
//! - **Semantic failure** is data: [`RemoteData::Failure`](crate::RemoteData::Failure)
//!   flows through every combinator as an ordinary emitted value.
//! - **Mechanical failure** is a fault of the stream itself. It travels as an
//!   `Err(StreamError)` item on a [`Subscription`](crate::observable::Subscription),
//!   terminates that subscription, and is never turned into a `Failure`.
//!
//! Configuration problems are reported separately through [`ConfigError`].

use std::sync::Arc;

/// A mechanical fault raised by a stream.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StreamError {
    /// The stream faulted with a message.
    #[error("stream faulted: {0}")]
    Faulted(String),
    /// The stream faulted because a foreign source failed.
    #[error("upstream error: {0}")]
    Upstream(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl StreamError {
    /// Creates a fault carrying a message.
    #[must_use]
    pub fn faulted(message: impl Into<String>) -> Self {
        Self::Faulted(message.into())
    }

    /// Wraps an error raised by a foreign source.
    #[must_use]
    pub fn upstream<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Upstream(Arc::new(error))
    }

    /// Returns the fault message, if this is a plain fault.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Faulted(message) => Some(message),
            Self::Upstream(_) => None,
        }
    }
}

/// Error raised while resolving a [`StreamConfig`](crate::config::StreamConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A setting was present but could not be parsed.
    #[error("invalid value for {var}: {message}")]
    InvalidValue {
        /// The setting (environment variable or file key).
        var: &'static str,
        /// What was wrong with it.
        message: String,
    },
    /// The config file could not be read.
    #[cfg(feature = "config-file")]
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid TOML.
    #[cfg(feature = "config-file")]
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn invalid(var: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            var,
            message: message.into(),
        }
    }
}

/// Result alias defaulting to [`StreamError`].
pub type Result<T, E = StreamError> = std::result::Result<T, E>;
