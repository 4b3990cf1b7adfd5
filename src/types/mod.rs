//! Core value types.
//!
//! - [`remote_data`]: The four-state [`RemoteData`] status with [`Progress`]

pub mod remote_data;

pub use remote_data::{Progress, RemoteData};
