//! Core components shared by every part of the crate.
//!
//! ### [`error`] - Error handling
//! A single [`LogError`] enum covers configuration, writer and installation
//! failures. All fallible operations return [`LogResult`].

pub mod error;

pub use error::{LogError, LogResult};
