//! `tracing-subscriber` building blocks driven by a [`LogConfig`](crate::LogConfig)
//!
//! - `filter`: per-layer filter resolving levels through the logger hierarchy
//! - `line`: event formatter writing the pipe-delimited line

mod filter;
mod line;

pub use filter::LevelTree;
pub use line::{LineFormat, process_name};
