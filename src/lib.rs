//! Sentence-building drills: lessons of token-reorder exercises played through
//! a mastery queue that re-presents missed exercises until they are answered
//! correctly or run out of retries.
//!
//! The terminal front end lives in the binary; everything here is usable
//! without a terminal, which is what the integration tests and benchmarks do.

pub mod config;
pub mod generator;
pub mod lesson;
pub mod session;
pub mod store;
