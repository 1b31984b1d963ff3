//! Core types and trait definitions for the muster attendance system.
//!
//! Everything here is storage- and transport-agnostic: the punch state
//! machine, the clock/calendar seam, and the traits the storage backend and
//! the face resolver plug into. The other crates in the workspace all build
//! on this one.

// We intentionally use native `async fn` in traits (stabilised in Rust
// 1.75). Suppress the advisory lint about `Send` bounds on the returned
// futures.
#![allow(async_fn_in_trait)]

pub mod clock;
pub mod engine;
pub mod error;
pub mod identity;
pub mod punch;
pub mod report;
pub mod resolver;
pub mod store;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
