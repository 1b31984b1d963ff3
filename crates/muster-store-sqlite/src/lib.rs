//! SQLite backend for the muster attendance store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on the connection's
//! dedicated thread without blocking the async runtime. That thread also
//! provides the store's serialisation guarantee: closures submitted to the
//! connection execute one at a time, so a conditional write and its re-read
//! inside one closure form a single atomic step.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
