//! SQLite backend for the social-radar table store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. Rebuilds run as one transaction,
//! so readers see either the previous complete snapshot or the new one.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
