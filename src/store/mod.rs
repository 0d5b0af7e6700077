//! Persistence layer — libSQL-backed profile and catalog stores.

pub mod libsql_backend;
pub mod migrations;
pub mod retry;
pub mod traits;

pub use libsql_backend::LibSqlBackend;
pub use retry::with_backoff;
pub use traits::{CatalogStore, ProfileStore};
