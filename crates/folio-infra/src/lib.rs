//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`.
//! SeaORM-backed repositories for production and in-memory repositories for
//! running without a database.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM

pub mod database;

pub use database::{DatabaseConfig, InMemoryCategoryRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresCategoryRepository, PostgresPostRepository};
