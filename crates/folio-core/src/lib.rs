//! # Folio Core
//!
//! The domain layer of the Folio portfolio and blog.
//! Link-name normalization, blog categories and posts, and the repository
//! ports that infrastructure implements. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};

#[cfg(test)]
mod testing;
