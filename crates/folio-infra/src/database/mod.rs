//! Database connection management and repository implementations.

use std::sync::Arc;

use folio_core::domain::{Category, Post};
use folio_core::error::RepoError;

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::{InMemoryCategoryRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;

#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresCategoryRepository, PostgresPostRepository};

/// Deepest category chain a repository will load.
pub const MAX_CATEGORY_DEPTH: usize = 64;

/// Reject a category that no store may write.
pub(crate) fn check_category(category: &Category) -> Result<(), RepoError> {
    category.validate().map_err(|e| RepoError::Constraint(e.to_string()))?;
    if category.parent().is_some_and(|parent| parent.id() == 0) {
        return Err(RepoError::Constraint("parent category must be saved first".to_string()));
    }
    Ok(())
}

/// Reject a post that no store may write; returns its saved category.
pub(crate) fn check_post(post: &Post) -> Result<Arc<Category>, RepoError> {
    post.validate().map_err(|e| RepoError::Constraint(e.to_string()))?;
    let Some(category) = post.category().cloned() else {
        return Err(RepoError::Constraint("post must belong to a category".to_string()));
    };
    if category.id() == 0 {
        return Err(RepoError::Constraint("post category must be saved first".to_string()));
    }
    Ok(category)
}
