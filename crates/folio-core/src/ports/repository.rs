use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Category, Post};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity. An id of 0 inserts a new row, anything else updates.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Category repository. Returned categories carry their parent chain.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i32> {
    /// Find the category with the given link name.
    async fn find_by_link_name(&self, link_name: &str) -> Result<Option<Category>, RepoError>;

    /// Direct children of a category.
    async fn find_children(&self, parent_id: i32) -> Result<Vec<Category>, RepoError>;

    /// Every category, ordered by id.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Find the post with the given link.
    async fn find_by_link(&self, link: &str) -> Result<Option<Post>, RepoError>;

    async fn find_by_category(&self, category_id: i32) -> Result<Vec<Post>, RepoError>;

    /// Posts visible at `now`, newest publish time first.
    async fn find_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError>;
}
