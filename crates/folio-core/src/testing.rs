//! Test doubles shared by the domain tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::domain::Category;
use crate::error::RepoError;
use crate::ports::{BaseRepository, CategoryRepository};

pub(crate) fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Read-only category repository over a fixed list.
pub(crate) struct StubCategoryRepository {
    categories: Vec<Category>,
}

impl StubCategoryRepository {
    pub(crate) fn seeded() -> Self {
        Self {
            categories: vec![Category::uncategorised_seed()],
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            categories: Vec::new(),
        }
    }
}

#[async_trait]
impl BaseRepository<Category, i32> for StubCategoryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError> {
        Ok(self.categories.iter().find(|c| c.id() == id).cloned())
    }

    async fn save(&self, entity: Category) -> Result<Category, RepoError> {
        Ok(entity)
    }

    async fn delete(&self, _id: i32) -> Result<(), RepoError> {
        Err(RepoError::NotFound)
    }
}

#[async_trait]
impl CategoryRepository for StubCategoryRepository {
    async fn find_by_link_name(&self, link_name: &str) -> Result<Option<Category>, RepoError> {
        Ok(self
            .categories
            .iter()
            .find(|c| c.link_name().as_str() == link_name)
            .cloned())
    }

    async fn find_children(&self, parent_id: i32) -> Result<Vec<Category>, RepoError> {
        Ok(self
            .categories
            .iter()
            .filter(|c| c.parent().is_some_and(|p| p.id() == parent_id))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.categories.clone())
    }
}
