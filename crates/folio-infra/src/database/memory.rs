//! In-memory repositories - used when no database is configured.
//!
//! Data is lost on process restart. Link names are kept unique the same way
//! the database's unique keys do.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use folio_core::domain::{Category, Post};
use folio_core::error::RepoError;
use folio_core::ports::{BaseRepository, CategoryRepository, PostRepository};

use super::{check_category, check_post};

struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, id: i32, row: T) {
        self.next_id = self.next_id.max(id + 1);
        self.rows.insert(id, row);
    }

    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory category store.
pub struct InMemoryCategoryRepository {
    table: RwLock<Table<Category>>,
}

impl InMemoryCategoryRepository {
    /// An empty store, without the default category.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }

    /// A store holding the seeded "Uncategorised" category.
    pub fn seeded() -> Self {
        let mut table = Table::new();
        let seed = Category::uncategorised_seed();
        table.insert(seed.id(), seed);
        Self {
            table: RwLock::new(table),
        }
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl BaseRepository<Category, i32> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, entity: Category) -> Result<Category, RepoError> {
        check_category(&entity)?;

        let mut table = self.table.write().await;

        let link_taken = table
            .rows
            .values()
            .any(|c| c.link_name() == entity.link_name() && c.id() != entity.id());
        if link_taken {
            return Err(RepoError::Constraint(format!(
                "Entity already exists: category link name '{}'",
                entity.link_name()
            )));
        }

        let entity = match entity.id() {
            0 => {
                let id = table.allocate_id();
                entity.with_id(id)
            }
            id if table.rows.contains_key(&id) => entity,
            _ => return Err(RepoError::NotFound),
        };

        table.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_link_name(&self, link_name: &str) -> Result<Option<Category>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|c| c.link_name().as_str() == link_name)
            .cloned())
    }

    async fn find_children(&self, parent_id: i32) -> Result<Vec<Category>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|c| c.parent().is_some_and(|p| p.id() == parent_id))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }
}

/// In-memory post store.
pub struct InMemoryPostRepository {
    table: RwLock<Table<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        check_post(&entity)?;

        let mut table = self.table.write().await;

        let link_taken = table
            .rows
            .values()
            .any(|p| p.link() == entity.link() && p.id() != entity.id());
        if link_taken {
            return Err(RepoError::Constraint(format!(
                "Entity already exists: post link '{}'",
                entity.link()
            )));
        }

        let entity = match entity.id() {
            0 => {
                let id = table.allocate_id();
                entity.with_id(id)
            }
            id if table.rows.contains_key(&id) => entity,
            _ => return Err(RepoError::NotFound),
        };

        table.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_link(&self, link: &str) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|p| p.link().as_str() == link)
            .cloned())
    }

    async fn find_by_category(&self, category_id: i32) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        let mut posts: Vec<Post> = table
            .rows
            .values()
            .filter(|p| p.category().is_some_and(|c| c.id() == category_id))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.publish_time().cmp(&a.publish_time()));
        Ok(posts)
    }

    async fn find_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        let mut posts: Vec<Post> = table
            .rows
            .values()
            .filter(|p| p.is_published(now))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.publish_time().cmp(&a.publish_time()));
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use folio_core::DomainError;
    use folio_core::domain::UNCATEGORISED_ID;

    use super::*;

    #[tokio::test]
    async fn test_seeded_store_resolves_uncategorised() {
        let repo = InMemoryCategoryRepository::seeded();

        let category = Category::uncategorised(&repo).await.unwrap();

        assert_eq!(category.id(), UNCATEGORISED_ID);
        assert_eq!(category.link_name().as_str(), "uncategorised");
    }

    #[tokio::test]
    async fn test_empty_store_reports_missing_seed() {
        let repo = InMemoryCategoryRepository::new();

        let err = Category::uncategorised(&repo).await.unwrap_err();

        assert!(matches!(err, DomainError::UncategorisedMissing));
    }

    #[tokio::test]
    async fn test_save_assigns_ids_after_seed() {
        let repo = InMemoryCategoryRepository::seeded();

        let saved = repo.save(Category::from_name("Rust", None)).await.unwrap();

        assert_eq!(saved.id(), 2);
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_link_name_is_rejected() {
        let repo = InMemoryCategoryRepository::seeded();

        let err = repo
            .save(Category::new("Misc", Some("Uncategorised"), None))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_find_children() {
        let repo = InMemoryCategoryRepository::seeded();
        let parent = Arc::new(repo.save(Category::from_name("Programming", None)).await.unwrap());
        repo.save(Category::from_name("Rust", Some(parent.clone())))
            .await
            .unwrap();
        repo.save(Category::from_name("Go", Some(parent.clone())))
            .await
            .unwrap();

        let children = repo.find_children(parent.id()).await.unwrap();

        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.parent() == Some(&parent)));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = InMemoryCategoryRepository::seeded();

        let err = repo
            .save(Category::from_name("Ghost", None).with_id(42))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_save_rejects_nameless_category() {
        let repo = InMemoryCategoryRepository::seeded();

        let err = repo.save(Category::default()).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_rejects_unsaved_parent() {
        let repo = InMemoryCategoryRepository::seeded();
        let parent = Arc::new(Category::from_name("Unsaved", None));

        let err = repo
            .save(Category::from_name("Child", Some(parent)))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
        assert!(repo.find_by_link_name("child").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_post_save_rejects_unsaved_category() {
        let repo = InMemoryPostRepository::new();
        let category = Arc::new(Category::from_name("Unsaved", None));

        let err = repo
            .save(Post::with_category("Orphan", category, "Body"))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
        assert!(repo.find_by_link("orphan").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_post_save_requires_valid_post() {
        let repo = InMemoryPostRepository::new();

        let err = repo.save(Post::default()).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_find_published_filters_and_orders() {
        let categories = InMemoryCategoryRepository::seeded();
        let posts = InMemoryPostRepository::new();
        let now = Utc::now();

        let mut older = Post::uncategorised("Older", "Body", &categories).await.unwrap();
        older.set_publish_time(now - Duration::days(2));
        let mut newer = Post::uncategorised("Newer", "Body", &categories).await.unwrap();
        newer.set_publish_time(now - Duration::hours(1));
        let mut scheduled = Post::uncategorised("Scheduled", "Body", &categories)
            .await
            .unwrap();
        scheduled.set_publish_time(now + Duration::days(1));

        for post in [older, newer, scheduled] {
            posts.save(post).await.unwrap();
        }

        let published = posts.find_published(now).await.unwrap();
        let titles: Vec<_> = published.iter().filter_map(Post::title).collect();
        assert_eq!(titles, vec!["Newer", "Older"]);

        let filed = posts.find_by_category(UNCATEGORISED_ID).await.unwrap();
        assert_eq!(filed.len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_post_link_is_rejected() {
        let categories = InMemoryCategoryRepository::seeded();
        let posts = InMemoryPostRepository::new();

        let first = Post::uncategorised("Same Title", "a", &categories).await.unwrap();
        let second = Post::uncategorised("Same  Title!", "b", &categories).await.unwrap();

        posts.save(first).await.unwrap();
        let err = posts.save(second).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
        assert!(posts.find_by_link("same-title").await.unwrap().is_some());
    }
}
