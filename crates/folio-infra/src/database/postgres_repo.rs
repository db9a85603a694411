//! PostgreSQL repository implementations.
//!
//! Rows only store a parent or category id, so every category handed back is
//! rebuilt together with its parent chain.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, TryIntoModel,
};

use folio_core::domain::{Category, Post};
use folio_core::error::RepoError;
use folio_core::ports::{BaseRepository, CategoryRepository, PostRepository};

use super::{MAX_CATEGORY_DEPTH, check_category, check_post};
use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

fn too_deep(id: i32) -> RepoError {
    RepoError::Constraint(format!(
        "category {id} is nested deeper than {MAX_CATEGORY_DEPTH} levels"
    ))
}

fn missing_category(id: i32) -> RepoError {
    RepoError::Constraint(format!("category {id} is referenced but does not exist"))
}

/// Load the parent chain of `model` and build the domain category.
async fn hydrate_category(db: &DbConn, model: category::Model) -> Result<Category, RepoError> {
    let mut ancestors: Vec<category::Model> = Vec::new();
    let mut next = model.parent_id;

    while let Some(parent_id) = next {
        if ancestors.len() >= MAX_CATEGORY_DEPTH {
            return Err(too_deep(model.id));
        }
        let parent = CategoryEntity::find_by_id(parent_id)
            .one(db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| missing_category(parent_id))?;
        next = parent.parent_id;
        ancestors.push(parent);
    }

    let parent = ancestors
        .into_iter()
        .rev()
        .fold(None, |parent, ancestor| {
            Some(Arc::new(ancestor.into_domain(parent)))
        });

    Ok(model.into_domain(parent))
}

fn index_categories(models: Vec<category::Model>) -> HashMap<i32, category::Model> {
    models.into_iter().map(|m| (m.id, m)).collect()
}

/// Build category `id` and its ancestors from a table scan.
///
/// Chains already in `built` are reused, so siblings share parent handles.
fn resolve_category(
    id: i32,
    by_id: &HashMap<i32, category::Model>,
    built: &mut HashMap<i32, Arc<Category>>,
) -> Result<Arc<Category>, RepoError> {
    let mut pending: Vec<&category::Model> = Vec::new();
    let mut parent = None;
    let mut next = Some(id);

    while let Some(current) = next {
        if let Some(done) = built.get(&current) {
            parent = Some(Arc::clone(done));
            break;
        }
        if pending.len() > MAX_CATEGORY_DEPTH {
            return Err(too_deep(id));
        }
        let model = by_id.get(&current).ok_or_else(|| missing_category(current))?;
        pending.push(model);
        next = model.parent_id;
    }

    for model in pending.into_iter().rev() {
        let category = Arc::new(model.clone().into_domain(parent.take()));
        built.insert(model.id, Arc::clone(&category));
        parent = Some(category);
    }

    parent.ok_or(RepoError::NotFound)
}

async fn hydrate_post(db: &DbConn, model: post::Model) -> Result<Post, RepoError> {
    let category = CategoryEntity::find_by_id(model.category_id)
        .one(db)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| missing_category(model.category_id))?;
    let category = hydrate_category(db, category).await?;

    Ok(model.into_domain(Arc::new(category)))
}

async fn hydrate_posts(db: &DbConn, models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let by_id = index_categories(CategoryEntity::find().all(db).await.map_err(map_db_err)?);
    let mut built = HashMap::new();

    models
        .into_iter()
        .map(|model| {
            let category = resolve_category(model.category_id, &by_id, &mut built)?;
            Ok(model.into_domain(category))
        })
        .collect()
}

#[async_trait]
impl BaseRepository<Category, i32> for PostgresCategoryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        match result {
            Some(model) => hydrate_category(self.conn(), model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn save(&self, entity: Category) -> Result<Category, RepoError> {
        check_category(&entity)?;

        let active_model: category::ActiveModel = (&entity).into();
        let model = active_model
            .save(self.conn())
            .await
            .map_err(map_db_err)?
            .try_into_model()
            .map_err(map_db_err)?;

        tracing::debug!(id = model.id, link_name = %model.link_name, "Saved category");

        Ok(model.into_domain(entity.parent().cloned()))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.delete_row(id).await
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_link_name(&self, link_name: &str) -> Result<Option<Category>, RepoError> {
        tracing::debug!(link_name, "Finding category by link name");

        let result = CategoryEntity::find()
            .filter(category::Column::LinkName.eq(link_name))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        match result {
            Some(model) => hydrate_category(self.conn(), model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_children(&self, parent_id: i32) -> Result<Vec<Category>, RepoError> {
        let Some(parent) = self.find_by_id(parent_id).await? else {
            return Ok(Vec::new());
        };
        let parent = Arc::new(parent);

        let children = CategoryEntity::find()
            .filter(category::Column::ParentId.eq(parent_id))
            .order_by_asc(category::Column::Id)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(children
            .into_iter()
            .map(|child| child.into_domain(Some(Arc::clone(&parent))))
            .collect())
    }

    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let models = CategoryEntity::find()
            .order_by_asc(category::Column::Id)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;
        let order: Vec<i32> = models.iter().map(|m| m.id).collect();
        let by_id = index_categories(models);
        let mut built = HashMap::with_capacity(by_id.len());

        let mut categories = Vec::with_capacity(order.len());
        for id in order {
            match resolve_category(id, &by_id, &mut built) {
                Ok(category) => categories.push(Category::clone(&category)),
                Err(err) => tracing::warn!(id, error = %err, "Skipping category"),
            }
        }

        Ok(categories)
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for PostgresPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        match result {
            Some(model) => hydrate_post(self.conn(), model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let category = check_post(&entity)?;

        let model = post::ActiveModel::from_domain(&entity, category.id())
            .save(self.conn())
            .await
            .map_err(map_db_err)?
            .try_into_model()
            .map_err(map_db_err)?;

        tracing::debug!(id = model.id, link = %model.link, "Saved post");

        Ok(model.into_domain(category))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.delete_row(id).await
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_link(&self, link: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Link.eq(link))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        match result {
            Some(model) => hydrate_post(self.conn(), model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_by_category(&self, category_id: i32) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .filter(post::Column::CategoryId.eq(category_id))
            .order_by_desc(post::Column::PublishTime)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        hydrate_posts(self.conn(), models).await
    }

    async fn find_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .filter(post::Column::PublishTime.lte(now.fixed_offset()))
            .order_by_desc(post::Column::PublishTime)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        hydrate_posts(self.conn(), models).await
    }
}
