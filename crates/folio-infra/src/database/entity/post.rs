//! Post entity for SeaORM.

use std::sync::Arc;

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use folio_core::domain::{Category, Post};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub link: String,
    pub creation_time: DateTimeWithTimeZone,
    pub publish_time: DateTimeWithTimeZone,
    pub last_modification_time: DateTimeWithTimeZone,
    pub category_id: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain post, keeping the stored timestamps.
    pub fn into_domain(self, category: Arc<Category>) -> Post {
        Post::new(
            self.title,
            &self.link,
            self.publish_time.into(),
            Some(category),
            self.content,
            self.description,
        )
        .with_id(self.id)
        .with_stored_timestamps(
            self.creation_time.into(),
            self.last_modification_time.into(),
        )
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
///
/// The caller supplies the category id; posts are validated before this.
impl ActiveModel {
    pub fn from_domain(post: &Post, category_id: i32) -> Self {
        Self {
            id: if post.id() == 0 { NotSet } else { Set(post.id()) },
            title: Set(post.title().unwrap_or_default().to_owned()),
            link: Set(post.link().to_string()),
            creation_time: Set(post.creation_time().into()),
            publish_time: Set(post.publish_time().into()),
            last_modification_time: Set(post.last_modification_time().into()),
            category_id: Set(category_id),
            content: Set(post.content().map(str::to_owned)),
            description: Set(post.description().map(str::to_owned)),
        }
    }
}
