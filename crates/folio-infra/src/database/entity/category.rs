//! Category entity for SeaORM.

use std::sync::Arc;

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use folio_core::domain::Category;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub link_name: String,
    pub parent_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Parent,
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain category, attaching an already loaded parent.
    pub fn into_domain(self, parent: Option<Arc<Category>>) -> Category {
        Category::new(self.name, Some(&self.link_name), parent).with_id(self.id)
    }
}

/// Conversion from Domain Category to SeaORM ActiveModel.
///
/// An id of 0 is left unset so the database assigns one.
impl From<&Category> for ActiveModel {
    fn from(category: &Category) -> Self {
        Self {
            id: if category.id() == 0 {
                NotSet
            } else {
                Set(category.id())
            },
            name: Set(category.name().unwrap_or_default().to_owned()),
            link_name: Set(category.link_name().to_string()),
            parent_id: Set(category.parent().map(|parent| parent.id())),
        }
    }
}
