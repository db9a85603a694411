//! Seed the default "Uncategorised" category.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend};

use crate::UNCATEGORISED_ID;
use crate::m20190301_000001_create_category_table::Category;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let insert = Query::insert()
            .into_table(Category::Table)
            .columns([Category::Id, Category::Name, Category::LinkName])
            .values_panic([
                UNCATEGORISED_ID.into(),
                "Uncategorised".into(),
                "uncategorised".into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        // An explicit id leaves the serial sequence behind on Postgres.
        if manager.get_database_backend() == DbBackend::Postgres {
            manager
                .get_connection()
                .execute_unprepared(
                    "SELECT setval(pg_get_serial_sequence('categories', 'id'), \
                     (SELECT MAX(id) FROM categories))",
                )
                .await?;
        }

        tracing::info!(id = UNCATEGORISED_ID, "Seeded Uncategorised category");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Category::Table)
            .and_where(Expr::col(Category::Id).eq(UNCATEGORISED_ID))
            .to_owned();

        manager.exec_stmt(delete).await?;

        Ok(())
    }
}
