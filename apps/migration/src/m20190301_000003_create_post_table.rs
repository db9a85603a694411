//! Create posts table migration.

use sea_orm_migration::prelude::*;

use crate::m20190301_000001_create_category_table::Category;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Post::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Post::Title).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Post::Link)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Post::CreationTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Post::PublishTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Post::LastModificationTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Post::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Post::Content).text())
                    .col(ColumnDef::new(Post::Description).string_len(280))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_category_id")
                            .from(Post::Table, Post::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: publish_time (for listing published posts)
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_publish_time")
                    .table(Post::Table)
                    .col(Post::PublishTime)
                    .to_owned(),
            )
            .await?;

        // Index: category_id (for listing posts in a category)
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_category_id")
                    .table(Post::Table)
                    .col(Post::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Post {
    #[iden = "posts"]
    Table,
    Id,
    Title,
    Link,
    CreationTime,
    PublishTime,
    LastModificationTime,
    CategoryId,
    Content,
    Description,
}
