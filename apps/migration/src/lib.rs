//! Schema migrations for the Folio database.
//!
//! Creates the blog tables and seeds the default "Uncategorised" category
//! with id 1, which posts fall back to when created without a category.

pub use sea_orm_migration::prelude::*;

mod m20190301_000001_create_category_table;
mod m20190301_000002_seed_uncategorised_category;
mod m20190301_000003_create_post_table;

pub use m20190301_000001_create_category_table::Category;
pub use m20190301_000003_create_post_table::Post;

/// Id given to the seeded default category.
pub const UNCATEGORISED_ID: i32 = 1;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20190301_000001_create_category_table::Migration),
            Box::new(m20190301_000002_seed_uncategorised_category::Migration),
            Box::new(m20190301_000003_create_post_table::Migration),
        ]
    }
}
