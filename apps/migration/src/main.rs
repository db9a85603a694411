//! Schema migrations for the blog database.
//!
//! `migration up`, `down`, `fresh` and `status` run against `DATABASE_URL`.

use migration::Migrator;
use sea_orm_migration::cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    cli::run_cli(Migrator).await;
}
