//! Application state - shared across all handlers.

use std::sync::Arc;

use folio_core::ports::{CategoryRepository, PostRepository};
use folio_infra::{InMemoryCategoryRepository, InMemoryPostRepository};
use tera::Tera;

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use folio_infra::{DatabaseConnections, PostgresCategoryRepository, PostgresPostRepository};
#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};

/// Where blog content is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    Memory,
}

impl Storage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Storage::Postgres => "postgres",
            Storage::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub templates: Arc<Tera>,
    pub storage: Storage,
    pub service_name: String,
}

type Repositories = (Arc<dyn CategoryRepository>, Arc<dyn PostRepository>, Storage);

fn in_memory() -> Repositories {
    (
        Arc::new(InMemoryCategoryRepository::seeded()),
        Arc::new(InMemoryPostRepository::new()),
        Storage::Memory,
    )
}

/// Compile every `*.html.tera` template under `dir`.
pub fn load_templates(dir: &str) -> Result<Tera, tera::Error> {
    let mut templates = Tera::new(&format!("{}/**/*.html.tera", dir.trim_end_matches('/')))?;
    templates.autoescape_on(vec![".html.tera"]);
    tracing::debug!(
        count = templates.get_template_names().count(),
        dir,
        "Templates loaded"
    );
    Ok(templates)
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Falls back to in-memory storage when no database is configured or the
    /// connection fails.
    pub async fn new(config: &AppConfig) -> Result<Self, tera::Error> {
        let templates = load_templates(&config.template_dir)?;

        #[cfg(feature = "postgres")]
        let (categories, posts, storage) = match &config.database {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    if config.run_migrations {
                        match Migrator::up(&connections.main, None).await {
                            Ok(()) => tracing::info!("Migrations applied"),
                            Err(e) => tracing::error!("Failed to apply migrations: {}", e),
                        }
                    }
                    let db = Arc::new(connections.main);
                    let repos: Repositories = (
                        Arc::new(PostgresCategoryRepository::new(Arc::clone(&db))),
                        Arc::new(PostgresPostRepository::new(db)),
                        Storage::Postgres,
                    );
                    repos
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (categories, posts, storage) = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            in_memory()
        };

        tracing::info!(storage = storage.as_str(), "Application state initialized");

        Ok(Self::from_parts(
            categories,
            posts,
            templates,
            storage,
            config.service_name.clone(),
        ))
    }

    pub fn from_parts(
        categories: Arc<dyn CategoryRepository>,
        posts: Arc<dyn PostRepository>,
        templates: Tera,
        storage: Storage,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            categories,
            posts,
            templates: Arc::new(templates),
            storage,
            service_name: service_name.into(),
        }
    }
}
