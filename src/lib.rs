use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod telemetry;

pub use domain::{entities, policy, use_cases};
pub use interfaces::{notifier, repositories};
pub use infrastructure::{auth, db};

use errors::CatalogError;
use notifier::{Notifier, TracingNotifier, WebhookNotifier};
use repositories::{
    album::AlbumRepository, comment::CommentRepository, memory::MemoryRepo,
    photo::PhotoRepository, sqlx_repo::SqlxRepo, user::UserRepository,
};
use use_cases::{albums::AlbumHandler, auth::AuthHandler, photos::PhotoHandler, search::SearchHandler};

/// A store that serves every collection the catalog needs.
pub trait CatalogRepository:
    UserRepository + PhotoRepository + AlbumRepository + CommentRepository + Clone + 'static
{
}

impl<T> CatalogRepository for T where
    T: UserRepository + PhotoRepository + AlbumRepository + CommentRepository + Clone + 'static
{
}

/// All catalog operations, wired to one explicitly opened store handle.
pub struct Catalog<R>
where
    R: CatalogRepository,
{
    pub auth: AuthHandler<R>,
    pub photos: PhotoHandler<R, R>,
    pub albums: AlbumHandler<R, R>,
    pub search: SearchHandler<R>,
    store: R,
}

pub type PgCatalog = Catalog<SqlxRepo>;
pub type MemoryCatalog = Catalog<MemoryRepo>;

impl<R> Catalog<R>
where
    R: CatalogRepository,
{
    pub fn new(store: R, notifier: Option<Arc<dyn Notifier>>) -> Self {
        let mut photos = PhotoHandler::new(store.clone(), store.clone());
        if let Some(notifier) = notifier {
            photos = photos.with_notifier(notifier);
        }

        Catalog {
            auth: AuthHandler::new(store.clone()),
            photos,
            albums: AlbumHandler::new(store.clone(), store.clone()),
            search: SearchHandler::new(store.clone()),
            store,
        }
    }

    pub fn store(&self) -> &R {
        &self.store
    }
}

impl Catalog<SqlxRepo> {
    /// Connects to Postgres per `config`, migrates, and wires the notifier.
    pub async fn open(config: &settings::AppConfig) -> Result<Self, CatalogError> {
        let store = SqlxRepo::open(config).await?;
        let notifier = notifier_from_config(config)?;

        tracing::info!("Catalog opened on Postgres");
        Ok(Catalog::new(store, Some(notifier)))
    }

    pub async fn close(self) {
        self.store.close().await;
        tracing::info!("Catalog closed");
    }
}

impl Catalog<MemoryRepo> {
    pub fn in_memory(notifier: Option<Arc<dyn Notifier>>) -> Self {
        Catalog::new(MemoryRepo::open(), notifier)
    }

    pub async fn close(self) {
        self.store.close().await;
    }
}

/// Webhook delivery when a URL is configured, log output otherwise.
pub fn notifier_from_config(config: &settings::AppConfig) -> Result<Arc<dyn Notifier>, CatalogError> {
    match &config.notify_webhook_url {
        Some(url) => {
            let notifier = WebhookNotifier::new(url.as_str())
                .map_err(|e| CatalogError::InternalError(format!("Notifier setup failed: {}", e)))?;
            Ok(Arc::new(notifier))
        }
        None => Ok(Arc::new(TracingNotifier)),
    }
}
