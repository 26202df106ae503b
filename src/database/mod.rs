mod mongo;
mod unavailable;

#[cfg(test)]
pub mod memory;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::config::AppConfig;
use crate::models::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::utils::error::AppError;

pub use mongo::MongoDB;
pub use unavailable::UnavailableStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Foods,
    Requests,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Foods => "foods",
            Collection::Requests => "requests",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The single-call document operations the HTTP layer is allowed to issue.
///
/// Every handler performs at most one of these per request; implementations
/// only need to be atomic per call.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(&self, collection: Collection, filter: Document)
        -> Result<Option<Document>, AppError>;

    /// `sort` follows MongoDB syntax, e.g. `{ "createdAt": -1 }`.
    async fn find(
        &self,
        collection: Collection,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, AppError>;

    async fn insert_one(&self, collection: Collection, document: Document)
        -> Result<InsertOutcome, AppError>;

    /// Applies `fields` as a `$set` on the first document matching `filter`.
    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, AppError>;

    async fn delete_one(&self, collection: Collection, filter: Document)
        -> Result<DeleteOutcome, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

/// Opens the shared store for the whole process.
///
/// Never fails: when the client cannot be built the server still starts and
/// every data endpoint answers 500 with the startup error.
pub async fn connect(config: &AppConfig) -> Arc<dyn DocumentStore> {
    let uri = match config.mongodb_uri() {
        Ok(uri) => uri,
        Err(e) => {
            log::error!("❌ Database not configured: {}", e);
            return Arc::new(UnavailableStore::new(e.to_string()));
        }
    };

    let db = match MongoDB::new(uri, &config.database_name).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("❌ Failed to create MongoDB client: {}", e);
            return Arc::new(UnavailableStore::new(e.to_string()));
        }
    };

    match db.ping().await {
        Ok(()) => {
            log::info!("✅ MongoDB connected successfully ({})", config.database_name);
            db.ensure_indexes().await;
        }
        Err(e) => log::error!("❌ MongoDB ping failed, serving anyway: {}", e),
    }

    Arc::new(db)
}
