use async_trait::async_trait;
use mongodb::bson::Document;

use super::{Collection, DocumentStore};
use crate::models::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::utils::error::AppError;

/// Stand-in used when no client could be created at startup.
/// Every call fails with the original startup error.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn fail<T>(&self) -> Result<T, AppError> {
        Err(AppError::Database(self.reason.clone()))
    }
}

#[async_trait]
impl DocumentStore for UnavailableStore {
    async fn find_one(&self, _: Collection, _: Document) -> Result<Option<Document>, AppError> {
        self.fail()
    }

    async fn find(&self, _: Collection, _: Document, _: Option<Document>)
        -> Result<Vec<Document>, AppError> {
        self.fail()
    }

    async fn insert_one(&self, _: Collection, _: Document) -> Result<InsertOutcome, AppError> {
        self.fail()
    }

    async fn update_one(&self, _: Collection, _: Document, _: Document)
        -> Result<UpdateOutcome, AppError> {
        self.fail()
    }

    async fn delete_one(&self, _: Collection, _: Document) -> Result<DeleteOutcome, AppError> {
        self.fail()
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.fail()
    }
}
