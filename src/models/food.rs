use mongodb::bson::{DateTime, Document};

use crate::utils::error::AppError;

pub const CREATED_AT: &str = "createdAt";

/// Stamps a new food with the server's creation time, replacing any
/// caller-supplied `createdAt`.
pub fn prepare_new(mut food: Document) -> Document {
    food.insert(CREATED_AT, DateTime::now());
    food
}

/// Fields a food update may overwrite. `createdAt` stays as stamped on
/// creation.
pub fn patch_fields(body: Document) -> Result<Document, AppError> {
    if body.contains_key(CREATED_AT) {
        return Err(AppError::InvalidBody("createdAt is set by the server and cannot be changed".into()));
    }
    Ok(body)
}
