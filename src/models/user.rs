use mongodb::bson::{doc, Document};

use crate::utils::document::non_empty_str;
use crate::utils::error::AppError;

/// Lookup filter for the user's uniqueness key.
pub fn email_filter(user: &Document) -> Result<Document, AppError> {
    let email = non_empty_str(user, "email").ok_or(AppError::MissingField("Email is required"))?;
    Ok(doc! { "email": email })
}
