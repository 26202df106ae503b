use mongodb::bson::{doc, Bson, DateTime, Document};

use super::food::CREATED_AT;
use crate::utils::document::non_empty_str;
use crate::utils::error::AppError;

pub const STATUS: &str = "status";
pub const PENDING: &str = "pending";

/// Stamps a new food request: `createdAt` is now and `status` always starts
/// as pending, whatever the caller sent.
pub fn prepare_new(mut request: Document) -> Document {
    request.insert(CREATED_AT, DateTime::now());
    request.insert(STATUS, PENDING);
    request
}

/// Extracts the only field a request update may change.
pub fn status_patch(body: &Document) -> Result<Document, AppError> {
    let status = non_empty_str(body, STATUS).ok_or(AppError::MissingField("Status is required"))?;
    Ok(doc! { STATUS: status })
}

/// Query string of `GET /requests`.
///
/// A repeated parameter (`?email=a&email=b`) becomes an array match, so it
/// only matches documents whose field holds that exact array.
#[derive(Debug, Default)]
pub struct RequestQuery {
    pub food_id: Vec<String>,
    pub email: Vec<String>,
}

impl RequestQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "foodId" => query.food_id.push(value),
                "email" => query.email.push(value),
                _ => {}
            }
        }
        query
    }

    /// Empty parameters add no constraint; present ones combine with AND.
    pub fn to_filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(value) = match_value(&self.food_id) {
            filter.insert("foodId", value);
        }
        if let Some(value) = match_value(&self.email) {
            filter.insert("requester_email", value);
        }
        filter
    }
}

fn match_value(values: &[String]) -> Option<Bson> {
    match values {
        [] => None,
        [single] if single.is_empty() => None,
        [single] => Some(Bson::String(single.clone())),
        many => Some(Bson::Array(many.iter().cloned().map(Bson::String).collect())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_pending() {
        let request = prepare_new(doc! { "foodId": "f1", "status": "accepted" });
        assert_eq!(request.get_str(STATUS).unwrap(), PENDING);
        assert!(request.get_datetime(CREATED_AT).is_ok());
    }

    #[test]
    fn test_status_patch_requires_value() {
        assert!(matches!(status_patch(&doc! {}), Err(AppError::MissingField(_))));
        assert!(matches!(status_patch(&doc! { "status": "" }), Err(AppError::MissingField(_))));
        assert_eq!(
            status_patch(&doc! { "status": "accepted", "foodId": "x" }).unwrap(),
            doc! { "status": "accepted" }
        );
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_query_filter() {
        assert!(RequestQuery::default().to_filter().is_empty());

        let query = RequestQuery::from_pairs(pairs(&[("foodId", ""), ("email", "a@example.com")]));
        assert_eq!(query.to_filter(), doc! { "requester_email": "a@example.com" });

        let query = RequestQuery::from_pairs(pairs(&[("foodId", "f1"), ("email", "a@example.com"), ("page", "2")]));
        assert_eq!(query.to_filter(), doc! { "foodId": "f1", "requester_email": "a@example.com" });
    }

    #[test]
    fn test_repeated_parameter_becomes_array() {
        let query = RequestQuery::from_pairs(pairs(&[("email", "a"), ("email", "b")]));
        assert_eq!(query.to_filter(), doc! { "requester_email": ["a", "b"] });
    }
}
