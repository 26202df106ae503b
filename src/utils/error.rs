use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidBody(String),
    #[error("{0}")]
    MissingField(&'static str),
    #[error("{0}")]
    InvalidQuery(String),
    #[error("{0}")]
    NotFound(&'static str),
    /// Identifier that is not a 24-char hex ObjectId. Reported like any other
    /// database failure.
    #[error("{0}")]
    MalformedId(String),
    #[error("{0}")]
    Database(String),
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<mongodb::bson::oid::Error> for AppError {
    fn from(err: mongodb::bson::oid::Error) -> Self {
        AppError::MalformedId(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidBody(_) | AppError::MissingField(_) | AppError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MalformedId(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("❌ {}", self);
        }

        // 404 carries `message`, everything else `error`
        let body = match self {
            AppError::NotFound(msg) => serde_json::json!({ "message": msg }),
            other => serde_json::json!({ "error": other.to_string() }),
        };

        HttpResponse::build(status).json(body)
    }
}
