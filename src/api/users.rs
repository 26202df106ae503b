use actix_web::{web, HttpResponse};

use crate::database::{Collection, DocumentStore};
use crate::models::{user, ErrorBody, InsertOutcome, MessageBody};
use crate::utils::document::parse_body;
use crate::utils::error::AppError;

/// POST /users - Registra usuário uma única vez por email
///
/// A repeated email is answered with a message instead of a second insert.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body(content = Object, content_type = "application/json", description = "User document; `email` is required"),
    responses(
        (status = 200, description = "User inserted", body = InsertOutcome),
        (status = 200, description = "User already exists", body = MessageBody),
        (status = 400, description = "Email missing", body = ErrorBody),
        (status = 500, description = "Database error", body = ErrorBody)
    )
)]
pub async fn create_user(
    store: web::Data<dyn DocumentStore>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let new_user = parse_body(&body)?;
    let filter = user::email_filter(&new_user)?;

    if store.find_one(Collection::Users, filter).await?.is_some() {
        return Ok(HttpResponse::Ok().json(MessageBody { message: "User already exists".into() }));
    }

    let result = store.insert_one(Collection::Users, new_user).await?;
    log::info!("👤 User created: {}", result.inserted_id);
    Ok(HttpResponse::Ok().json(result))
}
