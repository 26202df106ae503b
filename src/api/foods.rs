use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::Value;

use crate::database::{Collection, DocumentStore};
use crate::models::food::{self, CREATED_AT};
use crate::models::{DeleteOutcome, ErrorBody, InsertOutcome, MessageBody, UpdateOutcome};
use crate::utils::document::{document_to_json, parse_body, parse_object_id};
use crate::utils::error::AppError;

/// GET /foods - Lista todas as doações, mais recentes primeiro
#[utoipa::path(
    get,
    path = "/foods",
    tag = "Foods",
    responses(
        (status = 200, description = "Foods ordered by createdAt, newest first"),
        (status = 500, description = "Database error", body = ErrorBody)
    )
)]
pub async fn list_foods(store: web::Data<dyn DocumentStore>) -> Result<HttpResponse, AppError> {
    let foods = store
        .find(Collection::Foods, doc! {}, Some(doc! { CREATED_AT: -1 }))
        .await?;

    let foods: Vec<Value> = foods.into_iter().map(document_to_json).collect();
    Ok(HttpResponse::Ok().json(foods))
}

/// GET /foods/{id}
#[utoipa::path(
    get,
    path = "/foods/{id}",
    tag = "Foods",
    params(("id" = String, Path, description = "24-char hex ObjectId")),
    responses(
        (status = 200, description = "Food document"),
        (status = 404, description = "No food with this id", body = MessageBody),
        (status = 500, description = "Malformed id or database error", body = ErrorBody)
    )
)]
pub async fn get_food(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;

    match store.find_one(Collection::Foods, doc! { "_id": id }).await? {
        Some(food) => Ok(HttpResponse::Ok().json(document_to_json(food))),
        None => Err(AppError::NotFound("Food not found")),
    }
}

/// POST /foods - Cria doação com `createdAt` do servidor
#[utoipa::path(
    post,
    path = "/foods",
    tag = "Foods",
    request_body(content = Object, content_type = "application/json", description = "Food document; `createdAt` is set by the server"),
    responses(
        (status = 200, description = "Food inserted", body = InsertOutcome),
        (status = 500, description = "Database error", body = ErrorBody)
    )
)]
pub async fn create_food(
    store: web::Data<dyn DocumentStore>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let new_food = food::prepare_new(parse_body(&body)?);
    let result = store.insert_one(Collection::Foods, new_food).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// PATCH /foods/{id} - `$set` dos campos enviados; os demais ficam intactos
///
/// An id that matches nothing still answers 200 with zero counts. `createdAt`
/// cannot be patched.
#[utoipa::path(
    patch,
    path = "/foods/{id}",
    tag = "Foods",
    request_body(content = Object, content_type = "application/json", description = "Fields to overwrite"),
    params(("id" = String, Path, description = "24-char hex ObjectId")),
    responses(
        (status = 200, description = "Update counts", body = UpdateOutcome),
        (status = 400, description = "Body tries to change createdAt", body = ErrorBody),
        (status = 500, description = "Malformed id or database error", body = ErrorBody)
    )
)]
pub async fn update_food(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    let fields = food::patch_fields(parse_body(&body)?)?;

    let result = store
        .update_one(Collection::Foods, doc! { "_id": id }, fields)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// DELETE /foods/{id}
#[utoipa::path(
    delete,
    path = "/foods/{id}",
    tag = "Foods",
    params(("id" = String, Path, description = "24-char hex ObjectId")),
    responses(
        (status = 200, description = "Delete count (0 or 1)", body = DeleteOutcome),
        (status = 500, description = "Malformed id or database error", body = ErrorBody)
    )
)]
pub async fn delete_food(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    let result = store.delete_one(Collection::Foods, doc! { "_id": id }).await?;
    Ok(HttpResponse::Ok().json(result))
}
