use actix_web::{web, HttpRequest, HttpResponse};
use mongodb::bson::doc;
use serde_json::Value;

use crate::database::{Collection, DocumentStore};
use crate::models::request::{self, RequestQuery};
use crate::models::{ErrorBody, InsertOutcome, UpdateOutcome};
use crate::utils::document::{document_to_json, parse_body, parse_object_id};
use crate::utils::error::AppError;

/// POST /requests - Cria pedido sempre com status "pending"
#[utoipa::path(
    post,
    path = "/requests",
    tag = "Requests",
    request_body(content = Object, content_type = "application/json", description = "Request document; `status` is forced to pending"),
    responses(
        (status = 200, description = "Request inserted with status pending", body = InsertOutcome),
        (status = 500, description = "Database error", body = ErrorBody)
    )
)]
pub async fn create_request(
    store: web::Data<dyn DocumentStore>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let new_request = request::prepare_new(parse_body(&body)?);
    let result = store.insert_one(Collection::Requests, new_request).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /requests?foodId=&email=
#[utoipa::path(
    get,
    path = "/requests",
    tag = "Requests",
    params(
        ("foodId" = Option<String>, Query, description = "Exact match on the request's foodId"),
        ("email" = Option<String>, Query, description = "Exact match on requester_email")
    ),
    responses(
        (status = 200, description = "Matching requests, unordered"),
        (status = 500, description = "Database error", body = ErrorBody)
    )
)]
pub async fn list_requests(
    store: web::Data<dyn DocumentStore>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .map_err(|e| AppError::InvalidQuery(e.to_string()))?
        .into_inner();
    let query = RequestQuery::from_pairs(pairs);

    let requests = store
        .find(Collection::Requests, query.to_filter(), None)
        .await?;

    let requests: Vec<Value> = requests.into_iter().map(document_to_json).collect();
    Ok(HttpResponse::Ok().json(requests))
}

/// PATCH /requests/{id} - Altera somente o status
///
/// Status is validated before the id, so a missing status wins over a
/// malformed id.
#[utoipa::path(
    patch,
    path = "/requests/{id}",
    tag = "Requests",
    request_body(content = Object, content_type = "application/json", description = "`{ \"status\": \"<non-empty>\" }`"),
    params(("id" = String, Path, description = "24-char hex ObjectId")),
    responses(
        (status = 200, description = "Update counts", body = UpdateOutcome),
        (status = 400, description = "Status missing or empty", body = ErrorBody),
        (status = 500, description = "Malformed id or database error", body = ErrorBody)
    )
)]
pub async fn update_request_status(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let patch = request::status_patch(&parse_body(&body)?)?;
    let id = parse_object_id(&path)?;

    let result = store
        .update_one(Collection::Requests, doc! { "_id": id }, patch)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
