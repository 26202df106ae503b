use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PlateShare API",
        version = "1.0.0",
        description = "Food sharing backend. Users register once per email, donors publish foods and other users send requests for them.\n\nDocuments are schema-free: only `email`, `status` and `createdAt` are inspected by the server."
    ),
    paths(
        // Health & Metrics
        crate::api::health::liveness,
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::create_user,

        // Foods
        crate::api::foods::list_foods,
        crate::api::foods::get_food,
        crate::api::foods::create_food,
        crate::api::foods::update_food,
        crate::api::foods::delete_food,

        // Requests
        crate::api::requests::create_request,
        crate::api::requests::list_requests,
        crate::api::requests::update_request_status,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::InsertOutcome,
            crate::models::UpdateOutcome,
            crate::models::DeleteOutcome,
            crate::models::MessageBody,
            crate::models::ErrorBody,
        )
    ),
    tags(
        (name = "Health", description = "Liveness, health and metrics endpoints."),
        (name = "Users", description = "User registration, unique per email."),
        (name = "Foods", description = "Shared food listings."),
        (name = "Requests", description = "Requests for a food listing and their status."),
    )
)]
pub struct ApiDoc;
