pub mod foods;
pub mod health;
pub mod metrics;
pub mod requests;
pub mod swagger;
pub mod users;

use actix_web::web;

/// Mounts every route of the service. Shared by `main` and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check
    cfg.route("/", web::get().to(health::liveness))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Users
        .route("/users", web::post().to(users::create_user))
        // Foods
        .service(
            web::scope("/foods")
                .route("", web::get().to(foods::list_foods))
                .route("", web::post().to(foods::create_food))
                .route("/{id}", web::get().to(foods::get_food))
                .route("/{id}", web::patch().to(foods::update_food))
                .route("/{id}", web::delete().to(foods::delete_food)),
        )
        // Requests
        .service(
            web::scope("/requests")
                .route("", web::get().to(requests::list_requests))
                .route("", web::post().to(requests::create_request))
                .route("/{id}", web::patch().to(requests::update_request_status)),
        );
}
