use actix_web::HttpResponse;
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

fn render(requests: u64, errors: u64) -> String {
    format!(
        "# HELP http_requests_total Total number of HTTP requests\n\
         # TYPE http_requests_total counter\n\
         http_requests_total {}\n\
         \n\
         # HELP http_errors_total Total number of HTTP errors\n\
         # TYPE http_errors_total counter\n\
         http_errors_total {}\n",
        requests, errors
    )
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus counters", content_type = "text/plain")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    let requests = REQUEST_COUNT.load(Ordering::Relaxed);
    let errors = ERROR_COUNT.load(Ordering::Relaxed);

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(render(requests, errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::RequestMetrics;

    #[test]
    fn test_render_format() {
        let text = render(7, 2);
        assert!(text.contains("http_requests_total 7\n"));
        assert!(text.contains("http_errors_total 2\n"));
    }

    #[actix_web::test]
    async fn test_middleware_counts_requests_and_errors() {
        use actix_web::{test, web, App};

        let app = test::init_service(
            App::new()
                .wrap(RequestMetrics)
                .route("/metrics", web::get().to(get_metrics)),
        )
        .await;

        let requests_before = REQUEST_COUNT.load(Ordering::Relaxed);
        let errors_before = ERROR_COUNT.load(Ordering::Relaxed);

        let req = test::TestRequest::get().uri("/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("# HELP http_requests_total"));

        // counters are process-wide and other tests run in parallel
        assert!(REQUEST_COUNT.load(Ordering::Relaxed) >= requests_before + 2);
        assert!(ERROR_COUNT.load(Ordering::Relaxed) >= errors_before + 1);
    }
}
