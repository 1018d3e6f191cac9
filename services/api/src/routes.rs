use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use credit_approval::lending::{lending_router, LendingRepository, LendingService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_lending_routes<R>(service: Arc<LendingService<R>>) -> axum::Router
where
    R: LendingRepository + 'static,
{
    lending_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{default_evaluation_config, InMemoryLendingRepository};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(payload) = healthcheck().await;
        assert_eq!(payload.get("status"), Some(&json!("ok")));
    }

    #[tokio::test]
    async fn lending_routes_are_mounted() {
        let repository = Arc::new(InMemoryLendingRepository::default());
        let service = Arc::new(LendingService::new(repository, default_evaluation_config()));
        let router = with_lending_routes(service);

        let response = router
            .oneshot(
                Request::post("/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "first_name": "Jane",
                            "last_name": "Doe",
                            "age": 28,
                            "monthly_income": 75000.0,
                            "phone_number": 9876543210u64,
                        }))
                        .expect("serializable"),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
