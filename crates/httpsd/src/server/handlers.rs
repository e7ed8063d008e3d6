//! Axum request handlers for all routes.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use super::protocol::{ErrorResponse, HealthResponse};

/// `GET /` — index page.
pub async fn index() -> &'static str {
    "index\n"
}

/// `GET /hello` — greeting.
pub async fn hello() -> &'static str {
    "hello\n"
}

/// `GET /health` — liveness check. Always `200 OK`: provisioning completes
/// before the listener binds, so a reachable server is a healthy one.
pub async fn health() -> impl IntoResponse {
    let body = HealthResponse {
        status: "ok".into(),
    };
    (StatusCode::OK, Json(body))
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn test_router() -> Router {
        Router::new()
            .route("/", get(index))
            .route("/health", get(health))
            .route("/hello", get(hello))
            .fallback(not_found)
    }

    async fn body_string(uri: &str) -> (StatusCode, String) {
        let app = test_router();
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn index_returns_text() {
        let (status, body) = body_string("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "index\n");
    }

    #[tokio::test]
    async fn hello_returns_text() {
        let (status, body) = body_string("/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hello\n");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = body_string("/health").await;
        assert_eq!(status, StatusCode::OK);
        let decoded: HealthResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded.status, "ok");
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let (status, body) = body_string("/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let decoded: ErrorResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded.code, "not_found");
    }
}
