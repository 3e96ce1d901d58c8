use api_types::HealthResponse;
use axum::Json;

/// Health check handler returning `{ "status": "ok" }`.
pub async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_owned() })
}

#[cfg(test)]
mod tests {
    use super::handler;
    use axum::{
        Router,
        body::{self, Body},
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn reports_ok() {
        let app = Router::new().route("/health", get(handler));
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "ok" }));
    }
}
