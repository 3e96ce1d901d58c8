//! Helper utilities to launch the validator economics API server.

use std::{net::SocketAddr, sync::Arc};

use api::{self, ApiState};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use eyre::Result;
use runtime::{health, shutdown::ShutdownSignal};
mod rate_limit;
use rate_limit::RateLimitLayer;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};

/// Version prefix for all API routes.
pub const API_VERSION: &str = "v1";

/// Build the API router with CORS and tracing layers.
pub fn router(state: ApiState, allowed_origins: Vec<String>) -> Router {
    let allowed = Arc::new(allowed_origins);
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate({
            let allowed = Arc::clone(&allowed);
            move |origin: &HeaderValue, _| match origin.to_str() {
                Ok(origin) => {
                    allowed.iter().any(|o| o == origin)
                        || origin.ends_with(".vercel.app")
                        || origin.starts_with("http://localhost:")
                        || origin.starts_with("http://127.0.0.1:")
                }
                Err(_) => false,
            }
        }))
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .expose_headers(Any);
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let max_requests = state.max_requests();
    let rate_period = state.rate_period();
    let api_service = tower::ServiceBuilder::new()
        .layer(RateLimitLayer::new(max_requests, rate_period))
        .service(api::router(state));

    Router::new()
        .route("/health", get(health::handler))
        .nest_service(&format!("/{API_VERSION}"), api_service)
        .layer(cors)
        .layer(trace)
}

/// Serve `app` on an already bound listener until SIGINT or SIGTERM.
pub async fn serve(listener: tokio::net::TcpListener, app: Router) -> Result<()> {
    info!(addr = %listener.local_addr()?, "Starting API server");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(ShutdownSignal::new()?)
        .await?;
    info!("API server stopped");
    Ok(())
}

/// Run the API server on the given address.
pub async fn run(addr: SocketAddr, state: ApiState, allowed_origins: Vec<String>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(listener, router(state, allowed_origins)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{ApiState, DEFAULT_RATE_PERIOD};
    use axum::{
        body::{self, Body},
        http::{Request, StatusCode},
    };
    use economics::ChainTable;
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn default_origins() -> Vec<String> {
        config::DEFAULT_ALLOWED_ORIGINS.split(',').map(|s| s.to_owned()).collect()
    }

    async fn send_request(
        app: Router,
        uri: &str,
        origin: &str,
    ) -> (StatusCode, Value, Option<String>) {
        let response = app
            .oneshot(Request::builder().uri(uri).header("Origin", origin).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let cors = response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        (status, body, cors)
    }

    async fn providers_from(app: Router, origin: &str) -> (StatusCode, Option<String>) {
        let (status, _, cors) = send_request(app, &format!("/{API_VERSION}/providers"), origin).await;
        (status, cors)
    }

    #[tokio::test]
    async fn serves_health_outside_version_prefix() {
        let app = router(ApiState::default(), default_origins());
        let (status, body, _) = send_request(app, "/health", "http://localhost:3000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn nests_api_under_version_prefix() {
        let app = router(ApiState::default(), default_origins());
        let (status, body, _) =
            send_request(app, &format!("/{API_VERSION}/chains/cosmos"), "http://localhost:3000")
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Cosmos");
    }

    #[tokio::test]
    async fn allows_default_origin() {
        let app = router(ApiState::default(), default_origins());
        let (status, cors) = providers_from(app, "http://localhost:3000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cors.as_deref(), Some("http://localhost:3000"));
    }

    #[tokio::test]
    async fn allows_extra_origin() {
        let mut origins = default_origins();
        origins.push("https://example.com".to_owned());
        let app = router(ApiState::default(), origins);
        let (status, cors) = providers_from(app, "https://example.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cors.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn allows_localhost_origin() {
        let app = router(ApiState::default(), default_origins());
        let (_, cors) = providers_from(app, "http://localhost:5173").await;
        assert_eq!(cors.as_deref(), Some("http://localhost:5173"));
    }

    #[tokio::test]
    async fn allows_127_0_0_1_origin() {
        let app = router(ApiState::default(), default_origins());
        let (_, cors) = providers_from(app, "http://127.0.0.1:3001").await;
        assert_eq!(cors.as_deref(), Some("http://127.0.0.1:3001"));
    }

    #[tokio::test]
    async fn allows_vercel_preview_origin() {
        let app = router(ApiState::default(), default_origins());
        let (_, cors) = providers_from(app, "https://economics-git-main.vercel.app").await;
        assert_eq!(cors.as_deref(), Some("https://economics-git-main.vercel.app"));
    }

    #[tokio::test]
    async fn denies_other_origin() {
        let app = router(ApiState::default(), default_origins());
        let (status, cors) = providers_from(app, "https://notallowed.com").await;
        assert_eq!(status, StatusCode::OK);
        assert!(cors.is_none());
    }

    #[tokio::test]
    async fn rate_limits_versioned_routes_only() {
        let state = ApiState::new(ChainTable::builtin(), 1, DEFAULT_RATE_PERIOD * 60);
        let app = router(state, default_origins());
        let uri = format!("/{API_VERSION}/providers");

        let (first, _, _) = send_request(app.clone(), &uri, "http://localhost:3000").await;
        assert_eq!(first, StatusCode::OK);
        let (second, body, _) = send_request(app.clone(), &uri, "http://localhost:3000").await;
        assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["type"], "rate-limit");

        let (health, _, _) = send_request(app, "/health", "http://localhost:3000").await;
        assert_eq!(health, StatusCode::OK);
    }
}
