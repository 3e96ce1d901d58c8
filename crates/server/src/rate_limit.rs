#![allow(unreachable_pub, clippy::redundant_pub_crate)]
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use api_types::ErrorResponse;
use axum::{
    http::{HeaderValue, Request, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use runtime::rate_limiter::{Permit, RateLimiter};

#[derive(Clone, Debug)]
pub(super) struct RateLimitLayer {
    limiter: RateLimiter,
}

impl RateLimitLayer {
    pub fn new(max: u64, period: Duration) -> Self {
        Self { limiter: RateLimiter::new(max, period) }
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimit<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimit { inner, limiter: self.limiter.clone() }
    }
}

#[derive(Clone, Debug)]
pub(super) struct RateLimit<S> {
    inner: S,
    limiter: RateLimiter,
}

/// Whole seconds, rounded up, never below one.
fn retry_after_secs(delay: Duration) -> u64 {
    (delay.as_secs() + u64::from(delay.subsec_nanos() > 0)).max(1)
}

impl<S, ReqBody> Service<Request<ReqBody>> for RateLimit<S>
where
    S: Service<Request<ReqBody>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        match self.limiter.acquire() {
            Permit::Granted => Box::pin(self.inner.call(req)),
            Permit::Denied { retry_after } => {
                let secs = retry_after_secs(retry_after);
                tracing::warn!(retry_after = secs, "Rate limit exceeded");
                let mut resp = ErrorResponse::new(
                    "rate-limit",
                    "Too Many Requests",
                    StatusCode::TOO_MANY_REQUESTS,
                    format!("Rate limit exceeded. Retry after {secs} seconds"),
                )
                .into_response();
                resp.headers_mut().insert(RETRY_AFTER, HeaderValue::from(secs));
                Box::pin(std::future::ready(Ok(resp)))
            }
        }
    }
}
