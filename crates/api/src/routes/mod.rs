//! API route definitions

pub mod catalogue;
pub mod series;

use crate::{ApiDoc, state::ApiState};
use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use catalogue::*;
use series::*;

/// Build the router with all API endpoints.
pub fn router(state: ApiState) -> Router {
    let api_routes = Router::new()
        .route("/chains", get(chains))
        .route("/chains/:chain", get(chain))
        .route("/providers", get(providers))
        .route("/economics", get(economics))
        .route("/profit-projection", get(profit_projection));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(api_routes)
        .with_state(state)
}
