//! Thin HTTP API over the validator economics model

pub mod helpers;
pub mod routes;
pub mod state;
pub mod validation;

use api_types::*;
use economics::{Chain, Provider, ProviderEconomics};
use utoipa::OpenApi;

pub use routes::router;
pub use state::{ApiState, DEFAULT_MAX_REQUESTS, DEFAULT_RATE_PERIOD};

use routes::{catalogue::*, series::*};

/// `OpenAPI` documentation structure
#[derive(Debug, OpenApi)]
#[openapi(
    paths(chains, chain, providers, economics, profit_projection),
    components(
        schemas(
            Chain,
            Provider,
            ProviderEconomics,
            ProviderCostItem,
            ChainItem,
            ChainsResponse,
            ProvidersResponse,
            ChartPoint,
            EconomicsResponse,
            ProfitProjectionItem,
            ProfitProjectionResponse,
            HealthResponse,
            ErrorResponse
        )
    ),
    info(
        title = "Validator Economics API",
        version = "v1",
        description = "Synthetic yearly prices and validator cost, revenue and profit per hosting provider",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/v1", description = "API v1")
    ),
    tags(
        (name = "economics", description = "Chain catalogue, yearly economics and profit projections")
    )
)]
pub struct ApiDoc;
