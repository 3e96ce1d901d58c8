//! Read-only views of the chain and provider catalogue

use crate::state::ApiState;
use api_types::{ChainItem, ChainsResponse, ErrorResponse, ProvidersResponse};
use axum::{
    Json,
    extract::{Path, State},
};
use economics::{Chain, Provider};
use strum::IntoEnumIterator;

#[utoipa::path(
    get,
    path = "/chains",
    responses(
        (status = 200, description = "All supported chains", body = ChainsResponse)
    ),
    tag = "economics"
)]
/// List every chain with its base price, reward rate and provider costs
pub async fn chains(State(state): State<ApiState>) -> Json<ChainsResponse> {
    let chains =
        state.chains().iter().map(|(chain, profile)| ChainItem::new(chain, profile)).collect();
    Json(ChainsResponse { chains })
}

#[utoipa::path(
    get,
    path = "/chains/{chain}",
    params(
        ("chain" = String, Path, description = "Chain id, camelCase or kebab-case")
    ),
    responses(
        (status = 200, description = "Chain profile", body = ChainItem),
        (status = 404, description = "Unknown chain", body = ErrorResponse)
    ),
    tag = "economics"
)]
/// Get the profile of a single chain
pub async fn chain(
    Path(id): Path<String>,
    State(state): State<ApiState>,
) -> Result<Json<ChainItem>, ErrorResponse> {
    let chain = Chain::parse(&id).map_err(|e| ErrorResponse::not_found(e.to_string()))?;
    Ok(Json(ChainItem::new(chain, state.chains().get(chain))))
}

#[utoipa::path(
    get,
    path = "/providers",
    responses(
        (status = 200, description = "All hosting providers", body = ProvidersResponse)
    ),
    tag = "economics"
)]
/// List every hosting provider id
pub async fn providers() -> Json<ProvidersResponse> {
    Json(ProvidersResponse { providers: Provider::iter().collect() })
}
