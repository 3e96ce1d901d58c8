//! Data types for the validator economics API.
//!
//! These structs define the JSON responses returned by the API server. They
//! are provided in a separate crate so that consumers such as the comparison
//! page can depend on them without pulling in the rest of the server.

#![allow(missing_docs)]

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use economics::{Chain, ChainProfile, DailyRecord, Provider, ProviderEconomics};
use serde::Serialize;
use utoipa::ToSchema;

/// Problem details returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine readable error kind, e.g. `invalid-params`
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(
        kind: impl Into<String>,
        title: impl Into<String>,
        status: StatusCode,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }

    /// 400 response for a malformed query parameter.
    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::new("invalid-params", "Bad Request", StatusCode::BAD_REQUEST, detail)
    }

    /// 404 response for an unknown resource.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new("not-found", "Not Found", StatusCode::NOT_FOUND, detail)
    }

    /// Generic 500 response; details are logged, not returned.
    pub fn internal_error() -> Self {
        Self::new(
            "internal-error",
            "Internal Server Error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred",
        )
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Monthly operational cost of one provider.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCostItem {
    pub provider: Provider,
    pub operational_cost: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainItem {
    pub id: Chain,
    pub name: String,
    pub base_price: f64,
    pub avg_reward: f64,
    pub operational_costs: Vec<ProviderCostItem>,
}

impl ChainItem {
    pub fn new(id: Chain, profile: &ChainProfile) -> Self {
        Self {
            id,
            name: profile.name.clone(),
            base_price: profile.base_price,
            avg_reward: profile.avg_reward,
            operational_costs: profile
                .operational_costs
                .iter()
                .map(|(provider, operational_cost)| ProviderCostItem { provider, operational_cost })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChainsResponse {
    pub chains: Vec<ChainItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProvidersResponse {
    pub providers: Vec<Provider>,
}

/// One day of the chart: date label, price and one entry per compared
/// provider keyed by provider id.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChartPoint {
    pub date: String,
    pub price: f64,
    #[serde(flatten)]
    pub providers: BTreeMap<Provider, ProviderEconomics>,
}

impl From<DailyRecord> for ChartPoint {
    fn from(record: DailyRecord) -> Self {
        Self { date: record.display_date(), price: record.price, providers: record.providers }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EconomicsResponse {
    pub chain: Chain,
    pub name: String,
    /// Providers present in every point
    pub providers: Vec<Provider>,
    /// Whether figures are running totals
    pub accumulative: bool,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfitProjectionItem {
    pub provider: Provider,
    pub operational_cost: f64,
    pub returns: f64,
    pub net_profit: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfitProjectionResponse {
    pub chain: Chain,
    pub price: f64,
    pub providers: Vec<ProfitProjectionItem>,
}
