//! Yearly economics and profit projection endpoints

use crate::{
    helpers::internal_error,
    state::ApiState,
    validation::{
        EconomicsQuery, ProjectionQuery, validate_economics_query, validate_projection_query,
    },
};
use api_types::{
    ChartPoint, EconomicsResponse, ErrorResponse, ProfitProjectionItem, ProfitProjectionResponse,
};
use axum::{
    Json,
    extract::{Query, RawQuery, State},
};
use economics::{
    ProviderEconomics, REWARD_MODEL, RngNoise, accumulate, generate_yearly_data,
    restrict_providers,
};

#[utoipa::path(
    get,
    path = "/economics",
    params(
        EconomicsQuery
    ),
    responses(
        (status = 200, description = "A year of synthetic prices with provider economics", body = EconomicsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Generation error", body = ErrorResponse)
    ),
    tag = "economics"
)]
/// Generate a year of daily prices and cost, revenue and net profit for the
/// selected providers.
///
/// Points are ordered by date ascending. Without a `seed` every call returns
/// a different price trajectory.
pub async fn economics(
    RawQuery(raw): RawQuery,
    State(state): State<ApiState>,
) -> Result<Json<EconomicsResponse>, ErrorResponse> {
    let params = validate_economics_query(&EconomicsQuery::parse(raw.as_deref())?)?;
    let profile = state.chains().get(params.chain);

    let mut noise = match params.seed {
        Some(seed) => RngNoise::seeded(seed),
        None => RngNoise::from_entropy(),
    };
    let records = generate_yearly_data(profile, &mut noise)
        .map_err(|e| internal_error("generate yearly data", e))?;
    let records = restrict_providers(records, &params.providers);
    let records = if params.accumulative { accumulate(&records) } else { records };

    tracing::info!(
        chain = %params.chain,
        providers = params.providers.len(),
        accumulative = params.accumulative,
        seeded = params.seed.is_some(),
        "Returning yearly economics"
    );
    Ok(Json(EconomicsResponse {
        chain: params.chain,
        name: profile.name.clone(),
        providers: params.providers.into_iter().collect(),
        accumulative: params.accumulative,
        points: records.into_iter().map(ChartPoint::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/profit-projection",
    params(
        ProjectionQuery
    ),
    responses(
        (status = 200, description = "Provider economics at a given price", body = ProfitProjectionResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "economics"
)]
/// Project cost, revenue and net profit of every provider at a known token
/// price.
///
/// Results are ordered by net profit, most profitable first.
pub async fn profit_projection(
    Query(query): Query<ProjectionQuery>,
    State(state): State<ApiState>,
) -> Result<Json<ProfitProjectionResponse>, ErrorResponse> {
    let params = validate_projection_query(&query)?;
    let profile = state.chains().get(params.chain);
    let price = params.price.unwrap_or(profile.base_price);

    let mut providers: Vec<ProfitProjectionItem> = profile
        .operational_costs
        .iter()
        .map(|(provider, cost)| {
            let e = ProviderEconomics::compute(REWARD_MODEL, price, profile.avg_reward, cost);
            ProfitProjectionItem {
                provider,
                operational_cost: e.operational_cost,
                returns: e.returns,
                net_profit: e.net_profit,
            }
        })
        .collect();
    providers.sort_by(|a, b| b.net_profit.total_cmp(&a.net_profit));

    tracing::info!(chain = %params.chain, price, "Returning profit projection");
    Ok(Json(ProfitProjectionResponse { chain: params.chain, price, providers }))
}
