//! Validation functions for API query parameters

use api_types::ErrorResponse;
use economics::{Chain, Provider, ProviderSet, default_provider_set};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::helpers::invalid_param;

/// Query parameters of the yearly economics endpoint.
///
/// `provider` may be repeated, which plain `Query` extraction cannot express,
/// so the struct is filled from the raw pairs by [`EconomicsQuery::parse`].
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EconomicsQuery {
    /// Chain id, camelCase or kebab-case. Defaults to `ethereum`
    pub chain: Option<String>,
    /// Provider compared against `openmesh`, which is always included; repeat
    /// to compare several
    pub provider: Option<Vec<String>>,
    /// Return running totals (presence alone enables it)
    #[param(value_type = Option<bool>)]
    pub accumulative: Option<String>,
    /// Seed making the synthetic prices reproducible
    #[param(value_type = Option<u64>)]
    pub seed: Option<String>,
}

impl EconomicsQuery {
    /// Parse a raw query string. Unknown keys are ignored.
    pub fn parse(raw: Option<&str>) -> Result<Self, ErrorResponse> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw.unwrap_or_default())
            .map_err(|e| ErrorResponse::invalid_params(format!("Invalid query string: {e}")))?;
        Ok(Self::from_pairs(pairs))
    }

    /// Collect decoded `(key, value)` pairs. A repeated scalar keeps its last value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "chain" => query.chain = Some(value),
                "provider" => query.provider.get_or_insert_with(Vec::new).push(value),
                "accumulative" => query.accumulative = Some(value),
                "seed" => query.seed = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// Validated form of [`EconomicsQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EconomicsParams {
    /// Chain to simulate
    pub chain: Chain,
    /// Providers kept in the output, always including `openmesh`
    pub providers: ProviderSet,
    /// Whether figures are running totals
    pub accumulative: bool,
    /// Seed for the price noise, if any
    pub seed: Option<u64>,
}

/// Validate economics query parameters, applying the page defaults.
///
/// The selected providers are added to [`default_provider_set`].
pub fn validate_economics_query(query: &EconomicsQuery) -> Result<EconomicsParams, ErrorResponse> {
    let chain = resolve_chain(query.chain.as_deref())?;

    let mut providers = default_provider_set();
    for id in query.provider.iter().flatten().map(|id| id.trim()).filter(|id| !id.is_empty()) {
        providers.insert(Provider::parse(id).map_err(invalid_param)?);
    }

    let accumulative = query
        .accumulative
        .as_deref()
        .map(|value| parse_flag("accumulative", value))
        .transpose()?
        .unwrap_or(false);
    let seed = query.seed.as_deref().map(|value| parse_u64("seed", value)).transpose()?;

    Ok(EconomicsParams { chain, providers, accumulative, seed })
}

/// Query parameters of the profit projection endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectionQuery {
    /// Chain id, camelCase or kebab-case. Defaults to `ethereum`
    pub chain: Option<String>,
    /// Token price in USD. Defaults to the chain's base price
    #[param(value_type = Option<f64>)]
    pub price: Option<String>,
}

/// Validated form of [`ProjectionQuery`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Chain whose costs and reward rate apply
    pub chain: Chain,
    /// Explicit price, if given
    pub price: Option<f64>,
}

/// Validate profit projection parameters.
pub fn validate_projection_query(
    query: &ProjectionQuery,
) -> Result<ProjectionParams, ErrorResponse> {
    let chain = resolve_chain(query.chain.as_deref())?;
    let price = query.price.as_deref().map(parse_price).transpose()?;
    Ok(ProjectionParams { chain, price })
}

/// Resolve an optional chain id; missing or blank selects [`Chain::DEFAULT`].
pub fn resolve_chain(id: Option<&str>) -> Result<Chain, ErrorResponse> {
    match id.map(str::trim) {
        None | Some("") => Ok(Chain::DEFAULT),
        Some(id) => Chain::parse(id).map_err(invalid_param),
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, ErrorResponse> {
    match raw.trim().trim_matches('"') {
        "" | "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ErrorResponse::invalid_params(format!(
            "{name} must be true or false, got '{other}'"
        ))),
    }
}

fn parse_u64(name: &str, raw: &str) -> Result<u64, ErrorResponse> {
    raw.trim()
        .trim_matches('"')
        .parse()
        .map_err(|e| ErrorResponse::invalid_params(format!("invalid {name} '{raw}': {e}")))
}

fn parse_price(raw: &str) -> Result<f64, ErrorResponse> {
    let price: f64 = raw
        .trim()
        .trim_matches('"')
        .parse()
        .map_err(|e| ErrorResponse::invalid_params(format!("invalid price '{raw}': {e}")))?;
    if !price.is_finite() || price < 0.0 {
        return Err(ErrorResponse::invalid_params(format!(
            "price must be finite and non-negative, got '{raw}'"
        )));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn economics(raw: &str) -> Result<EconomicsParams, ErrorResponse> {
        validate_economics_query(&EconomicsQuery::parse(Some(raw))?)
    }

    #[test]
    fn empty_query_uses_defaults() {
        let params = validate_economics_query(&EconomicsQuery::parse(None).unwrap()).unwrap();
        assert_eq!(params.chain, Chain::Ethereum);
        assert_eq!(params.providers, ProviderSet::from([Provider::Openmesh]));
        assert!(!params.accumulative);
        assert_eq!(params.seed, None);
    }

    #[test]
    fn repeated_providers_form_a_set() {
        let params = economics("chain=cosmos&provider=aws&provider=gcp&provider=aws").unwrap();
        assert_eq!(params.chain, Chain::Cosmos);
        assert_eq!(
            params.providers,
            ProviderSet::from([Provider::Openmesh, Provider::Aws, Provider::Gcp])
        );
    }

    #[test]
    fn kebab_case_ids_are_accepted() {
        let params = economics("chain=near-protocol&provider=bare-metal").unwrap();
        assert_eq!(params.chain, Chain::NearProtocol);
        assert_eq!(params.providers, ProviderSet::from([Provider::Openmesh, Provider::BareMetal]));
    }

    #[test]
    fn openmesh_is_always_compared() {
        let params = economics("provider=aws").unwrap();
        assert_eq!(params.providers, ProviderSet::from([Provider::Openmesh, Provider::Aws]));

        let params = economics("provider=openmesh").unwrap();
        assert_eq!(params.providers, default_provider_set());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let params = economics("chain=&provider=").unwrap();
        assert_eq!(params.chain, Chain::Ethereum);
        assert_eq!(params.providers, default_provider_set());
    }

    #[test]
    fn unknown_chain_is_rejected() {
        let err = economics("chain=solana").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind, "invalid-params");
        assert!(err.detail.contains("solana"));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = economics("provider=openmesh&provider=digitalocean").unwrap_err();
        assert!(err.detail.contains("digitalocean"));
    }

    #[test]
    fn accumulative_flag_forms() {
        assert!(economics("accumulative").unwrap().accumulative);
        assert!(economics("accumulative=true").unwrap().accumulative);
        assert!(economics("accumulative=1").unwrap().accumulative);
        assert!(!economics("accumulative=false").unwrap().accumulative);
        assert!(economics("accumulative=maybe").is_err());
    }

    #[test]
    fn seed_accepts_quoted_numbers() {
        assert_eq!(economics("seed=42").unwrap().seed, Some(42));
        assert_eq!(economics("seed=%2242%22").unwrap().seed, Some(42));
        assert!(economics("seed=-1").is_err());
        assert!(economics("seed=abc").is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(economics("foo=bar").unwrap().chain, Chain::Ethereum);
    }

    #[test]
    fn projection_price_validation() {
        let query = ProjectionQuery { chain: Some("celo".to_owned()), price: Some("0.5".to_owned()) };
        let params = validate_projection_query(&query).unwrap();
        assert_eq!(params.chain, Chain::Celo);
        assert_eq!(params.price, Some(0.5));

        let query = ProjectionQuery { chain: None, price: None };
        assert_eq!(validate_projection_query(&query).unwrap().price, None);

        for bad in ["-1", "NaN", "inf", "abc"] {
            let query = ProjectionQuery { chain: None, price: Some(bad.to_owned()) };
            assert!(validate_projection_query(&query).is_err(), "{bad}");
        }
    }
}
