//! Cost, revenue and net profit of running a validator with one provider.

use serde::Serialize;
use utoipa::ToSchema;

/// How a chain's reward rate turns into revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardModel {
    /// `returns = round2(price * avg_reward)`: the reward is a token amount
    /// valued at the day's price.
    PriceMultiplied,
    /// `returns = round2(avg_reward)`: the reward is already in USD and
    /// ignores the price.
    Flat,
}

/// The reward model used for every published figure.
pub const REWARD_MODEL: RewardModel = RewardModel::PriceMultiplied;

impl RewardModel {
    /// Revenue for one cost period at `price`.
    pub fn returns(self, price: f64, avg_reward: f64) -> f64 {
        match self {
            Self::PriceMultiplied => round2(price * avg_reward),
            Self::Flat => round2(avg_reward),
        }
    }
}

/// Round to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Economics of one provider on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEconomics {
    /// Monthly hosting cost in USD
    pub operational_cost: f64,
    /// Revenue in USD
    pub returns: f64,
    /// `returns - operational_cost`
    pub net_profit: f64,
}

impl ProviderEconomics {
    /// Compute the triple for `price` under `model`.
    pub fn compute(model: RewardModel, price: f64, avg_reward: f64, operational_cost: f64) -> Self {
        let returns = model.returns(price, avg_reward);
        Self { operational_cost, returns, net_profit: round2(returns - operational_cost) }
    }
}

/// Net profit of a provider at a known price under [`REWARD_MODEL`].
///
/// Equivalent to `round2(price * avg_reward - operational_cost)` up to the
/// intermediate rounding of the revenue.
pub fn project_net_profit(price: f64, avg_reward: f64, operational_cost: f64) -> f64 {
    ProviderEconomics::compute(REWARD_MODEL, price, avg_reward, operational_cost).net_profit
}
