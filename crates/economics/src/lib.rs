//! Core economics for the validator hosting comparison.
//!
//! Everything here is pure: the chain catalogue is an immutable table, and
//! the only source of variation in [`generate_yearly_data`] is the
//! [`PriceNoise`] the caller passes in.

/// Chain and provider catalogue
pub mod chains;
/// Error type shared by the catalogue and the generator
pub mod error;
/// Yearly price and profit synthesis
pub mod generator;
/// Random sources for price synthesis
pub mod noise;
/// Per-provider cost, revenue and profit
pub mod profit;
/// Views derived from a generated series
pub mod series;

pub use chains::{Chain, ChainProfile, ChainTable, OperationalCosts, Provider};
pub use error::EconomicsError;
pub use generator::{DAYS_PER_YEAR, DailyRecord, START_DATE, generate_with_model, generate_yearly_data};
pub use noise::{FixedNoise, PriceNoise, RngNoise};
pub use profit::{ProviderEconomics, REWARD_MODEL, RewardModel, project_net_profit, round2};
pub use series::{ProviderSet, accumulate, default_provider_set, restrict_providers};
