//! Synthesis of a year of daily prices and per-provider economics.
//!
//! Prices follow a slow seasonal sine over the calendar month, scaled by two
//! small independent jitters (one labelled monthly, one daily), both drawn
//! fresh for every day. Provider figures are then derived from each day's
//! price with [`REWARD_MODEL`].

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::{
    chains::{ChainProfile, Provider},
    error::EconomicsError,
    noise::PriceNoise,
    profit::{ProviderEconomics, REWARD_MODEL, RewardModel, round2},
};

/// Number of records produced per generation.
pub const DAYS_PER_YEAR: usize = 365;

/// Day zero of every simulated year.
pub const START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("invalid start date"),
};

/// Amplitude of the seasonal oscillation; factors stay within `[0.8, 1.2]`.
pub const SEASONAL_AMPLITUDE: f64 = 0.2;

/// Display format of record dates, e.g. `01 January, 2024`.
pub const DATE_FORMAT: &str = "%d %B, %Y";

/// One simulated day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    /// Calendar date
    pub date: NaiveDate,
    /// Synthetic token price in USD, two decimals
    pub price: f64,
    /// Figures for every provider in the catalogue
    pub providers: BTreeMap<Provider, ProviderEconomics>,
}

impl DailyRecord {
    /// Long-form date label used by the chart.
    pub fn display_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Generate [`DAYS_PER_YEAR`] date-ascending records for `profile`.
///
/// The profile is validated first; a negative or non-finite base price would
/// otherwise propagate silently into every record.
pub fn generate_yearly_data(
    profile: &ChainProfile,
    noise: &mut impl PriceNoise,
) -> Result<Vec<DailyRecord>, EconomicsError> {
    generate_with_model(profile, REWARD_MODEL, noise)
}

/// Same as [`generate_yearly_data`] with an explicit reward model.
pub fn generate_with_model(
    profile: &ChainProfile,
    model: RewardModel,
    noise: &mut impl PriceNoise,
) -> Result<Vec<DailyRecord>, EconomicsError> {
    profile.validate()?;

    let shift = noise.seasonal_shift();
    debug!(chain = %profile.name, shift, "Generating yearly data");

    let records = (0..DAYS_PER_YEAR as u64)
        .map(|offset| {
            let date = START_DATE + Days::new(offset);
            let monthly = seasonal_factor(date.month0(), shift) * (1.0 + noise.jitter());
            let daily = 1.0 + noise.jitter();
            let price = round2(profile.base_price * monthly * daily);

            let providers = profile
                .operational_costs
                .iter()
                .map(|(provider, cost)| {
                    (provider, ProviderEconomics::compute(model, price, profile.avg_reward, cost))
                })
                .collect();

            DailyRecord { date, price, providers }
        })
        .collect();

    Ok(records)
}

/// `1 + sin(month / 2 - shift) * 0.2`
fn seasonal_factor(month0: u32, shift: f64) -> f64 {
    1.0 + (f64::from(month0) / 2.0 - shift).sin() * SEASONAL_AMPLITUDE
}
