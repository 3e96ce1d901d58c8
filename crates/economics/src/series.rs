//! Views the chart derives from a generated year: the compared provider
//! subset and the accumulative running totals.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    chains::Provider,
    generator::DailyRecord,
    profit::{ProviderEconomics, round2},
};

/// Providers selected for comparison.
pub type ProviderSet = BTreeSet<Provider>;

/// Selection used when a request names no provider.
pub fn default_provider_set() -> ProviderSet {
    BTreeSet::from([Provider::DEFAULT])
}

/// Drop every provider not in `selected` from each record.
pub fn restrict_providers(mut records: Vec<DailyRecord>, selected: &ProviderSet) -> Vec<DailyRecord> {
    for record in &mut records {
        record.providers.retain(|provider, _| selected.contains(provider));
    }
    records
}

/// Running totals per provider.
///
/// Cost, revenue and net profit are all summed so that
/// `net_profit == returns - operational_cost` still holds on every record.
/// Dates and prices are left untouched.
pub fn accumulate(records: &[DailyRecord]) -> Vec<DailyRecord> {
    let mut totals: BTreeMap<Provider, ProviderEconomics> = BTreeMap::new();
    records
        .iter()
        .map(|record| {
            let providers = record
                .providers
                .iter()
                .map(|(&provider, day)| {
                    let total = totals.entry(provider).or_insert(ProviderEconomics {
                        operational_cost: 0.0,
                        returns: 0.0,
                        net_profit: 0.0,
                    });
                    total.operational_cost = round2(total.operational_cost + day.operational_cost);
                    total.returns = round2(total.returns + day.returns);
                    total.net_profit = round2(total.returns - total.operational_cost);
                    (provider, *total)
                })
                .collect();
            DailyRecord { date: record.date, price: record.price, providers }
        })
        .collect()
}
