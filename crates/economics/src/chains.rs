//! Closed sets of chains and hosting providers, and the immutable table of
//! per-chain profiles looked up by them.

use std::{collections::BTreeMap, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use utoipa::ToSchema;

use crate::error::EconomicsError;

/// A proof-of-stake network whose validator economics are simulated.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Chain {
    /// Ethereum beacon chain
    Ethereum,
    /// Cosmos Hub
    Cosmos,
    /// Avalanche primary network
    Avalanche,
    /// Algorand
    Algorand,
    /// NEAR Protocol
    NearProtocol,
    /// Fantom Opera
    Fantom,
    /// Kusama relay chain
    Kusama,
    /// Celo
    Celo,
    /// Polygon PoS
    Polygon,
    /// Zilliqa
    Zilliqa,
}

impl Chain {
    /// Chain shown when a request does not name one.
    pub const DEFAULT: Self = Self::Ethereum;

    /// Parse a chain identifier.
    ///
    /// Accepts both the camelCase id (`nearProtocol`) and the kebab-case form
    /// used in page URLs (`near-protocol`).
    pub fn parse(id: &str) -> Result<Self, EconomicsError> {
        Self::from_str(&kebab_to_camel(id)).map_err(|_| EconomicsError::UnknownChain(id.to_owned()))
    }

    /// Stable identifier, as used in query strings and JSON.
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Human readable name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::Cosmos => "Cosmos",
            Self::Avalanche => "Avalanche",
            Self::Algorand => "Algorand",
            Self::NearProtocol => "Near Protocol",
            Self::Fantom => "Fantom",
            Self::Kusama => "Kusama",
            Self::Celo => "Celo",
            Self::Polygon => "Polygon",
            Self::Zilliqa => "Zilliqa",
        }
    }
}

/// A validator hosting option.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Provider {
    /// Openmesh decentralized cloud
    Openmesh,
    /// Amazon Web Services
    Aws,
    /// Google Cloud Platform
    Gcp,
    /// Microsoft Azure
    Azure,
    /// Self-managed hardware
    BareMetal,
}

impl Provider {
    /// Provider compared when a request does not select any.
    pub const DEFAULT: Self = Self::Openmesh;

    /// Parse a provider identifier, accepting camelCase or kebab-case.
    pub fn parse(id: &str) -> Result<Self, EconomicsError> {
        Self::from_str(&kebab_to_camel(id))
            .map_err(|_| EconomicsError::UnknownProvider(id.to_owned()))
    }

    /// Stable identifier, as used in query strings and JSON.
    pub fn id(self) -> &'static str {
        self.into()
    }
}

/// Fixed monthly operational cost (USD) of running a validator, per provider.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OperationalCosts {
    pub openmesh: f64,
    pub aws: f64,
    pub gcp: f64,
    pub azure: f64,
    pub bare_metal: f64,
}

impl OperationalCosts {
    /// Cost for a single provider.
    pub const fn get(&self, provider: Provider) -> f64 {
        match provider {
            Provider::Openmesh => self.openmesh,
            Provider::Aws => self.aws,
            Provider::Gcp => self.gcp,
            Provider::Azure => self.azure,
            Provider::BareMetal => self.bare_metal,
        }
    }

    /// All `(provider, cost)` pairs in provider order.
    pub fn iter(&self) -> impl Iterator<Item = (Provider, f64)> + '_ {
        Provider::iter().map(move |provider| (provider, self.get(provider)))
    }
}

/// Static economics of one chain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChainProfile {
    /// Display name
    pub name: String,
    /// Reference token price in USD
    pub base_price: f64,
    /// Reward earned per cost period, in native tokens
    pub avg_reward: f64,
    /// Monthly hosting cost per provider
    pub operational_costs: OperationalCosts,
}

impl ChainProfile {
    /// Reject values that would silently turn into NaN or negative prices.
    pub fn validate(&self) -> Result<(), EconomicsError> {
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(EconomicsError::InvalidBasePrice {
                chain: self.name.clone(),
                value: self.base_price,
            });
        }
        if !self.avg_reward.is_finite() {
            return Err(EconomicsError::InvalidReward {
                chain: self.name.clone(),
                value: self.avg_reward,
            });
        }
        for (provider, cost) in self.operational_costs.iter() {
            if !cost.is_finite() || cost < 0.0 {
                return Err(EconomicsError::InvalidOperationalCost {
                    chain: self.name.clone(),
                    provider,
                    value: cost,
                });
            }
        }
        Ok(())
    }
}

/// Read-only table holding exactly one validated profile per [`Chain`].
#[derive(Debug, Clone)]
pub struct ChainTable {
    // Indexed by `Chain as usize`; always `Chain::COUNT` long.
    profiles: Vec<ChainProfile>,
}

impl ChainTable {
    /// The catalogue compiled into the binary.
    pub fn builtin() -> Self {
        Self { profiles: Chain::iter().map(builtin_profile).collect() }
    }

    /// Build a table from a map that must cover every chain.
    pub fn from_profiles(
        mut profiles: BTreeMap<Chain, ChainProfile>,
    ) -> Result<Self, EconomicsError> {
        let profiles = Chain::iter()
            .map(|chain| {
                let profile = profiles.remove(&chain).ok_or(EconomicsError::MissingChain(chain))?;
                profile.validate()?;
                Ok(profile)
            })
            .collect::<Result<Vec<_>, EconomicsError>>()?;
        Ok(Self { profiles })
    }

    /// Parse a JSON document keyed by chain id.
    ///
    /// ```json
    /// { "ethereum": { "name": "Ethereum", "basePrice": 2258.79, "avgReward": 0.13,
    ///   "operationalCosts": { "openmesh": 25.5, "aws": 210, "gcp": 205,
    ///                         "azure": 384, "bareMetal": 85 } }, ... }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, EconomicsError> {
        let profiles: BTreeMap<Chain, ChainProfile> = serde_json::from_str(json)?;
        Self::from_profiles(profiles)
    }

    /// Profile of `chain`.
    pub fn get(&self, chain: Chain) -> &ChainProfile {
        &self.profiles[chain as usize]
    }

    /// All chains with their profiles, in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (Chain, &ChainProfile)> {
        Chain::iter().zip(&self.profiles)
    }
}

impl Default for ChainTable {
    fn default() -> Self {
        Self::builtin()
    }
}

const fn costs(openmesh: f64, aws: f64, gcp: f64, azure: f64, bare_metal: f64) -> OperationalCosts {
    OperationalCosts { openmesh, aws, gcp, azure, bare_metal }
}

fn builtin_profile(chain: Chain) -> ChainProfile {
    let (base_price, avg_reward, operational_costs) = match chain {
        Chain::Ethereum => (2258.79, 0.13, costs(25.5, 210.0, 205.0, 384.0, 85.0)),
        Chain::Cosmos => (8.12, 747.08, costs(20.5, 176.66, 210.0, 518.0, 70.0)),
        Chain::Avalanche => (35.42, 14.17, costs(27.5, 176.66, 160.0, 625.0, 92.5)),
        Chain::Algorand => (0.19, 250.0, costs(10.5, 100.0, 90.0, 167.0, 35.0)),
        Chain::NearProtocol => (6.87, 697.92, costs(31.5, 160.0, 140.0, 645.0, 105.0)),
        Chain::Fantom => (0.71, 5350.0, costs(37.5, 385.0, 425.0, 1638.0, 125.0)),
        Chain::Kusama => (32.15, 583.0, costs(22.5, 195.0, 225.0, 580.0, 75.0)),
        Chain::Celo => (0.78, 58.0, costs(31.5, 290.0, 340.0, 645.0, 105.0)),
        Chain::Polygon => (0.72, 1667.0, costs(20.5, 111.36, 283.44, 283.0, 85.0)),
        Chain::Zilliqa => (0.024, 8333.0, costs(20.5, 111.36, 283.44, 283.0, 85.0)),
    };
    ChainProfile { name: chain.display_name().to_owned(), base_price, avg_reward, operational_costs }
}

/// `near-protocol` -> `nearProtocol`: every dash followed by a character is
/// replaced by that character upper-cased.
fn kebab_to_camel(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut chars = id.chars();
    while let Some(c) = chars.next() {
        if c != '-' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) => out.extend(next.to_uppercase()),
            None => out.push('-'),
        }
    }
    out
}
