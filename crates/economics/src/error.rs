use crate::chains::{Chain, Provider};

/// Errors raised while building a chain table or generating a series.
#[derive(Debug, thiserror::Error)]
pub enum EconomicsError {
    /// Base price is negative, NaN or infinite.
    #[error("invalid base price {value} for {chain}: must be finite and non-negative")]
    InvalidBasePrice {
        /// Display name of the offending chain
        chain: String,
        /// Rejected value
        value: f64,
    },

    /// Reward rate is NaN or infinite.
    #[error("invalid reward rate {value} for {chain}: must be finite")]
    InvalidReward {
        /// Display name of the offending chain
        chain: String,
        /// Rejected value
        value: f64,
    },

    /// Operational cost is negative, NaN or infinite.
    #[error("invalid operational cost {value} for {provider} on {chain}")]
    InvalidOperationalCost {
        /// Display name of the offending chain
        chain: String,
        /// Provider the cost belongs to
        provider: Provider,
        /// Rejected value
        value: f64,
    },

    /// A chain table document does not define every chain.
    #[error("chain table is missing an entry for {0}")]
    MissingChain(Chain),

    /// Identifier does not name a known chain.
    #[error("unknown chain '{0}'")]
    UnknownChain(String),

    /// Identifier does not name a known provider.
    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    /// A chain table document could not be parsed.
    #[error("failed to parse chain table: {0}")]
    Parse(#[from] serde_json::Error),
}
