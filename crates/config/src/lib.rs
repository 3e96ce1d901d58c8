//! Configuration for the validator economics API server.
use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// Origins allowed by CORS when none are configured. Localhost origins are
/// always allowed.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// HTTP listener options
#[derive(Debug, Clone, Parser)]
pub struct ApiOpts {
    /// Address to bind the API server to
    #[clap(long = "host", env = "API_HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Port to bind the API server to
    #[clap(long = "port", env = "API_PORT", default_value = "3000")]
    pub port: u16,
    /// Comma separated list of origins allowed by CORS
    #[clap(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        default_value = DEFAULT_ALLOWED_ORIGINS,
        value_delimiter = ','
    )]
    pub allowed_origins: Vec<String>,
}

/// Rate limiting options
#[derive(Debug, Clone, Parser)]
pub struct RateLimitOpts {
    /// Maximum number of requests per window
    #[clap(long = "rate-limit-max-requests", env = "RATE_LIMIT_MAX_REQUESTS", default_value = "1000")]
    pub max_requests: u64,
    /// Window length in seconds
    #[clap(long = "rate-limit-period-secs", env = "RATE_LIMIT_PERIOD_SECS", default_value = "60")]
    pub period_secs: u64,
}

impl RateLimitOpts {
    /// Window length as a [`Duration`].
    pub const fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }
}

/// CLI options for the API server
#[derive(Debug, Clone, Parser)]
#[clap(name = "api-server", about = "Validator hosting economics API")]
pub struct Opts {
    /// HTTP listener configuration
    #[clap(flatten)]
    pub api: ApiOpts,

    /// Rate limiting configuration
    #[clap(flatten)]
    pub rate_limit: RateLimitOpts,

    /// JSON file replacing the built-in chain table
    #[clap(long, env = "CHAINS_FILE")]
    pub chains_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Opts::command().debug_assert()
    }

    #[test]
    fn parses_overrides() {
        let opts = Opts::try_parse_from([
            "api-server",
            "--port",
            "8080",
            "--allowed-origins",
            "https://a.example,https://b.example",
            "--rate-limit-max-requests",
            "5",
            "--rate-limit-period-secs",
            "2",
            "--chains-file",
            "chains.json",
        ])
        .unwrap();
        assert_eq!(opts.api.port, 8080);
        assert_eq!(opts.api.allowed_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(opts.rate_limit.max_requests, 5);
        assert_eq!(opts.rate_limit.period(), Duration::from_secs(2));
        assert_eq!(opts.chains_file, Some(PathBuf::from("chains.json")));
    }
}
