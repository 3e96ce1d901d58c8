//! API server binary

use std::{net::SocketAddr, path::Path};

use api::ApiState;
use clap::Parser;
use config::Opts;
use dotenvy::dotenv;
use economics::ChainTable;
use eyre::WrapErr;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

fn load_chains(path: Option<&Path>) -> eyre::Result<ChainTable> {
    let Some(path) = path else {
        return Ok(ChainTable::builtin());
    };
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read chain table {}", path.display()))?;
    let table = ChainTable::from_json(&json)
        .wrap_err_with(|| format!("invalid chain table {}", path.display()))?;
    info!(path = %path.display(), "Loaded chain table");
    Ok(table)
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let chains = load_chains(opts.chains_file.as_deref())?;
    let state = ApiState::new(chains, opts.rate_limit.max_requests, opts.rate_limit.period());

    let addr: SocketAddr = format!("{}:{}", opts.api.host, opts.api.port).parse()?;
    server::run(addr, state, opts.api.allowed_origins).await
}
