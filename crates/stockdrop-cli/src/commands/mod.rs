mod history;
mod movers;
mod quote;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use stockdrop_core::{ApiConfig, QuoteClient, ReqwestHttpClient};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    match &cli.command {
        Command::Quote(args) => quote::run(args, cli.timeout_ms).await,
        Command::History(args) => history::run(args, cli.timeout_ms).await,
        Command::Movers(args) => movers::run(args, cli.timeout_ms).await,
    }
}

fn client(config: ApiConfig) -> QuoteClient {
    QuoteClient::new(Arc::new(ReqwestHttpClient::new()), config)
}

/// Configuration for commands that require an upstream API key.
fn configured(timeout_ms: Option<u64>) -> Result<ApiConfig, CliError> {
    let config = ApiConfig::from_env().ok_or(CliError::MissingApiKey)?;
    Ok(apply_timeout(config, timeout_ms))
}

fn apply_timeout(config: ApiConfig, timeout_ms: Option<u64>) -> ApiConfig {
    match timeout_ms {
        Some(ms) => {
            let timeout = Duration::from_millis(ms);
            config
                .with_quote_timeout(timeout)
                .with_history_timeout(timeout)
        }
        None => config,
    }
}
