use serde_json::Value;

use stockdrop_core::{ApiConfig, FallbackResolver, ResolveRequest, Symbol};

use crate::cli::QuoteArgs;
use crate::error::CliError;

pub async fn run(args: &QuoteArgs, timeout_ms: Option<u64>) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    // --demo with no key configured resolves entirely offline through
    // the placeholder endpoint.
    let (config, mut chain) = match super::configured(timeout_ms) {
        Ok(config) => {
            let chain = config.quote_chain();
            (config, chain)
        }
        Err(CliError::MissingApiKey) if args.demo => (ApiConfig::new(""), Vec::new()),
        Err(error) => return Err(error),
    };
    if args.demo {
        chain = ApiConfig::with_demo_fallback(chain);
    }

    let request = ResolveRequest::new(symbol, chain)?;
    let resolver = FallbackResolver::new(super::client(config));
    let resolution = resolver.resolve(&request).await?;

    Ok(serde_json::to_value(&resolution)?)
}
