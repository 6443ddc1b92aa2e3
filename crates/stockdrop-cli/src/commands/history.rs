use serde_json::Value;

use stockdrop_core::{FallbackResolver, ResolveRequest, Symbol};

use crate::cli::HistoryArgs;
use crate::error::CliError;

pub async fn run(args: &HistoryArgs, timeout_ms: Option<u64>) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let config = super::configured(timeout_ms)?;

    let request = ResolveRequest::new(symbol, config.series_chain())?;
    let resolver = FallbackResolver::new(super::client(config));
    let resolution = resolver.resolve_series(&request).await?;

    Ok(serde_json::to_value(&resolution)?)
}
