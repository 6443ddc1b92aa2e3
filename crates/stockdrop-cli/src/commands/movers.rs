use serde::Serialize;
use serde_json::Value;

use stockdrop_core::ranking::{select_extreme, Direction};
use stockdrop_core::{normalize, Quote, ScreenerQuery};

use crate::cli::{MoverDirection, MoversArgs};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct MoversResponseData {
    direction: &'static str,
    scanned: usize,
    mover: Option<Quote>,
}

pub async fn run(args: &MoversArgs, timeout_ms: Option<u64>) -> Result<Value, CliError> {
    let config = super::configured(timeout_ms)?;

    let mut query = ScreenerQuery::new(args.limit, config.quote_timeout)?;
    if let Some(sector) = &args.sector {
        query = query.with_sector(sector.clone());
    }

    let client = super::client(config);
    let payload = client.fetch_screener(&query).await?;
    let quotes = normalize::screener_batch(&payload)?;

    let direction = match args.direction {
        MoverDirection::Gainer => Direction::MaxGain,
        MoverDirection::Decliner => Direction::MaxDecline,
    };
    let mover = select_extreme(&quotes, direction).cloned();

    Ok(serde_json::to_value(MoversResponseData {
        direction: match args.direction {
            MoverDirection::Gainer => "gainer",
            MoverDirection::Decliner => "decliner",
        },
        scanned: quotes.len(),
        mover,
    })?)
}
