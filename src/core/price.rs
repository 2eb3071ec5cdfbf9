//! Pricing abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    /// Latest closing price, rounded to cents
    pub price: Decimal,
    pub currency: String,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_price(&self, symbol: &str) -> Result<PriceResult>;
}

/// Outcome of a single price lookup.
///
/// A failed lookup never stops a run. Callers that need the strict view
/// match on the variants; the contribution math only sees
/// [`PriceLookup::price_or_zero`].
#[derive(Debug, Clone, PartialEq)]
pub enum PriceLookup {
    Resolved(PriceResult),
    Unavailable { reason: String },
}

impl PriceLookup {
    pub fn price_or_zero(&self) -> Decimal {
        match self {
            PriceLookup::Resolved(result) => result.price,
            PriceLookup::Unavailable { .. } => Decimal::ZERO,
        }
    }
}

/// Fetches `symbol` and folds every failure into [`PriceLookup::Unavailable`].
pub async fn lookup(provider: &(dyn PriceProvider + Send + Sync), symbol: &str) -> PriceLookup {
    match provider.fetch_price(symbol).await {
        Ok(result) => {
            debug!(symbol, price = %result.price, "Price resolved");
            PriceLookup::Resolved(result)
        }
        Err(e) => {
            warn!(symbol, error = %e, "Price unavailable, using zero");
            PriceLookup::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}
