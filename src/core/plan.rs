use super::allocation::{AssetUniverse, Strategy, select};
use super::contribution::compute;
use super::price::{PriceLookup, PriceProvider, lookup};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub ticker: String,
    pub qty: u64,
    pub price: Decimal,
}

impl Position {
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.qty) * self.price
    }
}

/// The month's purchase plan. Built once per run and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationPlan {
    pub date: NaiveDate,
    pub strategy: Strategy,
    pub primary: Position,
    pub secondary: Position,
    pub total_invested: Decimal,
    pub budget: Decimal,
}

impl AllocationPlan {
    pub fn strategy_label(&self) -> &'static str {
        self.strategy.label()
    }

    /// Budget left after the purchases. Negative when the primary overspends.
    pub fn leftover(&self) -> Decimal {
        (self.budget - self.total_invested).round_dp(2)
    }
}

/// Prices as they came back from the provider, kept for reporting.
#[derive(Debug, Clone)]
pub struct PlanLookups {
    pub primary: PriceLookup,
    pub secondary: PriceLookup,
}

pub async fn build_plan(
    date: NaiveDate,
    budget: Decimal,
    universe: &AssetUniverse,
    provider: &(dyn PriceProvider + Send + Sync),
) -> (AllocationPlan, PlanLookups) {
    let selection = select(date.month(), universe);
    info!(
        month = date.month(),
        strategy = %selection.strategy,
        primary = %selection.primary,
        secondary = %selection.secondary,
        "Selected rotation branch"
    );

    let primary_lookup = lookup(provider, &selection.primary).await;
    let secondary_lookup = lookup(provider, &selection.secondary).await;
    let primary_price = primary_lookup.price_or_zero();
    let secondary_price = secondary_lookup.price_or_zero();

    let contribution = compute(primary_price, secondary_price, budget);

    let plan = AllocationPlan {
        date,
        strategy: selection.strategy,
        primary: Position {
            ticker: selection.primary,
            qty: contribution.primary_qty,
            price: primary_price,
        },
        secondary: Position {
            ticker: selection.secondary,
            qty: contribution.secondary_qty,
            price: secondary_price,
        },
        total_invested: contribution.total,
        budget,
    };
    info!(total = %plan.total_invested, leftover = %plan.leftover(), "Plan computed");

    (
        plan,
        PlanLookups {
            primary: primary_lookup,
            secondary: secondary_lookup,
        },
    )
}
