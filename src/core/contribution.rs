//! Quantities to buy for a fixed monthly contribution

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

/// The primary asset is always bought as a single unit.
pub const PRIMARY_QTY: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub primary_qty: u64,
    pub secondary_qty: u64,
    pub total: Decimal,
}

/// Buys one unit of the primary asset and as many whole units of the
/// secondary as the rest of the budget allows.
///
/// A primary price above the budget is not clamped: the total then exceeds
/// the budget and no secondary units are bought. Zero prices are accepted.
/// A quotient too large to represent buys no secondary units.
pub fn compute(primary_price: Decimal, secondary_price: Decimal, budget: Decimal) -> Contribution {
    let remaining = budget.checked_sub(primary_price).unwrap_or(Decimal::ZERO);
    let secondary_qty = if remaining > Decimal::ZERO && secondary_price > Decimal::ZERO {
        secondary_units(remaining, secondary_price).unwrap_or_else(|| {
            warn!(%remaining, %secondary_price, "Secondary quantity out of range, buying none");
            0
        })
    } else {
        0
    };

    // qty * price <= remaining, so the products stay in range
    let total = Decimal::from(PRIMARY_QTY) * primary_price
        + Decimal::from(secondary_qty) * secondary_price;

    Contribution {
        primary_qty: PRIMARY_QTY,
        secondary_qty,
        total: total.round_dp(2),
    }
}

fn secondary_units(remaining: Decimal, price: Decimal) -> Option<u64> {
    remaining.checked_div(price)?.floor().to_u64()
}
