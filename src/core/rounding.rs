//! Minor-unit VAT rounding.
//!
//! The rounding rule is load-bearing: half-away-from-zero, applied
//! independently to each component (product, shipping) and only then
//! summed. Rounding a combined base once can differ by ±1 minor unit on
//! boundary values, and every caller splitting line items must match the
//! component-wise behavior to agree with the server total.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// VAT on one component: `round(amount × rate)` in minor units,
/// ties rounded away from zero (never banker's rounding).
pub fn vat_component(amount: i64, rate: Decimal) -> i64 {
    let tax = Decimal::from(amount) * rate;
    tax.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        // rate is a fraction in [0, 1), so the product stays within i64
        .unwrap_or(i64::MAX)
}
