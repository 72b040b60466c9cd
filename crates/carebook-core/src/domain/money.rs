use crate::error::CoreError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Converts a price in whole currency units to the smallest subunit
/// (cents, kobo). Halves round away from zero.
pub fn to_subunits(price: Decimal) -> Result<i64, CoreError> {
    let scaled = price
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| CoreError::AmountOutOfRange(price.to_string()))?;
    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| CoreError::AmountOutOfRange(price.to_string()))
}

pub fn format_price(price: Decimal) -> String {
    format!(
        "{:.2}",
        price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
