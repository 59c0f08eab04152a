//! Money validation at the API boundary
//!
//! Prices and totals are `NUMERIC(12, 2)` in the store. Reject values the
//! column would silently round or refuse, before any query runs.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Maximum fractional digits accepted for an amount
pub const MONEY_SCALE: u32 = 2;

/// Largest amount that fits `NUMERIC(12, 2)`
pub fn money_max() -> Decimal {
    Decimal::new(9_999_999_999_99, MONEY_SCALE)
}

/// `validator` custom rule: non-negative, at most two decimals, in range
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative_amount"));
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(ValidationError::new("too_many_decimals"));
    }
    if *value > money_max() {
        return Err(ValidationError::new("amount_too_large"));
    }
    Ok(())
}
