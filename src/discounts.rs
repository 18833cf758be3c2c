//! Discount arithmetic
//!
//! Shared minor-unit percentage calculations used by price tiers and
//! promotional codes.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// A whole-number percentage discount, clamped into `0..=100`.
///
/// Admin-entered rows are not trusted: out-of-range percentages are clamped
/// at construction instead of rejected, so one bad row cannot stop every
/// buyer's checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountRate(u8);

impl DiscountRate {
    /// The identity rate: 0% off.
    pub const ZERO: Self = Self(0);

    /// The maximum rate: 100% off, the ticket is free.
    pub const FREE: Self = Self(100);

    /// Create a rate from an untrusted integer percentage, clamping into `0..=100`.
    #[must_use]
    pub fn from_percent(percent: i64) -> Self {
        Self(u8::try_from(percent.clamp(0, 100)).unwrap_or(100))
    }

    /// The discount percentage, in `0..=100`.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Whether this rate leaves a price unchanged.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The share of the price retained after the discount, as a [`Percentage`].
    #[must_use]
    pub fn retained(self) -> Percentage {
        Percentage::from(f64::from(100 - self.0) / 100.0)
    }
}

/// Apply `rate` to an amount in minor units, returning the discounted price.
///
/// The result is the price after the discount, rounded half-up to the nearest
/// minor unit. Money cannot be fractional, and it is the price that rounds,
/// not the discount: 99 at 50% off is 50, not 49.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the decimal arithmetic
/// overflows or the result cannot be represented as minor units.
pub fn discounted_minor(rate: DiscountRate, minor: i64) -> Result<i64, DiscountError> {
    if rate.is_zero() {
        return Ok(minor);
    }

    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    (rate.retained() * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_percent_clamps_negative_to_zero() {
        assert_eq!(DiscountRate::from_percent(-20), DiscountRate::ZERO);
    }

    #[test]
    fn from_percent_clamps_overrange_to_free() {
        assert_eq!(DiscountRate::from_percent(250), DiscountRate::FREE);
    }

    #[test]
    fn from_percent_keeps_in_range_values() {
        assert_eq!(DiscountRate::from_percent(35).percent(), 35);
    }

    #[test]
    fn zero_rate_is_identity() -> TestResult {
        assert_eq!(discounted_minor(DiscountRate::ZERO, 8000)?, 8000);

        Ok(())
    }

    #[test]
    fn free_rate_is_zero() -> TestResult {
        assert_eq!(discounted_minor(DiscountRate::FREE, 8000)?, 0);

        Ok(())
    }

    #[test]
    fn discounted_minor_calculates_price_after_discount() -> TestResult {
        assert_eq!(discounted_minor(DiscountRate::from_percent(25), 200)?, 150);

        Ok(())
    }

    #[test]
    fn discounted_minor_rounds_midpoints_half_up() -> TestResult {
        assert_eq!(discounted_minor(DiscountRate::from_percent(50), 99)?, 50);

        Ok(())
    }

    #[test]
    fn increasing_rate_never_increases_price() -> TestResult {
        let mut previous = i64::MAX;

        for percent in 0..=100 {
            let price = discounted_minor(DiscountRate::from_percent(percent), 7999)?;

            assert!(
                price <= previous,
                "price at {percent}% ({price}) exceeds the previous rate's price ({previous})"
            );

            previous = price;
        }

        Ok(())
    }
}
