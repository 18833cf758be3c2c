//! Price Resolution
//!
//! The checkout pricing routine: select the active tier, apply its rate to
//! the full price, then apply a temporally valid promotional code on top of
//! the tier price. A pure function over snapshot rows; callers inject `now`
//! rather than letting the resolver sample the clock.

use chrono::{DateTime, Utc};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    codes::{CodeDiscount, PromotionalCode},
    discounts::{DiscountError, discounted_minor},
    quotes::{AppliedCode, AppliedTier, Quote},
    tiers::TierSchedule,
};

/// Errors that can occur while resolving a price.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The ticket's final price was negative, which indicates a
    /// data-integrity bug upstream.
    #[error("final price of {minor} minor units is negative; refusing to quote")]
    NegativeFinalPrice {
        /// The offending amount in minor units.
        minor: i64,
    },

    /// Wrapped discount arithmetic error.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Resolve the amount due for a ticket at `now`.
///
/// Selection and stacking rules:
///
/// - At most one tier applies, chosen by [`TierSchedule::active_at`]'s
///   deterministic selection. No active tier means the ticket sells at its
///   full price.
/// - A supplied code contributes nothing outside its inclusive validity
///   window; surfacing the rejection to the buyer is an upstream concern.
///   The caller has already validated existence, event applicability and
///   usage limits.
/// - A code discount applies to the tier price, never to the full price.
/// - The amount due never exceeds the full price and never drops below zero,
///   whatever the configured rows contain.
///
/// # Errors
///
/// - [`ResolveError::NegativeFinalPrice`]: the final price was negative.
/// - [`ResolveError::Discount`]: discount arithmetic could not be
///   represented.
/// - [`ResolveError::Money`]: money arithmetic failed, e.g. an amount-off
///   code denominated in a different currency than the ticket.
pub fn resolve<'a>(
    final_price: Money<'a, Currency>,
    schedule: &TierSchedule,
    code: Option<&PromotionalCode<'a>>,
    now: DateTime<Utc>,
) -> Result<Quote<'a>, ResolveError> {
    let final_minor = final_price.to_minor_units();
    let currency = final_price.currency();

    if final_minor < 0 {
        return Err(ResolveError::NegativeFinalPrice { minor: final_minor });
    }

    let tier = schedule.active_at(now);

    let tier_minor = match tier {
        Some(tier) => discounted_minor(tier.rate(), final_minor)?,
        None => final_minor,
    };

    let code = code.filter(|code| code.is_valid_at(now));

    let after_code_minor = match code.map(PromotionalCode::discount) {
        Some(&CodeDiscount::PercentOff(rate)) => discounted_minor(rate, tier_minor)?,
        Some(&CodeDiscount::AmountOff(amount)) => Money::from_minor(tier_minor, currency)
            .sub(amount)?
            .to_minor_units(),
        None => tier_minor,
    };

    // A misconfigured row must not inflate the price, and an amount-off code
    // must not push it below zero.
    let due_minor = after_code_minor.clamp(0, final_minor);

    Ok(Quote::new(
        final_price,
        Money::from_minor(tier_minor, currency),
        Money::from_minor(due_minor, currency),
        tier.map(|tier| AppliedTier {
            name: tier.name().to_string(),
            rate: tier.rate(),
        }),
        code.map(|code| AppliedCode {
            code: code.code().to_string(),
        }),
    ))
}
