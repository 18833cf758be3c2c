//! Quotes
//!
//! The priced result handed to checkout: the full price, the tier price,
//! the amount due, and which tier and code produced it.

use rusty_money::{Money, MoneyError, iso::Currency};

use crate::discounts::DiscountRate;

/// The tier that priced a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedTier {
    /// Tier name, as configured in the back office.
    pub name: String,

    /// Tier discount rate.
    pub rate: DiscountRate,
}

/// The promotional code that contributed to a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCode {
    /// The code string as configured, not as typed by the buyer.
    pub code: String,
}

/// A fully priced checkout quote for one ticket.
///
/// The payment collaborator charges [`Quote::amount_due`] in the ticket's
/// currency, passed through unchanged.
#[derive(Debug, Clone)]
pub struct Quote<'a> {
    final_price: Money<'a, Currency>,
    tier_price: Money<'a, Currency>,
    amount_due: Money<'a, Currency>,
    tier: Option<AppliedTier>,
    code: Option<AppliedCode>,
}

impl<'a> Quote<'a> {
    pub(crate) fn new(
        final_price: Money<'a, Currency>,
        tier_price: Money<'a, Currency>,
        amount_due: Money<'a, Currency>,
        tier: Option<AppliedTier>,
        code: Option<AppliedCode>,
    ) -> Self {
        Self {
            final_price,
            tier_price,
            amount_due,
            tier,
            code,
        }
    }

    /// The full, undiscounted price.
    pub fn final_price(&self) -> Money<'a, Currency> {
        self.final_price
    }

    /// The price after the active tier, before any code.
    pub fn tier_price(&self) -> Money<'a, Currency> {
        self.tier_price
    }

    /// The amount to charge.
    pub fn amount_due(&self) -> Money<'a, Currency> {
        self.amount_due
    }

    /// The tier that applied, if any.
    pub fn tier(&self) -> Option<&AppliedTier> {
        self.tier.as_ref()
    }

    /// The promotional code that contributed, if any.
    ///
    /// A supplied code outside its validity window is absent here: it had no
    /// effect on the price.
    pub fn code(&self) -> Option<&AppliedCode> {
        self.code.as_ref()
    }

    /// Total savings against the full price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.final_price.sub(self.amount_due)
    }
}
