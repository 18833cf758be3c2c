//! Promotional Codes
//!
//! A buyer-entered code granting one extra discount on top of the tier
//! price: a percentage off or a fixed amount off, never both. Code validity
//! windows are inclusive at both ends ("valid through" semantics), unlike
//! the half-open tier windows.

use chrono::{DateTime, Utc};
use rusty_money::{Money, iso::Currency};

use crate::{discounts::DiscountRate, events::EventKey};

/// The discount granted by a promotional code.
///
/// The admin form enforces mutual exclusivity between the percentage and the
/// amount; the enum carries that invariant into the type.
#[derive(Debug, Clone, Copy)]
pub enum CodeDiscount<'a> {
    /// Percentage off the tier price (e.g. "10% off").
    PercentOff(DiscountRate),

    /// Fixed amount off the tier price (e.g. "5.00 EUR off"), clamped at zero.
    AmountOff(Money<'a, Currency>),
}

/// A promotional code row as configured in the back office.
#[derive(Debug, Clone)]
pub struct PromotionalCode<'a> {
    code: String,
    discount: CodeDiscount<'a>,
    valid_from: DateTime<Utc>,
    valid_until: DateTime<Utc>,
    usage_limit: Option<u32>,
    used_count: u32,
    events: Option<Vec<EventKey>>,
}

impl<'a> PromotionalCode<'a> {
    /// Create a code valid over the inclusive `[valid_from, valid_until]` window.
    pub fn new(
        code: String,
        discount: CodeDiscount<'a>,
        valid_from: DateTime<Utc>,
        valid_until: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            discount,
            valid_from,
            valid_until,
            usage_limit: None,
            used_count: 0,
            events: None,
        }
    }

    /// Cap the number of redemptions.
    #[must_use]
    pub fn with_usage_limit(mut self, limit: u32) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    /// Record how many redemptions have already been consumed.
    #[must_use]
    pub fn with_used_count(mut self, count: u32) -> Self {
        self.used_count = count;
        self
    }

    /// Restrict the code to a subset of events.
    #[must_use]
    pub fn for_events(mut self, events: Vec<EventKey>) -> Self {
        self.events = Some(events);
        self
    }

    /// Return the code string as configured.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Return the discount.
    pub const fn discount(&self) -> &CodeDiscount<'a> {
        &self.discount
    }

    /// Return the inclusive start of the validity window.
    pub const fn valid_from(&self) -> DateTime<Utc> {
        self.valid_from
    }

    /// Return the inclusive end of the validity window.
    pub const fn valid_until(&self) -> DateTime<Utc> {
        self.valid_until
    }

    /// Return the optional redemption cap.
    pub const fn usage_limit(&self) -> Option<u32> {
        self.usage_limit
    }

    /// Return the number of redemptions consumed so far.
    pub const fn used_count(&self) -> u32 {
        self.used_count
    }

    /// Case-insensitive match against a buyer-entered string.
    #[must_use]
    pub fn matches(&self, entered: &str) -> bool {
        self.code.eq_ignore_ascii_case(entered)
    }

    /// Whether the code is temporally valid at `now`, inclusive at both ends.
    ///
    /// A code advertised as "valid through 31 Dec" still works at that
    /// instant, in contrast to a tier's exclusive upper bound.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.valid_from && now <= self.valid_until
    }

    /// Whether the redemption cap has been consumed.
    ///
    /// Consumption bookkeeping lives upstream; the price resolver never
    /// consults this.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.usage_limit
            .is_some_and(|limit| self.used_count >= limit)
    }

    /// Whether the code may be used for `event`.
    ///
    /// An unrestricted code applies to every event.
    #[must_use]
    pub fn applies_to(&self, event: EventKey) -> bool {
        self.events
            .as_ref()
            .is_none_or(|events| events.contains(&event))
    }
}
