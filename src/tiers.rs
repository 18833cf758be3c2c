//! Price Tiers
//!
//! Time-boxed percentage discounts on an event's tickets ("early bird",
//! "last minute"). A tier window is half-open: inclusive of `available_from`,
//! exclusive of `available_until`, so a transition instant belongs to exactly
//! one of two adjacent tiers.

use chrono::{DateTime, Utc};
use smallvec::SmallVec;

use crate::discounts::DiscountRate;

/// A time-boxed percentage discount on an event's tickets.
#[derive(Debug, Clone)]
pub struct PriceTier {
    name: String,
    rate: DiscountRate,
    available_from: Option<DateTime<Utc>>,
    available_until: Option<DateTime<Utc>>,
    display_order: i32,
}

impl PriceTier {
    /// Create a new tier. A `None` bound leaves that side of the window open.
    pub fn new(
        name: String,
        rate: DiscountRate,
        available_from: Option<DateTime<Utc>>,
        available_until: Option<DateTime<Utc>>,
        display_order: i32,
    ) -> Self {
        Self {
            name,
            rate,
            available_from,
            available_until,
            display_order,
        }
    }

    /// Return the tier name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the discount rate.
    pub const fn rate(&self) -> DiscountRate {
        self.rate
    }

    /// Return the inclusive start of the availability window.
    pub const fn available_from(&self) -> Option<DateTime<Utc>> {
        self.available_from
    }

    /// Return the exclusive end of the availability window.
    pub const fn available_until(&self) -> Option<DateTime<Utc>> {
        self.available_until
    }

    /// Return the tie-break ordering hint.
    pub const fn display_order(&self) -> i32 {
        self.display_order
    }

    /// Whether the tier applies at `now`.
    ///
    /// `available_from` is inclusive and `available_until` exclusive, so the
    /// instant one tier ends and the next begins matches only the next one.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.available_from.is_none_or(|from| now >= from)
            && self.available_until.is_none_or(|until| now < until)
    }
}

/// An event's tier schedule.
///
/// The back office does not enforce non-overlapping windows, so selection
/// must stay deterministic on malformed data. Among simultaneously active
/// tiers the latest-starting one wins (an open start ranks earliest); ties
/// fall back to the smallest display order, then to the last such tier in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct TierSchedule {
    tiers: SmallVec<[PriceTier; 4]>,
}

impl TierSchedule {
    /// Create an empty schedule. Tickets sell at full price.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tiers: SmallVec::new(),
        }
    }

    /// Create a schedule from tier rows.
    #[must_use]
    pub fn with_tiers(tiers: impl IntoIterator<Item = PriceTier>) -> Self {
        Self {
            tiers: tiers.into_iter().collect(),
        }
    }

    /// Append a tier row.
    pub fn push(&mut self, tier: PriceTier) {
        self.tiers.push(tier);
    }

    /// All tiers, in insertion order.
    pub fn tiers(&self) -> &[PriceTier] {
        &self.tiers
    }

    /// Number of tiers in the schedule.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Whether the schedule has no tiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Select the tier that prices a ticket at `now`, if any.
    #[must_use]
    pub fn active_at(&self, now: DateTime<Utc>) -> Option<&PriceTier> {
        self.tiers
            .iter()
            .filter(|tier| tier.is_active_at(now))
            .max_by(|a, b| {
                a.available_from
                    .cmp(&b.available_from)
                    .then(b.display_order.cmp(&a.display_order))
            })
    }

    /// The earliest tier boundary strictly after `now`, if any.
    ///
    /// This is the next instant at which [`TierSchedule::active_at`] can
    /// change its answer.
    #[must_use]
    pub fn next_change_after(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.tiers
            .iter()
            .flat_map(|tier| [tier.available_from, tier.available_until])
            .flatten()
            .filter(|instant| *instant > now)
            .min()
    }
}
