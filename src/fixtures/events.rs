//! Event Fixtures

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    discounts::DiscountRate,
    events::Event,
    tiers::{PriceTier, TierSchedule},
};

/// Wrapper for events in YAML
#[derive(Debug, Deserialize)]
pub struct EventsFixture {
    /// Map of event key -> event fixture
    pub events: FxHashMap<String, EventFixture>,
}

/// Event Fixture
#[derive(Debug, Deserialize)]
pub struct EventFixture {
    /// Event name
    pub name: String,

    /// Tier rows, as entered in the back office
    #[serde(default)]
    pub tiers: Vec<TierFixture>,
}

/// Price tier fixture row
#[derive(Debug, Deserialize)]
pub struct TierFixture {
    /// Tier name
    pub name: String,

    /// Discount percentage; out-of-range values clamp on load
    pub percent: i64,

    /// Inclusive start of the availability window (RFC 3339)
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,

    /// Exclusive end of the availability window (RFC 3339)
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,

    /// Tie-break ordering hint
    #[serde(default)]
    pub order: i32,
}

impl From<TierFixture> for PriceTier {
    fn from(fixture: TierFixture) -> Self {
        Self::new(
            fixture.name,
            DiscountRate::from_percent(fixture.percent),
            fixture.from,
            fixture.until,
            fixture.order,
        )
    }
}

impl From<EventFixture> for Event {
    fn from(fixture: EventFixture) -> Self {
        Self {
            name: fixture.name,
            schedule: TierSchedule::with_tiers(fixture.tiers.into_iter().map(PriceTier::from)),
        }
    }
}
