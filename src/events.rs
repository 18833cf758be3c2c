//! Events
//!
//! An event owns the tier schedule that prices every ticket sold under it.
//! Tiers are never attached to individual tickets.

use slotmap::new_key_type;

use crate::tiers::TierSchedule;

new_key_type! {
    /// Event Key
    pub struct EventKey;
}

/// A race event whose tickets share one tier schedule.
#[derive(Debug, Clone, Default)]
pub struct Event {
    /// Event name
    pub name: String,

    /// Time-boxed discount tiers applying to every ticket of this event.
    pub schedule: TierSchedule,
}
