//! Tickets

use rusty_money::{Money, iso::Currency};

use crate::events::EventKey;

/// A sellable ticket, priced against its parent event's tier schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket<'a> {
    name: String,
    event: EventKey,
    final_price: Money<'a, Currency>,
}

impl<'a> Ticket<'a> {
    /// Creates a new ticket with its full, undiscounted price.
    pub fn new(name: String, event: EventKey, final_price: Money<'a, Currency>) -> Self {
        Self {
            name,
            event,
            final_price,
        }
    }

    /// Returns the ticket name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent event key.
    pub fn event(&self) -> EventKey {
        self.event
    }

    /// Returns the full, 0%-discount reference price.
    pub fn final_price(&self) -> &Money<'a, Currency> {
        &self.final_price
    }
}
