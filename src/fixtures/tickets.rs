//! Ticket Fixtures

use serde::Deserialize;

/// Wrapper for tickets in YAML
#[derive(Debug, Deserialize)]
pub struct TicketsFixture {
    /// Ticket rows
    pub tickets: Vec<TicketFixture>,
}

/// Ticket fixture row
#[derive(Debug, Deserialize)]
pub struct TicketFixture {
    /// Ticket name
    pub name: String,

    /// Event key reference from the same fixture set
    pub event: String,

    /// Full price (e.g., "80.00 EUR")
    pub price: String,
}
