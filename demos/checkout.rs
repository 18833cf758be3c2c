//! Checkout Quote Example
//!
//! Loads a fixture set and prints a checkout quote for every ticket in it,
//! optionally applying a promotional code.
//!
//! Use `-f` to load a fixture set by name
//! Use `-a` to price at a fixed RFC 3339 instant
//! Use `-c` to apply a promotional code
//!
//! Run with: `cargo run --example checkout`

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tabled::{Table, Tabled};

use paddock::{fixtures::Fixture, resolver::resolve, utils::CheckoutDemoArgs};

/// One row of the printed quote table
#[derive(Tabled)]
struct QuoteRow {
    ticket: String,
    tier: String,
    full: String,
    due: String,
}

/// Checkout Quote Example
#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    let args = CheckoutDemoArgs::parse();
    let now = args.at.unwrap_or_else(Utc::now);

    let fixture = Fixture::from_set(&args.fixture)?;

    let entered_code = args
        .code
        .as_deref()
        .map(|entered| fixture.code(entered))
        .transpose()?;

    let mut rows = Vec::new();

    for ticket in fixture.tickets() {
        let event = fixture.event_for(ticket)?;

        // the resolver trusts its caller on event applicability
        let code = entered_code.filter(|code| code.applies_to(ticket.event()));

        let quote = resolve(*ticket.final_price(), &event.schedule, code, now)?;

        rows.push(QuoteRow {
            ticket: ticket.name().to_string(),
            tier: quote
                .tier()
                .map_or_else(|| "full price".to_string(), |tier| tier.name.clone()),
            full: quote.final_price().to_string(),
            due: quote.amount_due().to_string(),
        });
    }

    println!("{}", Table::new(rows));

    for event in fixture.events().values() {
        if let Some(change) = event.schedule.next_change_after(now) {
            let remaining = (change - now).to_std()?;

            println!(
                "{}: tier pricing changes in {}",
                event.name,
                remaining.human(Truncate::Second)
            );
        }
    }

    Ok(())
}
