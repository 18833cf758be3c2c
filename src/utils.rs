//! Utils

use chrono::{DateTime, Utc};
use clap::Parser;

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct CheckoutDemoArgs {
    /// Fixture set to load events, codes and tickets from
    #[clap(short, long, default_value = "weekend")]
    pub fixture: String,

    /// Resolve prices at this RFC 3339 instant instead of now
    #[clap(short, long)]
    pub at: Option<DateTime<Utc>>,

    /// Promotional code entered at checkout
    #[clap(short, long)]
    pub code: Option<String>,
}
