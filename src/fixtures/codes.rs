//! Promotional Code Fixtures

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Wrapper for promotional codes in YAML
#[derive(Debug, Deserialize)]
pub struct CodesFixture {
    /// Map of code string -> code fixture
    pub codes: FxHashMap<String, CodeFixture>,
}

/// Promotional code fixture row.
///
/// Exactly one of `percent` or `amount` must be set, mirroring the admin
/// form's mutual-exclusivity control.
#[derive(Debug, Deserialize)]
pub struct CodeFixture {
    /// Percentage off the tier price
    #[serde(default)]
    pub percent: Option<i64>,

    /// Amount off the tier price (e.g., "5.00 EUR")
    #[serde(default)]
    pub amount: Option<String>,

    /// Inclusive start of the validity window (RFC 3339)
    pub valid_from: DateTime<Utc>,

    /// Inclusive end of the validity window (RFC 3339)
    pub valid_until: DateTime<Utc>,

    /// Optional redemption cap
    #[serde(default)]
    pub usage_limit: Option<u32>,

    /// Redemptions consumed so far
    #[serde(default)]
    pub used: u32,

    /// Optional restriction to event keys from the same fixture set
    #[serde(default)]
    pub events: Option<Vec<String>>,
}
