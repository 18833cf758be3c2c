//! Fixtures
//!
//! YAML-backed fixture sets for tests and demos: events with their tier
//! schedules, promotional codes, and the tickets on sale. The fixture plays
//! the role of the data-access collaborator at checkout: it hands back
//! event rows, tier rows, and case-insensitively matched code rows.

use std::{fs, path::PathBuf};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    codes::{CodeDiscount, PromotionalCode},
    discounts::DiscountRate,
    events::{Event, EventKey},
    tickets::Ticket,
};

pub mod codes;
pub mod events;
pub mod tickets;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Event not found
    #[error("Event not found: {0}")]
    EventNotFound(String),

    /// Promotional code not found
    #[error("Promotional code not found: {0}")]
    CodeNotFound(String),

    /// Ticket not found
    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    /// A code row set both or neither of its two discount fields
    #[error("Promotional code {0} must set exactly one of percent or amount")]
    CodeDiscountShape(String),

    /// Currency mismatch between fixture rows
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No priced rows loaded yet
    #[error("No priced rows loaded yet; currency unknown")]
    NoCurrency,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Events with their tier schedules, behind generated keys
    event_meta: SlotMap<EventKey, Event>,

    /// String key -> `SlotMap` key mappings for lookups
    event_keys: FxHashMap<String, EventKey>,

    /// Promotional codes, matched case-insensitively by code string
    codes: Vec<PromotionalCode<'a>>,

    /// Tickets on sale
    tickets: Vec<Ticket<'a>>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            event_meta: SlotMap::with_key(),
            event_keys: FxHashMap::default(),
            codes: Vec::new(),
            tickets: Vec::new(),
            currency: None,
        }
    }

    /// Load events and their tier schedules from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_events(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("events").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: events::EventsFixture = serde_norway::from_str(&contents)?;

        for (key, event_fixture) in fixture.events {
            let event_key = self.event_meta.insert(Event::from(event_fixture));

            self.event_keys.insert(key, event_key);
        }

        Ok(self)
    }

    /// Load promotional codes from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a code row
    /// sets both or neither discount field, if an amount is malformed or in
    /// a mismatched currency, or if a restricted code references an unknown
    /// event.
    pub fn load_codes(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("codes").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: codes::CodesFixture = serde_norway::from_str(&contents)?;

        for (code_string, code_fixture) in fixture.codes {
            let discount = match (code_fixture.percent, code_fixture.amount.as_deref()) {
                (Some(percent), None) => {
                    CodeDiscount::PercentOff(DiscountRate::from_percent(percent))
                }
                (None, Some(amount)) => {
                    let (minor_units, currency) = parse_price(amount)?;

                    self.check_currency(currency)?;

                    CodeDiscount::AmountOff(Money::from_minor(minor_units, currency))
                }
                _ => return Err(FixtureError::CodeDiscountShape(code_string)),
            };

            let mut code = PromotionalCode::new(
                code_string,
                discount,
                code_fixture.valid_from,
                code_fixture.valid_until,
            )
            .with_used_count(code_fixture.used);

            if let Some(limit) = code_fixture.usage_limit {
                code = code.with_usage_limit(limit);
            }

            if let Some(event_names) = code_fixture.events {
                let mut event_keys = Vec::with_capacity(event_names.len());

                for event_name in event_names {
                    let event_key = self
                        .event_keys
                        .get(&event_name)
                        .ok_or_else(|| FixtureError::EventNotFound(event_name.clone()))?;

                    event_keys.push(*event_key);
                }

                code = code.for_events(event_keys);
            }

            self.codes.push(code);
        }

        Ok(self)
    }

    /// Load tickets from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price is
    /// malformed or in a mismatched currency, or if a referenced event does
    /// not exist.
    pub fn load_tickets(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("tickets").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: tickets::TicketsFixture = serde_norway::from_str(&contents)?;

        for ticket_fixture in fixture.tickets {
            let event_key = *self
                .event_keys
                .get(&ticket_fixture.event)
                .ok_or_else(|| FixtureError::EventNotFound(ticket_fixture.event.clone()))?;

            let (minor_units, currency) = parse_price(&ticket_fixture.price)?;

            self.check_currency(currency)?;

            self.tickets.push(Ticket::new(
                ticket_fixture.name,
                event_key,
                Money::from_minor(minor_units, currency),
            ));
        }

        Ok(self)
    }

    /// Load a complete fixture set (events, codes, and tickets with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_events(name)?
            .load_codes(name)?
            .load_tickets(name)?;

        Ok(fixture)
    }

    /// Get an event by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found.
    pub fn event(&self, key: &str) -> Result<&Event, FixtureError> {
        let event_key = self
            .event_keys
            .get(key)
            .ok_or_else(|| FixtureError::EventNotFound(key.to_string()))?;

        self.event_meta
            .get(*event_key)
            .ok_or_else(|| FixtureError::EventNotFound(key.to_string()))
    }

    /// Get an event key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found.
    pub fn event_key(&self, key: &str) -> Result<EventKey, FixtureError> {
        self.event_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::EventNotFound(key.to_string()))
    }

    /// Get the parent event of a ticket
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket references an event outside this
    /// fixture set.
    pub fn event_for(&self, ticket: &Ticket<'a>) -> Result<&Event, FixtureError> {
        self.event_meta
            .get(ticket.event())
            .ok_or_else(|| FixtureError::EventNotFound(format!("{:?}", ticket.event())))
    }

    /// Look up a promotional code by a buyer-entered string, case-insensitively
    ///
    /// # Errors
    ///
    /// Returns an error if no code matches.
    pub fn code(&self, entered: &str) -> Result<&PromotionalCode<'a>, FixtureError> {
        self.codes
            .iter()
            .find(|code| code.matches(entered))
            .ok_or_else(|| FixtureError::CodeNotFound(entered.to_string()))
    }

    /// Get a ticket by its name
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket is not found.
    pub fn ticket(&self, name: &str) -> Result<&Ticket<'a>, FixtureError> {
        self.tickets
            .iter()
            .find(|ticket| ticket.name() == name)
            .ok_or_else(|| FixtureError::TicketNotFound(name.to_string()))
    }

    /// Get all tickets
    pub fn tickets(&self) -> &[Ticket<'a>] {
        &self.tickets
    }

    /// Get all promotional codes
    pub fn codes(&self) -> &[PromotionalCode<'a>] {
        &self.codes
    }

    /// Get the event `SlotMap`
    pub fn events(&self) -> &SlotMap<EventKey, Event> {
        &self.event_meta
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no priced rows have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    fn check_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        if let Some(existing) = self.currency {
            if existing != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            self.currency = Some(currency);
        }

        Ok(())
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse price string (e.g., "80.00 EUR") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_events_codes_and_tickets() -> TestResult {
        let mut fixture = Fixture::new();

        fixture
            .load_events("weekend")?
            .load_codes("weekend")?
            .load_tickets("weekend")?;

        assert_eq!(fixture.event_keys.len(), 2);

        let marathon = fixture.event("marathon")?;

        assert_eq!(marathon.name, "Harbour Marathon");
        assert_eq!(marathon.schedule.len(), 2);

        assert_eq!(fixture.codes().len(), 2);
        assert_eq!(fixture.tickets().len(), 3);
        assert_eq!(fixture.currency()?, EUR);

        Ok(())
    }

    #[test]
    fn fixture_from_set_loads_all_fixtures() -> TestResult {
        let fixture = Fixture::from_set("weekend")?;

        assert_eq!(fixture.event_keys.len(), 2);
        assert_eq!(fixture.codes().len(), 2);
        assert_eq!(fixture.tickets().len(), 3);

        Ok(())
    }

    #[test]
    fn fixture_code_lookup_is_case_insensitive() -> TestResult {
        let fixture = Fixture::from_set("weekend")?;

        assert_eq!(fixture.code("club10")?.code(), "CLUB10");

        Ok(())
    }

    #[test]
    fn fixture_code_not_found_returns_error() -> TestResult {
        let fixture = Fixture::from_set("weekend")?;
        let result = fixture.code("NOSUCH");

        assert!(matches!(result, Err(FixtureError::CodeNotFound(_))));

        Ok(())
    }

    #[test]
    fn fixture_ticket_not_found_returns_error() -> TestResult {
        let fixture = Fixture::from_set("weekend")?;
        let result = fixture.ticket("Relay Team");

        assert!(matches!(result, Err(FixtureError::TicketNotFound(_))));

        Ok(())
    }

    #[test]
    fn fixture_event_not_found_returns_error() {
        let fixture = Fixture::new();
        let result = fixture.event("nonexistent");

        assert!(matches!(result, Err(FixtureError::EventNotFound(_))));
    }

    #[test]
    fn fixture_no_currency_returns_error() {
        let fixture = Fixture::new();
        let result = fixture.currency();

        assert!(matches!(result, Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn fixture_rejects_currency_mismatch() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "events",
            "mixed",
            "events:\n  sprint:\n    name: Sprint\n",
        )?;

        write_fixture(
            dir.path(),
            "codes",
            "mixed",
            concat!(
                "codes:\n",
                "  OFF5:\n",
                "    amount: 5.00 USD\n",
                "    valid_from: 2026-01-01T00:00:00Z\n",
                "    valid_until: 2026-12-31T23:59:59Z\n",
            ),
        )?;

        write_fixture(
            dir.path(),
            "tickets",
            "mixed",
            "tickets:\n  - name: Sprint Adult\n    event: sprint\n    price: 10.00 EUR\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_events("mixed")?.load_codes("mixed")?;

        let result = fixture.load_tickets("mixed");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn fixture_rejects_code_with_both_discount_fields() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "codes",
            "shape",
            concat!(
                "codes:\n",
                "  BROKEN:\n",
                "    percent: 10\n",
                "    amount: 5.00 EUR\n",
                "    valid_from: 2026-01-01T00:00:00Z\n",
                "    valid_until: 2026-12-31T23:59:59Z\n",
            ),
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_codes("shape");

        assert!(matches!(result, Err(FixtureError::CodeDiscountShape(_))));

        Ok(())
    }

    #[test]
    fn fixture_rejects_code_with_no_discount_fields() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "codes",
            "shape",
            concat!(
                "codes:\n",
                "  BROKEN:\n",
                "    valid_from: 2026-01-01T00:00:00Z\n",
                "    valid_until: 2026-12-31T23:59:59Z\n",
            ),
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_codes("shape");

        assert!(matches!(result, Err(FixtureError::CodeDiscountShape(_))));

        Ok(())
    }

    #[test]
    fn fixture_rejects_restricted_code_with_unknown_event() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "codes",
            "orphan",
            concat!(
                "codes:\n",
                "  LOST10:\n",
                "    percent: 10\n",
                "    valid_from: 2026-01-01T00:00:00Z\n",
                "    valid_until: 2026-12-31T23:59:59Z\n",
                "    events:\n",
                "      - nonexistent\n",
            ),
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_codes("orphan");

        assert!(matches!(result, Err(FixtureError::EventNotFound(_))));

        Ok(())
    }

    #[test]
    fn parse_price_reads_major_units_and_currency() -> TestResult {
        let (minor_units, currency) = parse_price("80.00 EUR")?;

        assert_eq!(minor_units, 8000);
        assert_eq!(currency, EUR);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_malformed_strings() {
        assert!(matches!(
            parse_price("80.00"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("eighty EUR"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        assert!(matches!(
            parse_price("80.00 XXX"),
            Err(FixtureError::UnknownCurrency(_))
        ));
    }
}
