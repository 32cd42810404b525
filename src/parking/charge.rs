use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::domain::{SlotType, Ticket};

/// Fee policy applied when a vehicle leaves. `now` is always supplied by the
/// caller so pricing is deterministic.
pub trait ChargeStrategy: Send + Sync {
    fn calculate_charge(&self, ticket: &Ticket, now: DateTime<Utc>) -> f64;

    fn name(&self) -> &'static str;
}

/// Hours between issue and `now` at full clock precision, never negative.
fn elapsed_hours(ticket: &Ticket, now: DateTime<Utc>) -> f64 {
    (now - ticket.issued_at)
        .to_std()
        .map(|elapsed| elapsed.as_secs_f64() / 3600.0)
        .unwrap_or(0.0)
}

/// Two decimal places, ties to even (0.125 -> 0.12, 0.375 -> 0.38).
fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round_ties_even() / 100.0
}

/// One hourly rate for every slot type.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedChargeStrategy {
    hourly_rate: f64,
}

impl FixedChargeStrategy {
    pub const DEFAULT_HOURLY_RATE: f64 = 20.0;

    pub fn new(hourly_rate: f64) -> Self {
        Self { hourly_rate }
    }

    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }
}

impl Default for FixedChargeStrategy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOURLY_RATE)
    }
}

impl ChargeStrategy for FixedChargeStrategy {
    fn calculate_charge(&self, ticket: &Ticket, now: DateTime<Utc>) -> f64 {
        round_to_cents(elapsed_hours(ticket, now) * self.hourly_rate)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Hourly rate chosen by the slot type recorded on the ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicChargeStrategy {
    hourly_rates: BTreeMap<SlotType, f64>,
}

impl DynamicChargeStrategy {
    /// Reference table: small 20, medium 30, large 40 per hour.
    pub fn standard() -> Self {
        Self::with_rates(BTreeMap::from([
            (SlotType::Small, 20.0),
            (SlotType::Medium, 30.0),
            (SlotType::Large, 40.0),
        ]))
    }

    /// Every [`SlotType`] must have a rate; pricing an unmapped type panics.
    pub fn with_rates(hourly_rates: BTreeMap<SlotType, f64>) -> Self {
        Self { hourly_rates }
    }

    pub fn rate_for(&self, slot_type: SlotType) -> Option<f64> {
        self.hourly_rates.get(&slot_type).copied()
    }
}

impl Default for DynamicChargeStrategy {
    fn default() -> Self {
        Self::standard()
    }
}

impl ChargeStrategy for DynamicChargeStrategy {
    fn calculate_charge(&self, ticket: &Ticket, now: DateTime<Utc>) -> f64 {
        let Some(rate) = self.rate_for(ticket.slot_type) else {
            panic!(
                "no hourly rate configured for {} slots",
                ticket.slot_type.label()
            );
        };
        round_to_cents(elapsed_hours(ticket, now) * rate)
    }

    fn name(&self) -> &'static str {
        "dynamic"
    }
}
