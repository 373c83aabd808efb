//! Rental fee arithmetic

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::PricingConfig;

/// Fees are charged in cents, half-up.
pub fn round_fee(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingPolicy {
    daily_rate: Decimal,
    late_fee_rate: Decimal,
}

impl PricingPolicy {
    pub fn new(daily_rate: Decimal, late_fee_rate: Decimal) -> Self {
        Self {
            daily_rate,
            late_fee_rate,
        }
    }

    /// Per-day price of a rental. Not rounded: it is frozen on the reservation as is.
    pub fn daily_rate(&self, price: Decimal) -> Decimal {
        price * self.daily_rate
    }

    pub fn total_fee(&self, daily_rate: Decimal, rental_days: i32) -> Decimal {
        round_fee(daily_rate * Decimal::from(rental_days))
    }

    pub fn late_fee(&self, price: Decimal, days_late: i64) -> Decimal {
        round_fee(price * self.late_fee_rate * Decimal::from(days_late))
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingConfig::default().into()
    }
}

impl From<PricingConfig> for PricingPolicy {
    fn from(config: PricingConfig) -> Self {
        Self::new(config.daily_rate, config.late_fee_rate)
    }
}
