//! # Currencies and Amount Policy
//!
//! Amounts are carried in the smallest currency unit everywhere (paise for
//! INR, cents for USD). Callers are expected to send minor units already;
//! no conversion is applied.

use crate::error::{BrokerError, BrokerResult};
use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Minor units per major unit (paise per rupee, cents per dollar)
    pub fn minor_units(&self) -> i64 {
        100
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::INR
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Default minimum order amount: one full currency unit in minor units
pub const DEFAULT_MIN_AMOUNT: i64 = 100;

/// Default maximum order amount in minor units (5,00,000 INR in paise)
pub const DEFAULT_MAX_AMOUNT: i64 = 50_000_000;

/// Bounds applied to every requested order amount.
///
/// Each violation is a distinct rejectable condition so callers can tell a
/// malformed number apart from an out-of-range one.
#[derive(Debug, Clone, Copy)]
pub struct AmountPolicy {
    /// Minimum accepted amount, inclusive, in minor units
    pub min_amount: i64,
    /// Maximum accepted amount, inclusive, in minor units
    pub max_amount: i64,
}

impl AmountPolicy {
    pub fn new(min_amount: i64, max_amount: i64) -> Self {
        Self {
            min_amount,
            max_amount,
        }
    }

    /// Validate a requested amount against this policy.
    ///
    /// The amount arrives as an optional value because the request field
    /// itself is optional at the boundary; absence is `InvalidAmount`, not
    /// a bound violation.
    pub fn validate(&self, amount: Option<i64>) -> BrokerResult<i64> {
        let amount = amount
            .ok_or_else(|| BrokerError::InvalidAmount("amount is required".to_string()))?;

        if amount <= 0 {
            return Err(BrokerError::InvalidAmount(format!(
                "amount must be a positive integer in minor units, received {}",
                amount
            )));
        }

        if amount < self.min_amount {
            return Err(BrokerError::AmountTooSmall {
                minimum: self.min_amount,
                received: amount,
            });
        }

        if amount > self.max_amount {
            return Err(BrokerError::AmountTooLarge {
                maximum: self.max_amount,
                received: amount,
            });
        }

        Ok(amount)
    }
}

impl Default for AmountPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_AMOUNT, DEFAULT_MAX_AMOUNT)
    }
}
