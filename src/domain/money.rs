use crate::error::SettlementError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{Mul, Sub};

/// A monetary value: order totals, paid sums, remaining debt and fees.
///
/// Wraps `rust_decimal::Decimal` so settlement arithmetic is exact and can
/// never silently mix with floating point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

/// A strictly positive amount requested by a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, SettlementError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(SettlementError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = SettlementError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<Amount> for Money {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// `None` when the result does not fit a `Decimal`.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Adds up `values`, failing with `Overflow` rather than panicking.
    pub fn try_sum<I: IntoIterator<Item = Self>>(values: I) -> Result<Self, SettlementError> {
        values.into_iter().try_fold(Self::ZERO, |total, value| {
            total.checked_add(value).ok_or(SettlementError::Overflow)
        })
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

// Applying a rate to an amount, e.g. a fee percentage.
impl Mul<Decimal> for Money {
    type Output = Self;
    fn mul(self, rate: Decimal) -> Self::Output {
        Self(self.0 * rate)
    }
}
