use super::money::Money;
use super::payment::{Payment, PaymentId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub type ChargeId = u64;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCategory {
    FinancialFee,
    ProcessFee,
    Free,
}

impl ChargeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeCategory::FinancialFee => "financial_fee",
            ChargeCategory::ProcessFee => "process_fee",
            ChargeCategory::Free => "free",
        }
    }
}

/// Immutable mapping from payment kind to fee category and from category to rate.
///
/// Kinds and categories missing from the tables fall back to `Free` and a
/// zero rate, so derivation is total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeSchedule {
    categories: &'static [(&'static str, ChargeCategory)],
    rates: &'static [(ChargeCategory, Decimal)],
}

impl FeeSchedule {
    pub const STANDARD: Self = Self::new(
        &[
            ("CreditCard", ChargeCategory::FinancialFee),
            ("CashSlip", ChargeCategory::ProcessFee),
            ("Cash", ChargeCategory::Free),
        ],
        &[
            (ChargeCategory::FinancialFee, dec!(0.1)),
            (ChargeCategory::ProcessFee, dec!(0.2)),
            (ChargeCategory::Free, dec!(0)),
        ],
    );

    pub const fn new(
        categories: &'static [(&'static str, ChargeCategory)],
        rates: &'static [(ChargeCategory, Decimal)],
    ) -> Self {
        Self { categories, rates }
    }

    pub fn category(&self, kind: &str) -> ChargeCategory {
        self.categories
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(ChargeCategory::Free, |(_, category)| *category)
    }

    pub fn rate(&self, category: ChargeCategory) -> Decimal {
        self.rates
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(Decimal::ZERO, |(_, rate)| *rate)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Fee levied on an approved payment.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Charge {
    /// Assigned by the charge store on insert; `0` until then.
    pub id: ChargeId,
    pub amount: Money,
    pub category: ChargeCategory,
    pub payment_id: PaymentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Charge {
    /// Derives the fee for `payment`, or `None` when the payment is not approved.
    pub fn from_payment(payment: &Payment, fees: &FeeSchedule) -> Option<Self> {
        if !payment.is_valid() {
            return None;
        }

        let category = fees.category(&payment.kind);
        let now = Utc::now();
        Some(Self {
            id: 0,
            amount: Money::from(payment.amount) * fees.rate(category),
            category,
            payment_id: payment.id,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Amount;

    fn approved(kind: &str, amount: Decimal) -> Payment {
        let mut payment = Payment::new(1, Amount::new(amount).unwrap(), kind);
        payment.id = 42;
        payment.process("Success", "");
        payment
    }

    #[test]
    fn test_fee_table() {
        let cases = [
            ("CreditCard", ChargeCategory::FinancialFee, dec!(10)),
            ("CashSlip", ChargeCategory::ProcessFee, dec!(20)),
            ("Cash", ChargeCategory::Free, dec!(0)),
            ("Pix", ChargeCategory::Free, dec!(0)),
            ("", ChargeCategory::Free, dec!(0)),
        ];

        for (kind, category, amount) in cases {
            let charge = Charge::from_payment(&approved(kind, dec!(100)), &FeeSchedule::STANDARD)
                .expect("approved payment yields a charge");
            assert_eq!(charge.category, category, "{kind}");
            assert_eq!(charge.amount, Money::new(amount), "{kind}");
            assert_eq!(charge.payment_id, 42);
        }
    }

    #[test]
    fn test_fee_is_exact_decimal() {
        let charge =
            Charge::from_payment(&approved("CreditCard", dec!(100.5)), &FeeSchedule::STANDARD)
                .unwrap();
        assert_eq!(charge.amount, Money::new(dec!(10.05)));
    }

    #[test]
    fn test_no_charge_for_unapproved_payment() {
        let mut payment = Payment::new(1, Amount::new(dec!(10)).unwrap(), "CreditCard");
        assert!(Charge::from_payment(&payment, &FeeSchedule::STANDARD).is_none());

        payment.process("Failure", "");
        assert!(Charge::from_payment(&payment, &FeeSchedule::STANDARD).is_none());
    }

    #[test]
    fn test_custom_schedule() {
        static CATEGORIES: [(&str, ChargeCategory); 1] = [("Cash", ChargeCategory::ProcessFee)];
        static RATES: [(ChargeCategory, Decimal); 1] = [(ChargeCategory::ProcessFee, dec!(0.5))];
        let fees = FeeSchedule::new(&CATEGORIES, &RATES);

        assert_eq!(fees.category("Cash"), ChargeCategory::ProcessFee);
        assert_eq!(fees.category("CreditCard"), ChargeCategory::Free);
        assert_eq!(fees.rate(ChargeCategory::FinancialFee), Decimal::ZERO);

        let charge = Charge::from_payment(&approved("Cash", dec!(8)), &fees).unwrap();
        assert_eq!(charge.amount, Money::new(dec!(4)));
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&ChargeCategory::FinancialFee).unwrap();
        assert_eq!(json, "\"financial_fee\"");
        assert_eq!(ChargeCategory::ProcessFee.as_str(), "process_fee");
    }
}
