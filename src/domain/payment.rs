use super::money::Amount;
use super::order::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PaymentId = u64;

/// Outcome tag a payment provider reports for a successful attempt.
pub const SUCCESS_OUTCOME: &str = "Success";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Approved,
    Reproved,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Approved => "approved",
            PaymentStatus::Reproved => "reproved",
        }
    }
}

/// A single attempt to pay part or all of an order's debt.
///
/// `order_id` and `amount` are fixed at creation; only the outcome
/// (`status`, `details`) changes afterwards.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    /// Assigned by the payment store on insert; `0` until then.
    pub id: PaymentId,
    pub order_id: OrderId,
    pub amount: Amount,
    /// Free-form payment method tag, e.g. `CreditCard`.
    pub kind: String,
    pub status: PaymentStatus,
    pub details: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// A new, not yet persisted, pending payment.
    pub fn new(order_id: OrderId, amount: Amount, kind: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            order_id,
            amount,
            kind: kind.into(),
            status: PaymentStatus::Pending,
            details: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the provider outcome.
    ///
    /// `Success` approves the payment; any other outcome reproves it. There
    /// is no check on the current status here, callers decide whether a
    /// terminal payment may be processed again.
    pub fn process(&mut self, outcome: &str, details: impl Into<String>) {
        self.details = details.into();
        self.status = if outcome == SUCCESS_OUTCOME {
            PaymentStatus::Approved
        } else {
            PaymentStatus::Reproved
        };
        self.touch();
    }

    /// Only approved payments count towards an order's paid amount.
    pub fn is_valid(&self) -> bool {
        self.status == PaymentStatus::Approved
    }

    pub fn is_terminal(&self) -> bool {
        self.status != PaymentStatus::Pending
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
