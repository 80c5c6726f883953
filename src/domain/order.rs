use super::money::Money;
use super::payment::Payment;
use crate::error::SettlementError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type OrderId = u64;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
        }
    }
}

/// A debt obligation settled by one or more approved payments.
///
/// The order is `Paid` once its approved payments add up to `amount`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    /// Total debt, fixed when the order is created.
    pub amount: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: OrderId, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: OrderStatus::Pending,
            amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// What is still owed given the amount already paid.
    pub fn remaining_debt(&self, paid: Money) -> Money {
        self.amount - paid
    }

    /// Rejects a payment request larger than the remaining debt.
    ///
    /// Paying exactly the remaining debt is allowed.
    pub fn check_payment(&self, paid: Money, requested: Money) -> Result<(), SettlementError> {
        if self.remaining_debt(paid) < requested {
            return Err(SettlementError::DebtExceeded);
        }
        Ok(())
    }

    /// Applies an already-processed payment to the order.
    ///
    /// `paid` must exclude `payment` itself. Reproved and pending payments
    /// leave the order alone. An approved payment that settles the remaining
    /// debt exactly marks the order as paid; a smaller one keeps it pending.
    pub fn settle(&mut self, paid: Money, payment: &Payment) -> Result<(), SettlementError> {
        if !payment.is_valid() {
            return Ok(());
        }

        let remaining = self.remaining_debt(paid);
        let amount = Money::from(payment.amount);
        if remaining < amount {
            return Err(SettlementError::DebtExceeded);
        }
        if remaining == amount {
            self.mark_paid();
        }
        Ok(())
    }

    /// Records a write-through of the order without a status change.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn mark_paid(&mut self) {
        self.status = OrderStatus::Paid;
        self.touch();
    }
}
