use super::ledger::get_paid_amount;
use crate::domain::money::{Amount, Money};
use crate::domain::order::OrderId;
use crate::domain::payment::Payment;
use crate::domain::ports::{OrderStore, PaymentStore};
use crate::error::{Result, SettlementError};
use rust_decimal::Decimal;

/// Registers a pending payment against an order's remaining debt.
pub struct CreatePayment<'a> {
    orders: &'a dyn OrderStore,
    payments: &'a dyn PaymentStore,
}

impl<'a> CreatePayment<'a> {
    pub fn new(orders: &'a dyn OrderStore, payments: &'a dyn PaymentStore) -> Self {
        Self { orders, payments }
    }

    /// Persists a new pending payment unless it would exceed what the order still owes.
    ///
    /// Nothing is written when validation fails. The order itself is never modified.
    pub async fn execute(
        &self,
        order_id: OrderId,
        amount: Decimal,
        kind: &str,
    ) -> Result<Payment> {
        let amount = Amount::new(amount)?;
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| SettlementError::not_found("order", order_id))?;

        let payment = Payment::new(order.id, amount, kind);
        let paid = get_paid_amount(self.payments, order.id).await?;
        if let Err(e) = order.check_payment(paid, Money::from(amount)) {
            tracing::debug!(
                order_id,
                paid = %paid,
                requested = %Money::from(amount),
                "Payment request exceeds remaining debt"
            );
            return Err(e);
        }

        let payment = self.payments.insert(payment).await?;
        tracing::info!(
            payment_id = payment.id,
            order_id,
            amount = %Money::from(amount),
            kind,
            "Payment created"
        );
        Ok(payment)
    }
}
