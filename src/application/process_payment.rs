use super::config::{ReprocessPolicy, SettlementConfig};
use super::ledger::get_paid_amount_excluding;
use crate::domain::charge::Charge;
use crate::domain::payment::PaymentId;
use crate::domain::ports::{ChargeStore, OrderStore, PaymentStore};
use crate::error::{Result, SettlementError};

/// Applies a provider outcome to a payment and settles its order.
pub struct ProcessPayment<'a> {
    orders: &'a dyn OrderStore,
    payments: &'a dyn PaymentStore,
    charges: &'a dyn ChargeStore,
    config: SettlementConfig,
}

impl<'a> ProcessPayment<'a> {
    pub fn new(
        orders: &'a dyn OrderStore,
        payments: &'a dyn PaymentStore,
        charges: &'a dyn ChargeStore,
        config: SettlementConfig,
    ) -> Self {
        Self {
            orders,
            payments,
            charges,
            config,
        }
    }

    /// Processes payment `payment_id` with the provider `outcome`.
    ///
    /// The order is settled against its other approved payments, so
    /// approving the same payment again neither counts it twice nor fails an
    /// exact settlement. Writes happen in order payment, order, charge; a
    /// failing write stops the sequence and earlier writes stay applied.
    pub async fn execute(&self, payment_id: PaymentId, outcome: &str, details: &str) -> Result<()> {
        let mut payment = self
            .payments
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| SettlementError::not_found("payment", payment_id))?;

        if self.config.reprocess == ReprocessPolicy::Reject && payment.is_terminal() {
            return Err(SettlementError::AlreadyProcessed(payment_id));
        }

        let mut order = self
            .orders
            .find_by_id(payment.order_id)
            .await?
            .ok_or_else(|| SettlementError::not_found("order", payment.order_id))?;

        let paid = get_paid_amount_excluding(self.payments, order.id, payment_id).await?;
        tracing::debug!(payment_id, order_id = order.id, paid = %paid, "Processing payment");

        payment.process(outcome, details);
        order.settle(paid, &payment)?;
        order.touch();

        let payment = self.payments.update(payment).await?;
        let order = self.orders.update(order).await?;
        tracing::info!(
            payment_id,
            order_id = order.id,
            payment_status = payment.status.as_str(),
            order_status = order.status.as_str(),
            "Payment processed"
        );

        if let Some(charge) = Charge::from_payment(&payment, &self.config.fees) {
            let charge = self.charges.insert(charge).await?;
            tracing::info!(
                charge_id = charge.id,
                payment_id,
                category = charge.category.as_str(),
                amount = %charge.amount,
                "Charge derived"
            );
        }

        Ok(())
    }
}
