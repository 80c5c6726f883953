use super::ledger::get_paid_amount;
use crate::domain::money::Money;
use crate::domain::order::{Order, OrderId, OrderStatus};
use crate::domain::ports::{ChargeStore, OrderStore, PaymentStore};
use crate::error::{Result, SettlementError};
use serde::Serialize;

/// Settlement summary of an order.
///
/// `is_paid` is derived from the approved payments, not read from the
/// order's stored status.
#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
pub struct CashoutView {
    #[serde(skip)]
    pub order_id: OrderId,
    pub cashed_debt: Money,
    pub remaining_debt: Money,
    pub charges: Money,
    pub is_paid: bool,
}

pub struct GetCashout<'a> {
    orders: &'a dyn OrderStore,
    payments: &'a dyn PaymentStore,
    charges: &'a dyn ChargeStore,
}

impl<'a> GetCashout<'a> {
    pub fn new(
        orders: &'a dyn OrderStore,
        payments: &'a dyn PaymentStore,
        charges: &'a dyn ChargeStore,
    ) -> Self {
        Self {
            orders,
            payments,
            charges,
        }
    }

    pub async fn execute(&self, order_id: OrderId) -> Result<(Order, CashoutView)> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| SettlementError::not_found("order", order_id))?;
        let view = self.view(&order).await?;
        Ok((order, view))
    }

    /// Builds the view for an order that is already loaded.
    pub async fn view(&self, order: &Order) -> Result<CashoutView> {
        let paid = get_paid_amount(self.payments, order.id).await?;
        let charges = self.charges.find_by_order_id(order.id).await?;
        let charges = Money::try_sum(charges.into_iter().map(|charge| charge.amount))?;

        let view = CashoutView {
            order_id: order.id,
            cashed_debt: paid,
            remaining_debt: order.remaining_debt(paid),
            charges,
            is_paid: paid >= order.amount,
        };

        if view.is_paid != (order.status == OrderStatus::Paid) {
            tracing::warn!(
                order_id = order.id,
                status = order.status.as_str(),
                cashed_debt = %view.cashed_debt,
                "Stored order status disagrees with approved payments"
            );
        }
        Ok(view)
    }
}
