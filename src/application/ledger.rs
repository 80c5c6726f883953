use crate::domain::money::Money;
use crate::domain::order::OrderId;
use crate::domain::payment::PaymentId;
use crate::domain::ports::PaymentStore;
use crate::error::Result;

/// Sum of the approved payments of an order.
///
/// Pending and reproved payments contribute nothing. Store failures are
/// returned unchanged.
pub async fn get_paid_amount(payments: &dyn PaymentStore, order_id: OrderId) -> Result<Money> {
    paid_amount(payments, order_id, None).await
}

/// Sum of the approved payments of an order other than `payment_id`.
pub async fn get_paid_amount_excluding(
    payments: &dyn PaymentStore,
    order_id: OrderId,
    payment_id: PaymentId,
) -> Result<Money> {
    paid_amount(payments, order_id, Some(payment_id)).await
}

async fn paid_amount(
    payments: &dyn PaymentStore,
    order_id: OrderId,
    excluded: Option<PaymentId>,
) -> Result<Money> {
    let payments = payments.find_by_order_id(order_id).await?;
    Money::try_sum(
        payments
            .iter()
            .filter(|payment| payment.is_valid() && Some(payment.id) != excluded)
            .map(|payment| Money::from(payment.amount)),
    )
}
