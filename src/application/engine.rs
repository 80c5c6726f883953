use super::config::SettlementConfig;
use super::create_payment::CreatePayment;
use super::get_cashout::{CashoutView, GetCashout};
use super::process_payment::ProcessPayment;
use crate::domain::order::{Order, OrderId};
use crate::domain::payment::{Payment, PaymentId};
use crate::domain::ports::{ChargeStoreBox, OrderStoreBox, PaymentStoreBox};
use crate::error::Result;
use rust_decimal::Decimal;

/// A settlement request coming from an outer interface.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreatePayment {
        order: OrderId,
        amount: Decimal,
        kind: String,
    },
    ProcessPayment {
        payment: PaymentId,
        outcome: String,
        details: String,
    },
}

/// The main entry point for settling orders.
///
/// `SettlementEngine` owns the storage backends and runs each use case to
/// completion before returning, so commands submitted one after another are
/// applied in order.
pub struct SettlementEngine {
    orders: OrderStoreBox,
    payments: PaymentStoreBox,
    charges: ChargeStoreBox,
    config: SettlementConfig,
}

impl SettlementEngine {
    /// Creates a new `SettlementEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `orders` - The store for orders.
    /// * `payments` - The store for payment attempts.
    /// * `charges` - The store for derived fees.
    /// * `config` - Reprocessing policy and fee schedule.
    pub fn new(
        orders: OrderStoreBox,
        payments: PaymentStoreBox,
        charges: ChargeStoreBox,
        config: SettlementConfig,
    ) -> Self {
        Self {
            orders,
            payments,
            charges,
            config,
        }
    }

    /// Stores an order unless one with the same id already exists.
    ///
    /// Returns whether the order was inserted. Existing orders keep their
    /// settlement state.
    pub async fn provision_order(&self, order: Order) -> Result<bool> {
        if self.orders.find_by_id(order.id).await?.is_some() {
            tracing::debug!(order_id = order.id, "Order already provisioned");
            return Ok(false);
        }
        let order = self.orders.insert(order).await?;
        tracing::debug!(order_id = order.id, amount = %order.amount, "Order provisioned");
        Ok(true)
    }

    pub async fn create_payment(
        &self,
        order_id: OrderId,
        amount: Decimal,
        kind: &str,
    ) -> Result<Payment> {
        CreatePayment::new(self.orders.as_ref(), self.payments.as_ref())
            .execute(order_id, amount, kind)
            .await
    }

    pub async fn process_payment(
        &self,
        payment_id: PaymentId,
        outcome: &str,
        details: &str,
    ) -> Result<()> {
        ProcessPayment::new(
            self.orders.as_ref(),
            self.payments.as_ref(),
            self.charges.as_ref(),
            self.config,
        )
        .execute(payment_id, outcome, details)
        .await
    }

    pub async fn get_cashout(&self, order_id: OrderId) -> Result<(Order, CashoutView)> {
        self.cashout().execute(order_id).await
    }

    /// Submits a command for processing.
    pub async fn execute(&self, command: Command) -> Result<()> {
        match command {
            Command::CreatePayment {
                order,
                amount,
                kind,
            } => self.create_payment(order, amount, &kind).await.map(|_| ()),
            Command::ProcessPayment {
                payment,
                outcome,
                details,
            } => self.process_payment(payment, &outcome, &details).await,
        }
    }

    /// Consumes the engine and returns every order with its cashout, sorted by order id.
    pub async fn into_cashouts(self) -> Result<Vec<(Order, CashoutView)>> {
        let mut orders = self.orders.all().await?;
        orders.sort_by_key(|order| order.id);

        let cashout = self.cashout();
        let mut results = Vec::with_capacity(orders.len());
        for order in orders {
            let view = cashout.view(&order).await?;
            results.push((order, view));
        }
        Ok(results)
    }

    fn cashout(&self) -> GetCashout<'_> {
        GetCashout::new(
            self.orders.as_ref(),
            self.payments.as_ref(),
            self.charges.as_ref(),
        )
    }
}
