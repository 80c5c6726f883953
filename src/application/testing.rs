//! Store doubles and fixtures shared by the application tests.

use super::config::SettlementConfig;
use super::get_cashout::GetCashout;
use super::process_payment::ProcessPayment;
use crate::domain::charge::Charge;
use crate::domain::money::{Amount, Money};
use crate::domain::order::{Order, OrderId};
use crate::domain::payment::{Payment, PaymentId, PaymentStatus};
use crate::domain::ports::{ChargeStore, OrderStore, PaymentStore};
use crate::error::{Result, SettlementError};
use crate::infrastructure::in_memory::{
    InMemoryChargeStore, InMemoryOrderStore, InMemoryPaymentStore,
};
use async_trait::async_trait;
use rust_decimal::Decimal;

pub struct Fixture {
    pub orders: InMemoryOrderStore,
    pub payments: InMemoryPaymentStore,
    pub charges: InMemoryChargeStore,
}

impl Default for Fixture {
    fn default() -> Self {
        let payments = InMemoryPaymentStore::new();
        Self {
            orders: InMemoryOrderStore::new(),
            charges: InMemoryChargeStore::new(payments.clone()),
            payments,
        }
    }
}

impl Fixture {
    pub async fn with_order(id: OrderId, amount: Decimal) -> Self {
        let fx = Self::default();
        fx.orders
            .insert(Order::new(id, Money::new(amount)))
            .await
            .unwrap();
        fx
    }

    pub async fn pending_payment(&self, order_id: OrderId, amount: Decimal, kind: &str) -> Payment {
        let payment = Payment::new(order_id, Amount::new(amount).unwrap(), kind);
        self.payments.insert(payment).await.unwrap()
    }

    pub fn process_payment(&self, config: SettlementConfig) -> ProcessPayment<'_> {
        ProcessPayment::new(&self.orders, &self.payments, &self.charges, config)
    }

    pub fn get_cashout(&self) -> GetCashout<'_> {
        GetCashout::new(&self.orders, &self.payments, &self.charges)
    }
}

pub fn payment_with(order_id: OrderId, amount: Decimal, status: PaymentStatus) -> Payment {
    let mut payment = Payment::new(order_id, Amount::new(amount).unwrap(), "Cash");
    payment.status = status;
    payment
}

fn unavailable() -> SettlementError {
    SettlementError::IoError(std::io::Error::other("store unavailable"))
}

pub struct FailingOrderStore;

#[async_trait]
impl OrderStore for FailingOrderStore {
    async fn find_by_id(&self, _id: OrderId) -> Result<Option<Order>> {
        Err(unavailable())
    }

    async fn update(&self, _order: Order) -> Result<Order> {
        Err(unavailable())
    }

    async fn insert(&self, _order: Order) -> Result<Order> {
        Err(unavailable())
    }

    async fn all(&self) -> Result<Vec<Order>> {
        Err(unavailable())
    }
}

/// Reads go to the wrapped store, updates fail.
pub struct FailingOrderUpdateStore {
    inner: InMemoryOrderStore,
}

impl FailingOrderUpdateStore {
    pub fn wrapping(inner: InMemoryOrderStore) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl OrderStore for FailingOrderUpdateStore {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        self.inner.find_by_id(id).await
    }

    async fn update(&self, _order: Order) -> Result<Order> {
        Err(unavailable())
    }

    async fn insert(&self, order: Order) -> Result<Order> {
        self.inner.insert(order).await
    }

    async fn all(&self) -> Result<Vec<Order>> {
        self.inner.all().await
    }
}

pub struct FailingPaymentStore;

#[async_trait]
impl PaymentStore for FailingPaymentStore {
    async fn find_by_id(&self, _id: PaymentId) -> Result<Option<Payment>> {
        Err(unavailable())
    }

    async fn find_by_order_id(&self, _order_id: OrderId) -> Result<Vec<Payment>> {
        Err(unavailable())
    }

    async fn insert(&self, _payment: Payment) -> Result<Payment> {
        Err(unavailable())
    }

    async fn update(&self, _payment: Payment) -> Result<Payment> {
        Err(unavailable())
    }
}

/// An empty payment history whose inserts fail.
#[derive(Default)]
pub struct RejectingInsertPaymentStore {
    inner: InMemoryPaymentStore,
}

#[async_trait]
impl PaymentStore for RejectingInsertPaymentStore {
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_order_id(&self, order_id: OrderId) -> Result<Vec<Payment>> {
        self.inner.find_by_order_id(order_id).await
    }

    async fn insert(&self, _payment: Payment) -> Result<Payment> {
        Err(unavailable())
    }

    async fn update(&self, payment: Payment) -> Result<Payment> {
        self.inner.update(payment).await
    }
}

pub struct FailingChargeStore;

#[async_trait]
impl ChargeStore for FailingChargeStore {
    async fn insert(&self, _charge: Charge) -> Result<Charge> {
        Err(unavailable())
    }

    async fn find_by_order_id(&self, _order_id: OrderId) -> Result<Vec<Charge>> {
        Err(unavailable())
    }
}
