use crate::application::config::SettlementConfig;
use crate::application::engine::SettlementEngine;
use crate::domain::charge::{Charge, ChargeId};
use crate::domain::order::{Order, OrderId};
use crate::domain::payment::{Payment, PaymentId};
use crate::domain::ports::{ChargeStore, OrderStore, PaymentStore};
use crate::error::{Result, SettlementError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for orders.
///
/// Uses `Arc<RwLock<HashMap<OrderId, Order>>>` so clones share the same data.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn update(&self, order: Order) -> Result<Order> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&order.id) {
            Some(stored) => {
                *stored = order.clone();
                Ok(order)
            }
            None => Err(SettlementError::not_found("order", order.id)),
        }
    }

    async fn insert(&self, order: Order) -> Result<Order> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn all(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.values().cloned().collect())
    }
}

/// A thread-safe in-memory store for payments.
///
/// Ids are assigned sequentially starting at 1.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<PaymentId, Payment>>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.get(&id).cloned())
    }

    async fn find_by_order_id(&self, order_id: OrderId) -> Result<Vec<Payment>> {
        let payments = self.payments.read().await;
        let mut found: Vec<Payment> = payments
            .values()
            .filter(|payment| payment.order_id == order_id)
            .cloned()
            .collect();
        found.sort_by_key(|payment| payment.id);
        Ok(found)
    }

    async fn insert(&self, mut payment: Payment) -> Result<Payment> {
        let mut payments = self.payments.write().await;
        payment.id = payments.keys().max().map_or(1, |last| last + 1);
        payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn update(&self, payment: Payment) -> Result<Payment> {
        let mut payments = self.payments.write().await;
        match payments.get_mut(&payment.id) {
            Some(stored) => {
                *stored = payment.clone();
                Ok(payment)
            }
            None => Err(SettlementError::not_found("payment", payment.id)),
        }
    }
}

/// A thread-safe in-memory store for charges.
///
/// Charges only reference their payment, so lookups by order go through the
/// shared payment store.
#[derive(Clone)]
pub struct InMemoryChargeStore {
    charges: Arc<RwLock<HashMap<ChargeId, Charge>>>,
    payments: InMemoryPaymentStore,
}

impl InMemoryChargeStore {
    /// Creates a new, empty charge store joined to `payments`.
    pub fn new(payments: InMemoryPaymentStore) -> Self {
        Self {
            charges: Arc::default(),
            payments,
        }
    }
}

#[async_trait]
impl ChargeStore for InMemoryChargeStore {
    async fn insert(&self, mut charge: Charge) -> Result<Charge> {
        let mut charges = self.charges.write().await;
        charge.id = charges.keys().max().map_or(1, |last| last + 1);
        charges.insert(charge.id, charge.clone());
        Ok(charge)
    }

    async fn find_by_order_id(&self, order_id: OrderId) -> Result<Vec<Charge>> {
        let payment_ids: HashSet<PaymentId> = self
            .payments
            .find_by_order_id(order_id)
            .await?
            .into_iter()
            .map(|payment| payment.id)
            .collect();

        let charges = self.charges.read().await;
        let mut found: Vec<Charge> = charges
            .values()
            .filter(|charge| payment_ids.contains(&charge.payment_id))
            .cloned()
            .collect();
        found.sort_by_key(|charge| charge.id);
        Ok(found)
    }
}

/// Builds an engine backed entirely by in-memory stores.
pub fn in_memory_engine(config: SettlementConfig) -> SettlementEngine {
    let payments = InMemoryPaymentStore::new();
    SettlementEngine::new(
        Box::new(InMemoryOrderStore::new()),
        Box::new(payments.clone()),
        Box::new(InMemoryChargeStore::new(payments)),
        config,
    )
}
