use super::charge::Charge;
use super::order::{Order, OrderId};
use super::payment::{Payment, PaymentId};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;
    async fn update(&self, order: Order) -> Result<Order>;
    /// Provisions a new order. Orders are created outside the settlement flow.
    async fn insert(&self, order: Order) -> Result<Order>;
    async fn all(&self) -> Result<Vec<Order>>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>>;
    async fn find_by_order_id(&self, order_id: OrderId) -> Result<Vec<Payment>>;
    /// Persists a new payment and returns it with its assigned id.
    async fn insert(&self, payment: Payment) -> Result<Payment>;
    async fn update(&self, payment: Payment) -> Result<Payment>;
}

#[async_trait]
pub trait ChargeStore: Send + Sync {
    /// Persists a new charge and returns it with its assigned id.
    async fn insert(&self, charge: Charge) -> Result<Charge>;
    /// Charges of every payment belonging to the order.
    async fn find_by_order_id(&self, order_id: OrderId) -> Result<Vec<Charge>>;
}

pub type OrderStoreBox = Box<dyn OrderStore>;
pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type ChargeStoreBox = Box<dyn ChargeStore>;
