use crate::domain::charge::Charge;
use crate::domain::order::{Order, OrderId};
use crate::domain::payment::{Payment, PaymentId};
use crate::domain::ports::{ChargeStore, OrderStore, PaymentStore};
use crate::error::{Result, SettlementError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Column Family for storing orders.
pub const CF_ORDERS: &str = "orders";
/// Column Family for storing payment attempts.
pub const CF_PAYMENTS: &str = "payments";
/// Column Family for storing derived charges.
pub const CF_CHARGES: &str = "charges";

/// A persistent store implementation using RocksDB.
///
/// Orders, payments and charges live in separate Column Families keyed by
/// their big-endian id. Values are JSON.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    // Serializes id allocation for payments and charges.
    id_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "orders", "payments" and "charges" column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let families = [CF_ORDERS, CF_PAYMENTS, CF_CHARGES]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, families)?;

        Ok(Self {
            db: Arc::new(db),
            id_lock: Arc::default(),
        })
    }

    fn cf(&self, name: &'static str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            SettlementError::InternalError(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    fn put<T: Serialize>(&self, cf_name: &'static str, id: u64, value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let bytes = serde_json::to_vec(value).map_err(|e| {
            SettlementError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;
        self.db.put_cf(cf, id.to_be_bytes(), bytes)?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, cf_name: &'static str, id: u64) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(cf, id.to_be_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn exists(&self, cf_name: &'static str, id: u64) -> Result<bool> {
        let cf = self.cf(cf_name)?;
        Ok(self.db.get_pinned_cf(cf, id.to_be_bytes())?.is_some())
    }

    fn scan<T: DeserializeOwned>(&self, cf_name: &'static str) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut values = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            values.push(decode(&value)?);
        }
        Ok(values)
    }

    /// Next free id in a column family: the highest key plus one.
    fn next_id(&self, cf_name: &'static str) -> Result<u64> {
        let cf = self.cf(cf_name)?;
        match self.db.iterator_cf(cf, IteratorMode::End).next() {
            Some(item) => {
                let (key, _value) = item?;
                let key: [u8; 8] = key[..].try_into().map_err(|_| {
                    SettlementError::InternalError(Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Malformed key in {cf_name}"),
                    )))
                })?;
                Ok(u64::from_be_bytes(key) + 1)
            }
            None => Ok(1),
        }
    }

    fn lock_ids(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.id_lock.lock().map_err(|_| {
            SettlementError::InternalError(Box::new(std::io::Error::other(
                "Id allocation lock poisoned",
            )))
        })
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        SettlementError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Deserialization error: {}", e),
        )))
    })
}

#[async_trait]
impl OrderStore for RocksDBStore {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        self.get(CF_ORDERS, id)
    }

    async fn update(&self, order: Order) -> Result<Order> {
        if !self.exists(CF_ORDERS, order.id)? {
            return Err(SettlementError::not_found("order", order.id));
        }
        self.put(CF_ORDERS, order.id, &order)?;
        Ok(order)
    }

    async fn insert(&self, order: Order) -> Result<Order> {
        self.put(CF_ORDERS, order.id, &order)?;
        Ok(order)
    }

    async fn all(&self) -> Result<Vec<Order>> {
        self.scan(CF_ORDERS)
    }
}

#[async_trait]
impl PaymentStore for RocksDBStore {
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>> {
        self.get(CF_PAYMENTS, id)
    }

    async fn find_by_order_id(&self, order_id: OrderId) -> Result<Vec<Payment>> {
        let payments: Vec<Payment> = self.scan(CF_PAYMENTS)?;
        Ok(payments
            .into_iter()
            .filter(|payment| payment.order_id == order_id)
            .collect())
    }

    async fn insert(&self, mut payment: Payment) -> Result<Payment> {
        let _guard = self.lock_ids()?;
        payment.id = self.next_id(CF_PAYMENTS)?;
        self.put(CF_PAYMENTS, payment.id, &payment)?;
        Ok(payment)
    }

    async fn update(&self, payment: Payment) -> Result<Payment> {
        if !self.exists(CF_PAYMENTS, payment.id)? {
            return Err(SettlementError::not_found("payment", payment.id));
        }
        self.put(CF_PAYMENTS, payment.id, &payment)?;
        Ok(payment)
    }
}

#[async_trait]
impl ChargeStore for RocksDBStore {
    async fn insert(&self, mut charge: Charge) -> Result<Charge> {
        let _guard = self.lock_ids()?;
        charge.id = self.next_id(CF_CHARGES)?;
        self.put(CF_CHARGES, charge.id, &charge)?;
        Ok(charge)
    }

    async fn find_by_order_id(&self, order_id: OrderId) -> Result<Vec<Charge>> {
        let payment_ids: HashSet<PaymentId> =
            PaymentStore::find_by_order_id(self, order_id)
                .await?
                .into_iter()
                .map(|payment| payment.id)
                .collect();

        let charges: Vec<Charge> = self.scan(CF_CHARGES)?;
        Ok(charges
            .into_iter()
            .filter(|charge| payment_ids.contains(&charge.payment_id))
            .collect())
    }
}
