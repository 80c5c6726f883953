use crate::domain::money::{Amount, Money};
use crate::domain::order::{Order, OrderId};
use crate::error::{Result, SettlementError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct OrderRecord {
    id: OrderId,
    amount: Amount,
}

/// Reads the orders to provision from a CSV source with an `id, amount` header.
pub struct OrderReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields pending orders; amounts must be positive.
    pub fn orders(self) -> impl Iterator<Item = Result<Order>> {
        self.reader
            .into_deserialize::<OrderRecord>()
            .map(|result| {
                result
                    .map(|record| Order::new(record.id, Money::from(record.amount)))
                    .map_err(SettlementError::from)
            })
    }
}
