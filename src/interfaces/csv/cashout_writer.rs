use crate::application::get_cashout::CashoutView;
use crate::domain::order::{Order, OrderId};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

const HEADER: [&str; 7] = [
    "order",
    "amount",
    "status",
    "cashed_debt",
    "remaining_debt",
    "charges",
    "is_paid",
];

#[derive(Debug, Serialize)]
struct CashoutRecord {
    order: OrderId,
    amount: Decimal,
    status: &'static str,
    cashed_debt: Decimal,
    remaining_debt: Decimal,
    charges: Decimal,
    is_paid: bool,
}

impl From<&(Order, CashoutView)> for CashoutRecord {
    fn from((order, view): &(Order, CashoutView)) -> Self {
        Self {
            order: order.id,
            amount: order.amount.value().normalize(),
            status: order.status.as_str(),
            cashed_debt: view.cashed_debt.value().normalize(),
            remaining_debt: view.remaining_debt.value().normalize(),
            charges: view.charges.value().normalize(),
            is_paid: view.is_paid,
        }
    }
}

/// Writes one cashout row per order, header first.
pub struct CashoutWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CashoutWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_cashouts(&mut self, cashouts: &[(Order, CashoutView)]) -> Result<()> {
        self.writer.write_record(HEADER)?;
        for cashout in cashouts {
            self.writer.serialize(CashoutRecord::from(cashout))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
