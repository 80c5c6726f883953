use crate::application::engine::Command;
use crate::error::{Result, SettlementError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Create,
    Process,
}

/// One row of the operations file.
///
/// Which columns are required depends on `op`: `create` needs `order`,
/// `amount` and `kind`; `process` needs `payment` and `kind` (the outcome).
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OperationRecord {
    pub op: OperationType,
    pub order: Option<u64>,
    pub payment: Option<u64>,
    pub amount: Option<Decimal>,
    pub kind: Option<String>,
    pub details: Option<String>,
}

fn required<T>(value: Option<T>, op: &str, field: &str) -> Result<T> {
    value.ok_or_else(|| SettlementError::ValidationError(format!("{op} is missing {field}")))
}

impl TryFrom<OperationRecord> for Command {
    type Error = SettlementError;

    fn try_from(record: OperationRecord) -> Result<Self> {
        match record.op {
            OperationType::Create => Ok(Command::CreatePayment {
                order: required(record.order, "create", "order")?,
                amount: required(record.amount, "create", "amount")?,
                kind: required(record.kind, "create", "kind")?,
            }),
            OperationType::Process => Ok(Command::ProcessPayment {
                payment: required(record.payment, "process", "payment")?,
                outcome: required(record.kind, "process", "kind")?,
                details: record.details.unwrap_or_default(),
            }),
        }
    }
}

/// Reads settlement operations from a CSV source.
///
/// Whitespace is trimmed and short rows are accepted, so trailing optional
/// columns may be omitted.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    /// Creates a new `OperationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads rows and turns them into commands.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize::<OperationRecord>()
            .map(|result| result.map_err(SettlementError::from).and_then(Command::try_from))
    }
}
