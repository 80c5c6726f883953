use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettlementError {
    #[error("Payment exceeds debt")]
    DebtExceeded,
    #[error("Payment {0} was already processed")]
    AlreadyProcessed(u64),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    #[error("Amount overflow")]
    Overflow,
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl SettlementError {
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Whether this error is a rejected request rather than a fault in a collaborator.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            Self::DebtExceeded | Self::AlreadyProcessed(_) | Self::ValidationError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SettlementError>;
