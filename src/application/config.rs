use crate::domain::charge::FeeSchedule;
use clap::ValueEnum;

/// What processing a payment that already has an outcome does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReprocessPolicy {
    /// Apply the new outcome again. A second approval derives a second charge.
    #[default]
    Overwrite,
    /// Fail with `AlreadyProcessed` before touching any store.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SettlementConfig {
    pub reprocess: ReprocessPolicy,
    pub fees: FeeSchedule,
}

impl SettlementConfig {
    pub fn with_reprocess(mut self, reprocess: ReprocessPolicy) -> Self {
        self.reprocess = reprocess;
        self
    }

    pub fn with_fees(mut self, fees: FeeSchedule) -> Self {
        self.fees = fees;
        self
    }
}
