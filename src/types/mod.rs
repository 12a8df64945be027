//! Core types for the EvoLaunch decision engine

mod decision;
mod metrics;
mod phase;
mod record;
mod reputation;
mod tranche;

pub use decision::{PhaseDecision, UnlockDecision};
pub use metrics::{MarketMetrics, RiskSignals, StabilityBreakdown, StabilityScore};
pub use phase::Phase;
pub use record::{CycleRecord, RECORD_VERSION};
pub use reputation::{ReputationBreakdown, ReputationScore, WalletHistory};
pub use tranche::{Tranche, VaultDefinition};
