//! Domain onboarding and offboarding workflows
//!
//! The workflows orchestrate the component traits:
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────────┐    ┌──────────────┐
//! │ ControlPanel │───▶│ Onboarding/          │───▶│ DnsProvider  │
//! │ (zone source)│    │ Offboarding workflow │    │ (zone target)│
//! └──────────────┘    └──────────────────────┘    └──────────────┘
//!                                │
//!                                ▼
//!                        ┌──────────────┐
//!                        │ LedgerStore  │
//!                        │ (mapping)    │
//!                        └──────────────┘
//! ```
//!
//! Onboarding: fetch the source zone, create the provider zone, record
//! the mapping, then create records concurrently under a bounded worker
//! pool. Offboarding: discover the user's domains, then per domain
//! delete the provider zone and its ledger row, failing fast.

mod offboard;
mod onboard;

pub use offboard::{DomainCleanup, OffboardReport, OffboardingWorkflow};
pub use onboard::{OnboardReport, OnboardingWorkflow};

use crate::types::RecordType;

/// Terminal status of one record-creation submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    /// The provider accepted the record
    Created,
    /// The record was not created; carries the reason (provider
    /// rejection, transport failure, or a malformed source record)
    Failed(String),
}

/// Outcome of one record in the onboarding creation batch
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub name: String,
    pub record_type: RecordType,
    pub status: RecordStatus,
}

/// Aggregate outcome of the onboarding record-creation batch
///
/// Individual failures are reported here instead of failing the
/// workflow; the zone and ledger entry are never rolled back over a
/// partial batch.
#[derive(Debug, Clone, Default)]
pub struct RecordBatchReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl RecordBatchReport {
    /// Number of records the provider accepted
    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == RecordStatus::Created)
            .count()
    }

    /// Number of records that were not created
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.created()
    }

    /// Whether every submitted record was accepted
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}
