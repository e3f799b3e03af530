// # Ledger Store Trait
//
// Interface to the relational mapping table recording which domains this
// system currently manages at the provider.
//
// ## Implementations
//
// - MySQL: `zonebridge-ledger-mysql` crate

use async_trait::async_trait;

use crate::types::LedgerEntry;

/// Trait for ledger store implementations
///
/// Each mutation is a single auto-commit statement; no transaction spans
/// the ledger and the remote provider calls, so the
/// entry-iff-zone-exists invariant is best-effort by ordering: insert
/// only after zone creation succeeded, delete only after zone deletion
/// succeeded.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Insert the row for a newly provisioned domain
    async fn insert(&self, entry: &LedgerEntry) -> Result<(), crate::Error>;

    /// Delete the row for a deprovisioned domain
    ///
    /// Deleting a domain without a row is not an error.
    async fn delete(&self, domain: &str) -> Result<(), crate::Error>;

    /// Look up the row for a domain, if this system manages it
    async fn find(&self, domain: &str) -> Result<Option<LedgerEntry>, crate::Error>;
}
