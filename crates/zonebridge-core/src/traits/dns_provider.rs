// # DNS Provider Trait
//
// Interface to the authoritative DNS provider's zone/record API.
//
// ## Implementations
//
// - Cloudflare: `zonebridge-provider-cloudflare` crate

use async_trait::async_trait;

use crate::types::{RecordSubmission, TargetRecord, Zone};

/// Trait for DNS provider implementations
///
/// Every method is a single API call against a live account; there is no
/// dry-run mode and the provider does not guarantee idempotence for the
/// create operations — the workflows compensate by checking ledger state
/// before provisioning. No retry, backoff or caching happens at this
/// layer; errors propagate to the workflow that issued the call.
///
/// # Thread Safety
///
/// Implementations must be thread-safe: record creation during
/// onboarding calls `create_record` from multiple tasks at once.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Create the zone for a domain under the configured account
    ///
    /// # Returns
    ///
    /// - `Ok(Zone)`: the new zone, including its assigned nameservers
    /// - `Err(Error)`: the provider reported failure, or transport failed
    async fn create_zone(&self, domain: &str) -> Result<Zone, crate::Error>;

    /// Look up an existing zone by domain name
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Zone))`: the zone currently serving the domain
    /// - `Ok(None)`: the provider has no zone for the domain
    /// - `Err(Error)`: the lookup itself failed
    async fn lookup_zone_by_name(&self, domain: &str) -> Result<Option<Zone>, crate::Error>;

    /// Submit one record creation into a zone
    ///
    /// An API-level rejection is NOT an error: it is returned as an
    /// unaccepted [`RecordSubmission`] so the caller can aggregate
    /// per-record outcomes. Only transport/parse failures are `Err`.
    async fn create_record(
        &self,
        zone_id: &str,
        record: &TargetRecord,
    ) -> Result<RecordSubmission, crate::Error>;

    /// Delete a zone by id
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: the provider reported success
    /// - `Ok(false)`: the provider reported failure
    /// - `Err(Error)`: transport/parse failure
    async fn delete_zone(&self, zone_id: &str) -> Result<bool, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
