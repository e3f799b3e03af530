// # Control Panel Trait
//
// Interface to the hosting control panel: the system of record for a
// customer's domains and DNS zones prior to migration.
//
// ## Implementations
//
// - WHM/cPanel: `zonebridge-panel-cpanel` crate

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::types::SourceRecord;

/// Trait for control-panel implementations
#[async_trait]
pub trait ControlPanel: Send + Sync {
    /// Fetch the zone records for one domain of one panel user
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<SourceRecord>)`: the zone's records, in panel order
    /// - `Err(Error)`: the panel has no account for the user/domain
    ///   pair, or transport failed
    async fn fetch_zone_records(
        &self,
        user: &str,
        domain: &str,
    ) -> Result<Vec<SourceRecord>, crate::Error>;

    /// Resolve every domain belonging to a panel user
    ///
    /// Unions the account's primary domain with its addon, parked and
    /// subdomains, deduplicated. An empty set is `Ok` — the caller
    /// decides whether that is reportable.
    async fn resolve_domains_for_user(
        &self,
        user: &str,
    ) -> Result<BTreeSet<String>, crate::Error>;
}
