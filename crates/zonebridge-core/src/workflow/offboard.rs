//! Domain offboarding: tear down provider zones and ledger rows

use std::sync::Arc;

use tracing::info;

use crate::error::{Error, Result};
use crate::event::OffboardEvent;
use crate::traits::{ControlPanel, DnsProvider, LedgerStore};

/// One domain successfully cleaned up during an offboarding run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCleanup {
    pub domain: String,
    pub zone_id: String,
}

/// Result of a completed offboarding run
#[derive(Debug, Clone)]
pub struct OffboardReport {
    pub user: String,
    pub domains: Vec<DomainCleanup>,
}

/// Deprovisions every domain of one panel user
///
/// Domains are processed sequentially in set order. The run fails fast:
/// the first domain whose zone cannot be found or deleted aborts the
/// remaining domains, leaving their ledger rows intact. The ledger row
/// for a domain is removed only after its zone deletion succeeded.
pub struct OffboardingWorkflow {
    panel: Arc<dyn ControlPanel>,
    provider: Arc<dyn DnsProvider>,
    ledger: Arc<dyn LedgerStore>,
}

impl OffboardingWorkflow {
    /// Create a new offboarding workflow
    pub fn new(
        panel: Arc<dyn ControlPanel>,
        provider: Arc<dyn DnsProvider>,
        ledger: Arc<dyn LedgerStore>,
    ) -> Self {
        Self {
            panel,
            provider,
            ledger,
        }
    }

    /// Run the workflow for one trigger event
    pub async fn run(&self, event: &OffboardEvent) -> Result<OffboardReport> {
        let user = &event.user;
        info!("User: {user}");

        let domains = self.panel.resolve_domains_for_user(user).await?;
        if domains.is_empty() {
            return Err(Error::control_panel(format!(
                "no domains found under user {user}"
            )));
        }
        info!("Domains for {user}: {domains:?}");

        let mut cleaned = Vec::new();
        for domain in &domains {
            info!(
                "Removing zone {domain} at {}",
                self.provider.provider_name()
            );
            let zone = self
                .provider
                .lookup_zone_by_name(domain)
                .await?
                .ok_or_else(|| Error::provider(format!("no zone found for domain {domain}")))?;

            if !self.provider.delete_zone(&zone.id).await? {
                return Err(Error::provider(format!(
                    "failed to delete zone {} for domain {domain}",
                    zone.id
                )));
            }
            self.ledger.delete(domain).await?;
            info!("Deleted zone {domain}");

            cleaned.push(DomainCleanup {
                domain: domain.clone(),
                zone_id: zone.id,
            });
        }

        Ok(OffboardReport {
            user: user.clone(),
            domains: cleaned,
        })
    }
}
