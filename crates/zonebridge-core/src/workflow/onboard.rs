//! Domain onboarding: control panel → DNS provider + ledger

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::event::OnboardEvent;
use crate::traits::{ControlPanel, DnsProvider, LedgerStore};
use crate::translate::translate;
use crate::types::{CONTROL_PANEL_TAG, LedgerEntry, SourceRecord, Zone};
use crate::workflow::{RecordBatchReport, RecordOutcome, RecordStatus};

/// Result of a completed onboarding run
#[derive(Debug, Clone)]
pub struct OnboardReport {
    pub user: String,
    pub domain: String,
    pub zone_id: String,
    pub ns1: String,
    pub ns2: String,
    pub records: RecordBatchReport,
}

/// Provisions one domain at the DNS provider
///
/// Step order is load-bearing: the ledger row is written only after zone
/// creation succeeded (so a row implies a zone), and always before any
/// record submission (so a partially created batch still has its
/// mapping). Per-record failures are aggregated into the report and do
/// not fail the run; every earlier failure does.
pub struct OnboardingWorkflow {
    panel: Arc<dyn ControlPanel>,
    provider: Arc<dyn DnsProvider>,
    ledger: Arc<dyn LedgerStore>,
    account_email: String,
    record_workers: usize,
}

impl OnboardingWorkflow {
    /// Create a new onboarding workflow
    ///
    /// # Parameters
    ///
    /// - `account_email`: provider account email recorded in the ledger
    /// - `record_workers`: cap on concurrent record-creation requests
    pub fn new(
        panel: Arc<dyn ControlPanel>,
        provider: Arc<dyn DnsProvider>,
        ledger: Arc<dyn LedgerStore>,
        account_email: impl Into<String>,
        record_workers: usize,
    ) -> Self {
        Self {
            panel,
            provider,
            ledger,
            account_email: account_email.into(),
            record_workers: record_workers.max(1),
        }
    }

    /// Run the workflow for one trigger event
    pub async fn run(&self, event: &OnboardEvent) -> Result<OnboardReport> {
        let user = &event.user;
        let domain = &event.domain;
        info!("User: {user}");
        info!("Domain: {domain}");

        // Re-running onboarding for a managed domain would duplicate the
        // remote zone; the provider's create is not idempotent.
        if self.ledger.find(domain).await?.is_some() {
            return Err(Error::already_managed(domain));
        }

        info!("Fetching DNS records for {domain} from the control panel");
        let records = self.panel.fetch_zone_records(user, domain).await?;
        debug!("Fetched {} zone line(s) for {domain}", records.len());

        info!("Adding zone {domain} at {}", self.provider.provider_name());
        let zone = self.provider.create_zone(domain).await?;
        let (ns1, ns2) = primary_nameservers(&zone)?;
        info!(zone_id = %zone.id, "Zone created, nameservers {ns1} / {ns2}");

        let entry = LedgerEntry {
            domain: domain.clone(),
            ns1: ns1.clone(),
            ns2: ns2.clone(),
            account_email: self.account_email.clone(),
            panel_account_id: CONTROL_PANEL_TAG,
            panel_user: user.clone(),
        };
        self.ledger.insert(&entry).await?;

        info!("Creating DNS records for {domain}");
        let report = self.create_records(&zone.id, &records).await;
        info!(
            "Record batch for {domain} finished: {} created, {} failed",
            report.created(),
            report.failed()
        );

        Ok(OnboardReport {
            user: user.clone(),
            domain: domain.clone(),
            zone_id: zone.id,
            ns1,
            ns2,
            records: report,
        })
    }

    /// Translate the source zone and submit creations concurrently,
    /// bounded at `record_workers` in-flight requests
    ///
    /// Outcomes are collected over a result channel; a failing record
    /// never aborts its siblings.
    async fn create_records(&self, zone_id: &str, records: &[SourceRecord]) -> RecordBatchReport {
        let mut batch = Vec::new();
        let mut outcomes = Vec::new();
        for record in records {
            match translate(record) {
                Ok(Some(target)) => batch.push(target),
                Ok(None) => debug!("Skipping unsupported record {}", record.name),
                Err(e) => {
                    warn!("Skipping record {}: {e}", record.name);
                    outcomes.push(RecordOutcome {
                        name: record.name.clone(),
                        record_type: record.record_type,
                        status: RecordStatus::Failed(e.to_string()),
                    });
                }
            }
        }

        if batch.is_empty() {
            if outcomes.is_empty() {
                info!("No records to create");
            }
            return RecordBatchReport { outcomes };
        }

        let semaphore = Arc::new(Semaphore::new(self.record_workers));
        let (tx, mut rx) = mpsc::channel(batch.len());

        for target in batch {
            // Acquiring here bounds the number of spawned tasks in
            // flight; the loop waits once all permits are out.
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .expect("record semaphore closed");
            let provider = Arc::clone(&self.provider);
            let zone_id = zone_id.to_string();
            let tx = tx.clone();

            tokio::spawn(async move {
                let _permit = permit;
                let status = match provider.create_record(&zone_id, &target).await {
                    Ok(submission) if submission.accepted => RecordStatus::Created,
                    Ok(submission) => {
                        let mut reason = submission.messages.join("; ");
                        if reason.is_empty() {
                            reason = "provider rejected the record".to_string();
                        }
                        RecordStatus::Failed(reason)
                    }
                    Err(e) => RecordStatus::Failed(e.to_string()),
                };
                let _ = tx
                    .send(RecordOutcome {
                        name: target.name,
                        record_type: target.record_type,
                        status,
                    })
                    .await;
            });
        }
        drop(tx);

        while let Some(outcome) = rx.recv().await {
            match &outcome.status {
                RecordStatus::Created => info!("Created record {}", outcome.name),
                RecordStatus::Failed(reason) => {
                    warn!("Failed to create record {}: {reason}", outcome.name)
                }
            }
            outcomes.push(outcome);
        }

        RecordBatchReport { outcomes }
    }
}

/// Extract the two nameservers assigned on zone creation
fn primary_nameservers(zone: &Zone) -> Result<(String, String)> {
    let mut nameservers = zone.name_servers.iter();
    match (nameservers.next(), nameservers.next()) {
        (Some(ns1), Some(ns2)) => Ok((ns1.clone(), ns2.clone())),
        _ => Err(Error::provider(format!(
            "zone {} was created with fewer than two nameservers",
            zone.name
        ))),
    }
}
