//! Test doubles and common utilities for workflow contract tests
//!
//! These doubles record every call so the tests can assert ordering and
//! call counts without any real network or database.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use zonebridge_core::error::Result;
use zonebridge_core::traits::{ControlPanel, DnsProvider, LedgerStore};
use zonebridge_core::types::{
    CONTROL_PANEL_TAG, LedgerEntry, RecordSubmission, SourceRecord, TargetRecord, Zone,
};
use zonebridge_core::Error;

/// Nameservers every mock-created zone reports
pub const NS1: &str = "aida.ns.cloudflare.com";
pub const NS2: &str = "bob.ns.cloudflare.com";

/// Shared operation log for ordering assertions across doubles
pub type OpLog = std::sync::Arc<Mutex<Vec<String>>>;

pub fn new_op_log() -> OpLog {
    std::sync::Arc::new(Mutex::new(Vec::new()))
}

/// Index of the first occurrence of an operation in the log
pub fn first_index(log: &OpLog, op: &str) -> Option<usize> {
    log.lock().unwrap().iter().position(|entry| entry == op)
}

/// Build a source record from its control-panel JSON form
pub fn record_from_json(value: serde_json::Value) -> SourceRecord {
    serde_json::from_value(value).expect("invalid test record")
}

/// A pre-seeded ledger row for a managed domain
pub fn managed_entry(domain: &str) -> LedgerEntry {
    LedgerEntry {
        domain: domain.to_string(),
        ns1: NS1.to_string(),
        ns2: NS2.to_string(),
        account_email: "ops@example.net".to_string(),
        panel_account_id: CONTROL_PANEL_TAG,
        panel_user: "bob".to_string(),
    }
}

/// A mock ControlPanel serving canned records and domains
pub struct MockControlPanel {
    records: Vec<SourceRecord>,
    domains: BTreeSet<String>,
    fail_fetch: bool,
    fetch_calls: AtomicUsize,
    resolve_calls: AtomicUsize,
}

impl MockControlPanel {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            domains: BTreeSet::new(),
            fail_fetch: false,
            fetch_calls: AtomicUsize::new(0),
            resolve_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_records(mut self, records: Vec<SourceRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Make fetch_zone_records fail as if the panel had no account
    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn resolve_call_count(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ControlPanel for MockControlPanel {
    async fn fetch_zone_records(&self, user: &str, domain: &str) -> Result<Vec<SourceRecord>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            return Err(Error::control_panel(format!(
                "no cPanel account found for user {user} and domain {domain}"
            )));
        }
        Ok(self.records.clone())
    }

    async fn resolve_domains_for_user(&self, _user: &str) -> Result<BTreeSet<String>> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.domains.clone())
    }
}

/// A mock DnsProvider that records every call
pub struct MockDnsProvider {
    op_log: OpLog,
    fail_zone_create: bool,
    reject_records: Vec<String>,
    missing_zones: Vec<String>,
    fail_delete_zones: Vec<String>,
    created_zones: Mutex<Vec<String>>,
    record_attempts: Mutex<Vec<TargetRecord>>,
    deleted_zones: Mutex<Vec<String>>,
    lookup_calls: AtomicUsize,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            op_log: new_op_log(),
            fail_zone_create: false,
            reject_records: Vec::new(),
            missing_zones: Vec::new(),
            fail_delete_zones: Vec::new(),
            created_zones: Mutex::new(Vec::new()),
            record_attempts: Mutex::new(Vec::new()),
            deleted_zones: Mutex::new(Vec::new()),
            lookup_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_op_log(mut self, op_log: &OpLog) -> Self {
        self.op_log = std::sync::Arc::clone(op_log);
        self
    }

    /// Make create_zone fail as if the provider rejected it
    pub fn failing_zone_create(mut self) -> Self {
        self.fail_zone_create = true;
        self
    }

    /// Make the API reject record creations for the given record name
    pub fn rejecting_record(mut self, name: &str) -> Self {
        self.reject_records.push(name.to_string());
        self
    }

    /// Make zone lookup miss for the given domain
    pub fn missing_zone(mut self, domain: &str) -> Self {
        self.missing_zones.push(domain.to_string());
        self
    }

    /// Make zone deletion report failure for the given zone id
    pub fn failing_delete(mut self, zone_id: &str) -> Self {
        self.fail_delete_zones.push(zone_id.to_string());
        self
    }

    pub fn created_zones(&self) -> Vec<String> {
        self.created_zones.lock().unwrap().clone()
    }

    pub fn record_attempts(&self) -> Vec<TargetRecord> {
        self.record_attempts.lock().unwrap().clone()
    }

    pub fn deleted_zones(&self) -> Vec<String> {
        self.deleted_zones.lock().unwrap().clone()
    }

    pub fn lookup_call_count(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    fn log(&self, op: &str) {
        self.op_log.lock().unwrap().push(op.to_string());
    }

    fn zone_for(domain: &str) -> Zone {
        Zone {
            id: format!("zone-{domain}"),
            name: domain.to_string(),
            name_servers: vec![NS1.to_string(), NS2.to_string()],
        }
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    async fn create_zone(&self, domain: &str) -> Result<Zone> {
        self.log("provider.create_zone");
        if self.fail_zone_create {
            return Err(Error::provider(format!("failed to add zone {domain}")));
        }
        self.created_zones.lock().unwrap().push(domain.to_string());
        Ok(Self::zone_for(domain))
    }

    async fn lookup_zone_by_name(&self, domain: &str) -> Result<Option<Zone>> {
        self.log("provider.lookup_zone");
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.missing_zones.iter().any(|d| d == domain) {
            return Ok(None);
        }
        Ok(Some(Self::zone_for(domain)))
    }

    async fn create_record(
        &self,
        _zone_id: &str,
        record: &TargetRecord,
    ) -> Result<RecordSubmission> {
        self.log("provider.create_record");
        self.record_attempts.lock().unwrap().push(record.clone());
        if self.reject_records.iter().any(|name| name == &record.name) {
            return Ok(RecordSubmission {
                accepted: false,
                messages: vec!["record rejected".to_string()],
            });
        }
        Ok(RecordSubmission {
            accepted: true,
            messages: Vec::new(),
        })
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<bool> {
        self.log("provider.delete_zone");
        self.deleted_zones.lock().unwrap().push(zone_id.to_string());
        Ok(!self.fail_delete_zones.iter().any(|id| id == zone_id))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A mock LedgerStore backed by an in-memory row list
pub struct MockLedgerStore {
    op_log: OpLog,
    rows: Mutex<Vec<LedgerEntry>>,
    deleted: Mutex<Vec<String>>,
}

impl MockLedgerStore {
    pub fn new() -> Self {
        Self {
            op_log: new_op_log(),
            rows: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_op_log(mut self, op_log: &OpLog) -> Self {
        self.op_log = std::sync::Arc::clone(op_log);
        self
    }

    /// Pre-seed a row, as if the domain were already provisioned
    pub fn with_row(self, entry: LedgerEntry) -> Self {
        self.rows.lock().unwrap().push(entry);
        self
    }

    pub fn rows(&self) -> Vec<LedgerEntry> {
        self.rows.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerStore for MockLedgerStore {
    async fn insert(&self, entry: &LedgerEntry) -> Result<()> {
        self.op_log.lock().unwrap().push("ledger.insert".to_string());
        self.rows.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn delete(&self, domain: &str) -> Result<()> {
        self.op_log.lock().unwrap().push("ledger.delete".to_string());
        self.deleted.lock().unwrap().push(domain.to_string());
        self.rows.lock().unwrap().retain(|row| row.domain != domain);
        Ok(())
    }

    async fn find(&self, domain: &str) -> Result<Option<LedgerEntry>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.domain == domain)
            .cloned())
    }
}
