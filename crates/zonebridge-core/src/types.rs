//! Domain types shared across the ZoneBridge crates
//!
//! `SourceRecord` is the control panel's view of a DNS record,
//! `TargetRecord` is the provider's. The translator in
//! [`crate::translate`] maps one to the other. `Zone` and `LedgerEntry`
//! describe the provider-side zone and its row in the local mapping table.

use serde::{Deserialize, Serialize};

/// DNS record types understood by the translator
///
/// Anything the control panel reports outside this set deserializes to
/// `Unsupported` and is dropped during translation rather than rejected,
/// so new record types on the panel side do not break onboarding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Mx,
    Ns,
    Srv,
    Caa,
    #[default]
    #[serde(other)]
    Unsupported,
}

/// One DNS resource record as reported by the control panel
///
/// The panel reports numeric fields (ttl, MX preference, SRV numerics,
/// CAA flags) as strings; they are parsed at translation time so a bad
/// value surfaces as a [`crate::Error::MalformedRecord`] naming the
/// record instead of a deserialization failure for the whole zone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceRecord {
    #[serde(rename = "type", default)]
    pub record_type: RecordType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ttl: String,

    // Type-specific fields; only the ones matching `record_type` are set.
    pub address: Option<String>,
    pub cname: Option<String>,
    pub txtdata: Option<String>,
    pub exchange: Option<String>,
    pub preference: Option<String>,
    pub nsdname: Option<String>,
    pub priority: Option<String>,
    pub weight: Option<String>,
    pub port: Option<String>,
    pub target: Option<String>,
    pub flags: Option<String>,
    pub tag: Option<String>,
    pub value: Option<String>,
}

/// Record content in the provider's schema
///
/// Most types carry a plain string; SRV and CAA use the provider's
/// structured form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordContent {
    Value(String),
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    Caa {
        flags: u8,
        tag: String,
        value: String,
    },
}

/// One DNS record in the provider's schema, ready for submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetRecord {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub content: RecordContent,
    pub ttl: u32,
    /// MX priority; absent for every other type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Present only for A/AAAA and always false; this system never
    /// enables proxying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

/// A provider-side DNS zone
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Zone {
    /// Opaque provider identifier
    pub id: String,
    /// The domain the zone serves
    pub name: String,
    /// Nameservers assigned by the provider; exactly two are consumed
    /// on creation
    #[serde(default)]
    pub name_servers: Vec<String>,
}

/// Ledger column value marking rows provisioned through the
/// control-panel pathway
pub const CONTROL_PANEL_TAG: u32 = 2;

/// One row of the domain mapping table
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    /// Managed domain (unique key)
    pub domain: String,
    pub ns1: String,
    pub ns2: String,
    /// Provider account email (`cf_account` column)
    pub account_email: String,
    /// Provisioning source tag (`cp_id` column, always
    /// [`CONTROL_PANEL_TAG`] for rows this system writes)
    pub panel_account_id: u32,
    /// Control-panel user the domain belongs to (`cp_user` column)
    pub panel_user: String,
}

/// Per-record outcome of a provider record-creation call
///
/// An API-level rejection is carried here rather than raised; the
/// onboarding workflow aggregates submissions into a batch report.
#[derive(Debug, Clone)]
pub struct RecordSubmission {
    /// Whether the provider reported success
    pub accepted: bool,
    /// Provider error messages, empty on success
    pub messages: Vec<String>,
}
