//! Error types for the ZoneBridge system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for ZoneBridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the ZoneBridge system
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing trigger payload fields
    #[error("input error: {0}")]
    Input(String),

    /// Configuration errors (missing credentials, invalid ledger table name)
    #[error("configuration error: {0}")]
    Config(String),

    /// Control-panel errors (no account/zone found, transport failure)
    #[error("control panel error: {0}")]
    ControlPanel(String),

    /// DNS provider errors (zone/record operation unsuccessful, transport failure)
    #[error("DNS provider error: {0}")]
    Provider(String),

    /// Ledger statement failures
    #[error("ledger error: {0}")]
    Ledger(String),

    /// A source record field that should carry a number (or a mandatory
    /// value) does not
    #[error("malformed record {name}: bad {field} value {value:?}")]
    MalformedRecord {
        /// Record name as reported by the control panel
        name: String,
        /// The offending field
        field: &'static str,
        /// The raw value that failed to parse
        value: String,
    },

    /// The domain already has a ledger entry; re-provisioning would
    /// duplicate the remote zone
    #[error("domain already managed: {0}")]
    AlreadyManaged(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a control-panel error
    pub fn control_panel(msg: impl Into<String>) -> Self {
        Self::ControlPanel(msg.into())
    }

    /// Create a DNS provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a ledger error
    pub fn ledger(msg: impl Into<String>) -> Self {
        Self::Ledger(msg.into())
    }

    /// Create a malformed-record error
    pub fn malformed(name: impl Into<String>, field: &'static str, value: impl Into<String>) -> Self {
        Self::MalformedRecord {
            name: name.into(),
            field,
            value: value.into(),
        }
    }

    /// Create an already-managed error
    pub fn already_managed(domain: impl Into<String>) -> Self {
        Self::AlreadyManaged(domain.into())
    }
}
