// # WHM/cPanel Control Panel Client
//
// This crate provides the control-panel implementation for the
// ZoneBridge system, backed by the WHM JSON API.
//
// - Makes one HTTP request per operation (two for domain resolution,
//   one per upstream endpoint)
// - Full error propagation to the workflow; no retry or caching here
// - HTTP timeout configured (30 seconds)
//
// ## API Reference
//
// - `json-api/cpanel` (module `ZoneEdit`, function `fetchzone_records`):
//   the zone's resource records for one domain
// - `json-api/listaccts?search=<user>&searchtype=user`: the account's
//   primary domain
// - `json-api/accountsummary?user=<user>`: addon, parked and subdomains
//
// All requests authenticate with `Authorization: whm <user>:<token>`.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use zonebridge_core::config::PanelConfig;
use zonebridge_core::traits::ControlPanel;
use zonebridge_core::types::SourceRecord;
use zonebridge_core::{Error, Result};

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// WHM/cPanel control panel client
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
pub struct CpanelClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    api_token: String,
}

impl std::fmt::Debug for CpanelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpanelClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

// ============================================================
// API Response Types
// ============================================================

#[derive(Debug, Deserialize)]
struct ZoneRecordsResponse {
    cpanelresult: Option<CpanelResult>,
}

#[derive(Debug, Deserialize)]
struct CpanelResult {
    #[serde(default)]
    data: Vec<SourceRecord>,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Metadata {
    #[serde(default)]
    result: i64,
}

#[derive(Debug, Default, Deserialize)]
struct ListAcctsResponse {
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    data: ListAcctsData,
}

#[derive(Debug, Default, Deserialize)]
struct ListAcctsData {
    #[serde(default)]
    acct: Vec<Account>,
}

#[derive(Debug, Default, Deserialize)]
struct Account {
    #[serde(default)]
    user: String,
    #[serde(default)]
    domain: String,
}

#[derive(Debug, Default, Deserialize)]
struct AccountSummaryResponse {
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    data: SummaryData,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryData {
    #[serde(default)]
    domain: Vec<String>,
}

// ============================================================
// Client Implementation
// ============================================================

impl CpanelClient {
    /// Create a new control panel client
    ///
    /// # Panics
    ///
    /// Panics if the configured API token is empty; configuration
    /// validation should have rejected it earlier.
    pub fn new(config: &PanelConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        if config.api_token.is_empty() {
            panic!("control panel API token cannot be empty");
        }

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            api_token: config.api_token.clone(),
        }
    }

    /// The WHM authorization header value
    fn auth_header(&self) -> String {
        format!("whm {}:{}", self.username, self.api_token)
    }
}

#[async_trait]
impl ControlPanel for CpanelClient {
    async fn fetch_zone_records(&self, user: &str, domain: &str) -> Result<Vec<SourceRecord>> {
        debug!("Fetching zone records for {domain} (user {user})");

        let url = format!("{}/json-api/cpanel", self.base_url);
        let params = [
            ("cpanel_jsonapi_user", user),
            ("cpanel_jsonapi_module", "ZoneEdit"),
            ("cpanel_jsonapi_func", "fetchzone_records"),
            ("domain", domain),
        ];

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::control_panel(format!("zone record request failed: {e}")))?;

        let body: ZoneRecordsResponse = response
            .json()
            .await
            .map_err(|e| Error::control_panel(format!("failed to parse zone record response: {e}")))?;

        let result = body.cpanelresult.ok_or_else(|| {
            Error::control_panel(format!(
                "no cPanel account found for user {user} and domain {domain}"
            ))
        })?;
        if let Some(error) = result.error {
            return Err(Error::control_panel(error));
        }

        Ok(result.data)
    }

    async fn resolve_domains_for_user(&self, user: &str) -> Result<BTreeSet<String>> {
        let mut domains = BTreeSet::new();

        // Step 1: the account's primary domain.
        let url = format!(
            "{}/json-api/listaccts?api.version=1&search={user}&searchtype=user",
            self.base_url
        );
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| Error::control_panel(format!("account search failed: {e}")))?;
        let primary: ListAcctsResponse = response
            .json()
            .await
            .map_err(|e| Error::control_panel(format!("failed to parse account search: {e}")))?;

        if primary.metadata.result == 1 {
            // The search can match loosely; only the exact user's
            // account contributes its primary domain.
            if let Some(account) = primary.data.acct.iter().find(|a| a.user == user)
                && !account.domain.is_empty()
            {
                domains.insert(account.domain.clone());
            }
        }

        // Step 2: addon, parked (alias) and subdomains.
        let url = format!(
            "{}/json-api/accountsummary?api.version=1&user={user}",
            self.base_url
        );
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| Error::control_panel(format!("account summary failed: {e}")))?;
        let summary: AccountSummaryResponse = response
            .json()
            .await
            .map_err(|e| Error::control_panel(format!("failed to parse account summary: {e}")))?;

        if summary.metadata.result == 1 {
            domains.extend(summary.data.domain.iter().cloned());
        }

        debug!("Domains for {user}: {domains:?}");
        Ok(domains)
    }
}
