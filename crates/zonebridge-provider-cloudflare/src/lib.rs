// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare DNS provider implementation for the
// ZoneBridge system.
//
// - Makes one HTTP request per operation
// - Full error propagation to the workflow (no retry, no backoff, no
//   caching at this layer)
// - HTTP timeout configured (30 seconds)
// - `create_record` reports API-level rejection instead of raising, so
//   the onboarding workflow can aggregate per-record outcomes
//
// ## Security Requirements
//
// - API token NEVER appears in logs
// - Provider MUST fail fast if the token is empty
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - Create Zone: POST `/zones`
// - List Zones: GET `/zones?name=...`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
// - Delete Zone: DELETE `/zones/:zone_id`

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use zonebridge_core::config::ProviderConfig;
use zonebridge_core::traits::DnsProvider;
use zonebridge_core::types::{RecordSubmission, TargetRecord, Zone};
use zonebridge_core::{Error, Result};

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Cloudflare DNS provider
///
/// Stateless and single-shot; all coordination (ordering, the worker
/// cap, failure policy) is owned by the workflows.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
pub struct CloudflareClient {
    /// Cloudflare API token — never log this value
    api_token: String,

    /// Account id new zones are created under
    account_id: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl std::fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("api_token", &"<REDACTED>")
            .field("account_id", &self.account_id)
            .finish()
    }
}

// ============================================================
// API Request/Response Types
// ============================================================

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiError>,
    result: Option<T>,
}

impl<T> ApiResponse<T> {
    fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return "no error detail".to_string();
        }
        self.errors
            .iter()
            .map(|e| format!("{} (code {})", e.message, e.code))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: i64,
    message: String,
}

#[derive(Debug, Serialize)]
struct CreateZoneRequest<'a> {
    name: &'a str,
    account: AccountRef<'a>,
}

#[derive(Debug, Serialize)]
struct AccountRef<'a> {
    id: &'a str,
}

// ============================================================
// Client Implementation
// ============================================================

impl CloudflareClient {
    /// Create a new Cloudflare client
    ///
    /// # Panics
    ///
    /// Panics if the configured API token is empty; configuration
    /// validation should have rejected it earlier.
    pub fn new(config: &ProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        if config.api_token.is_empty() {
            panic!("Cloudflare API token cannot be empty");
        }

        Self {
            api_token: config.api_token.clone(),
            account_id: config.account_id.clone(),
            client,
        }
    }
}

#[async_trait]
impl DnsProvider for CloudflareClient {
    async fn create_zone(&self, domain: &str) -> Result<Zone> {
        debug!("Creating zone for {domain}");

        let url = format!("{CLOUDFLARE_API_BASE}/zones");
        let request = CreateZoneRequest {
            name: domain,
            account: AccountRef {
                id: &self.account_id,
            },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::provider(format!("zone create request failed: {e}")))?;

        let body: ApiResponse<Zone> = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("failed to parse zone create response: {e}")))?;

        if !body.success {
            return Err(Error::provider(format!(
                "failed to add zone {domain}: {}",
                body.error_summary()
            )));
        }

        body.result
            .ok_or_else(|| Error::provider(format!("zone create response for {domain} carried no zone")))
    }

    async fn lookup_zone_by_name(&self, domain: &str) -> Result<Option<Zone>> {
        debug!("Looking up zone for {domain}");

        let url = format!("{CLOUDFLARE_API_BASE}/zones?name={domain}");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| Error::provider(format!("zone lookup request failed: {e}")))?;

        let body: ApiResponse<Vec<Zone>> = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("failed to parse zone lookup response: {e}")))?;

        if !body.success {
            return Err(Error::provider(format!(
                "zone lookup failed for {domain}: {}",
                body.error_summary()
            )));
        }

        Ok(body.result.unwrap_or_default().into_iter().next())
    }

    async fn create_record(
        &self,
        zone_id: &str,
        record: &TargetRecord,
    ) -> Result<RecordSubmission> {
        let url = format!("{CLOUDFLARE_API_BASE}/zones/{zone_id}/dns_records");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(record)
            .send()
            .await
            .map_err(|e| Error::provider(format!("record create request failed: {e}")))?;

        let body: ApiResponse<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("failed to parse record create response: {e}")))?;

        Ok(RecordSubmission {
            accepted: body.success,
            messages: body.errors.iter().map(|e| e.message.clone()).collect(),
        })
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<bool> {
        debug!("Deleting zone {zone_id}");

        let url = format!("{CLOUDFLARE_API_BASE}/zones/{zone_id}");
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| Error::provider(format!("zone delete request failed: {e}")))?;

        let body: ApiResponse<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("failed to parse zone delete response: {e}")))?;

        Ok(body.success)
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}
