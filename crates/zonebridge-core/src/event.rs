//! Trigger events read from standard input
//!
//! A run is started by a JSON payload of the form
//! `{"data": {"user": "...", "domain": "..."}}` (offboarding omits
//! `domain`). Malformed JSON is fatal; individually missing fields fall
//! back to sentinel values and processing continues — downstream lookups
//! then fail naturally if the sentinel is unusable.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Sentinel for a payload missing its `user` field
pub const UNKNOWN_USER: &str = "Unknown User";

/// Sentinel for a payload missing its `domain` field
pub const UNKNOWN_DOMAIN: &str = "Unknown Domain";

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Payload,
}

#[derive(Debug, Default, Deserialize)]
struct Payload {
    user: Option<String>,
    domain: Option<String>,
}

fn parse(input: &str) -> Result<Payload> {
    let envelope: Envelope = serde_json::from_str(input)
        .map_err(|e| Error::input(format!("invalid trigger payload: {e}")))?;
    Ok(envelope.data)
}

/// Trigger for provisioning one domain of one panel user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardEvent {
    pub user: String,
    pub domain: String,
}

impl OnboardEvent {
    /// Parse an onboarding trigger payload
    pub fn from_json(input: &str) -> Result<Self> {
        let payload = parse(input)?;
        Ok(Self {
            user: payload.user.unwrap_or_else(|| UNKNOWN_USER.to_string()),
            domain: payload.domain.unwrap_or_else(|| UNKNOWN_DOMAIN.to_string()),
        })
    }
}

/// Trigger for deprovisioning every domain of one panel user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffboardEvent {
    pub user: String,
}

impl OffboardEvent {
    /// Parse an offboarding trigger payload
    pub fn from_json(input: &str) -> Result<Self> {
        let payload = parse(input)?;
        Ok(Self {
            user: payload.user.unwrap_or_else(|| UNKNOWN_USER.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_onboard_payload() {
        let event =
            OnboardEvent::from_json(r#"{"data":{"user":"bob","domain":"example.com"}}"#).unwrap();
        assert_eq!(event.user, "bob");
        assert_eq!(event.domain, "example.com");
    }

    #[test]
    fn missing_fields_fall_back_to_sentinels() {
        let event = OnboardEvent::from_json(r#"{"data":{}}"#).unwrap();
        assert_eq!(event.user, UNKNOWN_USER);
        assert_eq!(event.domain, UNKNOWN_DOMAIN);

        let event = OnboardEvent::from_json("{}").unwrap();
        assert_eq!(event.user, UNKNOWN_USER);
    }

    #[test]
    fn malformed_json_is_an_input_error() {
        let err = OnboardEvent::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::Input(_)));
    }

    #[test]
    fn offboard_payload_needs_only_the_user() {
        let event = OffboardEvent::from_json(r#"{"data":{"user":"bob"}}"#).unwrap();
        assert_eq!(event.user, "bob");
    }
}
