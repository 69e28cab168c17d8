use serde::{Deserialize, Serialize};

pub mod logging;

// ============================================================================
// Wire Types
// ============================================================================

/// The envelope published to the broker for order announcements.
///
/// Field names are camelCase on the wire for compatibility with downstream
/// consumers: `{"data": "...", "authToken": "Bearer ..."}`. The `data` field
/// carries the already-serialized domain payload as a string, so consumers
/// see JSON nested inside JSON. `authToken` is omitted entirely (never null)
/// when the producing request carried no credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEnvelope {
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl OutboundEnvelope {
    /// Wrap an already-serialized payload.
    ///
    /// `bearer` is the raw token; the `Bearer ` scheme prefix is applied
    /// here so callers never format it themselves.
    pub fn new(data: impl Into<String>, bearer: Option<&str>) -> Self {
        Self {
            data: data.into(),
            auth_token: bearer.map(|token| format!("Bearer {}", token)),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_token() {
        let envelope = OutboundEnvelope::new("{\"id\":\"1\"}", Some("abc123"));
        let json = envelope.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"], "{\"id\":\"1\"}");
        assert_eq!(value["authToken"], "Bearer abc123");
    }

    #[test]
    fn test_envelope_without_token_omits_key() {
        let envelope = OutboundEnvelope::new("payload", None);
        let json = envelope.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"], "payload");
        assert!(value.get("authToken").is_none());
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope = OutboundEnvelope::new("payload", Some("tok"));
        let json = envelope.to_json().unwrap();
        let back: OutboundEnvelope = serde_json::from_str(&json).unwrap();

        assert_eq!(back.data, "payload");
        assert_eq!(back.auth_token.as_deref(), Some("Bearer tok"));
    }
}
