//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl_ms`: Optional TTL in milliseconds; zero or negative stores an
///   already-expired entry, absent uses the service default
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<i64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        None
    }

    /// Resolves the TTL to apply, clamping negative values to zero.
    pub fn ttl(&self, default: Duration) -> Duration {
        match self.ttl_ms {
            Some(ms) => Duration::from_millis(u64::try_from(ms).unwrap_or(0)),
            None => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(key: &str, ttl_ms: Option<i64>) -> SetRequest {
        SetRequest {
            key: key.to_string(),
            value: Value::from("test"),
            ttl_ms,
        }
    }

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": {"balance": 12}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value["balance"], 12);
        assert!(req.ttl_ms.is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"key": "test", "value": "hello", "ttl_ms": 60000}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl_ms, Some(60_000));
    }

    #[test]
    fn test_validate_empty_key() {
        assert!(request("", None).validate().is_some());
    }

    #[test]
    fn test_validate_key_too_long() {
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);
        assert!(request(&long_key, None).validate().is_some());
        assert!(request(&"x".repeat(MAX_KEY_LENGTH), None).validate().is_none());
    }

    #[test]
    fn test_ttl_resolution() {
        let default = Duration::from_secs(300);
        assert_eq!(request("k", None).ttl(default), default);
        assert_eq!(request("k", Some(1500)).ttl(default), Duration::from_millis(1500));
        assert_eq!(request("k", Some(0)).ttl(default), Duration::ZERO);
        assert_eq!(request("k", Some(-20)).ttl(default), Duration::ZERO);
    }
}
