//! URL record entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of every generated short code.
pub const SHORT_CODE_LENGTH: usize = 7;

/// Maximum accepted length of an original URL.
///
/// Enforced by callers before they reach the core; exposed so that every
/// caller checks against the same limit.
pub const MAX_LONG_URL_LENGTH: usize = 2048;

/// A shortened URL with its access statistics.
///
/// `short_code` is the primary key. `long_url` is unique across records and
/// compared byte for byte. Only the store's increment operation touches
/// `access_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub access_count: u64,
}

impl UrlRecord {
    /// Creates a record that has never been accessed, stamped with the current time.
    pub fn new(short_code: String, long_url: String) -> Self {
        Self::with_timestamp(short_code, long_url, Utc::now())
    }

    /// Creates a never-accessed record with an explicit creation time.
    pub fn with_timestamp(short_code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            short_code,
            long_url,
            created_at,
            access_count: 0,
        }
    }
}

/// Returns true if `code` has the shape of a generated short code:
/// exactly [`SHORT_CODE_LENGTH`] ASCII alphanumeric characters.
pub fn is_valid_short_code(code: &str) -> bool {
    code.len() == SHORT_CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_starts_unvisited() {
        let record = UrlRecord::new("abc1234".to_string(), "https://example.com".to_string());

        assert_eq!(record.short_code, "abc1234");
        assert_eq!(record.long_url, "https://example.com");
        assert_eq!(record.access_count, 0);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let created_at = DateTime::parse_from_rfc3339("2026-02-07T19:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let record = UrlRecord::with_timestamp(
            "xY7zK3m".to_string(),
            "https://www.example.com".to_string(),
            created_at,
        );

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["shortCode"], "xY7zK3m");
        assert_eq!(json["longUrl"], "https://www.example.com");
        assert_eq!(json["accessCount"], 0);
        assert_eq!(json["createdAt"], "2026-02-07T19:30:00Z");
    }

    #[test]
    fn test_is_valid_short_code() {
        assert!(is_valid_short_code("xY7zK3m"));
        assert!(is_valid_short_code("0000000"));
        assert!(!is_valid_short_code("short"));
        assert!(!is_valid_short_code("toolong12"));
        assert!(!is_valid_short_code("ab-_123"));
        assert!(!is_valid_short_code(""));
    }
}
