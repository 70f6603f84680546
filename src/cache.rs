//! Checksum-validated cache for enrichment results.
//!
//! Entries are stored as JSON together with a SHA-256 checksum. A checksum
//! mismatch or undecodable entry is treated as a miss and evicted, so a
//! corrupted entry costs one extra lookup instead of serving bad data.

use crate::models::{EnrichmentOptions, EnrichmentResult};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Serialized value plus its SHA-256 checksum (hex encoded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksummedEntry {
    pub data: String,
    pub checksum: String,
}

impl ChecksummedEntry {
    pub fn new(data: String) -> Self {
        let checksum = checksum(&data);
        Self { data, checksum }
    }

    pub fn is_valid(&self) -> bool {
        checksum(&self.data) == self.checksum
    }
}

fn checksum(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}

/// TTL cache of enrichment results keyed by domain, email and options.
#[derive(Clone)]
pub struct EnrichmentCache {
    inner: Cache<String, ChecksummedEntry>,
}

impl EnrichmentCache {
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let inner = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(max_capacity)
            .build();
        Self { inner }
    }

    /// Cache key for one enrichment request.
    ///
    /// `generation` identifies the credential set the result was computed
    /// with, so a result finished after a key change is never served.
    pub fn key(
        generation: u64,
        domain: &str,
        email: Option<&str>,
        options: &EnrichmentOptions,
    ) -> String {
        format!(
            "{}|{}|{}|{}{}{}{}",
            generation,
            domain.trim().to_lowercase(),
            email.unwrap_or("").trim().to_lowercase(),
            options.validate_emails as u8,
            options.enrich_company_data as u8,
            options.find_social_profiles as u8,
            options.get_tech_stack as u8,
        )
    }

    pub async fn get(&self, key: &str) -> Option<EnrichmentResult> {
        let entry = self.inner.get(key).await?;

        if !entry.is_valid() {
            tracing::warn!(
                "Enrichment cache checksum mismatch for {} (data length: {}), evicting",
                key,
                entry.data.len()
            );
            self.inner.invalidate(key).await;
            return None;
        }

        match serde_json::from_str(&entry.data) {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::warn!("Undecodable enrichment cache entry for {}: {}", key, e);
                self.inner.invalidate(key).await;
                None
            }
        }
    }

    pub async fn insert(&self, key: String, result: &EnrichmentResult) {
        match serde_json::to_string(result) {
            Ok(json) => self.inner.insert(key, ChecksummedEntry::new(json)).await,
            Err(e) => tracing::warn!("Skipping enrichment cache insert for {}: {}", key, e),
        }
    }

    /// Drops every entry. Used when provider credentials change.
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Stores a raw entry as-is. Used to exercise corruption handling.
    #[cfg(test)]
    async fn insert_raw(&self, key: String, entry: ChecksummedEntry) {
        self.inner.insert(key, entry).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EnrichmentData;

    fn cache() -> EnrichmentCache {
        EnrichmentCache::new(Duration::from_secs(60), 100)
    }

    fn sample_result() -> EnrichmentResult {
        EnrichmentResult::succeeded(EnrichmentData {
            company_size: Some("51-200".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_checksum_validation() {
        let entry = ChecksummedEntry::new(r#"{"success":true}"#.to_string());
        assert!(entry.is_valid());

        let mut tampered = entry;
        tampered.data = r#"{"success":false}"#.to_string();
        assert!(!tampered.is_valid());
    }

    #[test]
    fn test_checksum_consistency() {
        let a = ChecksummedEntry::new("test data".to_string());
        let b = ChecksummedEntry::new("test data".to_string());
        assert_eq!(a.checksum, b.checksum);
    }

    #[test]
    fn test_key_normalizes_case_and_options() {
        let options = EnrichmentOptions::default();
        assert_eq!(
            EnrichmentCache::key(0, " Acme.io ", Some("Bob@Acme.io"), &options),
            "0|acme.io|bob@acme.io|1111"
        );

        let no_email = EnrichmentOptions {
            validate_emails: false,
            ..options
        };
        assert_eq!(
            EnrichmentCache::key(3, "acme.io", None, &no_email),
            "3|acme.io||0111"
        );
    }

    #[tokio::test]
    async fn test_round_trip_through_cache() {
        let cache = cache();
        cache.insert("k".to_string(), &sample_result()).await;
        assert_eq!(cache.get("k").await, Some(sample_result()));
        assert_eq!(cache.get("other").await, None);
    }

    #[tokio::test]
    async fn test_tampered_entry_is_a_miss() {
        let cache = cache();
        let mut entry = ChecksummedEntry::new(serde_json::to_string(&sample_result()).unwrap());
        entry.data = entry.data.replace("51-200", "1000+");
        cache.insert_raw("k".to_string(), entry).await;

        assert_eq!(cache.get("k").await, None);
    }
}
