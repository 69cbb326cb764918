//! Repository trait for short URL storage.

use crate::domain::entities::UrlRecord;
use crate::error::StoreError;
use async_trait::async_trait;

/// Result of [`UrlRepository::insert_if_absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was stored.
    Inserted(UrlRecord),
    /// A record for the same long URL already existed and is returned as-is.
    Existing(UrlRecord),
    /// The short code belongs to a different URL. Nothing was written.
    CodeTaken,
}

/// Repository interface for short URL records.
///
/// Keeps two access paths over the same records: a forward index keyed by
/// short code and a reverse index keyed by the original URL. Every method
/// must be safe to call concurrently.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - DashMap-backed, process lifetime
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts or overwrites the record keyed by its short code.
    ///
    /// Both indexes reflect the write once this returns. Overwriting a code
    /// with a different long URL drops the old reverse entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CapacityExhausted`] if a new code does not fit.
    async fn put(&self, record: UrlRecord) -> Result<(), StoreError>;

    /// Atomically inserts `record` unless its long URL or short code is already stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CapacityExhausted`] if the store is full.
    async fn insert_if_absent(&self, record: UrlRecord) -> Result<InsertOutcome, StoreError>;

    /// Finds a record by its short code.
    async fn get_by_code(&self, code: &str) -> Result<Option<UrlRecord>, StoreError>;

    /// Checks whether a short code is taken without cloning the record.
    async fn exists_by_code(&self, code: &str) -> Result<bool, StoreError>;

    /// Finds a record by its original URL (exact byte match).
    async fn get_by_long_url(&self, long_url: &str) -> Result<Option<UrlRecord>, StoreError>;

    /// Snapshot of every stored record, in no particular order.
    async fn all(&self) -> Result<Vec<UrlRecord>, StoreError>;

    /// Increments the access counter of `code` by exactly one.
    ///
    /// Unknown codes are ignored. Concurrent increments of the same code
    /// are never lost.
    async fn increment_access_count(&self, code: &str) -> Result<(), StoreError>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize, StoreError>;
}
