//! In-memory implementation of the URL repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{InsertOutcome, UrlRepository};
use crate::error::StoreError;

/// DashMap-backed repository that lives as long as the process.
///
/// Records are keyed by short code; a second map indexes short codes by
/// original URL. Per-key mutations run under the owning shard's write lock,
/// so counter increments are never lost.
///
/// Whenever both maps are locked at once, the reverse map is locked first.
pub struct InMemoryUrlRepository {
    by_code: DashMap<String, UrlRecord>,
    by_long_url: DashMap<String, String>,
    len: AtomicUsize,
    max_records: Option<usize>,
}

impl InMemoryUrlRepository {
    /// Creates an unbounded repository.
    pub fn new() -> Self {
        Self {
            by_code: DashMap::new(),
            by_long_url: DashMap::new(),
            len: AtomicUsize::new(0),
            max_records: None,
        }
    }

    /// Creates a repository that rejects new records beyond `max_records`.
    pub fn with_capacity_limit(max_records: usize) -> Self {
        Self {
            max_records: Some(max_records),
            ..Self::new()
        }
    }

    /// Claims room for one more record.
    fn reserve_slot(&self) -> Result<(), StoreError> {
        let Some(limit) = self.max_records else {
            self.len.fetch_add(1, Ordering::SeqCst);
            return Ok(());
        };

        self.len
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < limit).then_some(n + 1)
            })
            .map(|_| ())
            .map_err(|_| {
                warn!(limit, "URL store is full, rejecting new record");
                StoreError::CapacityExhausted { limit }
            })
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn put(&self, record: UrlRecord) -> Result<(), StoreError> {
        let code = record.short_code.clone();
        let long_url = record.long_url.clone();

        let previous = match self.by_code.entry(code.clone()) {
            Entry::Occupied(mut slot) => Some(slot.insert(record)),
            Entry::Vacant(slot) => {
                self.reserve_slot()?;
                slot.insert(record);
                None
            }
        };

        self.by_long_url.insert(long_url.clone(), code.clone());

        if let Some(previous) = previous
            && previous.long_url != long_url
        {
            debug!(code = %code, "Overwrite changed long URL, dropping stale reverse entry");
            self.by_long_url
                .remove_if(&previous.long_url, |_, indexed| *indexed == code);
        }

        Ok(())
    }

    async fn insert_if_absent(&self, record: UrlRecord) -> Result<InsertOutcome, StoreError> {
        let url_slot = self.by_long_url.entry(record.long_url.clone());

        if let Entry::Occupied(ref indexed) = url_slot
            && let Some(existing) = self.by_code.get(indexed.get())
        {
            return Ok(InsertOutcome::Existing(existing.value().clone()));
        }

        match self.by_code.entry(record.short_code.clone()) {
            Entry::Occupied(_) => return Ok(InsertOutcome::CodeTaken),
            Entry::Vacant(slot) => {
                self.reserve_slot()?;
                slot.insert(record.clone());
            }
        }

        url_slot.insert(record.short_code.clone());

        Ok(InsertOutcome::Inserted(record))
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<UrlRecord>, StoreError> {
        Ok(self.by_code.get(code).map(|entry| entry.value().clone()))
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self.by_code.contains_key(code))
    }

    async fn get_by_long_url(&self, long_url: &str) -> Result<Option<UrlRecord>, StoreError> {
        let Some(code) = self.by_long_url.get(long_url).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };

        Ok(self.by_code.get(&code).map(|entry| entry.value().clone()))
    }

    async fn all(&self) -> Result<Vec<UrlRecord>, StoreError> {
        Ok(self
            .by_code
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn increment_access_count(&self, code: &str) -> Result<(), StoreError> {
        if let Some(mut record) = self.by_code.get_mut(code) {
            record.access_count = record.access_count.saturating_add(1);
        }

        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.len.load(Ordering::SeqCst))
    }
}
