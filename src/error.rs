//! Error types for the store and shortener layers.
//!
//! Expected conditions (unknown codes, malformed URLs during domain
//! aggregation, a missing digest) are handled inside the core and never show
//! up here. Only storage failures reach the caller.

/// Errors raised by a [`crate::domain::repositories::UrlRepository`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store refused a new record because it is full.
    #[error("Store capacity exhausted (limit: {limit} records)")]
    CapacityExhausted { limit: usize },

    /// The backing store could not be reached or failed internally.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by [`crate::application::services::ShortenerService`].
#[derive(Debug, thiserror::Error)]
pub enum ShortenerError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ShortenerError {
    /// Short machine-readable identifier, suitable for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            ShortenerError::Store(StoreError::CapacityExhausted { .. }) => "store_full",
            ShortenerError::Store(StoreError::Unavailable(_)) => "store_unavailable",
        }
    }
}
