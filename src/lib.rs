//! # URL Shortener Core
//!
//! Hash-based URL shortening: fixed-length base62 codes derived from a
//! SHA-2 digest, a store indexed both by code and by original URL, access
//! counters, and domain popularity metrics.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - `UrlRecord`, `DomainCount` and the repository trait
//! - **Application Layer** ([`application`]) - [`ShortenerService`] orchestrating the operations
//! - **Infrastructure Layer** ([`infrastructure`]) - DashMap-backed in-memory store
//! - **Utilities** ([`utils`]) - code generation, host extraction, domain ranking
//!
//! ## Features
//!
//! - Deterministic 7-character codes over `0-9A-Za-z`
//! - Deduplication: the same URL always maps to the same code
//! - Collision probing with perturbed digest input
//! - Lock-free access counting
//! - Top-N domain ranking with deterministic tie-breaks
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use url_shortener_core::prelude::*;
//!
//! # async fn run() -> Result<(), ShortenerError> {
//! let store = Arc::new(InMemoryUrlRepository::new());
//! let service = ShortenerService::new(store, CodeGenerator::default());
//!
//! let record = service.shorten("https://example.com").await?;
//! service.record_access(&record.short_code).await?;
//!
//! let top = service.top_domains(3).await?;
//! assert_eq!(top[0].domain, "example.com");
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! The command-line driver is configured from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use application::services::ShortenerService;
pub use error::{ShortenerError, StoreError};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ShortenerService;
    pub use crate::domain::entities::{DomainCount, UrlRecord};
    pub use crate::domain::repositories::{InsertOutcome, UrlRepository};
    pub use crate::error::{ShortenerError, StoreError};
    pub use crate::infrastructure::persistence::InMemoryUrlRepository;
    pub use crate::utils::code_generator::{CodeGenerator, DigestAlgorithm};
}
