//! Repository implementations.
//!
//! # Repositories
//!
//! - [`InMemoryUrlRepository`] - Concurrent in-process URL storage

pub mod memory_url_repository;

pub use memory_url_repository::InMemoryUrlRepository;
