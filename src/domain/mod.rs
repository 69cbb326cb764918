//! Domain layer: entities and repository contracts.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Storage trait definitions
//!
//! The domain layer has no dependency on infrastructure. Business logic lives
//! in [`crate::application::services`].

pub mod entities;
pub mod repositories;
