//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose a plain async API to
//! collaborators such as the command-line driver or an HTTP layer.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Shortening, lookup, access counting and domain metrics

pub mod services;
