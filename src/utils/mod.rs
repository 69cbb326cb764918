//! Utility functions used by the shortener service.
//!
//! - [`code_generator`] - Digest-based short code generation
//! - [`extract_domain`] - Domain extraction from long URLs
//! - [`domain_ranking`] - Domain frequency ranking

pub mod code_generator;
pub mod domain_ranking;
pub mod extract_domain;
