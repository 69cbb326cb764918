//! Core domain entities.
//!
//! - [`UrlRecord`] - A shortened URL and its access counter
//! - [`DomainCount`] - One row of the domain frequency ranking

pub mod domain_count;
pub mod url_record;

pub use domain_count::DomainCount;
pub use url_record::{MAX_LONG_URL_LENGTH, SHORT_CODE_LENGTH, UrlRecord, is_valid_short_code};
