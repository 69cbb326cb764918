//! Domain extraction from stored long URLs.

use tracing::debug;
use url::Url;

/// Bucket for URLs whose host cannot be determined.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Extracts the domain a long URL points at.
///
/// Parses the URL, takes its host and strips one leading `www.`. Hosts of
/// special schemes (`http`, `https`, ...) come back lowercased from the
/// parser. IPv6 hosts keep their brackets.
///
/// Never fails: unparseable URLs and URLs without a host map to
/// [`UNKNOWN_DOMAIN`].
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_domain("https://www.youtube.com/watch?v=abc"), "youtube.com");
/// assert_eq!(extract_domain("https://en.wikipedia.org/wiki/Rust"), "en.wikipedia.org");
/// assert_eq!(extract_domain("not a url"), "unknown");
/// ```
pub fn extract_domain(long_url: &str) -> String {
    let url = match Url::parse(long_url) {
        Ok(url) => url,
        Err(e) => {
            debug!(url = long_url, error = %e, "Unparseable URL counted as unknown domain");
            return UNKNOWN_DOMAIN.to_string();
        }
    };

    let domain = url
        .host_str()
        .map(|host| host.strip_prefix("www.").unwrap_or(host))
        .filter(|domain| !domain.is_empty());

    match domain {
        Some(domain) => domain.to_string(),
        None => {
            debug!(url = long_url, "URL without host counted as unknown domain");
            UNKNOWN_DOMAIN.to_string()
        }
    }
}
