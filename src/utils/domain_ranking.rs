//! Domain frequency ranking over stored URLs.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::domain::entities::DomainCount;
use crate::utils::extract_domain::extract_domain;

/// Counts URLs per domain and returns the `limit` most frequent domains.
///
/// Domains come from [`extract_domain`], so unparseable URLs share the
/// `unknown` bucket. Rows are ordered by count descending, then by domain
/// ascending, which makes the result deterministic for equal counts.
pub fn rank_domains<'a, I>(long_urls: I, limit: usize) -> Vec<DomainCount>
where
    I: IntoIterator<Item = &'a str>,
{
    if limit == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<String, u64> = HashMap::new();
    for long_url in long_urls {
        *counts.entry(extract_domain(long_url)).or_insert(0) += 1;
    }

    let mut ranked: Vec<DomainCount> = counts
        .into_iter()
        .map(|(domain, count)| DomainCount::new(domain, count))
        .collect();

    ranked.sort_unstable_by(|a, b| {
        (Reverse(a.count), &a.domain).cmp(&(Reverse(b.count), &b.domain))
    });
    ranked.truncate(limit);

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat(url: &str, times: usize) -> Vec<String> {
        (0..times).map(|i| format!("{url}/{i}")).collect()
    }

    #[test]
    fn test_rank_domains_top_three() {
        let mut urls = repeat("https://www.youtube.com/watch", 4);
        urls.extend(repeat("https://www.udemy.com/course", 6));
        urls.extend(repeat("https://en.wikipedia.org/wiki", 2));

        let ranked = rank_domains(urls.iter().map(String::as_str), 3);

        assert_eq!(
            ranked,
            vec![
                DomainCount::new("udemy.com", 6),
                DomainCount::new("youtube.com", 4),
                DomainCount::new("en.wikipedia.org", 2),
            ]
        );
    }

    #[test]
    fn test_rank_domains_ties_break_alphabetically() {
        let urls = [
            "https://zeta.example/1",
            "https://alpha.example/1",
            "https://mid.example/1",
            "https://zeta.example/2",
            "https://alpha.example/2",
        ];

        let ranked = rank_domains(urls, 3);

        assert_eq!(
            ranked,
            vec![
                DomainCount::new("alpha.example", 2),
                DomainCount::new("zeta.example", 2),
                DomainCount::new("mid.example", 1),
            ]
        );
    }

    #[test]
    fn test_rank_domains_counts_unknown_bucket() {
        let urls = ["not a url", "mailto:a@example.com", "https://example.com"];

        let ranked = rank_domains(urls, 10);

        assert_eq!(
            ranked,
            vec![
                DomainCount::new("unknown", 2),
                DomainCount::new("example.com", 1),
            ]
        );
    }

    #[test]
    fn test_rank_domains_limit_zero_and_empty_input() {
        assert!(rank_domains(["https://example.com"], 0).is_empty());
        assert!(rank_domains(std::iter::empty::<&str>(), 3).is_empty());
    }

    #[test]
    fn test_rank_domains_never_exceeds_distinct_domains() {
        let urls = ["https://a.example", "https://b.example", "https://a.example/x"];

        let ranked = rank_domains(urls, 5);

        assert_eq!(ranked.len(), 2);
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
    }
}
