//! URL shortening, lookup and domain metrics service.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_TOP_DOMAINS_LIMIT};
use crate::domain::entities::{DomainCount, UrlRecord};
use crate::domain::repositories::{InsertOutcome, UrlRepository};
use crate::error::ShortenerError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::domain_ranking::rank_domains;

/// Service exposing the four core operations over a [`UrlRepository`].
///
/// - [`Self::shorten`] assigns (or reuses) a short code for a long URL
/// - [`Self::resolve`] looks a code up without side effects
/// - [`Self::record_access`] bumps a code's access counter
/// - [`Self::top_domains`] ranks domains by how often they were shortened
///
/// The service holds no locks of its own; all synchronization lives in the
/// repository.
pub struct ShortenerService<R: UrlRepository> {
    repository: Arc<R>,
    generator: CodeGenerator,
    base_url: String,
    top_domains_limit: usize,
}

impl<R: UrlRepository> ShortenerService<R> {
    /// Creates a service with default base URL and domain limit.
    pub fn new(repository: Arc<R>, generator: CodeGenerator) -> Self {
        Self {
            repository,
            generator,
            base_url: DEFAULT_BASE_URL.to_string(),
            top_domains_limit: DEFAULT_TOP_DOMAINS_LIMIT,
        }
    }

    /// Creates a service configured from [`Config`].
    pub fn from_config(repository: Arc<R>, config: &Config) -> Self {
        Self::new(repository, CodeGenerator::from_algorithm(&config.code_digest))
            .with_base_url(config.base_url.clone())
            .with_top_domains_limit(config.top_domains_limit)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_top_domains_limit(mut self, limit: usize) -> Self {
        self.top_domains_limit = limit;
        self
    }

    /// Returns the short code record for `long_url`, creating it if needed.
    ///
    /// # Deduplication
    ///
    /// URLs are compared byte for byte. A URL that already has a record gets
    /// that record back unchanged, including when a concurrent call stored it
    /// first.
    ///
    /// # Code Generation
    ///
    /// The first candidate is derived from `long_url` itself. While the
    /// candidate is taken, the next one is derived from `long_url` followed
    /// by an attempt counter starting at 0.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Store`] if the repository fails, e.g. when
    /// it is full.
    #[instrument(skip(self))]
    pub async fn shorten(&self, long_url: &str) -> Result<UrlRecord, ShortenerError> {
        if let Some(existing) = self.repository.get_by_long_url(long_url).await? {
            debug!(code = %existing.short_code, "URL already shortened");
            return Ok(existing);
        }

        let mut candidate = self.generator.generate(long_url);
        let mut attempt: u64 = 0;

        loop {
            if self.repository.exists_by_code(&candidate).await? {
                debug!(code = %candidate, attempt, "Short code taken, retrying with perturbed input");
                candidate = self.perturbed_candidate(long_url, attempt);
                attempt += 1;
                continue;
            }

            let record = UrlRecord::new(candidate.clone(), long_url.to_string());

            match self.repository.insert_if_absent(record).await? {
                InsertOutcome::Inserted(record) => {
                    info!(
                        code = %record.short_code,
                        retries = attempt,
                        source = self.generator.source_name(),
                        "Created short URL"
                    );
                    return Ok(record);
                }
                InsertOutcome::Existing(record) => {
                    debug!(code = %record.short_code, "URL stored by a concurrent request");
                    return Ok(record);
                }
                InsertOutcome::CodeTaken => {
                    debug!(code = %candidate, attempt, "Short code claimed concurrently, retrying");
                    candidate = self.perturbed_candidate(long_url, attempt);
                    attempt += 1;
                }
            }
        }
    }

    /// Looks up the record for `code`.
    ///
    /// Does not touch the access counter, so stats reads leave counts alone.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Store`] on repository failures only; an
    /// unknown code is `Ok(None)`.
    pub async fn resolve(&self, code: &str) -> Result<Option<UrlRecord>, ShortenerError> {
        Ok(self.repository.get_by_code(code).await?)
    }

    /// Counts one access to `code`. Unknown codes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Store`] on repository failures.
    pub async fn record_access(&self, code: &str) -> Result<(), ShortenerError> {
        self.repository.increment_access_count(code).await?;
        Ok(())
    }

    /// Returns up to `limit` domains ranked by number of stored URLs.
    ///
    /// Ties are ordered by domain name. URLs without a parseable host are
    /// counted under `unknown`.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Store`] if the snapshot cannot be taken.
    #[instrument(skip(self))]
    pub async fn top_domains(&self, limit: usize) -> Result<Vec<DomainCount>, ShortenerError> {
        let records = self.repository.all().await?;
        let ranked = rank_domains(records.iter().map(|r| r.long_url.as_str()), limit);

        debug!(records = records.len(), domains = ranked.len(), "Ranked domains");
        Ok(ranked)
    }

    /// [`Self::top_domains`] with the configured default limit.
    pub async fn top_domains_default(&self) -> Result<Vec<DomainCount>, ShortenerError> {
        self.top_domains(self.top_domains_limit).await
    }

    /// Builds the public short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Store`] on repository failures.
    pub async fn record_count(&self) -> Result<usize, ShortenerError> {
        Ok(self.repository.count().await?)
    }

    fn perturbed_candidate(&self, long_url: &str, attempt: u64) -> String {
        self.generator.generate(&format!("{long_url}{attempt}"))
    }
}
