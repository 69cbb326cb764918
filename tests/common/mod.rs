#![allow(dead_code)]

use std::sync::Arc;
use url_shortener_core::application::services::ShortenerService;
use url_shortener_core::domain::entities::UrlRecord;
use url_shortener_core::domain::repositories::UrlRepository;
use url_shortener_core::infrastructure::persistence::InMemoryUrlRepository;
use url_shortener_core::utils::code_generator::CodeGenerator;

pub type TestService = ShortenerService<InMemoryUrlRepository>;

/// sha256-derived code for `https://example.com`.
pub const EXAMPLE_CODE: &str = "5dudJe1";

pub fn record(code: &str, url: &str) -> UrlRecord {
    UrlRecord::new(code.to_string(), url.to_string())
}

pub fn create_test_service() -> (TestService, Arc<InMemoryUrlRepository>) {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let service = ShortenerService::new(repository.clone(), CodeGenerator::default());
    (service, repository)
}

pub fn create_bounded_service(max_records: usize) -> TestService {
    let repository = Arc::new(InMemoryUrlRepository::with_capacity_limit(max_records));
    ShortenerService::new(repository, CodeGenerator::default())
}

pub async fn occupy_code(repository: &InMemoryUrlRepository, code: &str, url: &str) {
    repository.put(record(code, url)).await.unwrap();
}

/// Shortens `count` distinct URLs on `host`.
pub async fn shorten_on_host(service: &TestService, host: &str, count: usize) {
    for i in 0..count {
        service
            .shorten(&format!("https://{host}/page/{i}"))
            .await
            .unwrap();
    }
}
