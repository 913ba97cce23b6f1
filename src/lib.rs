use crate::config::AppConfig;
use crate::fetcher::{BookFetcher, FetcherOptions};
use crate::item::repo::{BookSqliteStore, RepoError};
use crate::provider::api::ClientError;
use crate::provider::cover::CoverStore;
use crate::resolver::BookResolver;
use crate::sync::{SyncOptions, SyncOrchestrator};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub mod config;
pub mod fetcher;
pub mod genre;
pub mod item;
pub mod provider;
pub mod resolver;
pub mod sync;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Storage(#[from] RepoError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("cannot create http client: {0}")]
    Http(String),
}

/// 설정으로 만든 실행 구성 요소
pub struct Components {
    pub resolver: BookResolver,
    pub fetcher: Arc<BookFetcher>,
    pub orchestrator: SyncOrchestrator,
}

/// 저장소, 접근 중재자, 검색 클라이언트, 수집기, 동기화 실행기를 만든다.
pub fn create_components(config: &AppConfig) -> Result<Components, BuildError> {
    let store = BookSqliteStore::open(config.db().path(), config.db().pool_size())?;
    let resolver = BookResolver::new(Arc::new(store));

    let client = provider::api::new_client(config.api())?;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.api().timeout_secs()))
        .build()
        .map_err(|e| BuildError::Http(e.to_string()))?;
    let covers = CoverStore::new(http, config.covers().dir());

    let fetcher = BookFetcher::new(client, resolver.clone(), FetcherOptions::from(config))
        .with_cover_store(covers);
    let fetcher = Arc::new(fetcher);

    let orchestrator = SyncOrchestrator::new(
        fetcher.clone(),
        sync::connectivity_from(config.sync()),
        SyncOptions::from(config.sync()),
    );

    Ok(Components { resolver, fetcher, orchestrator })
}
