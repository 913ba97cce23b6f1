pub mod log;

use serde::Deserialize;
use std::env;
use thiserror::Error;

const DEFAULT_RUN_MODE: &str = "development";
const ENV_PREFIX: &str = "BOOK_BUDDY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid logger configuration: {0}")]
    Logger(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    db: DbConfig,
    #[serde(default)]
    api: ApiConfig,
    #[serde(default)]
    sync: SyncConfig,
    #[serde(default)]
    covers: CoverConfig,
    logger: Option<log::Config>,
}

impl AppConfig {
    pub fn db(&self) -> &DbConfig {
        &self.db
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn sync(&self) -> &SyncConfig {
        &self.sync
    }

    pub fn covers(&self) -> &CoverConfig {
        &self.covers
    }

    pub fn logger(&self) -> Option<&log::Config> {
        self.logger.as_ref()
    }
}

/// 로컬 도서 저장소 설정
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    /// SQLite 데이터베이스 파일 경로
    #[serde(default = "default_db_path")]
    path: String,
    #[serde(default = "default_pool_size")]
    pool_size: u32,
}

impl DbConfig {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn pool_size(&self) -> u32 {
        self.pool_size
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            pool_size: default_pool_size(),
        }
    }
}

/// 외부 도서 검색 API 설정
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 사용할 API ("google", "openlibrary")
    #[serde(default = "default_site")]
    site: String,
    key: Option<String>,
    #[serde(default = "default_api_timeout")]
    timeout_secs: u64,
    /// 도서 검색 시 가져올 최대 결과 수
    #[serde(default = "default_search_limit")]
    search_limit: u32,
}

impl ApiConfig {
    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn search_limit(&self) -> u32 {
        self.search_limit
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            site: default_site(),
            key: None,
            timeout_secs: default_api_timeout(),
            search_limit: default_search_limit(),
        }
    }
}

/// 백그라운드 동기화 설정
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// 동기화 한 번을 기다리는 최대 시간(초)
    #[serde(default = "default_sync_timeout")]
    timeout_secs: u64,

    /// 저장된 도서 수가 이 값 이하이면 동기화 전에 커서를 처음으로 되돌린다.
    #[serde(default = "default_reset_threshold")]
    reset_threshold: i64,

    #[serde(default = "default_page_size")]
    page_size: u32,

    /// 동기화 한 번에 검색할 주제 수
    #[serde(default = "default_topics_per_run")]
    topics_per_run: usize,

    #[serde(default = "default_topics")]
    topics: Vec<String>,

    #[serde(default)]
    download_covers: bool,

    /// 네트워크 연결 확인에 사용할 호스트. 설정하지 않으면 연결 확인을 하지 않는다.
    probe_host: Option<String>,
    #[serde(default = "default_probe_port")]
    probe_port: u16,
}

impl SyncConfig {
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn reset_threshold(&self) -> i64 {
        self.reset_threshold
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn topics_per_run(&self) -> usize {
        self.topics_per_run
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn download_covers(&self) -> bool {
        self.download_covers
    }

    pub fn probe_host(&self) -> Option<&str> {
        self.probe_host.as_deref()
    }

    pub fn probe_port(&self) -> u16 {
        self.probe_port
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_sync_timeout(),
            reset_threshold: default_reset_threshold(),
            page_size: default_page_size(),
            topics_per_run: default_topics_per_run(),
            topics: default_topics(),
            download_covers: false,
            probe_host: None,
            probe_port: default_probe_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverConfig {
    #[serde(default = "default_cover_dir")]
    dir: String,
}

impl CoverConfig {
    pub fn dir(&self) -> &str {
        &self.dir
    }
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self { dir: default_cover_dir() }
    }
}

fn default_db_path() -> String {
    "book_buddy.db".to_owned()
}

fn default_pool_size() -> u32 {
    4
}

fn default_site() -> String {
    "google".to_owned()
}

fn default_api_timeout() -> u64 {
    crate::provider::api::DEFAULT_TIMEOUT_SECONDS
}

fn default_search_limit() -> u32 {
    crate::provider::api::DEFAULT_LIMIT
}

fn default_sync_timeout() -> u64 {
    15
}

fn default_reset_threshold() -> i64 {
    5
}

fn default_page_size() -> u32 {
    20
}

fn default_topics_per_run() -> usize {
    2
}

fn default_topics() -> Vec<String> {
    ["fiction", "mystery", "fantasy", "science fiction", "biography", "history", "romance", "self-help"]
        .iter()
        .map(|t| t.to_string())
        .collect()
}

fn default_probe_port() -> u16 {
    443
}

fn default_cover_dir() -> String {
    "covers".to_owned()
}

fn run_mode() -> String {
    env::var("RUN_MODE").unwrap_or_else(|_| DEFAULT_RUN_MODE.into())
}

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    dotenvy::from_filename(format!(".env.{}", run_mode())).ok();
    dotenvy::dotenv().ok();
}

/// `config/{RUN_MODE}.json` 파일과 `BOOK_BUDDY__` 접두사의 환경 변수에서 설정을 읽는다.
/// 설정 파일이 없을 경우 기본값을 사용한다.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config = ::config::Config::builder()
        .add_source(::config::File::with_name(&format!("config/{}.json", run_mode())).required(false))
        .add_source(::config::Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__"))
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::config::FileFormat;

    fn from_json(json: &str) -> AppConfig {
        ::config::Config::builder()
            .add_source(::config::File::from_str(json, FileFormat::Json))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = from_json("{}");

        assert_eq!(config.db().path(), "book_buddy.db");
        assert_eq!(config.api().site(), "google");
        assert_eq!(config.api().key(), None);
        assert_eq!(config.sync().timeout_secs(), 15);
        assert_eq!(config.sync().reset_threshold(), 5);
        assert_eq!(config.sync().page_size(), 20);
        assert_eq!(config.sync().topics_per_run(), 2);
        assert_eq!(config.sync().topics().len(), 8);
        assert!(!config.sync().download_covers());
        assert!(config.logger().is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = from_json(r#"{
            "api": { "site": "openlibrary", "key": "" },
            "sync": { "topics": ["poetry"], "probe_host": "openlibrary.org" },
            "logger": { "dir": "logs", "name": "book-buddy" }
        }"#);

        assert_eq!(config.api().site(), "openlibrary");
        assert_eq!(config.api().key(), None);
        assert_eq!(config.api().timeout_secs(), 10);
        assert_eq!(config.sync().topics(), &["poetry".to_owned()]);
        assert_eq!(config.sync().probe_host(), Some("openlibrary.org"));
        assert_eq!(config.sync().probe_port(), 443);
        assert!(config.logger().is_some());
    }
}
