use crate::config::ApiConfig;
use crate::item::{Candidate, Site};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub mod google;
pub mod openlibrary;

/// API 요청의 기본 타임아웃 시간(초)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 한 번의 요청으로 가져올 기본 도서 수
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("missing required parameter: {0}")]
    MissingRequiredParameter(String),

    #[error("invalid base url")]
    InvalidBaseUrl,

    /// 네트워크 전송 실패
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// 2xx가 아닌 응답
    #[error("http status: {0}")]
    HttpStatus(u16),

    #[error("cannot read response body: {0}")]
    ResponseTextExtractionFailed(String),

    /// 응답 본문이 비어 있음
    #[error("empty response")]
    EmptyResponse,

    #[error("cannot parse response: {0}")]
    ResponseParseFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// 도서 검색 요청
///
/// 자유 검색어(`query`)와 제목/저자 조건 중 하나 이상이 있어야 한다.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    query: Option<String>,
    title: Option<String>,
    author: Option<String>,
    limit: u32,
    offset: u32,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }
}

#[derive(Default)]
pub struct RequestBuilder {
    query: Option<String>,
    title: Option<String>,
    author: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        RequestBuilder::default()
    }

    pub fn query<S: Into<String>>(mut self, query: S) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author<S: Into<String>>(mut self, author: S) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn build(self) -> Result<Request, RequestError> {
        let non_blank = |s: Option<String>| s
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        let query = non_blank(self.query);
        let title = non_blank(self.title);
        let author = non_blank(self.author);
        if query.is_none() && title.is_none() && author.is_none() {
            return Err(RequestError::InvalidParameter("query, title or author is required".to_string()));
        }

        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 {
            return Err(RequestError::InvalidParameter("limit must be greater than 0".to_string()));
        }

        Ok(Request {
            query,
            title,
            author,
            limit,
            offset: self.offset.unwrap_or(0),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub total_count: i64,
    pub site: Site,
    pub candidates: Vec<Candidate>,
}

impl Response {
    pub fn empty(site: Site) -> Self {
        Response {
            total_count: 0,
            site,
            candidates: Vec::new(),
        }
    }
}

/// 외부 도서 검색 API 클라이언트
#[async_trait]
pub trait Client: Send + Sync {
    async fn get_books(&self, request: &Request) -> Result<Response, ClientError>;

    fn site(&self) -> Site;
}

pub type SharedClient = Arc<dyn Client>;

/// 설정된 사이트의 클라이언트를 생성한다.
pub fn new_client(config: &ApiConfig) -> Result<SharedClient, ClientError> {
    let site = Site::try_from(config.site())
        .map_err(|_| ClientError::MissingRequiredParameter(format!("unsupported site: {}", config.site())))?;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs()))
        .build()
        .map_err(|e| ClientError::RequestFailed(format!("클라이언트 생성 실패: {}", e)))?;

    let client: SharedClient = match site {
        Site::Google => Arc::new(google::Client::new(http, config.key().map(str::to_owned))),
        Site::OpenLibrary => Arc::new(openlibrary::Client::new(http)),
    };
    Ok(client)
}

/// 응답을 받아 본문을 꺼낸다. 2xx가 아닌 응답과 비어 있는 본문은 에러로 처리한다.
pub(crate) async fn read_body(response: reqwest::Response) -> Result<String, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::HttpStatus(status.as_u16()));
    }

    let text = response.text().await
        .map_err(|err| ClientError::ResponseTextExtractionFailed(err.to_string()))?;

    if text.trim().is_empty() {
        return Err(ClientError::EmptyResponse);
    }
    Ok(text)
}

/// 테스트용 클라이언트. 모든 요청에 같은 결과를 돌려준다.
#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    pub struct StubClient {
        result: Result<Vec<Candidate>, ClientError>,
        delay: Duration,
        calls: AtomicUsize,
        requests: Mutex<Vec<Request>>,
    }

    impl StubClient {
        pub fn returning(candidates: Vec<Candidate>) -> Self {
            Self::new(Ok(candidates))
        }

        pub fn failing(error: ClientError) -> Self {
            Self::new(Err(error))
        }

        fn new(result: Result<Vec<Candidate>, ClientError>) -> Self {
            Self {
                result,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn requests(&self) -> Vec<Request> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Client for StubClient {
        async fn get_books(&self, request: &Request) -> Result<Response, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            self.result.clone().map(|candidates| Response {
                total_count: candidates.len() as i64,
                site: Site::Google,
                candidates,
            })
        }

        fn site(&self) -> Site {
            Site::Google
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_requires_some_condition() {
        assert!(Request::builder().build().is_err());
        assert!(Request::builder().title("  ").author("").build().is_err());

        let request = Request::builder().author(" Tolkien ").build().unwrap();
        assert_eq!(request.author(), Some("Tolkien"));
        assert_eq!(request.title(), None);
        assert_eq!(request.limit(), DEFAULT_LIMIT);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn request_rejects_zero_limit() {
        let result = Request::builder().query("fiction").limit(0).build();
        assert_eq!(result, Err(RequestError::InvalidParameter("limit must be greater than 0".to_string())));
    }
}
