//! 외부 검색 API에서 도서 후보를 가져와 서재에 추가한다.
//!
//! 인기 도서 수집은 읽기([`reader`]), 거르기([`filter`]), 쓰기([`writer`]) 세 단계로 진행된다.

pub mod filter;
pub mod reader;
pub mod writer;

use crate::config::AppConfig;
use crate::genre;
use crate::item::repo::logging_with_default;
use crate::item::{timestamp_now, Book, Candidate, ItemError, ReadingStatus};
use crate::provider::api::{ClientError, Request, SharedClient, DEFAULT_LIMIT};
use crate::provider::cover::CoverStore;
use crate::resolver::{BookResolver, ResolverError};
use filter::{DropDuplicateCandidateFilter, ExistingBookFilter, Filter, FilterChain, KnownAuthorFilter, RequireTitleFilter};
use reader::PopularReader;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use writer::{NewBookOnlyWriter, Writer};

/// 도서 검색 실패 사유
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchFailure {
    /// 제목과 저자가 모두 비어 있어 요청하지 않음
    #[error("empty query")]
    EmptyQuery,

    #[error("empty response")]
    EmptyResponse,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("http status {0}")]
    Status(u16),
}

impl SearchFailure {
    /// 사용자에게 보여줄 실패 사유
    pub fn reason(&self) -> String {
        match self {
            SearchFailure::EmptyQuery => "Enter a title or an author".to_owned(),
            SearchFailure::EmptyResponse => "Empty response".to_owned(),
            SearchFailure::Transport(_) => "Network error".to_owned(),
            SearchFailure::Status(code) => format!("API Error: {}", code),
        }
    }
}

impl From<ClientError> for SearchFailure {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::HttpStatus(code) => SearchFailure::Status(code),
            ClientError::EmptyResponse
            | ClientError::ResponseTextExtractionFailed(_)
            | ClientError::ResponseParseFailed(_) => SearchFailure::EmptyResponse,
            ClientError::RequestFailed(message) => SearchFailure::Transport(message),
            ClientError::InvalidBaseUrl | ClientError::MissingRequiredParameter(_) => SearchFailure::Transport(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("invalid candidate: {0}")]
    Invalid(#[from] ItemError),

    #[error(transparent)]
    Storage(#[from] ResolverError),

    #[error("book was not inserted")]
    NotInserted,
}

/// 후보 도서 추가 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Inserted(i64),
    Duplicate,
}

/// 인기 도서 검색 위치
///
/// 주제 목록을 한 바퀴 돌 때마다 오프셋이 한 페이지씩 증가한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchCursor {
    pub topic_index: usize,
    pub offset: u32,
}

impl FetchCursor {
    pub fn start() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::start();
    }

    pub fn advance(self, topics_len: usize, topics_per_run: usize, page_size: u32) -> Self {
        if topics_len == 0 {
            return self;
        }

        let next = self.topic_index + topics_per_run.max(1);
        if next >= topics_len {
            Self {
                topic_index: next % topics_len,
                offset: self.offset.saturating_add(page_size),
            }
        } else {
            Self {
                topic_index: next,
                offset: self.offset,
            }
        }
    }
}

/// 인기 도서 수집 결과
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchReport {
    /// 실제로 저장된 도서 수
    pub inserted: usize,
    /// 검색으로 받은 후보 수
    pub fetched: usize,
    pub searched: usize,
    pub failed: usize,
    /// 다음 수집에 사용할 커서
    pub cursor: FetchCursor,
}

#[derive(Debug, Clone)]
pub struct FetcherOptions {
    pub topics: Vec<String>,
    pub topics_per_run: usize,
    pub page_size: u32,
    pub search_limit: u32,
    /// 인기 도서 수집 시 표지도 내려받을지 여부
    pub download_covers: bool,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        let sync = crate::config::SyncConfig::default();
        Self {
            topics: sync.topics().to_vec(),
            topics_per_run: sync.topics_per_run(),
            page_size: sync.page_size(),
            search_limit: DEFAULT_LIMIT,
            download_covers: false,
        }
    }
}

impl From<&AppConfig> for FetcherOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            topics: config.sync().topics().to_vec(),
            topics_per_run: config.sync().topics_per_run(),
            page_size: config.sync().page_size(),
            search_limit: config.api().search_limit(),
            download_covers: config.sync().download_covers(),
        }
    }
}

/// 도서 수집기
pub struct BookFetcher {
    client: SharedClient,
    resolver: BookResolver,
    reader: PopularReader,
    filter: Arc<FilterChain>,
    writer: Arc<dyn Writer>,
    covers: Option<CoverStore>,
    download_covers: bool,
    search_limit: u32,
}

impl BookFetcher {
    pub fn new(client: SharedClient, resolver: BookResolver, options: FetcherOptions) -> Self {
        let mut filter = FilterChain::new();
        filter.add_filter(Box::new(RequireTitleFilter))
            .add_filter(Box::new(KnownAuthorFilter))
            .add_filter(Box::new(DropDuplicateCandidateFilter))
            .add_filter(Box::new(ExistingBookFilter::new(resolver.clone())));

        Self {
            reader: PopularReader::new(client.clone(), options.topics, options.topics_per_run, options.page_size),
            writer: Arc::new(NewBookOnlyWriter::new(resolver.clone())),
            filter: Arc::new(filter),
            client,
            resolver,
            covers: None,
            download_covers: options.download_covers,
            search_limit: options.search_limit.max(1),
        }
    }

    pub fn with_cover_store(mut self, covers: CoverStore) -> Self {
        self.covers = Some(covers);
        self
    }

    pub fn resolver(&self) -> &BookResolver {
        &self.resolver
    }

    /// 제목과 저자로 도서를 검색한다. 제목과 저자가 모두 비어 있으면 요청하지 않는다.
    pub async fn search(&self, title: Option<&str>, author: Option<&str>) -> Result<Vec<Candidate>, SearchFailure> {
        let mut builder = Request::builder().limit(self.search_limit);
        if let Some(title) = title {
            builder = builder.title(title);
        }
        if let Some(author) = author {
            builder = builder.author(author);
        }
        let request = builder.build().map_err(|_| SearchFailure::EmptyQuery)?;

        let response = self.client.get_books(&request).await
            .inspect_err(|e| warn!("도서 검색에 실패 했습니다. (error: {})", e))?;

        debug!("도서를 검색 했습니다. (title: {:?}, author: {:?}, count: {})", title, author, response.candidates.len());
        Ok(response.candidates)
    }

    /// 인기 도서를 검색해 서재에 없는 도서를 추가한다.
    ///
    /// 모든 검색이 실패한 경우 커서를 옮기지 않는다.
    pub async fn fetch_popular(&self, cursor: FetchCursor) -> FetchReport {
        let read = self.reader.read(&cursor).await;
        let fetched = read.candidates.len();

        let filter = self.filter.clone();
        let candidates = tokio::task::spawn_blocking(move || filter.do_filter(read.candidates))
            .await
            .unwrap_or_else(logging_with_default);

        let mut books = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let cover_path = if self.download_covers {
                self.download_cover(candidate).await
            } else {
                String::new()
            };

            match convert_candidate(candidate, cover_path) {
                Ok(book) => books.push(book),
                Err(e) => warn!("후보 도서를 변환할 수 없습니다. (title: {:?}, error: {})", candidate.title(), e),
            }
        }

        let writer = self.writer.clone();
        let written = tokio::task::spawn_blocking(move || writer.write(books))
            .await
            .unwrap_or_else(logging_with_default);
        remove_covers(written.skipped()).await;
        let inserted = written.inserted.len();

        let next = if read.searched > 0 && read.failed == read.searched {
            cursor
        } else {
            cursor.advance(self.reader.topics().len(), self.reader.topics_per_run(), self.reader.page_size())
        };

        info!("인기 도서 수집을 완료 했습니다. (fetched: {}, accepted: {}, inserted: {}, failed searches: {})",
            fetched, candidates.len(), inserted, read.failed);
        FetchReport {
            inserted,
            fetched,
            searched: read.searched,
            failed: read.failed,
            cursor: next,
        }
    }

    /// 후보 도서를 표지 없는 새 도서로 변환한다.
    pub fn convert_candidate(&self, candidate: &Candidate) -> Result<Book, ItemError> {
        convert_candidate(candidate, String::new())
    }

    /// 검색 결과 한 건을 서재에 추가한다. 표지 저장소가 있으면 표지도 내려받는다.
    pub async fn import_candidate(&self, candidate: &Candidate) -> Result<ImportOutcome, ImportError> {
        let book = self.convert_candidate(candidate)?;

        let resolver = self.resolver.clone();
        let (title, author) = (book.title().to_owned(), book.author().to_owned());
        let duplicated = match tokio::task::spawn_blocking(move || resolver.contains_duplicate(&title, &author)).await {
            Ok(Ok(duplicated)) => duplicated,
            Ok(Err(e)) => {
                warn!("중복 확인에 실패 했습니다. 중복이 아닌 것으로 처리 합니다. (error: {})", e);
                false
            }
            Err(e) => logging_with_default(e),
        };
        if duplicated {
            debug!("이미 저장된 도서 입니다. (title: {}, author: {})", book.title(), book.author());
            return Ok(ImportOutcome::Duplicate);
        }

        let cover_path = self.download_cover(candidate).await;
        let book = book.to_builder().cover_path(cover_path).build()?;

        let writer = self.writer.clone();
        let written = tokio::task::spawn_blocking(move || writer.write(vec![book]))
            .await
            .unwrap_or_else(logging_with_default);
        remove_covers(written.skipped()).await;

        if let Some(&id) = written.inserted.first() {
            info!("도서를 추가 했습니다. (id: {})", id);
            Ok(ImportOutcome::Inserted(id))
        } else if !written.duplicated.is_empty() {
            debug!("다른 작업에서 먼저 저장된 도서 입니다. (title: {:?})", candidate.title());
            Ok(ImportOutcome::Duplicate)
        } else {
            Err(ImportError::NotInserted)
        }
    }

    /// 표지를 내려받고 저장된 경로를 반환한다. 표지가 없거나 실패하면 빈 문자열을 반환한다.
    async fn download_cover(&self, candidate: &Candidate) -> String {
        let (Some(covers), Some(url)) = (&self.covers, candidate.cover_url.as_deref()) else {
            return String::new();
        };

        match covers.download(url).await {
            Ok(path) => path.to_string_lossy().into_owned(),
            Err(e) => {
                warn!("표지를 내려받을 수 없습니다. (url: {}, error: {})", url, e);
                String::new()
            }
        }
    }
}

/// 저장되지 않은 도서의 표지 파일을 지운다.
async fn remove_covers(books: impl Iterator<Item = &Book>) {
    for book in books.filter(|b| !b.cover_path().is_empty()) {
        if let Err(e) = tokio::fs::remove_file(book.cover_path()).await {
            warn!("표지 파일을 지울 수 없습니다. (path: {}, error: {})", book.cover_path(), e);
        }
    }
}

/// 후보 도서를 새 도서로 변환한다.
///
/// 독서 상태는 WANT_TO_READ, 평점은 0, 장르는 후보의 라벨로 분류한 값이 된다.
pub fn convert_candidate(candidate: &Candidate, cover_path: String) -> Result<Book, ItemError> {
    let title = candidate.title()
        .ok_or_else(|| ItemError::RequireArgumentMissing("title".to_owned()))?;

    Book::builder()
        .title(title)
        .author(candidate.primary_author())
        .year(candidate.published_year())
        .genre(genre::classify_labels(&candidate.labels))
        .status(ReadingStatus::WantToRead)
        .rating(0.0)
        .cover_path(cover_path)
        .created_at(timestamp_now())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::repo::BookSqliteStore;
    use crate::item::{Genre, Site, UNKNOWN_AUTHOR, UNKNOWN_YEAR};
    use crate::provider::api::stub::StubClient;
    use tempfile::TempDir;

    fn candidate(title: &str, author: Option<&str>, labels: &[&str]) -> Candidate {
        let mut candidate = Candidate::new(Site::Google);
        candidate.title = Some(title.to_owned());
        candidate.authors = author.map(|a| vec![a.to_owned()]).unwrap_or_default();
        candidate.published = Some("1999-03-01".to_owned());
        candidate.labels = labels.iter().map(|l| l.to_string()).collect();
        candidate
    }

    fn resolver() -> (TempDir, BookResolver) {
        let dir = tempfile::tempdir().unwrap();
        let store = BookSqliteStore::open(dir.path().join("books.db").to_str().unwrap(), 2).unwrap();
        (dir, BookResolver::new(Arc::new(store)))
    }

    fn options(topics: &[&str], topics_per_run: usize) -> FetcherOptions {
        FetcherOptions {
            topics: topics.iter().map(|t| t.to_string()).collect(),
            topics_per_run,
            page_size: 20,
            search_limit: 10,
            download_covers: false,
        }
    }

    fn fetcher(client: Arc<StubClient>, resolver: BookResolver) -> BookFetcher {
        BookFetcher::new(client, resolver, options(&["fiction"], 1))
    }

    #[test]
    fn cursor_rotates_topics_then_pages() {
        let cursor = FetchCursor::start();

        let cursor = cursor.advance(3, 2, 20);
        assert_eq!(cursor, FetchCursor { topic_index: 2, offset: 0 });

        let cursor = cursor.advance(3, 2, 20);
        assert_eq!(cursor, FetchCursor { topic_index: 1, offset: 20 });

        let mut cursor = cursor.advance(0, 2, 20);
        assert_eq!(cursor, FetchCursor { topic_index: 1, offset: 20 });

        cursor.reset();
        assert_eq!(cursor, FetchCursor::start());
    }

    #[test]
    fn convert_candidate_fills_import_defaults() {
        let book = convert_candidate(&candidate(" Gone Girl ", Some("Gillian Flynn"), &["Fiction", "Thriller"]), String::new()).unwrap();

        assert_eq!(book.title(), "Gone Girl");
        assert_eq!(book.author(), "Gillian Flynn");
        assert_eq!(book.year(), 1999);
        assert_eq!(book.genre(), Genre::Mystery);
        assert_eq!(book.status(), ReadingStatus::WantToRead);
        assert_eq!(book.rating(), 0.0);
        assert!(!book.has_cover());
        assert_eq!(book.id(), None);

        let mut undated = candidate("Beowulf", None, &[]);
        undated.published = None;
        let book = convert_candidate(&undated, String::new()).unwrap();
        assert_eq!(book.author(), UNKNOWN_AUTHOR);
        assert_eq!(book.year(), UNKNOWN_YEAR);
        assert_eq!(book.genre(), Genre::Other);
    }

    #[test]
    fn search_failure_reasons() {
        assert_eq!(SearchFailure::from(ClientError::HttpStatus(503)).reason(), "API Error: 503");
        assert_eq!(SearchFailure::from(ClientError::RequestFailed("dns".to_owned())).reason(), "Network error");
        assert_eq!(SearchFailure::from(ClientError::EmptyResponse), SearchFailure::EmptyResponse);
        assert_eq!(SearchFailure::from(ClientError::ResponseParseFailed("eof".to_owned())), SearchFailure::EmptyResponse);
    }

    #[tokio::test]
    async fn blank_search_issues_no_request() {
        let (_dir, resolver) = resolver();
        let client = Arc::new(StubClient::returning(vec![]));
        let fetcher = fetcher(client.clone(), resolver);

        assert_eq!(fetcher.search(Some("  "), None).await, Err(SearchFailure::EmptyQuery));
        assert_eq!(fetcher.search(None, None).await, Err(SearchFailure::EmptyQuery));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn search_returns_candidates_or_failure() {
        let (_dir, resolver) = resolver();
        let client = Arc::new(StubClient::returning(vec![candidate("Dune", Some("Frank Herbert"), &[])]));
        let found = fetcher(client.clone(), resolver.clone()).search(Some("Dune"), None).await.unwrap();
        assert_eq!(found.len(), 1);

        let request = &client.requests()[0];
        assert_eq!(request.title(), Some("Dune"));
        assert_eq!(request.limit(), 10);

        let failing = Arc::new(StubClient::failing(ClientError::HttpStatus(429)));
        let result = fetcher(failing, resolver).search(None, Some("Herbert")).await;
        assert_eq!(result, Err(SearchFailure::Status(429)));
    }

    #[tokio::test]
    async fn fetch_popular_inserts_only_new_books_with_known_authors() {
        let (_dir, resolver) = resolver();
        resolver.insert_book(&Book::builder().title("Rebecca").author("Daphne du Maurier").build().unwrap()).unwrap();
        resolver.insert_book(&Book::builder().title("Emma").author("Jane Austen").build().unwrap()).unwrap();

        let client = Arc::new(StubClient::returning(vec![
            candidate("Dune", Some("Frank Herbert"), &["Science Fiction"]),
            candidate("REBECCA", Some("daphne du maurier"), &["Fiction"]),
            candidate("Emma", Some("Jane Austen"), &["Romance"]),
            candidate("Beowulf", None, &["Poetry"]),
            candidate("The Hobbit", Some("J.R.R. Tolkien"), &["Fantasy"]),
        ]));
        let fetcher = fetcher(client.clone(), resolver.clone());

        let report = fetcher.fetch_popular(FetchCursor::start()).await;
        assert_eq!(report.inserted, 2);
        assert_eq!(report.fetched, 5);
        assert_eq!(resolver.count_books().unwrap(), 4);

        let hobbit = resolver.fetch_books().unwrap().into_iter()
            .find(|b| b.title() == "The Hobbit")
            .unwrap();
        assert_eq!(hobbit.genre(), Genre::Fantasy);
        assert!(!resolver.contains_duplicate("Beowulf", UNKNOWN_AUTHOR).unwrap());

        let again = fetcher.fetch_popular(report.cursor).await;
        assert_eq!(again.inserted, 0);
        assert_eq!(resolver.count_books().unwrap(), 4);
    }

    #[tokio::test]
    async fn fetch_popular_pages_through_topics() {
        let (_dir, resolver) = resolver();
        let client = Arc::new(StubClient::returning(vec![]));
        let fetcher = BookFetcher::new(client.clone(), resolver, options(&["fiction", "history", "romance"], 2));

        let report = fetcher.fetch_popular(FetchCursor { topic_index: 2, offset: 0 }).await;
        assert_eq!(report.searched, 2);
        assert_eq!(report.cursor, FetchCursor { topic_index: 1, offset: 20 });

        let queries: Vec<String> = client.requests().iter()
            .filter_map(|r| r.query().map(str::to_owned))
            .collect();
        assert_eq!(queries, vec!["subject:romance".to_owned(), "subject:fiction".to_owned()]);
    }

    #[tokio::test]
    async fn failed_searches_insert_nothing_and_keep_cursor() {
        let (_dir, resolver) = resolver();
        let client = Arc::new(StubClient::failing(ClientError::RequestFailed("offline".to_owned())));
        let fetcher = fetcher(client, resolver.clone());

        let cursor = FetchCursor { topic_index: 0, offset: 40 };
        let report = fetcher.fetch_popular(cursor).await;
        assert_eq!(report.inserted, 0);
        assert_eq!(report.failed, 1);
        assert_eq!(report.cursor, cursor);
        assert_eq!(resolver.count_books().unwrap(), 0);
    }

    #[tokio::test]
    async fn import_candidate_skips_duplicates() {
        let (_dir, resolver) = resolver();
        let client = Arc::new(StubClient::returning(vec![]));
        let fetcher = fetcher(client, resolver.clone());

        let dune = candidate("Dune", Some("Frank Herbert"), &["Science Fiction"]);
        let outcome = fetcher.import_candidate(&dune).await.unwrap();
        assert!(matches!(outcome, ImportOutcome::Inserted(_)));
        assert_eq!(fetcher.import_candidate(&dune).await, Ok(ImportOutcome::Duplicate));

        let untitled = Candidate::new(Site::Google);
        assert!(matches!(fetcher.import_candidate(&untitled).await, Err(ImportError::Invalid(_))));
    }

    #[tokio::test]
    async fn failed_cover_download_still_imports_without_cover() {
        let (dir, resolver) = resolver();
        let client = Arc::new(StubClient::returning(vec![]));
        let covers = CoverStore::new(reqwest::Client::new(), dir.path().join("covers"));
        let fetcher = fetcher(client, resolver.clone()).with_cover_store(covers);

        let mut emma = candidate("Emma", Some("Jane Austen"), &[]);
        emma.cover_url = Some("http://127.0.0.1:1/cover.jpg".to_owned());

        let ImportOutcome::Inserted(id) = fetcher.import_candidate(&emma).await.unwrap() else {
            panic!("expected insert");
        };
        assert!(!resolver.get_book(id).unwrap().unwrap().has_cover());
    }

    async fn serve_covers() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            use tokio::io::{AsyncReadExt, AsyncWriteExt};
            while let Ok((mut stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut request = [0u8; 2048];
                    let _ = stream.read(&mut request).await;
                    let body = [0xFFu8, 0xD8, 0xFF, 0xD9];
                    let head = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len());
                    let _ = stream.write_all(head.as_bytes()).await;
                    let _ = stream.write_all(&body).await;
                });
            }
        });
        format!("http://{}", address)
    }

    fn cover_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn overlapping_fetches_keep_covers_only_for_stored_books() {
        let (dir, resolver) = resolver();
        let base = serve_covers().await;
        let candidates = (0..15)
            .map(|i| {
                let mut candidate = candidate(&format!("Book {}", i), Some("Someone"), &[]);
                candidate.cover_url = Some(format!("{}/{}.jpg", base, i));
                candidate
            })
            .collect();

        let covers_dir = dir.path().join("covers");
        let covers = CoverStore::new(reqwest::Client::new(), &covers_dir);
        let options = FetcherOptions { download_covers: true, ..options(&["fiction"], 1) };
        let fetcher = BookFetcher::new(Arc::new(StubClient::returning(candidates)), resolver.clone(), options)
            .with_cover_store(covers);

        let (first, second) = tokio::join!(
            fetcher.fetch_popular(FetchCursor::start()),
            fetcher.fetch_popular(FetchCursor::start()),
        );

        assert_eq!(first.inserted + second.inserted, 15);
        let books = resolver.fetch_books().unwrap();
        assert_eq!(books.len(), 15);
        assert!(books.iter().all(|b| b.has_cover() && std::path::Path::new(b.cover_path()).exists()));
        assert_eq!(cover_files(&covers_dir), 15);
    }

    #[tokio::test]
    async fn skipped_books_lose_their_cover_files() {
        let (dir, resolver) = resolver();
        resolver.insert_book(&Book::builder().title("Emma").author("Jane Austen").build().unwrap()).unwrap();
        let covers = CoverStore::new(reqwest::Client::new(), dir.path().join("covers"));
        let path = covers.save(&[0xFF, 0xD8]).await.unwrap();

        let duplicate = Book::builder()
            .title("EMMA")
            .author("jane austen")
            .cover_path(path.to_string_lossy())
            .build()
            .unwrap();
        let written = NewBookOnlyWriter::new(resolver.clone()).write(vec![duplicate]);
        assert_eq!(written.duplicated.len(), 1);

        remove_covers(written.skipped()).await;
        assert!(!path.exists());
        assert_eq!(resolver.count_books().unwrap(), 1);
    }
}
