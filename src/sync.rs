//! 백그라운드 도서 동기화
//!
//! 동기화는 한 번에 하나만 실행되며 새 동기화가 시작되면 실행 중인 동기화는 중단된다.
//! 동기화 결과는 상태 채널(`watch`)과 이벤트 채널(`broadcast`)로 전달된다.

use crate::config::SyncConfig;
use crate::fetcher::{BookFetcher, FetchCursor};
use crate::item::timestamp_now;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::AbortHandle;
use tracing::{error, info, warn};

const EVENT_CAPACITY: usize = 16;
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// 동기화 상태
///
/// 종료 상태(`Completed`, `TimedOut`, `Failed`)는 `Idle`로 돌아가지 않고 다음 동기화가 시작되어
/// `Running`이 될 때까지 유지된다. 따라서 `Idle`은 첫 동기화 전에만 관찰된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Running,
    Completed { inserted: usize },
    TimedOut,
    Failed { reason: String },
}

/// 동기화를 요청한 호출자에게 돌려주는 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// 네트워크에 연결할 수 없어 시도하지 않음
    RetryLater,
    Completed { inserted: usize },
    /// 제한 시간 안에 끝나지 않음. 새 도서가 없는 것으로 본다.
    TimedOut,
    Failed { reason: String },
    /// 새 동기화가 시작되어 중단됨
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// 새 도서가 한 권 이상 추가됨
    BooksAdded { count: usize, finished_at: String },
}

/// 네트워크 연결 확인
#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_reachable(&self) -> bool;
}

pub struct AlwaysReachable;

#[async_trait]
impl Connectivity for AlwaysReachable {
    async fn is_reachable(&self) -> bool {
        true
    }
}

/// 지정한 호스트에 TCP 연결이 되는지로 네트워크 연결을 확인한다.
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port, timeout: PROBE_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Connectivity for TcpProbe {
    async fn is_reachable(&self) -> bool {
        let connect = tokio::net::TcpStream::connect((self.host.as_str(), self.port));
        matches!(tokio::time::timeout(self.timeout, connect).await, Ok(Ok(_)))
    }
}

/// 설정에 연결 확인 호스트가 있으면 [`TcpProbe`]를, 없으면 [`AlwaysReachable`]을 사용한다.
pub fn connectivity_from(config: &SyncConfig) -> Arc<dyn Connectivity> {
    match config.probe_host() {
        Some(host) => Arc::new(TcpProbe::new(host, config.probe_port())),
        None => Arc::new(AlwaysReachable),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    pub timeout: Duration,
    /// 저장된 도서 수가 이 값 이하이면 동기화 전에 커서를 처음으로 되돌린다.
    pub reset_threshold: i64,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from(&SyncConfig::default())
    }
}

impl From<&SyncConfig> for SyncOptions {
    fn from(config: &SyncConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs()),
            reset_threshold: config.reset_threshold(),
        }
    }
}

struct InFlight {
    run: u64,
    abort: AbortHandle,
}

/// 백그라운드 동기화 실행기
pub struct SyncOrchestrator {
    fetcher: Arc<BookFetcher>,
    connectivity: Arc<dyn Connectivity>,
    options: SyncOptions,
    cursor: Mutex<FetchCursor>,
    in_flight: Mutex<Option<InFlight>>,
    runs: AtomicU64,
    last_synced_at: Mutex<Option<String>>,
    state: watch::Sender<SyncState>,
    events: broadcast::Sender<SyncEvent>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SyncOrchestrator {
    pub fn new(fetcher: Arc<BookFetcher>, connectivity: Arc<dyn Connectivity>, options: SyncOptions) -> Self {
        let (state, _) = watch::channel(SyncState::Idle);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            fetcher,
            connectivity,
            options,
            cursor: Mutex::new(FetchCursor::start()),
            in_flight: Mutex::new(None),
            runs: AtomicU64::new(0),
            last_synced_at: Mutex::new(None),
            state,
            events,
        }
    }

    pub fn with_cursor(self, cursor: FetchCursor) -> Self {
        *lock(&self.cursor) = cursor;
        self
    }

    pub fn state(&self) -> SyncState {
        self.state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    pub fn cursor(&self) -> FetchCursor {
        *lock(&self.cursor)
    }

    /// 마지막으로 동기화가 완료된 시간
    pub fn last_synced_at(&self) -> Option<String> {
        lock(&self.last_synced_at).clone()
    }

    /// 인기 도서를 동기화 한다.
    pub async fn sync(&self) -> SyncOutcome {
        if !self.connectivity.is_reachable().await {
            info!("네트워크에 연결할 수 없어 동기화를 미룹니다.");
            return SyncOutcome::RetryLater;
        }

        self.reset_cursor_if_sparse().await;

        let cursor = self.cursor();
        let fetcher = self.fetcher.clone();
        let mut handle = tokio::spawn(async move { fetcher.fetch_popular(cursor).await });
        let run = self.runs.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(previous) = lock(&self.in_flight).replace(InFlight { run, abort: handle.abort_handle() }) {
            info!("실행 중인 동기화를 중단 합니다. (run: {})", previous.run);
            previous.abort.abort();
        }
        self.state.send_replace(SyncState::Running);

        let result = tokio::time::timeout(self.options.timeout, &mut handle).await;
        if !self.finish_run(run) {
            return SyncOutcome::Superseded;
        }

        match result {
            Ok(Ok(report)) => {
                *lock(&self.cursor) = report.cursor;
                let finished_at = timestamp_now();
                *lock(&self.last_synced_at) = Some(finished_at.clone());
                self.state.send_replace(SyncState::Completed { inserted: report.inserted });

                if report.inserted > 0 {
                    let _ = self.events.send(SyncEvent::BooksAdded { count: report.inserted, finished_at });
                }
                info!("동기화를 완료 했습니다. (inserted: {})", report.inserted);
                SyncOutcome::Completed { inserted: report.inserted }
            }
            Ok(Err(e)) if e.is_cancelled() => SyncOutcome::Superseded,
            Ok(Err(e)) => {
                error!("동기화 작업이 비정상 종료 되었습니다. (error: {})", e);
                let reason = e.to_string();
                self.state.send_replace(SyncState::Failed { reason: reason.clone() });
                SyncOutcome::Failed { reason }
            }
            Err(_) => {
                warn!("동기화가 제한 시간({:?}) 안에 끝나지 않았습니다.", self.options.timeout);
                self.state.send_replace(SyncState::TimedOut);
                SyncOutcome::TimedOut
            }
        }
    }

    /// 실행 중 목록에서 이번 실행을 제거한다. 이미 다른 실행으로 교체된 경우 `false`를 반환한다.
    fn finish_run(&self, run: u64) -> bool {
        let mut in_flight = lock(&self.in_flight);
        match in_flight.as_ref() {
            Some(current) if current.run == run => {
                *in_flight = None;
                true
            }
            _ => false,
        }
    }

    async fn reset_cursor_if_sparse(&self) {
        let resolver = self.fetcher.resolver().clone();
        let count = match tokio::task::spawn_blocking(move || resolver.count_books()).await {
            Ok(Ok(count)) => count,
            Ok(Err(e)) => {
                warn!("저장된 도서 수를 확인할 수 없습니다. (error: {})", e);
                return;
            }
            Err(e) => {
                error!("{:?}", e);
                return;
            }
        };

        if count <= self.options.reset_threshold {
            info!("저장된 도서가 적어 처음부터 다시 수집 합니다. (count: {})", count);
            lock(&self.cursor).reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetcherOptions;
    use crate::item::repo::BookSqliteStore;
    use crate::item::{sample_books, Candidate, Site};
    use crate::provider::api::stub::StubClient;
    use crate::resolver::BookResolver;
    use tempfile::TempDir;

    struct Unreachable;

    #[async_trait]
    impl Connectivity for Unreachable {
        async fn is_reachable(&self) -> bool {
            false
        }
    }

    fn candidate(title: &str, author: &str) -> Candidate {
        let mut candidate = Candidate::new(Site::Google);
        candidate.title = Some(title.to_owned());
        candidate.authors = vec![author.to_owned()];
        candidate
    }

    fn setup(client: Arc<StubClient>, timeout: Duration) -> (TempDir, BookResolver, SyncOrchestrator) {
        setup_with(client, Arc::new(AlwaysReachable), timeout)
    }

    fn setup_with(client: Arc<StubClient>, connectivity: Arc<dyn Connectivity>, timeout: Duration) -> (TempDir, BookResolver, SyncOrchestrator) {
        let dir = tempfile::tempdir().unwrap();
        let store = BookSqliteStore::open(dir.path().join("books.db").to_str().unwrap(), 2).unwrap();
        let resolver = BookResolver::new(Arc::new(store));

        let options = FetcherOptions {
            topics: vec!["fiction".to_owned()],
            topics_per_run: 1,
            ..FetcherOptions::default()
        };
        let fetcher = Arc::new(BookFetcher::new(client, resolver.clone(), options));
        let orchestrator = SyncOrchestrator::new(fetcher, connectivity, SyncOptions { timeout, reset_threshold: 5 });
        (dir, resolver, orchestrator)
    }

    #[tokio::test]
    async fn unreachable_network_retries_later_without_request() {
        let client = Arc::new(StubClient::returning(vec![candidate("Dune", "Frank Herbert")]));
        let (_dir, _resolver, orchestrator) = setup_with(client.clone(), Arc::new(Unreachable), Duration::from_secs(5));

        assert_eq!(orchestrator.sync().await, SyncOutcome::RetryLater);
        assert_eq!(client.calls(), 0);
        assert_eq!(orchestrator.state(), SyncState::Idle);
    }

    #[tokio::test]
    async fn completed_sync_emits_event_only_for_new_books() {
        let client = Arc::new(StubClient::returning(vec![
            candidate("Dune", "Frank Herbert"),
            candidate("Emma", "Jane Austen"),
        ]));
        let (_dir, resolver, orchestrator) = setup(client, Duration::from_secs(5));
        let mut events = orchestrator.subscribe_events();

        assert_eq!(orchestrator.sync().await, SyncOutcome::Completed { inserted: 2 });
        assert_eq!(orchestrator.state(), SyncState::Completed { inserted: 2 });
        assert!(orchestrator.last_synced_at().is_some());
        assert_eq!(resolver.count_books().unwrap(), 2);

        let SyncEvent::BooksAdded { count, .. } = events.try_recv().unwrap();
        assert_eq!(count, 2);

        assert_eq!(orchestrator.sync().await, SyncOutcome::Completed { inserted: 0 });
        assert!(matches!(events.try_recv(), Err(broadcast::error::TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn slow_sync_times_out() {
        let client = Arc::new(StubClient::returning(vec![]).with_delay(Duration::from_millis(500)));
        let (_dir, _resolver, orchestrator) = setup(client, Duration::from_millis(50));
        let mut state = orchestrator.subscribe_state();

        assert_eq!(orchestrator.sync().await, SyncOutcome::TimedOut);
        assert_eq!(*state.borrow_and_update(), SyncState::TimedOut);
        assert_eq!(orchestrator.last_synced_at(), None);
    }

    #[tokio::test]
    async fn new_sync_supersedes_running_one() {
        let client = Arc::new(StubClient::returning(vec![]).with_delay(Duration::from_millis(300)));
        let (_dir, _resolver, orchestrator) = setup(client, Duration::from_secs(5));
        let orchestrator = Arc::new(orchestrator);

        let first = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.sync().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        let second = orchestrator.sync().await;
        assert_eq!(first.await.unwrap(), SyncOutcome::Superseded);
        assert_eq!(second, SyncOutcome::Completed { inserted: 0 });
    }

    #[tokio::test]
    async fn timed_out_run_overlapping_next_run_stores_each_book_once() {
        let candidates = (0..100).map(|i| candidate(&format!("Book {}", i), "Someone")).collect();
        let client = Arc::new(StubClient::returning(candidates).with_delay(Duration::from_millis(150)));
        let (_dir, resolver, orchestrator) = setup(client, Duration::from_millis(100));

        assert_eq!(orchestrator.sync().await, SyncOutcome::TimedOut);
        assert_eq!(orchestrator.sync().await, SyncOutcome::TimedOut);

        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            if resolver.count_books().unwrap() >= 100 {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(300)).await;

        let books = resolver.fetch_books().unwrap();
        assert_eq!(books.len(), 100);
        let mut titles: Vec<&str> = books.iter().map(|b| b.title()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), 100);
    }

    #[tokio::test]
    async fn sparse_collection_resets_cursor() {
        let client = Arc::new(StubClient::returning(vec![]));
        let (_dir, _resolver, orchestrator) = setup(client.clone(), Duration::from_secs(5));
        let orchestrator = orchestrator.with_cursor(FetchCursor { topic_index: 0, offset: 40 });

        orchestrator.sync().await;
        assert_eq!(client.requests()[0].offset(), 0);
        assert_eq!(orchestrator.cursor(), FetchCursor { topic_index: 0, offset: 20 });
    }

    #[tokio::test]
    async fn full_collection_keeps_cursor() {
        let client = Arc::new(StubClient::returning(vec![]));
        let (_dir, resolver, orchestrator) = setup(client.clone(), Duration::from_secs(5));
        assert_eq!(resolver.seed_if_empty().unwrap(), sample_books().len());
        let orchestrator = orchestrator.with_cursor(FetchCursor { topic_index: 0, offset: 40 });

        orchestrator.sync().await;
        assert_eq!(client.requests()[0].offset(), 40);
        assert_eq!(orchestrator.cursor(), FetchCursor { topic_index: 0, offset: 60 });
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let probe = TcpProbe::new("127.0.0.1", 1).with_timeout(Duration::from_millis(500));
        assert!(!probe.is_reachable().await);
    }
}
