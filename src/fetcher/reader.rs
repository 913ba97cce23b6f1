use crate::fetcher::FetchCursor;
use crate::item::Candidate;
use crate::provider::api::{Request, SharedClient};
use tracing::{debug, warn};

/// 인기 도서 읽기 결과
#[derive(Debug, Default)]
pub struct ReadResult {
    pub candidates: Vec<Candidate>,
    /// 요청한 검색 수
    pub searched: usize,
    /// 실패한 검색 수
    pub failed: usize,
}

/// 설정된 주제를 돌아가며 검색해 인기 도서 후보를 읽는다.
///
/// 한 번 읽을 때 커서의 주제부터 `topics_per_run`개의 주제를 검색하며 각 주제는 커서의 오프셋부터 `page_size`개를 가져온다.
pub struct PopularReader {
    client: SharedClient,
    topics: Vec<String>,
    topics_per_run: usize,
    page_size: u32,
}

impl PopularReader {
    pub fn new(client: SharedClient, topics: Vec<String>, topics_per_run: usize, page_size: u32) -> Self {
        let topics = topics.into_iter()
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            client,
            topics,
            topics_per_run: topics_per_run.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn topics_per_run(&self) -> usize {
        self.topics_per_run
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 이번에 검색할 주제 목록
    pub fn topics_for(&self, cursor: &FetchCursor) -> Vec<&str> {
        if self.topics.is_empty() {
            return vec![];
        }

        let count = self.topics_per_run.min(self.topics.len());
        (0..count)
            .map(|i| self.topics[(cursor.topic_index + i) % self.topics.len()].as_str())
            .collect()
    }

    /// 주제별로 검색해 후보를 모은다. 실패한 검색은 로깅하고 건너뛴다.
    pub async fn read(&self, cursor: &FetchCursor) -> ReadResult {
        let mut result = ReadResult::default();

        for topic in self.topics_for(cursor) {
            result.searched += 1;

            let request = Request::builder()
                .query(format!("subject:{}", topic))
                .limit(self.page_size)
                .offset(cursor.offset)
                .build();
            let request = match request {
                Ok(request) => request,
                Err(e) => {
                    warn!("인기 도서 검색 요청을 만들 수 없습니다. (topic: {}, error: {})", topic, e);
                    result.failed += 1;
                    continue;
                }
            };

            match self.client.get_books(&request).await {
                Ok(response) => {
                    debug!("인기 도서를 검색 했습니다. (topic: {}, offset: {}, count: {})", topic, cursor.offset, response.candidates.len());
                    result.candidates.extend(response.candidates);
                }
                Err(e) => {
                    warn!("인기 도서 검색에 실패 했습니다. (topic: {}, error: {})", topic, e);
                    result.failed += 1;
                }
            }
        }

        result
    }
}
