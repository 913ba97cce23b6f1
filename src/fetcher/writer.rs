use crate::item::Book;
use crate::resolver::BookResolver;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// 저장 결과
#[derive(Debug, Default)]
pub struct WriteResult {
    /// 저장된 도서의 아이디
    pub inserted: Vec<i64>,
    /// 이미 서재에 있어 건너뛴 도서
    pub duplicated: Vec<Book>,
    /// 저장에 실패한 도서
    pub failed: Vec<Book>,
}

impl WriteResult {
    /// 저장되지 않은 도서
    pub fn skipped(&self) -> impl Iterator<Item = &Book> {
        self.duplicated.iter().chain(self.failed.iter())
    }
}

pub trait Writer: Send + Sync {
    fn write(&self, books: Vec<Book>) -> WriteResult;
}

/// 서재에 없는 도서만 저장한다.
///
/// 중복 확인과 저장은 하나의 잠금 안에서 진행되므로 같은 writer를 공유하는 수집 작업이 겹쳐도
/// 먼저 저장된 도서를 다시 저장하지 않는다. 한 건의 저장 실패는 로깅 후 건너뛴다.
/// 서재를 읽지 못할 경우 모든 도서를 중복이 아닌 것으로 본다.
pub struct NewBookOnlyWriter {
    resolver: BookResolver,
    lock: Mutex<()>,
}

impl NewBookOnlyWriter {
    pub fn new(resolver: BookResolver) -> Self {
        Self { resolver, lock: Mutex::new(()) }
    }
}

impl Writer for NewBookOnlyWriter {
    fn write(&self, books: Vec<Book>) -> WriteResult {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut exists = self.resolver.fetch_books()
            .unwrap_or_else(|e| {
                warn!("중복 확인을 위해 저장된 도서를 읽을 수 없습니다. (error: {})", e);
                vec![]
            });

        let mut result = WriteResult::default();
        for book in books {
            if exists.iter().any(|b| b.is_duplicate_of(book.title(), book.author())) {
                debug!("이미 저장된 도서 입니다. (title: {}, author: {})", book.title(), book.author());
                result.duplicated.push(book);
                continue;
            }

            match self.resolver.insert_book(&book) {
                Some(id) => {
                    result.inserted.push(id);
                    exists.push(book);
                }
                None => result.failed.push(book),
            }
        }
        result
    }
}
