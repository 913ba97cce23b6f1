//! 주소(URI) 기반의 도서 저장소 접근 계층
//!
//! 화면과 도서 수집기는 저장소에 직접 접근하지 않고 이 모듈의 [`BookResolver`]를 통해서만 도서를 읽고 쓴다.
//!
//! - `content://com.bookbuddy.provider/books`: 도서 목록
//! - `content://com.bookbuddy.provider/books/<id>`: 도서 한 권

use crate::item::repo::logging_with_default;
use crate::item::{sample_books, Book, BookValues, Column, RepoError, Row, Selection, SharedBookRepository, SortOrder};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const SCHEME: &str = "content";
pub const AUTHORITY: &str = "com.bookbuddy.provider";
pub const BOOKS_PATH: &str = "books";

/// 도서 목록 주소
pub const BOOKS_CONTENT_URI: &str = "content://com.bookbuddy.provider/books";

pub const MIME_TYPE_DIR: &str = "vnd.android.cursor.dir/vnd.com.bookbuddy.provider.books";
pub const MIME_TYPE_ITEM: &str = "vnd.android.cursor.item/vnd.com.bookbuddy.provider.books";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    /// 처리할 수 없는 주소. 호출자의 잘못이므로 재시도 하지 않는다.
    #[error("unknown uri: {0}")]
    UnknownUri(String),

    #[error(transparent)]
    Storage(#[from] RepoError),
}

static BOOKS_URL: LazyLock<Url> = LazyLock::new(|| Url::parse(BOOKS_CONTENT_URI).expect("invalid books content uri"));

/// 저장소 주소
///
/// `<scheme>://<authority>/<segment>...` 형태만 허용하며 빈 경로 조각은 허용하지 않는다.
/// 스킴은 대소문자를 구분하지 않고, 쿼리와 프래그먼트는 대상 판별에 사용하지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    url: Url,
}

impl Uri {
    /// 도서 목록 주소
    pub fn books() -> Self {
        Self { url: BOOKS_URL.clone() }
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn authority(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn segments(&self) -> Vec<&str> {
        self.url.path_segments()
            .map(|segments| segments.collect())
            .unwrap_or_default()
    }

    /// 마지막 경로에 아이디를 붙인 주소를 만든다.
    pub fn with_appended_id(&self, id: i64) -> Self {
        let mut url = self.url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        Self { url }
    }
}

impl FromStr for Uri {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ResolverError::UnknownUri(s.to_owned());

        let url = Url::parse(s).map_err(|_| unknown())?;
        if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) || url.port().is_some() {
            return Err(unknown());
        }

        let uri = Self { url };
        if uri.segments().iter().any(|segment| segment.is_empty()) {
            return Err(unknown());
        }
        Ok(uri)
    }
}

impl Display for Uri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// 주소가 가리키는 대상
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriMatch {
    Books,
    BookId(i64),
}

impl UriMatch {
    pub fn resolve(uri: &Uri) -> Result<Self, ResolverError> {
        if uri.scheme() != SCHEME || !uri.authority().eq_ignore_ascii_case(AUTHORITY) {
            return Err(ResolverError::UnknownUri(uri.to_string()));
        }

        match uri.segments().as_slice() {
            [books] if *books == BOOKS_PATH => Ok(UriMatch::Books),
            [books, id] if *books == BOOKS_PATH => id.parse::<u64>().ok()
                .and_then(|id| i64::try_from(id).ok())
                .map(UriMatch::BookId)
                .ok_or_else(|| ResolverError::UnknownUri(uri.to_string())),
            _ => Err(ResolverError::UnknownUri(uri.to_string())),
        }
    }

    /// 단건 주소는 호출자가 전달한 조건을 무시하고 아이디 조건만 사용한다.
    fn selection(&self, selection: &Selection) -> Selection {
        match self {
            UriMatch::Books => selection.clone(),
            UriMatch::BookId(id) => Selection::Id(*id),
        }
    }
}

/// 도서 저장소 접근 중재자
#[derive(Clone)]
pub struct BookResolver {
    repository: SharedBookRepository,
}

impl BookResolver {
    pub fn new(repository: SharedBookRepository) -> Self {
        Self { repository }
    }

    /// 새 도서를 저장하고 저장된 도서의 주소를 반환한다. 도서 목록 주소만 허용한다.
    pub fn insert(&self, uri: &Uri, values: &BookValues) -> Result<Uri, ResolverError> {
        match UriMatch::resolve(uri)? {
            UriMatch::Books => {
                let id = self.repository.insert(values)?;
                Ok(uri.with_appended_id(id))
            }
            UriMatch::BookId(_) => Err(ResolverError::UnknownUri(uri.to_string())),
        }
    }

    pub fn query(&self, uri: &Uri, projection: Option<&[Column]>, selection: &Selection, order: Option<&SortOrder>) -> Result<Vec<Row>, ResolverError> {
        let selection = UriMatch::resolve(uri)?.selection(selection);
        Ok(self.repository.query(projection, &selection, order)?)
    }

    pub fn update(&self, uri: &Uri, values: &BookValues, selection: &Selection) -> Result<usize, ResolverError> {
        let selection = UriMatch::resolve(uri)?.selection(selection);
        let updated = self.repository.update(values, &selection)?;

        debug!("도서 정보가 수정 되었습니다. (uri: {}, count: {})", uri, updated);
        Ok(updated)
    }

    pub fn delete(&self, uri: &Uri, selection: &Selection) -> Result<usize, ResolverError> {
        let selection = UriMatch::resolve(uri)?.selection(selection);
        let deleted = self.repository.delete(&selection)?;

        debug!("도서가 삭제 되었습니다. (uri: {}, count: {})", uri, deleted);
        Ok(deleted)
    }

    pub fn count(&self, uri: &Uri, selection: &Selection) -> Result<i64, ResolverError> {
        let selection = UriMatch::resolve(uri)?.selection(selection);
        Ok(self.repository.count(&selection)?)
    }

    /// 주소가 가리키는 데이터의 MIME 타입. 알 수 없는 주소는 `None`을 반환한다.
    pub fn mime_type(&self, uri: &Uri) -> Option<&'static str> {
        match UriMatch::resolve(uri).ok()? {
            UriMatch::Books => Some(MIME_TYPE_DIR),
            UriMatch::BookId(_) => Some(MIME_TYPE_ITEM),
        }
    }

    /// 모든 도서를 최근에 추가된 순서로 가져온다.
    pub fn fetch_books(&self) -> Result<Vec<Book>, ResolverError> {
        let rows = self.query(&Uri::books(), None, &Selection::All, Some(&SortOrder::newest_first()))?;
        to_books(rows)
    }

    pub fn get_book(&self, id: i64) -> Result<Option<Book>, ResolverError> {
        let rows = self.query(&Uri::books().with_appended_id(id), None, &Selection::All, None)?;
        Ok(to_books(rows)?.into_iter().next())
    }

    /// 도서를 저장하고 아이디를 반환한다. 저장에 실패할 경우 에러를 로깅하고 `None`을 반환한다.
    pub fn insert_book(&self, book: &Book) -> Option<i64> {
        self.insert(&Uri::books(), &BookValues::from(book))
            .map(|uri| uri.segments().last().and_then(|id| id.parse::<i64>().ok()))
            .unwrap_or_else(logging_with_default)
    }

    /// 도서의 아이디로 도서를 수정한다. 아이디가 없는 도서는 수정하지 않는다.
    pub fn update_book(&self, book: &Book) -> Result<usize, ResolverError> {
        match book.id() {
            Some(id) => self.update(&Uri::books().with_appended_id(id), &BookValues::from(book), &Selection::All),
            None => Ok(0)
        }
    }

    /// 도서를 삭제한다. 도서의 표지 파일이 있을 경우 함께 삭제한다.
    pub fn delete_book(&self, id: i64) -> Result<usize, ResolverError> {
        let book = self.get_book(id)?;
        let deleted = self.delete(&Uri::books().with_appended_id(id), &Selection::All)?;

        if let Some(book) = book.filter(|b| deleted > 0 && b.has_cover()) {
            if let Err(e) = std::fs::remove_file(book.cover_path()) {
                warn!("표지 파일을 삭제할 수 없습니다. (path: {}, error: {})", book.cover_path(), e);
            }
        }
        Ok(deleted)
    }

    pub fn count_books(&self) -> Result<i64, ResolverError> {
        self.count(&Uri::books(), &Selection::All)
    }

    /// 제목과 저자가 같은 도서가 이미 저장 되어 있는지 확인한다.
    pub fn contains_duplicate(&self, title: &str, author: &str) -> Result<bool, ResolverError> {
        let books = self.fetch_books()?;
        Ok(books.iter().any(|b| b.is_duplicate_of(title, author)))
    }

    /// 저장된 도서가 없을 경우 예시 도서를 저장하고 저장된 도서의 수를 반환한다.
    pub fn seed_if_empty(&self) -> Result<usize, ResolverError> {
        if self.count_books()? > 0 {
            return Ok(0);
        }

        let inserted = sample_books().iter()
            .filter_map(|book| self.insert_book(book))
            .count();

        info!("예시 도서를 저장 했습니다. (count: {})", inserted);
        Ok(inserted)
    }
}

fn to_books(rows: Vec<Row>) -> Result<Vec<Book>, ResolverError> {
    rows.into_iter()
        .map(|row| Book::try_from(row).map_err(|e| ResolverError::Storage(RepoError::Corrupted(e.to_string()))))
        .collect()
}
