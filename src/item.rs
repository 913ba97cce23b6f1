pub mod repo;

use chrono::Datelike;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, LazyLock};
use thiserror::Error;

pub use repo::RepoError;

/// 외부 레코드에서 저자를 찾지 못했을 때 사용하는 자리표시 저자명
/// 이 값을 저자로 가지는 도서는 저장소에 저장되지 않는다.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// `created_at` 컬럼에 저장되는 고정 길이 시간 포맷 (문자열 정렬이 곧 시간 정렬이 된다)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 연도 값이 알려지지 않았음을 의미하는 값
pub const UNKNOWN_YEAR: i32 = 0;

/// 최소 허용 출판 연도
pub const MIN_YEAR: i32 = 1000;

static YEAR_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d{4})").unwrap());

/// Item 모듈에서 사용할 에러 열거
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// 필수 데이터가 입력 되지 않음
    #[error("required argument missing: {0}")]
    RequireArgumentMissing(String),

    /// 알 수 없는 열거형 코드
    #[error("unknown code: {0}")]
    UnknownCode(String),

    /// 허용 범위를 벗어난 값
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// 후보 도서 데이터의 출처
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Site {
    Google,
    OpenLibrary,
}

impl TryFrom<&str> for Site {
    type Error = ItemError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "google" => Ok(Site::Google),
            "openlibrary" => Ok(Site::OpenLibrary),
            _ => Err(ItemError::UnknownCode(value.to_owned()))
        }
    }
}

impl Display for Site {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Site::Google => write!(f, "GOOGLE"),
            Site::OpenLibrary => write!(f, "OPENLIBRARY"),
        }
    }
}

/// 로컬 장르 분류
///
/// 외부 API의 자유 형식 주제/카테고리 문자열은 [`crate::genre`]를 통해 이 열거형 중 하나로 변환된다.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Genre {
    Fiction,
    NonFiction,
    Mystery,
    Romance,
    ScienceFiction,
    Fantasy,
    Biography,
    History,
    SelfHelp,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 10] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Mystery,
        Genre::Romance,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Biography,
        Genre::History,
        Genre::SelfHelp,
        Genre::Other,
    ];

    /// 저장소에 기록되는 이름
    pub fn name(&self) -> &'static str {
        match self {
            Genre::Fiction => "FICTION",
            Genre::NonFiction => "NON_FICTION",
            Genre::Mystery => "MYSTERY",
            Genre::Romance => "ROMANCE",
            Genre::ScienceFiction => "SCIENCE_FICTION",
            Genre::Fantasy => "FANTASY",
            Genre::Biography => "BIOGRAPHY",
            Genre::History => "HISTORY",
            Genre::SelfHelp => "SELF_HELP",
            Genre::Other => "OTHER",
        }
    }
}

impl TryFrom<&str> for Genre {
    type Error = ItemError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Genre::ALL.into_iter()
            .find(|g| g.name() == value)
            .ok_or_else(|| ItemError::UnknownCode(value.to_owned()))
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 독서 상태
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ReadingStatus {
    WantToRead,
    CurrentlyReading,
    Finished,
    Abandoned,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 4] = [
        ReadingStatus::WantToRead,
        ReadingStatus::CurrentlyReading,
        ReadingStatus::Finished,
        ReadingStatus::Abandoned,
    ];

    /// 저장소에 기록되는 이름
    pub fn name(&self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "WANT_TO_READ",
            ReadingStatus::CurrentlyReading => "CURRENTLY_READING",
            ReadingStatus::Finished => "FINISHED",
            ReadingStatus::Abandoned => "ABANDONED",
        }
    }

    /// 화면 표시용 이름
    pub fn label(&self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "Want to Read",
            ReadingStatus::CurrentlyReading => "Currently Reading",
            ReadingStatus::Finished => "Finished",
            ReadingStatus::Abandoned => "Abandoned",
        }
    }
}

impl TryFrom<&str> for ReadingStatus {
    type Error = ItemError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ReadingStatus::ALL.into_iter()
            .find(|s| s.name() == value)
            .ok_or_else(|| ItemError::UnknownCode(value.to_owned()))
    }
}

impl Display for ReadingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 현재 로컬 시간을 [`TIMESTAMP_FORMAT`] 형식으로 반환한다.
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// 두 도서가 같은 도서인지 확인한다.
/// 제목과 저자가 대소문자 구분 없이 같을 경우 같은 도서로 판단한다.
pub fn is_same_entry(title: &str, author: &str, other_title: &str, other_author: &str) -> bool {
    title.trim().to_lowercase() == other_title.trim().to_lowercase()
        && author.trim().to_lowercase() == other_author.trim().to_lowercase()
}

/// 도서
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    id: Option<i64>,
    title: String,
    author: String,
    year: i32,
    genre: Genre,
    status: ReadingStatus,
    rating: f32,
    cover_path: String,
    created_at: String,
}

impl Book {
    pub fn builder() -> BookBuilder {
        BookBuilder::new()
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn status(&self) -> ReadingStatus {
        self.status
    }

    pub fn rating(&self) -> f32 {
        self.rating
    }

    pub fn cover_path(&self) -> &str {
        &self.cover_path
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn has_cover(&self) -> bool {
        !self.cover_path.is_empty()
    }

    pub fn is_duplicate_of(&self, title: &str, author: &str) -> bool {
        is_same_entry(&self.title, &self.author, title, author)
    }

    pub fn to_builder(&self) -> BookBuilder {
        let mut builder = BookBuilder::new()
            .title(self.title.clone())
            .author(self.author.clone())
            .year(self.year)
            .genre(self.genre)
            .status(self.status)
            .rating(self.rating)
            .cover_path(self.cover_path.clone())
            .created_at(self.created_at.clone());

        if let Some(id) = self.id {
            builder = builder.id(id);
        }
        builder
    }
}

impl AsRef<Book> for Book {
    fn as_ref(&self) -> &Book {
        self
    }
}

/// Book 빌더
///
/// `status`는 [`ReadingStatus::WantToRead`], `genre`는 [`Genre::Other`], `rating`은 0(평가 없음),
/// `created_at`은 빌드 시점의 시간을 기본값으로 사용한다.
#[derive(Debug, Clone, Default)]
pub struct BookBuilder {
    id: Option<i64>,
    title: Option<String>,
    author: Option<String>,
    year: Option<i32>,
    genre: Option<Genre>,
    status: Option<ReadingStatus>,
    rating: Option<f32>,
    cover_path: Option<String>,
    created_at: Option<String>,
}

impl BookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn genre(mut self, genre: Genre) -> Self {
        self.genre = Some(genre);
        self
    }

    pub fn status(mut self, status: ReadingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn cover_path(mut self, cover_path: impl Into<String>) -> Self {
        self.cover_path = Some(cover_path.into());
        self
    }

    pub fn created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    pub fn build(self) -> Result<Book, ItemError> {
        let title = self.title
            .filter(|t| !t.trim().is_empty())
            .ok_or(ItemError::RequireArgumentMissing("title".to_owned()))?;
        let author = self.author
            .filter(|a| !a.trim().is_empty())
            .ok_or(ItemError::RequireArgumentMissing("author".to_owned()))?;

        let year = self.year.unwrap_or(UNKNOWN_YEAR);
        if !is_plausible_year(year) && year != UNKNOWN_YEAR {
            return Err(ItemError::InvalidArgument(format!("year out of range: {}", year)));
        }

        let rating = self.rating.unwrap_or(0.0);
        if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
            return Err(ItemError::InvalidArgument(format!("rating out of range: {}", rating)));
        }

        Ok(Book {
            id: self.id,
            title,
            author,
            year,
            genre: self.genre.unwrap_or(Genre::Other),
            status: self.status.unwrap_or(ReadingStatus::WantToRead),
            rating,
            cover_path: self.cover_path.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(timestamp_now),
        })
    }
}

/// 1000년부터 내년까지를 유효한 출판 연도로 판단한다.
pub fn is_plausible_year(year: i32) -> bool {
    let max = chrono::Local::now().year() + 1;
    (MIN_YEAR..=max).contains(&year)
}

/// 저장소에 기록할 컬럼 값 모음
///
/// 값이 없는(`None`) 컬럼은 업데이트 대상에서 제외된다.
/// 삽입 시에는 모든 컬럼이 입력 되어 있어야 한다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookValues {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<Genre>,
    pub status: Option<ReadingStatus>,
    pub rating: Option<f32>,
    pub cover_path: Option<String>,
    pub created_at: Option<String>,
}

impl BookValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ReadingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn genre(mut self, genre: Genre) -> Self {
        self.genre = Some(genre);
        self
    }

    pub fn cover_path(mut self, cover_path: impl Into<String>) -> Self {
        self.cover_path = Some(cover_path.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&Book> for BookValues {
    fn from(book: &Book) -> Self {
        Self {
            title: Some(book.title.clone()),
            author: Some(book.author.clone()),
            year: Some(book.year),
            genre: Some(book.genre),
            status: Some(book.status),
            rating: Some(book.rating),
            cover_path: Some(book.cover_path.clone()),
            created_at: Some(book.created_at.clone()),
        }
    }
}

/// 도서 테이블의 컬럼
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Column {
    Id,
    Title,
    Author,
    Year,
    Genre,
    Status,
    Rating,
    CoverPath,
    CreatedAt,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Id,
        Column::Title,
        Column::Author,
        Column::Year,
        Column::Genre,
        Column::Status,
        Column::Rating,
        Column::CoverPath,
        Column::CreatedAt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Title => "title",
            Column::Author => "author",
            Column::Year => "year",
            Column::Genre => "genre",
            Column::Status => "status",
            Column::Rating => "rating",
            Column::CoverPath => "cover_path",
            Column::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Display for ColumnValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Integer(v) => write!(f, "{}", v),
            ColumnValue::Real(v) => write!(f, "{}", v),
            ColumnValue::Text(v) => write!(f, "{}", v),
        }
    }
}

/// 조회 결과의 한 행
/// 조회 시 지정한 컬럼(projection)만 가지고 있다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(BTreeMap<Column, ColumnValue>);

impl Row {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, column: Column, value: ColumnValue) {
        self.0.insert(column, value);
    }

    pub fn get(&self, column: Column) -> Option<&ColumnValue> {
        self.0.get(&column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.0.keys()
    }

    pub fn integer(&self, column: Column) -> Option<i64> {
        match self.0.get(&column)? {
            ColumnValue::Integer(v) => Some(*v),
            _ => None
        }
    }

    pub fn real(&self, column: Column) -> Option<f64> {
        match self.0.get(&column)? {
            ColumnValue::Real(v) => Some(*v),
            ColumnValue::Integer(v) => Some(*v as f64),
            _ => None
        }
    }

    pub fn text(&self, column: Column) -> Option<&str> {
        match self.0.get(&column)? {
            ColumnValue::Text(v) => Some(v.as_str()),
            _ => None
        }
    }
}

impl TryFrom<Row> for Book {
    type Error = ItemError;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let missing = |column: Column| ItemError::RequireArgumentMissing(column.name().to_owned());

        let id = row.integer(Column::Id).ok_or_else(|| missing(Column::Id))?;
        let genre = row.text(Column::Genre).ok_or_else(|| missing(Column::Genre))?;
        let status = row.text(Column::Status).ok_or_else(|| missing(Column::Status))?;

        Ok(Book {
            id: Some(id),
            title: row.text(Column::Title).ok_or_else(|| missing(Column::Title))?.to_owned(),
            author: row.text(Column::Author).ok_or_else(|| missing(Column::Author))?.to_owned(),
            year: row.integer(Column::Year).ok_or_else(|| missing(Column::Year))? as i32,
            genre: Genre::try_from(genre)?,
            status: ReadingStatus::try_from(status)?,
            rating: row.real(Column::Rating).ok_or_else(|| missing(Column::Rating))? as f32,
            cover_path: row.text(Column::CoverPath).ok_or_else(|| missing(Column::CoverPath))?.to_owned(),
            created_at: row.text(Column::CreatedAt).ok_or_else(|| missing(Column::CreatedAt))?.to_owned(),
        })
    }
}

/// 조회/수정/삭제 대상 도서를 선택하는 조건
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    All,
    Id(i64),
    Status(ReadingStatus),
    Genre(Genre),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Asc,
    Desc,
}

/// 정렬 조건
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SortOrder {
    pub column: Column,
    pub direction: Direction,
}

impl SortOrder {
    pub fn new(column: Column, direction: Direction) -> Self {
        Self { column, direction }
    }

    /// 기본 정렬 순서 (최근에 추가된 도서 먼저)
    pub fn newest_first() -> Self {
        Self::new(Column::CreatedAt, Direction::Desc)
    }
}

/// 외부 검색 API에서 얻어온 후보 도서
///
/// 각 API의 응답 형태와 상관없이 하나의 형태로 정규화 되며 아직 검증되거나 저장되지 않은 상태이다.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub site: Site,
    pub external_id: Option<String>,
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub published: Option<String>,
    pub labels: Vec<String>,
    pub cover_url: Option<String>,
    pub description: Option<String>,
}

impl Candidate {
    pub fn new(site: Site) -> Self {
        Self {
            site,
            external_id: None,
            title: None,
            authors: Vec::new(),
            published: None,
            labels: Vec::new(),
            cover_url: None,
            description: None,
        }
    }

    /// 비어있지 않은 제목
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// 저자 목록의 첫 번째 저자를 대표 저자로 사용한다.
    /// 저자가 없을 경우 [`UNKNOWN_AUTHOR`]를 반환한다.
    pub fn primary_author(&self) -> &str {
        self.authors.first()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    pub fn has_known_author(&self) -> bool {
        self.primary_author() != UNKNOWN_AUTHOR
    }

    /// 출판일 문자열의 앞 4자리를 연도로 사용한다.
    /// 연도를 알 수 없거나 유효한 범위가 아닐 경우 [`UNKNOWN_YEAR`]를 반환한다.
    pub fn published_year(&self) -> i32 {
        self.published.as_deref()
            .and_then(|p| YEAR_PREFIX.captures(p))
            .and_then(|c| c[1].parse::<i32>().ok())
            .filter(|y| is_plausible_year(*y))
            .unwrap_or(UNKNOWN_YEAR)
    }
}

/// 도서 저장소
///
/// 저장소에 직접 접근하는 것은 [`crate::resolver::BookResolver`]만 허용된다.
pub trait BookRepository: Send + Sync {

    /// 전달 받은 값으로 새 도서를 저장하고 할당된 아이디를 반환한다.
    fn insert(&self, values: &BookValues) -> Result<i64, RepoError>;

    /// 조건에 맞는 도서를 조회한다. `projection`이 `None`이면 모든 컬럼을 조회한다.
    fn query(&self, projection: Option<&[Column]>, selection: &Selection, order: Option<&SortOrder>) -> Result<Vec<Row>, RepoError>;

    /// 조건에 맞는 도서를 수정하고 수정된 도서의 수를 반환한다.
    fn update(&self, values: &BookValues, selection: &Selection) -> Result<usize, RepoError>;

    /// 조건에 맞는 도서를 삭제하고 삭제된 도서의 수를 반환한다.
    fn delete(&self, selection: &Selection) -> Result<usize, RepoError>;

    /// 조건에 맞는 도서의 수를 센다.
    fn count(&self, selection: &Selection) -> Result<i64, RepoError>;

    /// 모든 도서를 최근에 추가된 순서로 가져온다.
    fn get_all(&self) -> Result<Vec<Book>, RepoError> {
        self.query(None, &Selection::All, Some(&SortOrder::newest_first()))?
            .into_iter()
            .map(|row| Book::try_from(row).map_err(|e| RepoError::Corrupted(e.to_string())))
            .collect()
    }

    /// 아이디로 도서를 찾는다.
    fn get_by_id(&self, id: i64) -> Result<Option<Book>, RepoError> {
        let row = self.query(None, &Selection::Id(id), None)?.into_iter().next();
        row.map(|r| Book::try_from(r).map_err(|e| RepoError::Corrupted(e.to_string())))
            .transpose()
    }

    fn insert_book(&self, book: &Book) -> Result<i64, RepoError> {
        self.insert(&BookValues::from(book))
    }

    /// 도서의 아이디로 저장된 도서를 수정한다. 아이디가 없는 도서는 수정하지 않는다.
    fn update_book(&self, book: &Book) -> Result<usize, RepoError> {
        match book.id() {
            Some(id) => self.update(&BookValues::from(book), &Selection::Id(id)),
            None => Ok(0)
        }
    }

    fn delete_book(&self, id: i64) -> Result<usize, RepoError> {
        self.delete(&Selection::Id(id))
    }
}

/// 비어있는 서재를 채울 때 사용하는 예시 도서 목록
pub fn sample_books() -> Vec<Book> {
    let now = timestamp_now();
    let samples: [(&str, &str, i32, Genre, ReadingStatus, f32); 8] = [
        ("The Great Gatsby", "F. Scott Fitzgerald", 1925, Genre::Fiction, ReadingStatus::Finished, 4.2),
        ("To Kill a Mockingbird", "Harper Lee", 1960, Genre::Fiction, ReadingStatus::Finished, 4.8),
        ("1984", "George Orwell", 1949, Genre::ScienceFiction, ReadingStatus::CurrentlyReading, 0.0),
        ("Dune", "Frank Herbert", 1965, Genre::ScienceFiction, ReadingStatus::WantToRead, 0.0),
        ("The Catcher in the Rye", "J.D. Salinger", 1951, Genre::Fiction, ReadingStatus::Abandoned, 2.5),
        ("Agatha Christie: An Autobiography", "Agatha Christie", 1977, Genre::Biography, ReadingStatus::WantToRead, 0.0),
        ("The Murder of Roger Ackroyd", "Agatha Christie", 1926, Genre::Mystery, ReadingStatus::Finished, 4.5),
        ("A Brief History of Time", "Stephen Hawking", 1988, Genre::NonFiction, ReadingStatus::CurrentlyReading, 4.0),
    ];

    samples.into_iter()
        .filter_map(|(title, author, year, genre, status, rating)| {
            Book::builder()
                .title(title)
                .author(author)
                .year(year)
                .genre(genre)
                .status(status)
                .rating(rating)
                .created_at(now.clone())
                .build()
                .ok()
        })
        .collect()
}

pub type SharedBookRepository = Arc<dyn BookRepository>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_book_with_defaults() {
        let book = Book::builder()
            .title("Dune")
            .author("Frank Herbert")
            .year(1965)
            .build()
            .unwrap();

        assert_eq!(book.id(), None);
        assert_eq!(book.genre(), Genre::Other);
        assert_eq!(book.status(), ReadingStatus::WantToRead);
        assert_eq!(book.rating(), 0.0);
        assert_eq!(book.cover_path(), "");
        assert_eq!(book.created_at().len(), 19);
    }

    #[test]
    fn build_book_rejects_blank_title_and_author() {
        let no_title = Book::builder().title("  ").author("someone").build();
        assert_eq!(no_title, Err(ItemError::RequireArgumentMissing("title".to_owned())));

        let no_author = Book::builder().title("Dune").build();
        assert_eq!(no_author, Err(ItemError::RequireArgumentMissing("author".to_owned())));
    }

    #[test]
    fn build_book_validates_year_and_rating() {
        let base = Book::builder().title("Dune").author("Frank Herbert");

        assert!(base.clone().year(999).build().is_err());
        assert!(base.clone().year(chrono::Local::now().year() + 2).build().is_err());
        assert!(base.clone().year(UNKNOWN_YEAR).build().is_ok());
        assert!(base.clone().rating(5.5).build().is_err());
        assert!(base.clone().rating(-1.0).build().is_err());
        assert!(base.rating(3.5).build().is_ok());
    }

    #[test]
    fn enum_names_round_trip() {
        for genre in Genre::ALL {
            assert_eq!(Genre::try_from(genre.name()), Ok(genre));
        }
        for status in ReadingStatus::ALL {
            assert_eq!(ReadingStatus::try_from(status.to_string().as_str()), Ok(status));
        }
        assert_eq!(Genre::try_from("POETRY"), Err(ItemError::UnknownCode("POETRY".to_owned())));
    }

    #[test]
    fn same_entry_ignores_case_and_surrounding_space() {
        assert!(is_same_entry("Dune", "Frank Herbert", " dune ", "FRANK HERBERT"));
        assert!(!is_same_entry("Dune", "Frank Herbert", "Dune Messiah", "Frank Herbert"));
        assert!(!is_same_entry("Dune", "Frank Herbert", "Dune", "Brian Herbert"));
    }

    #[test]
    fn candidate_primary_author_falls_back_to_placeholder() {
        let mut candidate = Candidate::new(Site::Google);
        assert_eq!(candidate.primary_author(), UNKNOWN_AUTHOR);
        assert!(!candidate.has_known_author());

        candidate.authors = vec!["  ".to_owned(), "Second".to_owned()];
        assert_eq!(candidate.primary_author(), UNKNOWN_AUTHOR);

        candidate.authors = vec!["Ursula K. Le Guin".to_owned(), "Second".to_owned()];
        assert_eq!(candidate.primary_author(), "Ursula K. Le Guin");
    }

    #[test]
    fn candidate_published_year_reads_leading_digits() {
        let mut candidate = Candidate::new(Site::Google);
        assert_eq!(candidate.published_year(), UNKNOWN_YEAR);

        candidate.published = Some("2004-05-01".to_owned());
        assert_eq!(candidate.published_year(), 2004);

        candidate.published = Some("1851".to_owned());
        assert_eq!(candidate.published_year(), 1851);

        candidate.published = Some("May 2004".to_owned());
        assert_eq!(candidate.published_year(), UNKNOWN_YEAR);

        candidate.published = Some("0200".to_owned());
        assert_eq!(candidate.published_year(), UNKNOWN_YEAR);
    }

    #[test]
    fn row_converts_to_book() {
        let mut row = Row::new();
        row.insert(Column::Id, ColumnValue::Integer(7));
        row.insert(Column::Title, ColumnValue::Text("Dune".to_owned()));
        row.insert(Column::Author, ColumnValue::Text("Frank Herbert".to_owned()));
        row.insert(Column::Year, ColumnValue::Integer(1965));
        row.insert(Column::Genre, ColumnValue::Text("SCIENCE_FICTION".to_owned()));
        row.insert(Column::Status, ColumnValue::Text("FINISHED".to_owned()));
        row.insert(Column::Rating, ColumnValue::Real(4.5));
        row.insert(Column::CoverPath, ColumnValue::Text(String::new()));
        row.insert(Column::CreatedAt, ColumnValue::Text("2024-01-01 10:00:00".to_owned()));

        let book = Book::try_from(row.clone()).unwrap();
        assert_eq!(book.id(), Some(7));
        assert_eq!(book.genre(), Genre::ScienceFiction);
        assert_eq!(book.status(), ReadingStatus::Finished);

        let mut partial = Row::new();
        partial.insert(Column::Title, ColumnValue::Text("Dune".to_owned()));
        assert!(Book::try_from(partial).is_err());
    }

    #[test]
    fn sample_books_are_valid() {
        let books = sample_books();
        assert_eq!(books.len(), 8);
        assert!(books.iter().all(|b| b.id().is_none()));
    }
}
