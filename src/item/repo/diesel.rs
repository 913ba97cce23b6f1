use crate::item::repo::RepoError;
use crate::item::{BookRepository, BookValues, Column, ColumnValue, Direction, Row, Selection, SortOrder};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection};
use diesel::sql_types::Integer;
use r2d2::{Pool, PooledConnection};
use tracing::{debug, info, warn};

mod schema;

use schema::books;

/// 현재 스키마 버전
/// 저장된 버전과 다를 경우 테이블을 삭제하고 다시 생성한다. (저장소는 로컬 캐시이므로 마이그레이션 하지 않는다)
pub const SCHEMA_VERSION: i32 = 1;

const BUSY_TIMEOUT_MS: u32 = 5_000;

const CREATE_TABLE: &str = "CREATE TABLE books (\
    id INTEGER PRIMARY KEY AUTOINCREMENT, \
    title TEXT NOT NULL, \
    author TEXT NOT NULL, \
    year INTEGER NOT NULL, \
    genre TEXT NOT NULL, \
    status TEXT NOT NULL, \
    rating REAL NOT NULL, \
    cover_path TEXT NOT NULL, \
    created_at TEXT NOT NULL\
)";

const DROP_TABLE: &str = "DROP TABLE IF EXISTS books";

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BookEntity {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
    pub status: String,
    pub rating: f32,
    pub cover_path: String,
    pub created_at: String,
}

impl BookEntity {
    fn value_of(&self, column: Column) -> ColumnValue {
        match column {
            Column::Id => ColumnValue::Integer(self.id),
            Column::Title => ColumnValue::Text(self.title.clone()),
            Column::Author => ColumnValue::Text(self.author.clone()),
            Column::Year => ColumnValue::Integer(self.year as i64),
            Column::Genre => ColumnValue::Text(self.genre.clone()),
            Column::Status => ColumnValue::Text(self.status.clone()),
            Column::Rating => ColumnValue::Real(self.rating as f64),
            Column::CoverPath => ColumnValue::Text(self.cover_path.clone()),
            Column::CreatedAt => ColumnValue::Text(self.created_at.clone()),
        }
    }

    fn to_row(&self, projection: &[Column]) -> Row {
        let mut row = Row::new();
        for column in projection {
            row.insert(*column, self.value_of(*column));
        }
        row
    }
}

#[derive(Insertable)]
#[diesel(table_name = books)]
pub struct NewBook<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub year: i32,
    pub genre: &'a str,
    pub status: &'a str,
    pub rating: f32,
    pub cover_path: &'a str,
    pub created_at: &'a str,
}

impl<'a> TryFrom<&'a BookValues> for NewBook<'a> {
    type Error = RepoError;

    fn try_from(values: &'a BookValues) -> Result<Self, Self::Error> {
        let missing = |column: Column| RepoError::MissingValue(column.name().to_owned());

        Ok(Self {
            title: values.title.as_deref().ok_or_else(|| missing(Column::Title))?,
            author: values.author.as_deref().ok_or_else(|| missing(Column::Author))?,
            year: values.year.ok_or_else(|| missing(Column::Year))?,
            genre: values.genre.map(|g| g.name()).ok_or_else(|| missing(Column::Genre))?,
            status: values.status.map(|s| s.name()).ok_or_else(|| missing(Column::Status))?,
            rating: values.rating.ok_or_else(|| missing(Column::Rating))?,
            cover_path: values.cover_path.as_deref().ok_or_else(|| missing(Column::CoverPath))?,
            created_at: values.created_at.as_deref().ok_or_else(|| missing(Column::CreatedAt))?,
        })
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = books)]
pub struct BookForm<'a> {
    pub title: Option<&'a str>,
    pub author: Option<&'a str>,
    pub year: Option<i32>,
    pub genre: Option<&'a str>,
    pub status: Option<&'a str>,
    pub rating: Option<f32>,
    pub cover_path: Option<&'a str>,
    pub created_at: Option<&'a str>,
}

impl<'a> From<&'a BookValues> for BookForm<'a> {
    fn from(values: &'a BookValues) -> Self {
        Self {
            title: values.title.as_deref(),
            author: values.author.as_deref(),
            year: values.year,
            genre: values.genre.map(|g| g.name()),
            status: values.status.map(|s| s.name()),
            rating: values.rating,
            cover_path: values.cover_path.as_deref(),
            created_at: values.created_at.as_deref(),
        }
    }
}

#[derive(QueryableByName)]
struct UserVersion {
    #[diesel(sql_type = Integer)]
    user_version: i32,
}

/// 커넥션을 풀에서 꺼낼 때마다 적용하는 SQLite 옵션
#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        diesel::sql_query(format!("PRAGMA busy_timeout = {}", self.busy_timeout_ms))
            .execute(conn)
            .map(|_| ())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// 저장된 스키마 버전을 확인하고 버전이 다를 경우 도서 테이블을 다시 생성한다.
fn prepare_schema(conn: &mut SqliteConnection, version: i32) -> QueryResult<()> {
    let stored = diesel::sql_query("PRAGMA user_version")
        .get_result::<UserVersion>(conn)?
        .user_version;

    if stored == version {
        return Ok(());
    }

    if stored != 0 {
        warn!("스키마 버전이 변경 되어 도서 테이블을 다시 생성합니다. ({} -> {})", stored, version);
    }

    conn.transaction(|conn| {
        diesel::sql_query(DROP_TABLE).execute(conn)?;
        diesel::sql_query(CREATE_TABLE).execute(conn)?;
        diesel::sql_query(format!("PRAGMA user_version = {}", version)).execute(conn)?;
        Ok(())
    })
}

/// SQLite 도서 저장소
pub struct BookSqliteStore {
    pool: SqlitePool,
}

impl BookSqliteStore {

    /// 데이터베이스 파일을 열고 스키마를 준비한다.
    pub fn open(path: &str, pool_size: u32) -> Result<Self, RepoError> {
        let manager = ConnectionManager::<SqliteConnection>::new(path);
        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .test_on_check_out(true)
            .connection_customizer(Box::new(ConnectionOptions { busy_timeout_ms: BUSY_TIMEOUT_MS }))
            .build(manager)
            .map_err(|e| RepoError::Connect(e.to_string()))?;

        let store = Self { pool };
        {
            let mut connection = store.connection()?;
            prepare_schema(&mut connection, SCHEMA_VERSION)
                .map_err(|e| RepoError::SqlExecute(e.to_string()))?;
        }

        info!("도서 저장소를 열었습니다. (path: {}, schema: {})", path, SCHEMA_VERSION);
        Ok(store)
    }

    fn connection(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>, RepoError> {
        self.pool.get()
            .map_err(|e| RepoError::Connect(e.to_string()))
    }
}

macro_rules! order_with_id {
    ($query:expr, $column:expr, $direction:expr) => {
        match $direction {
            Direction::Asc => $query.order($column.asc()).then_order_by(books::id.asc()),
            Direction::Desc => $query.order($column.desc()).then_order_by(books::id.desc()),
        }
    };
}

impl BookRepository for BookSqliteStore {

    fn insert(&self, values: &BookValues) -> Result<i64, RepoError> {
        let new_book = NewBook::try_from(values)?;
        let mut connection = self.connection()?;

        let id = diesel::insert_into(books::table)
            .values(&new_book)
            .returning(books::id)
            .get_result::<i64>(&mut connection)
            .map_err(|e| RepoError::SqlExecute(e.to_string()))?;

        debug!("도서가 저장 되었습니다. (id: {}, title: {})", id, new_book.title);
        Ok(id)
    }

    fn query(&self, projection: Option<&[Column]>, selection: &Selection, order: Option<&SortOrder>) -> Result<Vec<Row>, RepoError> {
        let mut connection = self.connection()?;

        let mut query = books::table
            .select(BookEntity::as_select())
            .into_boxed();

        query = match selection {
            Selection::All => query,
            Selection::Id(id) => query.filter(books::id.eq(*id)),
            Selection::Status(status) => query.filter(books::status.eq(status.name())),
            Selection::Genre(genre) => query.filter(books::genre.eq(genre.name())),
        };

        query = match order {
            None => query.order(books::id.asc()),
            Some(order) => match order.column {
                Column::Id => match order.direction {
                    Direction::Asc => query.order(books::id.asc()),
                    Direction::Desc => query.order(books::id.desc()),
                },
                Column::Title => order_with_id!(query, books::title, order.direction),
                Column::Author => order_with_id!(query, books::author, order.direction),
                Column::Year => order_with_id!(query, books::year, order.direction),
                Column::Genre => order_with_id!(query, books::genre, order.direction),
                Column::Status => order_with_id!(query, books::status, order.direction),
                Column::Rating => order_with_id!(query, books::rating, order.direction),
                Column::CoverPath => order_with_id!(query, books::cover_path, order.direction),
                Column::CreatedAt => order_with_id!(query, books::created_at, order.direction),
            }
        };

        let entities = query
            .load::<BookEntity>(&mut connection)
            .map_err(|e| RepoError::SqlExecute(e.to_string()))?;

        let projection = projection.unwrap_or(&Column::ALL);
        Ok(entities.iter().map(|e| e.to_row(projection)).collect())
    }

    fn update(&self, values: &BookValues, selection: &Selection) -> Result<usize, RepoError> {
        if values.is_empty() {
            return Ok(0);
        }

        let form = BookForm::from(values);
        let mut connection = self.connection()?;

        let updated = match selection {
            Selection::All => diesel::update(books::table)
                .set(&form)
                .execute(&mut connection),
            Selection::Id(id) => diesel::update(books::table.filter(books::id.eq(*id)))
                .set(&form)
                .execute(&mut connection),
            Selection::Status(status) => diesel::update(books::table.filter(books::status.eq(status.name())))
                .set(&form)
                .execute(&mut connection),
            Selection::Genre(genre) => diesel::update(books::table.filter(books::genre.eq(genre.name())))
                .set(&form)
                .execute(&mut connection),
        };

        updated.map_err(|e| RepoError::SqlExecute(e.to_string()))
    }

    fn delete(&self, selection: &Selection) -> Result<usize, RepoError> {
        let mut connection = self.connection()?;

        let deleted = match selection {
            Selection::All => diesel::delete(books::table)
                .execute(&mut connection),
            Selection::Id(id) => diesel::delete(books::table.filter(books::id.eq(*id)))
                .execute(&mut connection),
            Selection::Status(status) => diesel::delete(books::table.filter(books::status.eq(status.name())))
                .execute(&mut connection),
            Selection::Genre(genre) => diesel::delete(books::table.filter(books::genre.eq(genre.name())))
                .execute(&mut connection),
        };

        deleted.map_err(|e| RepoError::SqlExecute(e.to_string()))
    }

    fn count(&self, selection: &Selection) -> Result<i64, RepoError> {
        let mut connection = self.connection()?;

        let count = match selection {
            Selection::All => books::table
                .count()
                .get_result::<i64>(&mut connection),
            Selection::Id(id) => books::table
                .filter(books::id.eq(*id))
                .count()
                .get_result::<i64>(&mut connection),
            Selection::Status(status) => books::table
                .filter(books::status.eq(status.name()))
                .count()
                .get_result::<i64>(&mut connection),
            Selection::Genre(genre) => books::table
                .filter(books::genre.eq(genre.name()))
                .count()
                .get_result::<i64>(&mut connection),
        };

        count.map_err(|e| RepoError::SqlExecute(e.to_string()))
    }
}
