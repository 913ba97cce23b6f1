use std::fmt::Debug;
use thiserror::Error;
use tracing::error;

mod diesel;

pub use self::diesel::{BookSqliteStore, SCHEMA_VERSION};

/// 저장소 에러 열거
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    /// 데이터베이스 연결 실패
    #[error("cannot connect to database: {0}")]
    Connect(String),

    /// SQL 실행 실패
    #[error("sql execute failed: {0}")]
    SqlExecute(String),

    /// 저장에 필요한 컬럼 값이 입력 되지 않음
    #[error("value is required for column `{0}`")]
    MissingValue(String),

    /// 저장된 데이터를 도메인으로 변환할 수 없음
    #[error("corrupted row: {0}")]
    Corrupted(String),
}

/// 에러를 로깅하고 기본값을 반환한다.
/// 한 건의 실패가 전체 작업을 중단 시키지 않아야 하는 곳에서 사용한다.
pub fn logging_with_default<E, R>(e: E) -> R
where
    E: Debug,
    R: Default
{
    error!("{:?}", e);
    R::default()
}
