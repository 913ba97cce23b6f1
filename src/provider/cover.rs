use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

const COVER_EXTENSION: &str = "jpg";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverError {
    #[error("cover request failed: {0}")]
    RequestFailed(String),

    #[error("cover http status: {0}")]
    HttpStatus(u16),

    #[error("cover is empty")]
    Empty,

    #[error("cannot write cover file: {0}")]
    Io(String),
}

/// 표지 이미지 저장소
///
/// 내려받은 표지는 `<dir>/<uuid>.jpg`로 저장되고 도서에는 저장된 파일의 경로가 기록된다.
#[derive(Debug, Clone)]
pub struct CoverStore {
    http: reqwest::Client,
    dir: PathBuf,
}

impl CoverStore {
    pub fn new(http: reqwest::Client, dir: impl Into<PathBuf>) -> Self {
        Self { http, dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 표지를 내려받아 저장하고 저장된 파일 경로를 반환한다.
    pub async fn download(&self, url: &str) -> Result<PathBuf, CoverError> {
        let response = self.http.get(url)
            .send()
            .await
            .map_err(|e| CoverError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CoverError::HttpStatus(response.status().as_u16()));
        }

        let bytes = response.bytes().await
            .map_err(|e| CoverError::RequestFailed(e.to_string()))?;
        self.save(&bytes).await
    }

    /// 이미지 데이터를 새 파일로 저장한다.
    pub async fn save(&self, bytes: &[u8]) -> Result<PathBuf, CoverError> {
        if bytes.is_empty() {
            return Err(CoverError::Empty);
        }

        tokio::fs::create_dir_all(&self.dir).await
            .map_err(|e| CoverError::Io(e.to_string()))?;

        let path = self.dir.join(format!("{}.{}", Uuid::new_v4(), COVER_EXTENSION));
        tokio::fs::write(&path, bytes).await
            .map_err(|e| CoverError::Io(e.to_string()))?;

        let path = std::path::absolute(&path)
            .map_err(|e| CoverError::Io(e.to_string()))?;
        debug!("표지를 저장 했습니다. (path: {})", path.display());
        Ok(path)
    }
}
