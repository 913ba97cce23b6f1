use crate::item::{Candidate, Site};
use crate::provider;
use crate::provider::api::{read_body, ClientError, Request, Response};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};

/// 구글 도서 검색 API 엔드포인트 URL
const VOLUMES_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// 구글 도서 검색 API 응답
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    #[serde(default)]
    pub total_items: i64,

    /// 검색 결과가 없을 경우 필드 자체가 내려오지 않는다.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: Option<String>,
    pub volume_info: Option<VolumeInfo>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub authors: Vec<String>,
    /// "2004", "2004-05", "2004-05-01" 형태의 출판일
    pub published_date: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub categories: Vec<String>,
    pub description: Option<String>,
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
}

impl ImageLinks {
    /// 가장 큰 표지 이미지 주소
    pub fn best(&self) -> Option<String> {
        [&self.large, &self.medium, &self.thumbnail, &self.small, &self.small_thumbnail]
            .into_iter()
            .flatten()
            .find(|url| !url.trim().is_empty())
            .map(|url| url.replacen("http://", "https://", 1))
    }
}

impl Volume {
    fn into_candidate(self) -> Candidate {
        let mut candidate = Candidate::new(Site::Google);
        candidate.external_id = self.id;

        if let Some(info) = self.volume_info {
            candidate.cover_url = info.image_links.as_ref().and_then(ImageLinks::best);
            candidate.title = info.title;
            candidate.authors = info.authors;
            candidate.published = info.published_date;
            candidate.labels = info.categories;
            candidate.description = info.description;
        }
        candidate
    }
}

/// 응답 본문을 파싱한다.
pub fn parse_response(text: &str) -> Result<Response, ClientError> {
    let parsed = serde_json::from_str::<VolumesResponse>(text)
        .map_err(|err| ClientError::ResponseParseFailed(err.to_string()))?;

    Ok(Response {
        total_count: parsed.total_items,
        site: Site::Google,
        candidates: parsed.items.into_iter().map(Volume::into_candidate).collect(),
    })
}

/// 구글 도서 검색 API 클라이언트
pub struct Client {
    http: reqwest::Client,
    /// API 키. 없어도 요청 할 수 있지만 호출 한도가 낮아진다.
    key: Option<String>,
}

impl Client {
    pub fn new(http: reqwest::Client, key: Option<String>) -> Self {
        Self { http, key }
    }
}

#[async_trait]
impl provider::api::Client for Client {
    async fn get_books(&self, request: &Request) -> Result<Response, ClientError> {
        let url = build_search_url(self.key.as_deref(), request)?;
        let response = self.http.get(url)
            .send()
            .await
            .map_err(|err| ClientError::RequestFailed(err.to_string()))?;

        let text = read_body(response).await?;
        parse_response(&text)
    }

    fn site(&self) -> Site {
        Site::Google
    }
}

/// 검색어를 만든다. 자유 검색어가 없으면 제목과 저자 조건을 조합한다.
pub fn build_query(request: &Request) -> String {
    if let Some(query) = request.query() {
        return query.to_owned();
    }

    let mut terms = Vec::new();
    if let Some(title) = request.title() {
        terms.push(format!("intitle:\"{}\"", title));
    }
    if let Some(author) = request.author() {
        terms.push(format!("inauthor:\"{}\"", author));
    }
    terms.join("+")
}

fn build_search_url(key: Option<&str>, request: &Request) -> Result<Url, ClientError> {
    Url::parse(VOLUMES_ENDPOINT)
        .map_err(|_| ClientError::InvalidBaseUrl)
        .map(|mut url| {
            {
                let mut pairs = url.query_pairs_mut();
                pairs.append_pair("q", &build_query(request))
                    .append_pair("maxResults", &request.limit().min(40).to_string())
                    .append_pair("startIndex", &request.offset().to_string())
                    .append_pair("printType", "books");
                if let Some(key) = key {
                    pairs.append_pair("key", key);
                }
            }
            url
        })
}
