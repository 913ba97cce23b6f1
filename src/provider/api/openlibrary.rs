use crate::item::{Candidate, Site};
use crate::provider;
use crate::provider::api::{read_body, ClientError, Request, Response};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};

const SEARCH_ENDPOINT: &str = "https://openlibrary.org/search.json";

/// 표지 아이디로 큰 표지 이미지 주소를 만들 때 사용하는 주소
const COVER_ENDPOINT: &str = "https://covers.openlibrary.org/b/id";

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "numFound", default)]
    pub num_found: i64,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub docs: Vec<Doc>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct Doc {
    /// 작품 키 ("/works/OL27448W")
    pub key: Option<String>,
    pub title: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub author_name: Vec<String>,
    pub first_publish_year: Option<i32>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub subject: Vec<String>,
    /// 표지 이미지 아이디
    pub cover_i: Option<i64>,
}

impl Doc {
    fn into_candidate(self) -> Candidate {
        let mut candidate = Candidate::new(Site::OpenLibrary);
        candidate.cover_url = self.cover_i.filter(|id| *id > 0).map(cover_url);
        candidate.external_id = self.key;
        candidate.title = self.title;
        candidate.authors = self.author_name;
        candidate.published = self.first_publish_year.map(|y| y.to_string());
        candidate.labels = self.subject;
        candidate
    }
}

pub fn cover_url(cover_id: i64) -> String {
    format!("{}/{}-L.jpg", COVER_ENDPOINT, cover_id)
}

/// 응답 본문을 파싱한다.
pub fn parse_response(text: &str) -> Result<Response, ClientError> {
    let parsed = serde_json::from_str::<SearchResponse>(text)
        .map_err(|err| ClientError::ResponseParseFailed(err.to_string()))?;

    Ok(Response {
        total_count: parsed.num_found,
        site: Site::OpenLibrary,
        candidates: parsed.docs.into_iter().map(Doc::into_candidate).collect(),
    })
}

/// Open Library 검색 API 클라이언트
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl provider::api::Client for Client {
    async fn get_books(&self, request: &Request) -> Result<Response, ClientError> {
        let url = build_search_url(request)?;
        let response = self.http.get(url)
            .send()
            .await
            .map_err(|err| ClientError::RequestFailed(err.to_string()))?;

        let text = read_body(response).await?;
        parse_response(&text)
    }

    fn site(&self) -> Site {
        Site::OpenLibrary
    }
}

fn build_search_url(request: &Request) -> Result<Url, ClientError> {
    Url::parse(SEARCH_ENDPOINT)
        .map_err(|_| ClientError::InvalidBaseUrl)
        .map(|mut url| {
            {
                let mut pairs = url.query_pairs_mut();
                if let Some(query) = request.query() {
                    pairs.append_pair("q", query);
                } else {
                    if let Some(title) = request.title() {
                        pairs.append_pair("title", title);
                    }
                    if let Some(author) = request.author() {
                        pairs.append_pair("author", author);
                    }
                }
                pairs.append_pair("limit", &request.limit().to_string())
                    .append_pair("offset", &request.offset().to_string());
            }
            url
        })
}
