//! Backend data source abstraction and its HTTP implementation.

use async_trait::async_trait;
use japan_info_shared::{ContentSummary, DetailRecord, PageResult, QueryDescriptor, TagCount};
use reqwest::{header, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::FetchError;

/// Read-only access to the japan-info corpus.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// One page of summaries matching `query`, plus the total match count.
    async fn query(&self, query: &QueryDescriptor) -> Result<PageResult, FetchError>;

    /// Full record for `id`, or `None` when no such record exists.
    async fn lookup(&self, id: &str) -> Result<Option<DetailRecord>, FetchError>;

    /// Records that may be related to `id`.
    async fn related(&self, id: &str) -> Result<Vec<ContentSummary>, FetchError>;

    async fn tags(&self) -> Result<Vec<TagCount>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct ArticleListResponse {
    articles: Vec<ContentSummary>,
    total: usize,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    tags: Vec<TagCount>,
}

/// [`ContentSource`] backed by the japan-info HTTP API.
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    client: reqwest::Client,
    api_base: String,
}

impl HttpContentSource {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_base)
    }

    pub fn with_client(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { client, api_base }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/japan-info/{}", self.api_base, path)
    }

    fn article_url(&self, id: &str, suffix: &str) -> String {
        self.url(&format!("articles/{}{}", urlencoding::encode(id), suffix))
    }

    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Response, FetchError> {
        self.client
            .get(url)
            .query(params)
            .header(header::CACHE_CONTROL, "no-cache, no-store, max-age=0")
            .send()
            .await
            .map_err(map_transport_error)
    }
}

fn map_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_decode() {
        FetchError::InvalidResponse(err.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| FetchError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn query(&self, query: &QueryDescriptor) -> Result<PageResult, FetchError> {
        let response = self.get(&self.url("articles"), &query.to_api_params()).await?;
        let body: ArticleListResponse = decode(response).await?;
        Ok(PageResult {
            records: body.articles,
            total: body.total,
            query: query.clone(),
        })
    }

    async fn lookup(&self, id: &str) -> Result<Option<DetailRecord>, FetchError> {
        let response = self.get(&self.article_url(id, ""), &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    async fn related(&self, id: &str) -> Result<Vec<ContentSummary>, FetchError> {
        let response = self.get(&self.article_url(id, "/related"), &[]).await?;
        let body: ArticleListResponse = decode(response).await?;
        Ok(body.articles)
    }

    async fn tags(&self) -> Result<Vec<TagCount>, FetchError> {
        let response = self.get(&self.url("tags"), &[]).await?;
        let body: TagsResponse = decode(response).await?;
        Ok(body.tags)
    }
}
