use std::{future::Future, sync::Arc, time::Duration};

use japan_info_shared::{ContentSummary, DetailRecord, PageResult, QueryDescriptor, TagCount};

use crate::{error::FetchError, source::ContentSource};

/// Wraps a [`ContentSource`] with the request timeout and response checks.
///
/// The fetcher only returns data; applying it to view state is the caller's
/// job. It never retries on its own.
#[derive(Clone)]
pub struct ContentFetcher {
    source: Arc<dyn ContentSource>,
    timeout: Duration,
}

impl ContentFetcher {
    pub fn new(source: Arc<dyn ContentSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn with_timeout<T>(
        &self,
        what: &str,
        request: impl Future<Output = Result<T, FetchError>>,
    ) -> Result<T, FetchError> {
        let result = match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        };
        if let Err(err) = &result {
            tracing::warn!(retriable = err.is_retriable(), "Failed to fetch {}: {}", what, err);
        }
        result
    }

    /// Fetches one list page. Rejects pages that break the size invariants or
    /// echo a different query.
    pub async fn fetch(&self, query: &QueryDescriptor) -> Result<PageResult, FetchError> {
        let page = self.with_timeout("articles", self.source.query(query)).await?;

        let problem = page.consistency_error().or_else(|| {
            (page.query != *query).then(|| "response belongs to a different query".to_string())
        });
        if let Some(problem) = problem {
            tracing::warn!("Discarding malformed article page: {}", problem);
            return Err(FetchError::InvalidResponse(problem));
        }

        tracing::debug!(
            page = query.page,
            records = page.records.len(),
            total = page.total,
            "Fetched article page"
        );
        Ok(page)
    }

    pub async fn fetch_detail(&self, id: &str) -> Result<Option<DetailRecord>, FetchError> {
        self.with_timeout("article detail", self.source.lookup(id)).await
    }

    pub async fn fetch_related(&self, id: &str) -> Result<Vec<ContentSummary>, FetchError> {
        self.with_timeout("related articles", self.source.related(id)).await
    }

    pub async fn fetch_tags(&self) -> Result<Vec<TagCount>, FetchError> {
        self.with_timeout("tags", self.source.tags()).await
    }
}
