//! Detail view loading.

use japan_info_shared::{related::related_items, ContentDetail, ContentSummary};
use serde::Serialize;

use crate::{
    error::{DetailError, FetchError},
    fetcher::ContentFetcher,
};

/// Everything the detail view renders for one article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub article: ContentDetail,
    pub previous: Option<ContentSummary>,
    pub next: Option<ContentSummary>,
    pub related: Vec<ContentSummary>,
}

#[derive(Clone)]
pub struct DetailLoader {
    fetcher: ContentFetcher,
    related_cap: usize,
}

impl DetailLoader {
    pub fn new(fetcher: ContentFetcher, related_cap: usize) -> Self {
        Self {
            fetcher,
            related_cap,
        }
    }

    /// Loads `id` with its neighbours and related items.
    ///
    /// Related candidates are only requested once the article itself exists.
    /// A failed candidate request degrades to an empty related list.
    pub async fn load(&self, id: &str) -> Result<DetailView, DetailError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(DetailError::NotFound(id.to_string()));
        }

        let record = self
            .fetcher
            .fetch_detail(id)
            .await?
            .ok_or_else(|| DetailError::NotFound(id.to_string()))?;

        let candidates = match self.fetcher.fetch_related(id).await {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!("Failed to fetch related articles for {}: {}", id, err);
                Vec::new()
            },
        };
        let related = related_items(
            &record.article.id,
            &record.article.tags,
            candidates,
            self.related_cap,
        );

        Ok(DetailView {
            article: record.article,
            previous: record.previous,
            next: record.next,
            related,
        })
    }
}

/// State of the active detail view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Idle,
    Loading { id: String },
    Ready(Box<DetailView>),
    NotFound { id: String },
    Failed { id: String, error: FetchError },
}

/// Handle for one navigation to a detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub seq: u64,
    pub id: String,
}

/// Detail view lifecycle. Each navigation supersedes the previous one; a
/// load finishing after the user moved on is dropped.
pub struct DetailSession {
    loader: DetailLoader,
    seq: u64,
    state: DetailState,
}

impl DetailSession {
    pub fn new(loader: DetailLoader) -> Self {
        Self {
            loader,
            seq: 0,
            state: DetailState::Idle,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn navigate(&mut self, id: &str) -> DetailRequest {
        self.seq += 1;
        self.state = DetailState::Loading { id: id.to_string() };
        DetailRequest {
            seq: self.seq,
            id: id.to_string(),
        }
    }

    /// Applies a finished load. Returns `false` when it was stale.
    pub fn complete(
        &mut self,
        request: &DetailRequest,
        result: Result<DetailView, DetailError>,
    ) -> bool {
        let current = matches!(&self.state, DetailState::Loading { id } if *id == request.id);
        if request.seq != self.seq || !current {
            tracing::debug!(id = %request.id, "Dropping stale detail response");
            return false;
        }

        self.state = match result {
            Ok(view) => DetailState::Ready(Box::new(view)),
            Err(DetailError::NotFound(_)) => DetailState::NotFound {
                id: request.id.clone(),
            },
            Err(DetailError::Fetch(error)) => DetailState::Failed {
                id: request.id.clone(),
                error,
            },
        };
        true
    }

    /// Navigates to `id` and loads it.
    pub async fn open(&mut self, id: &str) -> &DetailState {
        let request = self.navigate(id);
        let result = self.loader.load(&request.id).await;
        self.complete(&request, result);
        &self.state
    }

    /// Re-runs the load for the current id after a retriable failure.
    pub async fn retry(&mut self) -> Option<&DetailState> {
        let id = match &self.state {
            DetailState::Failed { id, error } if error.is_retriable() => id.clone(),
            _ => return None,
        };
        Some(self.open(&id).await)
    }

    /// Tears the view down when navigating away.
    pub fn close(&mut self) {
        self.seq += 1;
        self.state = DetailState::Idle;
    }
}
