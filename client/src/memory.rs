use async_trait::async_trait;
use japan_info_shared::{
    corpus, ContentDetail, ContentSummary, DetailRecord, PageResult, QueryDescriptor, TagCount,
};

use crate::{error::FetchError, source::ContentSource};

/// [`ContentSource`] over a corpus held in memory. Evaluates queries exactly
/// like the backend does.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentSource {
    articles: Vec<ContentDetail>,
}

impl MemoryContentSource {
    pub fn new(articles: Vec<ContentDetail>) -> Self {
        Self { articles }
    }

    pub fn articles(&self) -> &[ContentDetail] {
        &self.articles
    }
}

#[async_trait]
impl ContentSource for MemoryContentSource {
    async fn query(&self, query: &QueryDescriptor) -> Result<PageResult, FetchError> {
        Ok(corpus::run_query(&self.articles, query))
    }

    async fn lookup(&self, id: &str) -> Result<Option<DetailRecord>, FetchError> {
        Ok(corpus::find_detail(&self.articles, id))
    }

    async fn related(&self, id: &str) -> Result<Vec<ContentSummary>, FetchError> {
        Ok(corpus::related_candidates(&self.articles, id))
    }

    async fn tags(&self) -> Result<Vec<TagCount>, FetchError> {
        Ok(corpus::tag_counts(&self.articles))
    }
}
