use std::{path::Path, sync::Arc};

use anyhow::Result;
use japan_info_shared::ContentDetail;
use tokio::sync::RwLock;

use crate::markdown;

#[derive(Clone)]
pub struct AppState {
    /// Loaded corpus, newest first
    articles: Arc<RwLock<Vec<ContentDetail>>>,
    /// Page size used when a list request omits `page_size`
    default_page_size: usize,
    /// Largest `page_size` a client may ask for
    max_page_size: usize,
}

impl AppState {
    pub async fn new(content_dir: &Path, default_page_size: usize, max_page_size: usize) -> Result<Self> {
        let articles = markdown::scan_articles(content_dir).await?;
        Ok(Self::from_articles(articles, default_page_size, max_page_size))
    }

    pub fn from_articles(
        articles: Vec<ContentDetail>,
        default_page_size: usize,
        max_page_size: usize,
    ) -> Self {
        let max_page_size = max_page_size.max(1);
        Self {
            articles: Arc::new(RwLock::new(articles)),
            default_page_size: default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    pub async fn articles(&self) -> tokio::sync::RwLockReadGuard<'_, Vec<ContentDetail>> {
        self.articles.read().await
    }

    pub async fn article_count(&self) -> usize {
        self.articles.read().await.len()
    }

    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }

    pub fn max_page_size(&self) -> usize {
        self.max_page_size
    }
}
