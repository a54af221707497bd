use std::sync::Arc;

use japan_info_shared::{pagination::PageMetadata, ValidationError};
use tokio::sync::Mutex;

use crate::{
    config::ClientConfig,
    controller::{Action, Completion, FetchRequest, FilterState, FilterStateController},
    fetcher::ContentFetcher,
    source::ContentSource,
};

/// Drives a [`FilterStateController`] against a [`ContentFetcher`].
///
/// The controller lock is held only while applying an action or a
/// completion, never across the network call, so several dispatches may be in
/// flight at once; the controller decides which completion wins.
pub struct BrowseSession {
    controller: Mutex<FilterStateController>,
    fetcher: ContentFetcher,
}

impl BrowseSession {
    pub fn new(controller: FilterStateController, fetcher: ContentFetcher) -> Self {
        Self {
            controller: Mutex::new(controller),
            fetcher,
        }
    }

    /// Session for `source` restored from a URL query string.
    pub fn from_config(
        config: &ClientConfig,
        source: Arc<dyn ContentSource>,
        location: &str,
    ) -> Result<Self, ValidationError> {
        let controller =
            FilterStateController::from_location(location, config.page_size, config.window_width)?;
        let fetcher = ContentFetcher::new(source, config.request_timeout);
        Ok(Self::new(controller, fetcher))
    }

    /// Runs the initial fetch.
    pub async fn open(&self) -> Completion {
        let request = self.controller.lock().await.start();
        self.run(request).await
    }

    /// Applies `action` and runs the fetch it triggers to completion.
    pub async fn dispatch(&self, action: Action) -> Result<Completion, ValidationError> {
        let request = self.controller.lock().await.apply(action)?;
        Ok(self.run(request).await)
    }

    async fn run(&self, mut request: FetchRequest) -> Completion {
        loop {
            let result = self.fetcher.fetch(&request.query).await;
            match self.controller.lock().await.complete(&request, result) {
                Completion::Refetch(next) => request = next,
                done => return done,
            }
        }
    }

    pub async fn snapshot(&self) -> FilterState {
        self.controller.lock().await.state().clone()
    }

    pub async fn page_metadata(&self) -> PageMetadata {
        self.controller.lock().await.page_metadata()
    }

    /// Query string to publish to the navigation layer.
    pub async fn location(&self) -> String {
        self.controller.lock().await.location()
    }
}
