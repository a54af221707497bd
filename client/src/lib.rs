//! Client side of the japan-info content browser: fetching, list view state,
//! display-mode selection and detail loading.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use japan_info_client::{Action, BrowseSession, ClientConfig, HttpContentSource};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env();
//! let source = Arc::new(HttpContentSource::new(config.api_base.clone()));
//! let session = BrowseSession::from_config(&config, source, "tags=ramen")?;
//! session.open().await;
//! session.dispatch(Action::SetSearchText("tonkotsu".into())).await?;
//! println!("share link: ?{}", session.location().await);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod detail;
pub mod error;
pub mod fetcher;
pub mod i18n;
pub mod memory;
pub mod render;
pub mod session;
pub mod source;

#[cfg(test)]
mod testing;

pub use config::ClientConfig;
pub use controller::{Action, Completion, FetchRequest, FilterState, FilterStateController};
pub use detail::{DetailLoader, DetailSession, DetailState, DetailView};
pub use error::{DetailError, FetchError};
pub use fetcher::ContentFetcher;
pub use memory::MemoryContentSource;
pub use render::{list_view, select_mode, DisplayMode, ErrorNotice, ListView};
pub use session::BrowseSession;
pub use source::{ContentSource, HttpContentSource};
