//! Data model and pure query logic for the japan-info content browser.
//!
//! Everything here is free of I/O so the backend, the client and the CLI
//! evaluate filters, pagination and related items identically.

pub mod corpus;
pub mod pagination;
pub mod query;
pub mod related;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use query::{FilterSelection, QueryDescriptor, SortOrder, ValidationError};

/// Display language. Japanese is the primary language of the corpus; Korean
/// fields are optional translations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// 日本語
    #[default]
    Ja,
    /// 한국어
    Ko,
}

impl Locale {
    /// Parses `ja` / `ko` (case-insensitive). Unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ja" | "jp" => Some(Self::Ja),
            "ko" | "kr" => Some(Self::Ko),
            _ => None,
        }
    }

    /// Short language code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::Ko => "ko",
        }
    }
}

/// Picks the Korean variant when requested and present (non-blank), falling
/// back to the Japanese text.
fn localized<'a>(locale: Locale, ja: &'a str, ko: Option<&'a str>) -> &'a str {
    match (locale, ko) {
        (Locale::Ko, Some(value)) if !value.trim().is_empty() => value,
        _ => ja,
    }
}

/// Listing-view representation of a japan-info article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSummary {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ko: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ko: Option<String>,
    pub cover_image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub popular: bool,
    pub published_at: DateTime<Utc>,
}

impl ContentSummary {
    pub fn localized_title(&self, locale: Locale) -> &str {
        localized(locale, &self.title, self.title_ko.as_deref())
    }

    pub fn localized_description(&self, locale: Locale) -> &str {
        localized(locale, &self.description, self.description_ko.as_deref())
    }
}

/// Full record shown on the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDetail {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ko: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ko: Option<String>,
    pub cover_image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub popular: bool,
    pub published_at: DateTime<Utc>,
    pub content: String, // Markdown 文本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_ko: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub author: String,
    #[serde(default)]
    pub view_count: u64,
    pub updated_at: DateTime<Utc>,
}

impl ContentDetail {
    pub fn summary(&self) -> ContentSummary {
        ContentSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            title_ko: self.title_ko.clone(),
            description: self.description.clone(),
            description_ko: self.description_ko.clone(),
            cover_image: self.cover_image.clone(),
            tags: self.tags.clone(),
            popular: self.popular,
            published_at: self.published_at,
        }
    }

    pub fn localized_title(&self, locale: Locale) -> &str {
        localized(locale, &self.title, self.title_ko.as_deref())
    }

    pub fn localized_content(&self, locale: Locale) -> &str {
        localized(locale, &self.content, self.content_ko.as_deref())
    }
}

impl From<ContentDetail> for ContentSummary {
    fn from(d: ContentDetail) -> Self {
        ContentSummary {
            id: d.id,
            title: d.title,
            title_ko: d.title_ko,
            description: d.description,
            description_ko: d.description_ko,
            cover_image: d.cover_image,
            tags: d.tags,
            popular: d.popular,
            published_at: d.published_at,
        }
    }
}

/// Detail lookup payload: the record plus its neighbours in publish order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub article: ContentDetail,
    /// Next newer record, if any.
    #[serde(default)]
    pub previous: Option<ContentSummary>,
    /// Next older record, if any.
    #[serde(default)]
    pub next: Option<ContentSummary>,
}

/// One page of a list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub records: Vec<ContentSummary>,
    pub total: usize,
    /// The descriptor that produced this page.
    pub query: QueryDescriptor,
}

impl PageResult {
    /// An empty page for `query`.
    pub fn empty(query: QueryDescriptor) -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            query,
        }
    }

    /// Describes the first broken size invariant, if any.
    pub fn consistency_error(&self) -> Option<String> {
        if self.records.len() > self.query.page_size {
            return Some(format!(
                "page holds {} records but page size is {}",
                self.records.len(),
                self.query.page_size
            ));
        }
        if self.total < self.records.len() {
            return Some(format!(
                "total {} is smaller than the {} records returned",
                self.total,
                self.records.len()
            ));
        }
        None
    }
}

/// Tag name with the number of records carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}
