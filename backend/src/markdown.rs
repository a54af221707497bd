use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use gray_matter::{engine::YAML, Matter};
use japan_info_shared::ContentDetail;
use serde::Deserialize;
use tokio::fs;

#[derive(Debug, Deserialize)]
struct Frontmatter {
    pub title: String,
    #[serde(default)]
    pub title_ko: Option<String>,
    pub description: String,
    #[serde(default)]
    pub description_ko: Option<String>,
    pub cover_image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub popular: bool,
    pub published_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub author: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Korean body, kept in frontmatter next to the Japanese markdown body.
    #[serde(default)]
    pub content_ko: Option<String>,
}

/// Scan the content directory and load every `.md` article.
///
/// The article id is the file stem (`ichiran-hakata.md` -> `ichiran-hakata`).
/// Files that fail to parse are skipped with a warning.
pub async fn scan_articles(content_dir: &Path) -> Result<Vec<ContentDetail>> {
    if !content_dir.exists() {
        anyhow::bail!("Content directory does not exist: {}", content_dir.display());
    }

    let mut articles = Vec::new();
    let mut entries = fs::read_dir(content_dir)
        .await
        .with_context(|| format!("failed to read {}", content_dir.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let file_path = entry.path();

        if file_path.extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }

        let Some(id) = file_path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            tracing::warn!("Skipping file with non UTF-8 name: {}", file_path.display());
            continue;
        };

        let raw = match fs::read_to_string(&file_path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", file_path.display(), e);
                continue;
            },
        };

        match parse_article(&id, &raw) {
            Ok(article) => articles.push(article),
            Err(e) => tracing::warn!("Failed to parse {}: {:#}", file_path.display(), e),
        }
    }

    // Sort by date descending (newest first)
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at).then_with(|| a.id.cmp(&b.id)));

    Ok(articles)
}

/// Parse one markdown document with YAML frontmatter.
pub fn parse_article(id: &str, raw: &str) -> Result<ContentDetail> {
    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(raw);

    let frontmatter: Frontmatter = parsed
        .data
        .ok_or_else(|| anyhow::anyhow!("No frontmatter found"))?
        .deserialize()
        .context("Failed to deserialize frontmatter")?;

    let published_at = parse_timestamp(&frontmatter.published_at)
        .with_context(|| format!("invalid published_at `{}`", frontmatter.published_at))?;
    let updated_at = match frontmatter.updated_at.as_deref() {
        Some(raw) => {
            parse_timestamp(raw).with_context(|| format!("invalid updated_at `{raw}`"))?
        },
        None => published_at,
    };

    Ok(ContentDetail {
        id: id.to_string(),
        title: frontmatter.title,
        title_ko: non_blank(frontmatter.title_ko),
        description: frontmatter.description,
        description_ko: non_blank(frontmatter.description_ko),
        cover_image: frontmatter.cover_image,
        tags: frontmatter
            .tags
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect(),
        popular: frontmatter.popular,
        published_at,
        content: parsed.content,
        content_ko: non_blank(frontmatter.content_ko),
        gallery: frontmatter.gallery,
        author: frontmatter.author,
        view_count: frontmatter.view_count,
        updated_at,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").context("expected RFC 3339 or YYYY-MM-DD")?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("invalid time of day"))?;
    Ok(midnight.and_utc())
}
