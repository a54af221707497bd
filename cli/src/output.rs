//! Plain-text rendering of list, detail and tag views.

use std::io::{self, Write};

use japan_info_client::{
    i18n::{self, fill_one, fill_two},
    DetailView, DisplayMode, FilterState, ListView,
};
use japan_info_shared::{pagination::PageMetadata, ContentSummary, Locale, TagCount};

/// Longest description excerpt printed under a list entry, in characters.
const EXCERPT_CHARS: usize = 80;

pub fn render_list<W: Write>(
    out: &mut W,
    view: &ListView<'_>,
    state: &FilterState,
    locale: Locale,
) -> io::Result<()> {
    let text = i18n::strings(locale);

    if let Some(notice) = view.notice {
        writeln!(out, "! {}", notice.message(locale))?;
    }

    match view.mode {
        DisplayMode::Loading => writeln!(out, "{}", text.loading)?,
        DisplayMode::Empty => writeln!(out, "{}", view.empty_message(locale))?,
        DisplayMode::Populated(records) => {
            if let Some(page) = &state.result {
                writeln!(out, "{}", fill_one(text.result_count_template, page.total))?;
            }
            for record in records {
                render_entry(out, record, locale)?;
            }
        },
    }

    if let Some(meta) = &view.pagination {
        render_pagination(out, meta, locale)?;
    }
    Ok(())
}

fn render_entry<W: Write>(out: &mut W, record: &ContentSummary, locale: Locale) -> io::Result<()> {
    let text = i18n::strings(locale);
    let badge = if record.popular {
        format!(" [{}]", text.popular_badge)
    } else {
        String::new()
    };

    writeln!(out)?;
    writeln!(out, "{}{}", record.localized_title(locale), badge)?;
    writeln!(out, "  id: {}  {}", record.id, record.published_at.format("%Y-%m-%d"))?;
    writeln!(out, "  {}", excerpt(record.localized_description(locale)))?;
    if !record.tags.is_empty() {
        writeln!(out, "  {}", hashtags(&record.tags))?;
    }
    Ok(())
}

fn render_pagination<W: Write>(out: &mut W, meta: &PageMetadata, locale: Locale) -> io::Result<()> {
    let text = i18n::strings(locale);
    let window: Vec<String> = meta
        .window
        .iter()
        .map(|page| {
            if *page == meta.current_page {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();

    writeln!(out)?;
    writeln!(
        out,
        "{} {} {}  ({})",
        if meta.has_prev { "<" } else { " " },
        window.join(" "),
        if meta.has_next { ">" } else { " " },
        fill_two(text.page_status_template, meta.current_page, meta.page_count)
    )
}

pub fn render_detail<W: Write>(out: &mut W, view: &DetailView, locale: Locale) -> io::Result<()> {
    let text = i18n::strings(locale);
    let article = &view.article;

    writeln!(out, "# {}", article.localized_title(locale))?;
    writeln!(
        out,
        "{}: {}  {}  {}: {}  {}: {}",
        text.author_label,
        article.author,
        article.published_at.format("%Y-%m-%d"),
        text.updated_label,
        article.updated_at.format("%Y-%m-%d"),
        text.views_label,
        article.view_count
    )?;
    if !article.tags.is_empty() {
        writeln!(out, "{}", hashtags(&article.tags))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", article.localized_content(locale).trim_end())?;

    if !article.gallery.is_empty() {
        writeln!(out)?;
        writeln!(out, "## {}", text.gallery_label)?;
        for image in &article.gallery {
            writeln!(out, "- {image}")?;
        }
    }

    writeln!(out)?;
    if let Some(previous) = &view.previous {
        writeln!(out, "{}: {} ({})", text.previous_label, previous.localized_title(locale), previous.id)?;
    }
    if let Some(next) = &view.next {
        writeln!(out, "{}: {} ({})", text.next_label, next.localized_title(locale), next.id)?;
    }

    writeln!(out)?;
    writeln!(out, "## {}", text.related_heading)?;
    if view.related.is_empty() {
        writeln!(out, "{}", text.related_empty)?;
    }
    for item in &view.related {
        writeln!(out, "- {} ({})", item.localized_title(locale), item.id)?;
    }
    Ok(())
}

pub fn render_tags<W: Write>(out: &mut W, tags: &[TagCount], locale: Locale) -> io::Result<()> {
    writeln!(out, "{}", i18n::strings(locale).tags_heading)?;
    let width = tags.iter().map(|tag| tag.name.chars().count()).max().unwrap_or(0);
    for tag in tags {
        writeln!(out, "  {:<width$}  {}", tag.name, tag.count)?;
    }
    Ok(())
}

fn hashtags(tags: &[String]) -> String {
    tags.iter().map(|tag| format!("#{tag}")).collect::<Vec<_>>().join(" ")
}

fn excerpt(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{cut}...")
}
