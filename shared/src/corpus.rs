//! Evaluation of list queries against an in-memory corpus.
//!
//! The backend serves its markdown corpus through these functions, and the
//! client's in-memory source uses them too, so both agree on filtering,
//! ordering and paging.

use std::{cmp::Ordering, collections::HashMap};

use crate::{
    query::{normalize_tag, same_tag},
    ContentDetail, ContentSummary, DetailRecord, PageResult, QueryDescriptor, SortOrder, TagCount,
};

/// Whether `article` satisfies the filter part of `query` (paging ignored).
///
/// All selected tags must be present. Search text matches case-insensitively
/// against both language variants of title, description and body, and tags.
pub fn matches(article: &ContentDetail, query: &QueryDescriptor) -> bool {
    if query.popular_only && !article.popular {
        return false;
    }

    if !query.tags.is_empty() {
        let has_all = query
            .tags
            .iter()
            .all(|wanted| article.tags.iter().any(|tag| same_tag(tag, wanted)));
        if !has_all {
            return false;
        }
    }

    match query.search.as_deref() {
        Some(keyword) => matches_keyword(article, keyword),
        None => true,
    }
}

fn matches_keyword(article: &ContentDetail, keyword: &str) -> bool {
    let keyword_lower = keyword.to_lowercase();
    let contains = |text: &str| text.to_lowercase().contains(&keyword_lower);

    contains(&article.title)
        || article.title_ko.as_deref().is_some_and(contains)
        || contains(&article.description)
        || article.description_ko.as_deref().is_some_and(contains)
        || contains(&article.content)
        || article.content_ko.as_deref().is_some_and(contains)
        || article.tags.iter().any(|tag| contains(tag))
}

fn compare(a: &ContentDetail, b: &ContentDetail, sort: SortOrder) -> Ordering {
    let newest_first = b.published_at.cmp(&a.published_at).then_with(|| a.id.cmp(&b.id));
    match sort {
        SortOrder::Newest => newest_first,
        SortOrder::MostPopular => b
            .popular
            .cmp(&a.popular)
            .then_with(|| b.view_count.cmp(&a.view_count))
            .then(newest_first),
    }
}

/// Filters, orders and pages `corpus`. A page past the end yields no records
/// but still reports the full match count.
pub fn run_query(corpus: &[ContentDetail], query: &QueryDescriptor) -> PageResult {
    let mut hits: Vec<&ContentDetail> = corpus.iter().filter(|a| matches(a, query)).collect();
    hits.sort_by(|a, b| compare(a, b, query.sort));

    let total = hits.len();
    let records = hits
        .into_iter()
        .skip(query.offset())
        .take(query.page_size.max(1))
        .map(ContentDetail::summary)
        .collect();

    PageResult {
        records,
        total,
        query: query.clone(),
    }
}

/// Tag usage counts sorted by name. Tags differing only in case are merged
/// under their first spelling.
pub fn tag_counts(corpus: &[ContentDetail]) -> Vec<TagCount> {
    let mut counts: HashMap<String, TagCount> = HashMap::new();
    for article in corpus {
        for tag in &article.tags {
            counts
                .entry(normalize_tag(tag))
                .or_insert_with(|| TagCount {
                    name: tag.clone(),
                    count: 0,
                })
                .count += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts.into_values().collect();
    tags.sort_by(|a, b| a.name.cmp(&b.name));
    tags
}

/// Looks up `id` and attaches its neighbours in newest-first order.
pub fn find_detail(corpus: &[ContentDetail], id: &str) -> Option<DetailRecord> {
    let mut ordered: Vec<&ContentDetail> = corpus.iter().collect();
    ordered.sort_by(|a, b| compare(a, b, SortOrder::Newest));

    let index = ordered.iter().position(|article| article.id == id)?;
    let previous = index
        .checked_sub(1)
        .and_then(|i| ordered.get(i))
        .map(|article| article.summary());
    let next = ordered.get(index + 1).map(|article| article.summary());

    Some(DetailRecord {
        article: ordered[index].clone(),
        previous,
        next,
    })
}

/// Summaries of every record sharing at least one tag with `id`, excluding
/// `id` itself. Empty when `id` is unknown.
pub fn related_candidates(corpus: &[ContentDetail], id: &str) -> Vec<ContentSummary> {
    let Some(current) = corpus.iter().find(|article| article.id == id) else {
        return Vec::new();
    };

    corpus
        .iter()
        .filter(|article| article.id != current.id)
        .filter(|article| {
            article
                .tags
                .iter()
                .any(|tag| current.tags.iter().any(|own| same_tag(own, tag)))
        })
        .map(ContentDetail::summary)
        .collect()
}
