use std::collections::HashSet;

use crate::{query::normalize_tag, ContentSummary};

/// Maximum related items shown under an article.
pub const DEFAULT_RELATED_CAP: usize = 5;

/// Picks up to `cap` summaries sharing at least one tag with the current
/// record, never including `current_id`.
///
/// Candidates may come from the full corpus or from a backend-provided list;
/// duplicates are ignored. Ordering: most shared tags first, then newest.
pub fn related_items<I>(
    current_id: &str,
    current_tags: &[String],
    candidates: I,
    cap: usize,
) -> Vec<ContentSummary>
where
    I: IntoIterator<Item = ContentSummary>,
{
    let own_tags: HashSet<String> = current_tags.iter().map(|tag| normalize_tag(tag)).collect();
    if own_tags.is_empty() || cap == 0 {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut scored: Vec<(usize, ContentSummary)> = candidates
        .into_iter()
        .filter(|candidate| candidate.id != current_id)
        .filter(|candidate| seen.insert(candidate.id.clone()))
        .filter_map(|candidate| {
            let shared = candidate
                .tags
                .iter()
                .map(|tag| normalize_tag(tag))
                .collect::<HashSet<_>>()
                .intersection(&own_tags)
                .count();
            (shared > 0).then_some((shared, candidate))
        })
        .collect();

    scored.sort_by(|(a_score, a), (b_score, b)| {
        b_score
            .cmp(a_score)
            .then_with(|| b.published_at.cmp(&a.published_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    scored.into_iter().take(cap).map(|(_, candidate)| candidate).collect()
}
