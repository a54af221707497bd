//! Filter selections, the normalized query descriptor, and their URL
//! encoding.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Page size used when the deployment does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 12;
/// Longest accepted search input, in characters.
pub const MAX_SEARCH_CHARS: usize = 200;

/// Malformed filter input. Raised before any descriptor is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("page must be a positive integer, got `{0}`")]
    InvalidPage(String),
    #[error("unknown sort order `{0}`")]
    UnknownSort(String),
    #[error("tag must not be empty")]
    EmptyTag,
    #[error("tag `{0}` must not contain `,`")]
    TagContainsSeparator(String),
    #[error("search text exceeds {max} characters")]
    SearchTooLong { max: usize },
    #[error("malformed query parameter `{0}`")]
    MalformedParameter(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Newest,
    MostPopular,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::MostPopular => "most-popular",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "newest" | "" => Ok(Self::Newest),
            "most-popular" | "popular" => Ok(Self::MostPopular),
            other => Err(ValidationError::UnknownSort(other.to_string())),
        }
    }
}

/// Normalized search/filter/sort/page request.
///
/// Two descriptors compare equal exactly when they would fetch the same page,
/// which is what stale-response detection relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Trimmed, lowercased search text. `None` when blank.
    #[serde(default)]
    pub search: Option<String>,
    /// Lowercased tags; empty means no tag filter.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub popular_only: bool,
    #[serde(default)]
    pub sort: SortOrder,
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self {
            search: None,
            tags: BTreeSet::new(),
            popular_only: false,
            sort: SortOrder::Newest,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryDescriptor {
    /// Same query on another page (clamped to at least 1).
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Zero-based offset of the first record on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Query parameters for the backend list endpoint.
    pub fn to_api_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            params.push(("q", search.clone()));
        }
        if !self.tags.is_empty() {
            params.push(("tags", self.tags.iter().cloned().collect::<Vec<_>>().join(",")));
        }
        if self.popular_only {
            params.push(("popular", "true".to_string()));
        }
        params.push(("sort", self.sort.as_str().to_string()));
        params.push(("page", self.page.to_string()));
        params.push(("page_size", self.page_size.to_string()));
        params
    }
}

/// The user's active selections, as shown in the UI.
///
/// Every setter other than [`FilterSelection::set_page`] resets the page to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    /// Search box contents exactly as typed.
    pub search_text: String,
    /// Selected tags in selection order, already de-duplicated.
    pub tags: Vec<String>,
    pub popular_only: bool,
    pub sort: Option<SortOrder>,
    pub page: usize,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            tags: Vec::new(),
            popular_only: false,
            sort: None,
            page: 1,
        }
    }
}

impl FilterSelection {
    /// The length limit applies to the normalized text that is sent to the
    /// backend, which can be longer than the input after lowercasing.
    pub fn set_search_text(&mut self, text: &str) -> Result<(), ValidationError> {
        if normalize_search(text).chars().count() > MAX_SEARCH_CHARS {
            return Err(ValidationError::SearchTooLong {
                max: MAX_SEARCH_CHARS,
            });
        }
        self.search_text = text.to_string();
        self.page = 1;
        Ok(())
    }

    /// Adds the tag, or removes it when already selected (case-insensitive).
    pub fn toggle_tag(&mut self, tag: &str) -> Result<(), ValidationError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ValidationError::EmptyTag);
        }
        if tag.contains(',') {
            return Err(ValidationError::TagContainsSeparator(tag.to_string()));
        }
        let before = self.tags.len();
        self.tags.retain(|selected| !same_tag(selected, tag));
        if self.tags.len() == before {
            self.tags.push(tag.to_string());
        }
        self.page = 1;
        Ok(())
    }

    pub fn set_popular_only(&mut self, popular_only: bool) {
        self.popular_only = popular_only;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = Some(sort);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) -> Result<(), ValidationError> {
        if page == 0 {
            return Err(ValidationError::InvalidPage(page.to_string()));
        }
        self.page = page;
        Ok(())
    }

    pub fn has_filters(&self) -> bool {
        !self.search_text.trim().is_empty() || !self.tags.is_empty() || self.popular_only
    }

    /// Encodes non-default selections as a URL query string (no leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        let search = self.search_text.trim();
        if !search.is_empty() {
            parts.push(format!("q={}", urlencoding::encode(search)));
        }
        if !self.tags.is_empty() {
            parts.push(format!("tags={}", urlencoding::encode(&self.tags.join(","))));
        }
        if self.popular_only {
            parts.push("popular=1".to_string());
        }
        if let Some(sort) = self.sort.filter(|sort| *sort != SortOrder::Newest) {
            parts.push(format!("sort={}", sort.as_str()));
        }
        if self.page > 1 {
            parts.push(format!("page={}", self.page));
        }
        parts.join("&")
    }

    /// Restores selections from a URL query string. Unknown keys (cache
    /// busters and the like) are ignored.
    pub fn from_query_string(raw: &str) -> Result<Self, ValidationError> {
        let mut selection = Self::default();
        let mut page = 1;

        for pair in raw.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(&value.replace('+', " "))
                .map_err(|_| ValidationError::MalformedParameter(key.to_string()))?
                .into_owned();

            match key {
                "q" => selection.set_search_text(&value)?,
                "tags" => {
                    for tag in value.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
                        if !selection.tags.iter().any(|t| same_tag(t, tag)) {
                            selection.tags.push(tag.to_string());
                        }
                    }
                },
                "popular" => {
                    selection.popular_only = parse_flag(&value)
                        .ok_or_else(|| ValidationError::MalformedParameter(key.to_string()))?;
                },
                "sort" => selection.sort = Some(value.parse()?),
                "page" => page = parse_page(&value)?,
                _ => {},
            }
        }

        selection.page = page;
        Ok(selection)
    }
}

/// Parses a 1-based page number.
pub fn parse_page(raw: &str) -> Result<usize, ValidationError> {
    match raw.trim().parse::<usize>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(ValidationError::InvalidPage(raw.to_string())),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn normalize_search(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Canonical form of a tag: trimmed and lowercased with Unicode rules.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Tag equality used everywhere tags are compared.
pub fn same_tag(a: &str, b: &str) -> bool {
    normalize_tag(a) == normalize_tag(b)
}

/// Builds the descriptor for `selection`. Never fails: it normalizes instead
/// of rejecting.
pub fn build_query(selection: &FilterSelection, page_size: usize) -> QueryDescriptor {
    let search = Some(normalize_search(&selection.search_text)).filter(|s| !s.is_empty());
    let tags = selection
        .tags
        .iter()
        .map(|tag| normalize_tag(tag))
        .filter(|tag| !tag.is_empty())
        .collect();

    QueryDescriptor {
        search,
        tags,
        popular_only: selection.popular_only,
        sort: selection.sort.unwrap_or_default(),
        page: selection.page.max(1),
        page_size: page_size.max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_query_normalizes_search_and_tags() {
        let selection = FilterSelection {
            search_text: "  Ramen Shop ".to_string(),
            tags: vec!["Tokyo".to_string(), "tokyo ".to_string(), "ramen".to_string()],
            ..FilterSelection::default()
        };
        let query = build_query(&selection, 10);

        assert_eq!(query.search.as_deref(), Some("ramen shop"));
        assert_eq!(
            query.tags.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["ramen", "tokyo"]
        );
        assert_eq!(query.sort, SortOrder::Newest);
        assert_eq!(query.page, 1);
        // display text is untouched
        assert_eq!(selection.search_text, "  Ramen Shop ");
    }

    #[test]
    fn build_query_is_idempotent() {
        let mut selection = FilterSelection::default();
        selection.set_search_text("Izakaya").expect("search");
        selection.toggle_tag("osaka").expect("tag");
        selection.set_sort(SortOrder::MostPopular);

        assert_eq!(build_query(&selection, 12), build_query(&selection, 12));
    }

    #[test]
    fn blank_search_means_no_search() {
        let mut selection = FilterSelection::default();
        selection.set_search_text("   ").expect("search");
        assert_eq!(build_query(&selection, 12).search, None);
    }

    #[test]
    fn filter_changes_reset_page_but_page_change_keeps_filters() {
        let mut selection = FilterSelection::default();
        selection.toggle_tag("sushi").expect("tag");
        selection.set_page(3).expect("page");
        assert_eq!(build_query(&selection, 12).page, 3);
        assert_eq!(selection.tags, vec!["sushi".to_string()]);

        selection.set_search_text("ramen").expect("search");
        assert_eq!(build_query(&selection, 12).page, 1);

        selection.set_page(2).expect("page");
        selection.set_popular_only(true);
        assert_eq!(selection.page, 1);

        selection.set_page(2).expect("page");
        selection.set_sort(SortOrder::MostPopular);
        assert_eq!(selection.page, 1);
    }

    #[test]
    fn toggle_tag_removes_case_insensitively_and_rejects_blank() {
        let mut selection = FilterSelection::default();
        selection.toggle_tag("Kyoto").expect("add");
        selection.toggle_tag("kyoto").expect("remove");
        assert!(selection.tags.is_empty());
        assert_eq!(selection.toggle_tag("  "), Err(ValidationError::EmptyTag));
    }

    #[test]
    fn invalid_input_is_rejected() {
        let mut selection = FilterSelection::default();
        assert!(matches!(selection.set_page(0), Err(ValidationError::InvalidPage(_))));
        let long = "あ".repeat(MAX_SEARCH_CHARS + 1);
        assert!(matches!(
            selection.set_search_text(&long),
            Err(ValidationError::SearchTooLong { .. })
        ));
        assert!(matches!("cheapest".parse::<SortOrder>(), Err(ValidationError::UnknownSort(_))));
    }

    #[test]
    fn query_string_survives_navigation() {
        let mut selection = FilterSelection::default();
        selection.set_search_text("焼き鳥 新宿").expect("search");
        selection.toggle_tag("yakitori").expect("tag");
        selection.toggle_tag("night").expect("tag");
        selection.set_popular_only(true);
        selection.set_sort(SortOrder::MostPopular);
        selection.set_page(4).expect("page");

        let encoded = selection.to_query_string();
        let restored = FilterSelection::from_query_string(&encoded).expect("decode");
        assert_eq!(restored, selection);
    }

    #[test]
    fn default_selection_encodes_to_empty_string() {
        assert_eq!(FilterSelection::default().to_query_string(), "");
        assert_eq!(
            FilterSelection::from_query_string("").expect("decode"),
            FilterSelection::default()
        );
    }

    #[test]
    fn from_query_string_ignores_unknown_keys_and_rejects_bad_page() {
        let selection =
            FilterSelection::from_query_string("?q=udon+kobe&_ts=123&page=2").expect("decode");
        assert_eq!(selection.search_text, "udon kobe");
        assert_eq!(selection.page, 2);

        assert!(matches!(
            FilterSelection::from_query_string("page=abc"),
            Err(ValidationError::InvalidPage(_))
        ));
        assert!(matches!(
            FilterSelection::from_query_string("page=0"),
            Err(ValidationError::InvalidPage(_))
        ));
        assert!(matches!(
            FilterSelection::from_query_string("popular=maybe"),
            Err(ValidationError::MalformedParameter(_))
        ));
    }

    #[test]
    fn api_params_carry_every_field() {
        let mut selection = FilterSelection::default();
        selection.toggle_tag("b").expect("tag");
        selection.toggle_tag("a").expect("tag");
        selection.set_popular_only(true);
        let params = build_query(&selection, 6).to_api_params();

        assert!(params.contains(&("tags", "a,b".to_string())));
        assert!(params.contains(&("popular", "true".to_string())));
        assert!(params.contains(&("sort", "newest".to_string())));
        assert!(params.contains(&("page", "1".to_string())));
        assert!(params.contains(&("page_size", "6".to_string())));
        assert!(!params.iter().any(|(key, _)| *key == "q"));
    }

    #[test]
    fn tags_with_separator_are_rejected() {
        let mut selection = FilterSelection::default();
        assert_eq!(
            selection.toggle_tag("ramen,tokyo"),
            Err(ValidationError::TagContainsSeparator("ramen,tokyo".into()))
        );
        assert!(selection.tags.is_empty());

        selection.toggle_tag("ramen").expect("tag");
        selection.toggle_tag("tokyo").expect("tag");
        let restored =
            FilterSelection::from_query_string(&selection.to_query_string()).expect("decode");
        assert_eq!(restored.tags, selection.tags);
    }

    #[test]
    fn search_limit_counts_the_normalized_text() {
        let mut selection = FilterSelection::default();
        // U+0130 lowercases to two chars
        let expanding = "\u{130}".repeat(150);
        assert!(matches!(
            selection.set_search_text(&expanding),
            Err(ValidationError::SearchTooLong { .. })
        ));

        let at_limit = "\u{130}".repeat(MAX_SEARCH_CHARS / 2);
        selection.set_search_text(&at_limit).expect("fits once lowercased");
        let sent = build_query(&selection, 12)
            .to_api_params()
            .into_iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&");
        let received = FilterSelection::from_query_string(&sent).expect("backend accepts it");
        assert_eq!(build_query(&received, 12).search, build_query(&selection, 12).search);
    }

    #[test]
    fn tag_comparison_folds_unicode_case() {
        assert!(same_tag("Édo", "édo"));
        assert!(same_tag(" Kyoto", "KYOTO "));
        assert!(!same_tag("osaka", "kobe"));

        let mut selection = FilterSelection::default();
        selection.toggle_tag("Édo").expect("add");
        selection.toggle_tag("ÉDO").expect("remove");
        assert!(selection.tags.is_empty());
    }
}
