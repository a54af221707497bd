//! Display-mode selection for the list view.

use japan_info_shared::{pagination::PageMetadata, ContentSummary, Locale, PageResult};

use crate::{controller::FilterState, error::FetchError, i18n};

/// The one thing the list area shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMode<'a> {
    Loading,
    Empty,
    /// Records to list. Only empty when an error notice explains why.
    Populated(&'a [ContentSummary]),
}

/// Picks the display mode. Loading always wins; the empty state requires no
/// error, so a failed first load never claims "no results".
pub fn select_mode<'a>(
    result: Option<&'a PageResult>,
    loading: bool,
    error: Option<&FetchError>,
) -> DisplayMode<'a> {
    if loading {
        return DisplayMode::Loading;
    }
    let records = result.map_or(&[][..], |page| page.records.as_slice());
    if records.is_empty() && error.is_none() {
        DisplayMode::Empty
    } else {
        DisplayMode::Populated(records)
    }
}

/// Inline error shown above the (preserved) list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorNotice {
    /// Retriable failure; offer a retry action.
    Retry,
    /// Permanent failure; generic message only.
    Failure,
}

impl ErrorNotice {
    pub fn for_error(err: &FetchError) -> Self {
        if err.is_retriable() {
            Self::Retry
        } else {
            Self::Failure
        }
    }

    pub fn message(self, locale: Locale) -> &'static str {
        let text = i18n::strings(locale);
        match self {
            Self::Retry => text.retry_hint,
            Self::Failure => text.generic_failure,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView<'a> {
    pub mode: DisplayMode<'a>,
    pub notice: Option<ErrorNotice>,
    /// Present only for a populated list spanning several pages.
    pub pagination: Option<PageMetadata>,
    /// Whether any filter is active (selects the empty-state wording).
    pub filtered: bool,
}

impl ListView<'_> {
    /// Empty-state text for this view.
    pub fn empty_message(&self, locale: Locale) -> &'static str {
        let text = i18n::strings(locale);
        if self.filtered {
            text.empty_filtered
        } else {
            text.empty_all
        }
    }
}

pub fn list_view(state: &FilterState, meta: PageMetadata) -> ListView<'_> {
    let mode = select_mode(state.result.as_ref(), state.is_loading(), state.last_error.as_ref());
    let pagination = match mode {
        DisplayMode::Populated(records) if !records.is_empty() && meta.page_count > 1 => Some(meta),
        _ => None,
    };
    ListView {
        mode,
        notice: state.last_error.as_ref().map(ErrorNotice::for_error),
        pagination,
        filtered: state.selection.has_filters(),
    }
}
