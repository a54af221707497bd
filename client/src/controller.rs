//! Filter state controller for the japan-info list view.
//!
//! Every user action is an explicit transition on [`FilterState`] that yields
//! exactly one [`FetchRequest`]. Requests carry a sequence number; a
//! completion is applied only when it answers the latest request, so a slow
//! response for an older filter can never overwrite a newer one.

use japan_info_shared::{
    pagination::{self, PageMetadata},
    query::build_query,
    FilterSelection, PageResult, QueryDescriptor, SortOrder, ValidationError,
};

use crate::error::FetchError;

/// User intent on the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetSearchText(String),
    ToggleTag(String),
    SetPopularOnly(bool),
    SetSort(SortOrder),
    SetPage(usize),
    /// Back to the default selections.
    Reset,
    /// Re-issue the current query after a failure.
    Retry,
}

/// A fetch the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: QueryDescriptor,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Result (or error) is now the visible state.
    Applied,
    /// Response answered a superseded request and was dropped.
    Stale,
    /// Requested page lay past the last page; the page was clamped and this
    /// follow-up fetch must be run.
    Refetch(FetchRequest),
}

/// Session-scoped state of one list view.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub selection: FilterSelection,
    /// Descriptor of the latest issued request.
    pub query: QueryDescriptor,
    /// Sequence number of the authoritative in-flight request.
    pub in_flight: Option<u64>,
    pub last_error: Option<FetchError>,
    /// Last successfully fetched page. Kept while an error is displayed.
    pub result: Option<PageResult>,
}

impl FilterState {
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }
}

pub struct FilterStateController {
    state: FilterState,
    page_size: usize,
    window_width: usize,
    next_seq: u64,
}

impl FilterStateController {
    pub fn new(page_size: usize, window_width: usize) -> Self {
        Self::with_selection(FilterSelection::default(), page_size, window_width)
    }

    /// Restores selections published earlier with
    /// [`FilterStateController::location`].
    pub fn from_location(
        raw: &str,
        page_size: usize,
        window_width: usize,
    ) -> Result<Self, ValidationError> {
        let selection = FilterSelection::from_query_string(raw)?;
        Ok(Self::with_selection(selection, page_size, window_width))
    }

    fn with_selection(selection: FilterSelection, page_size: usize, window_width: usize) -> Self {
        let page_size = page_size.max(1);
        let query = build_query(&selection, page_size);
        Self {
            state: FilterState {
                selection,
                query,
                in_flight: None,
                last_error: None,
                result: None,
            },
            page_size,
            window_width,
            next_seq: 0,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn query(&self) -> &QueryDescriptor {
        &self.state.query
    }

    /// URL query string for the current selections.
    pub fn location(&self) -> String {
        self.state.selection.to_query_string()
    }

    /// Pagination for the visible result. Pure read, never fetches.
    pub fn page_metadata(&self) -> PageMetadata {
        let total = self
            .state
            .result
            .as_ref()
            .filter(|page| same_filters(&page.query, &self.state.query))
            .map_or(0, |page| page.total);
        pagination::compute_with_window(
            total,
            self.page_size,
            self.state.query.page,
            self.window_width,
        )
    }

    /// Initial fetch on entering the view.
    pub fn start(&mut self) -> FetchRequest {
        self.issue()
    }

    /// Applies `action` and returns the fetch it triggers. Invalid input
    /// leaves the state untouched.
    pub fn apply(&mut self, action: Action) -> Result<FetchRequest, ValidationError> {
        match action {
            Action::SetSearchText(text) => self.state.selection.set_search_text(&text)?,
            Action::ToggleTag(tag) => self.state.selection.toggle_tag(&tag)?,
            Action::SetPopularOnly(popular_only) => {
                self.state.selection.set_popular_only(popular_only)
            },
            Action::SetSort(sort) => self.state.selection.set_sort(sort),
            Action::SetPage(page) => {
                if page == 0 {
                    return Err(ValidationError::InvalidPage(page.to_string()));
                }
                let page = match self.known_page_count() {
                    Some(page_count) => pagination::clamp_page(page, page_count),
                    None => page,
                };
                self.state.selection.set_page(page)?;
            },
            Action::Reset => self.state.selection = FilterSelection::default(),
            Action::Retry => {},
        }
        Ok(self.issue())
    }

    /// Feeds back the outcome of `request`.
    pub fn complete(
        &mut self,
        request: &FetchRequest,
        result: Result<PageResult, FetchError>,
    ) -> Completion {
        if self.state.in_flight != Some(request.seq) || request.query != self.state.query {
            tracing::debug!(
                seq = request.seq,
                current = ?self.state.in_flight,
                "Dropping stale article response"
            );
            return Completion::Stale;
        }
        self.state.in_flight = None;

        match result {
            Ok(page) => {
                let meta = pagination::compute(page.total, self.page_size, request.query.page);
                if page.records.is_empty() && meta.current_page != request.query.page {
                    tracing::debug!(
                        requested = request.query.page,
                        clamped = meta.current_page,
                        "Requested page out of range, refetching"
                    );
                    self.state.selection.page = meta.current_page;
                    return Completion::Refetch(self.issue());
                }
                self.state.last_error = None;
                self.state.result = Some(page);
            },
            Err(err) => {
                tracing::warn!(retriable = err.is_retriable(), "Article list fetch failed: {}", err);
                self.state.last_error = Some(err);
            },
        }
        Completion::Applied
    }

    fn known_page_count(&self) -> Option<usize> {
        self.state
            .result
            .as_ref()
            .filter(|page| same_filters(&page.query, &self.state.query))
            .map(|page| pagination::calculate_page_count(page.total, self.page_size))
    }

    fn issue(&mut self) -> FetchRequest {
        self.next_seq += 1;
        let query = build_query(&self.state.selection, self.page_size);
        self.state.query = query.clone();
        self.state.in_flight = Some(self.next_seq);
        self.state.last_error = None;
        FetchRequest {
            seq: self.next_seq,
            query,
        }
    }
}

fn same_filters(a: &QueryDescriptor, b: &QueryDescriptor) -> bool {
    a.with_page(1) == b.with_page(1)
}
