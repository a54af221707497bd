use axum::{
    extract::{rejection::QueryRejection, Path, Query, RawQuery, State},
    http::StatusCode,
    Json,
};
use japan_info_shared::{
    corpus,
    query::build_query,
    related::related_items,
    ContentSummary, DetailRecord, FilterSelection, TagCount, ValidationError,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Upper bound on related candidates returned for one article.
pub const RELATED_RESPONSE_CAP: usize = 20;

/// List parameters that are not part of the shareable filter selection.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ContentSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<TagCount>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// `GET /api/japan-info/articles?q=&tags=&popular=&sort=&page=&page_size=`
///
/// A page past the end is not an error: it comes back empty with the real
/// total so the caller can clamp.
pub async fn list_articles(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ArticleListResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        bad_request(ValidationError::MalformedParameter(rejection.body_text()))
    })?;
    let selection =
        FilterSelection::from_query_string(&raw.unwrap_or_default()).map_err(bad_request)?;
    let page_size = check_page_size(params.page_size, state.max_page_size())
        .map_err(bad_request)?
        .unwrap_or_else(|| state.default_page_size());

    let query = build_query(&selection, page_size);
    let page = corpus::run_query(&state.articles().await, &query);
    tracing::debug!(total = page.total, returned = page.records.len(), "Listed articles");

    Ok(Json(ArticleListResponse {
        articles: page.records,
        total: page.total,
    }))
}

/// `GET /api/japan-info/articles/:id`
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DetailRecord>, ApiError> {
    corpus::find_detail(&state.articles().await, &id)
        .map(Json)
        .ok_or_else(not_found)
}

/// `GET /api/japan-info/articles/:id/related`
pub async fn related_articles(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArticleListResponse>, ApiError> {
    let articles = state.articles().await;
    let current = articles
        .iter()
        .find(|article| article.id == id)
        .ok_or_else(not_found)?;

    let related = related_items(
        &current.id,
        &current.tags,
        corpus::related_candidates(&articles, &id),
        RELATED_RESPONSE_CAP,
    );

    Ok(Json(ArticleListResponse {
        total: related.len(),
        articles: related,
    }))
}

/// `GET /api/japan-info/tags`
pub async fn list_tags(State(state): State<AppState>) -> Json<TagsResponse> {
    Json(TagsResponse {
        tags: corpus::tag_counts(&state.articles().await),
    })
}

/// `None` means "use the default"; anything outside `1..=max` is rejected.
fn check_page_size(page_size: Option<usize>, max: usize) -> Result<Option<usize>, ValidationError> {
    match page_size {
        Some(size) if !(1..=max).contains(&size) => {
            Err(ValidationError::MalformedParameter(format!("page_size={size}")))
        },
        other => Ok(other),
    }
}

fn bad_request(err: ValidationError) -> ApiError {
    tracing::warn!("Rejected list query: {}", err);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
            code: StatusCode::BAD_REQUEST.as_u16(),
        }),
    )
}

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Article not found".to_string(),
            code: StatusCode::NOT_FOUND.as_u16(),
        }),
    )
}
