use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::{handlers, request_context::request_context_middleware, state::AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/japan-info/articles", get(handlers::list_articles))
        .route("/api/japan-info/articles/:id", get(handlers::get_article))
        .route("/api/japan-info/articles/:id/related", get(handlers::related_articles))
        .route("/api/japan-info/tags", get(handlers::list_tags))
        .with_state(state)
        .layer(middleware::from_fn(request_context_middleware))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use japan_info_shared::ContentDetail;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::request_context::REQUEST_ID_HEADER;

    fn article(id: &str, day: u32, tags: &[&str], popular: bool, views: u64) -> ContentDetail {
        let published_at = Utc
            .with_ymd_and_hms(2024, 4, day, 8, 0, 0)
            .single()
            .expect("valid date");
        ContentDetail {
            id: id.to_string(),
            title: format!("{id} 案内"),
            title_ko: None,
            description: format!("{id} の説明"),
            description_ko: None,
            cover_image: format!("/images/{id}.jpg"),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            popular,
            published_at,
            content: "本文".to_string(),
            content_ko: None,
            gallery: Vec::new(),
            author: "編集部".to_string(),
            view_count: views,
            updated_at: published_at,
        }
    }

    fn app() -> Router {
        let articles = vec![
            article("ichiran", 1, &["ramen", "fukuoka"], true, 900),
            article("afuri", 2, &["ramen", "tokyo"], false, 300),
            article("fuunji", 3, &["ramen", "tokyo"], true, 500),
            article("sukiyabashi", 4, &["sushi", "tokyo"], false, 100),
            article("kani-doraku", 5, &["osaka", "crab"], true, 700),
        ];
        create_router(AppState::from_articles(articles, 2, 4))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    fn ids(body: &Value) -> Vec<String> {
        body["articles"]
            .as_array()
            .expect("articles array")
            .iter()
            .map(|item| item["id"].as_str().expect("id").to_string())
            .collect()
    }

    #[tokio::test]
    async fn list_uses_default_page_size_and_newest_first() {
        let (status, body) = get_json("/api/japan-info/articles").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 5);
        assert_eq!(ids(&body), vec!["kani-doraku", "sukiyabashi"]);
    }

    #[tokio::test]
    async fn list_filters_tags_and_sorts_by_popularity() {
        let (status, body) =
            get_json("/api/japan-info/articles?tags=ramen,tokyo&sort=most-popular&page_size=4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(ids(&body), vec!["fuunji", "afuri"]);

        let (_, popular) = get_json("/api/japan-info/articles?popular=true&q=ICHIRAN").await;
        assert_eq!(ids(&popular), vec!["ichiran"]);
    }

    #[tokio::test]
    async fn page_past_end_is_empty_with_total() {
        let (status, body) = get_json("/api/japan-info/articles?page=9").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 5);
        assert!(ids(&body).is_empty());
    }

    #[tokio::test]
    async fn malformed_list_parameters_are_rejected() {
        for uri in [
            "/api/japan-info/articles?page=0",
            "/api/japan-info/articles?sort=random",
            "/api/japan-info/articles?page_size=5",
            "/api/japan-info/articles?popular=maybe",
            "/api/japan-info/articles?page_size=many",
            "/api/japan-info/articles?page_size=0",
        ] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["code"], 400);
        }
    }

    #[tokio::test]
    async fn page_size_is_percent_decoded() {
        let (status, body) = get_json("/api/japan-info/articles?tags=articles?q=&page_size=%33page_size=%33").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 5);
        assert_eq!(ids(&body).len(), 3);
    }

    #[tokio::test]
    async fn detail_includes_neighbours_or_404() {
        let (status, body) = get_json("/api/japan-info/articles/fuunji").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["article"]["id"], "fuunji");
        assert_eq!(body["previous"]["id"], "sukiyabashi");
        assert_eq!(body["next"]["id"], "afuri");

        let (status, body) = get_json("/api/japan-info/articles/nonexistent-id").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Article not found");
    }

    #[tokio::test]
    async fn related_ranks_by_shared_tags() {
        let (status, body) = get_json("/api/japan-info/articles/afuri/related").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec!["fuunji", "sukiyabashi", "ichiran"]);
        assert_eq!(body["total"], 3);

        let (status, _) = get_json("/api/japan-info/articles/nope/related").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn tags_are_counted() {
        let (_, body) = get_json("/api/japan-info/tags").await;
        let ramen = body["tags"]
            .as_array()
            .expect("tags")
            .iter()
            .find(|tag| tag["name"] == "ramen")
            .cloned()
            .expect("ramen tag");
        assert_eq!(ramen["count"], 3);
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/japan-info/tags")
                    .header(REQUEST_ID_HEADER, "req-test-1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()),
            Some("req-test-1")
        );
    }
}
