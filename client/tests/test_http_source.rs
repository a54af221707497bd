use std::{sync::Arc, time::Duration};

use japan_info_client::{
    ClientConfig, ContentFetcher, ContentSource, DetailError, DetailLoader, FetchError,
    HttpContentSource,
};
use japan_info_shared::{query::build_query, FilterSelection, QueryDescriptor};
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn summary_json(id: &str, tags: &[&str]) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("{id} の紹介"),
        "description": "説明",
        "cover_image": format!("/images/{id}.jpg"),
        "tags": tags,
        "popular": false,
        "published_at": "2024-06-01T12:00:00Z"
    })
}

fn detail_json(id: &str, tags: &[&str]) -> serde_json::Value {
    let mut article = summary_json(id, tags);
    let fields = article.as_object_mut().expect("object");
    fields.insert("content".into(), json!("## 本文"));
    fields.insert("content_ko".into(), json!("## 본문"));
    fields.insert("gallery".into(), json!(["/images/a.jpg", "/images/b.jpg"]));
    fields.insert("author".into(), json!("編集部"));
    fields.insert("view_count".into(), json!(42));
    fields.insert("updated_at".into(), json!("2024-06-02T08:30:00Z"));
    json!({ "article": article, "previous": null, "next": summary_json("older", &[]) })
}

fn source_for(server: &MockServer) -> HttpContentSource {
    HttpContentSource::new(format!("{}/api/", server.uri()))
}

#[tokio::test]
async fn list_query_sends_descriptor_and_echoes_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/japan-info/articles"))
        .and(query_param("tags", "ramen"))
        .and(query_param("sort", "newest"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [summary_json("afuri", &["ramen"])],
            "total": 3
        })))
        .mount(&server)
        .await;

    let mut selection = FilterSelection::default();
    selection.toggle_tag("Ramen").expect("tag");
    selection.set_page(2).expect("page");
    let query = build_query(&selection, 2);

    let page = source_for(&server).query(&query).await.expect("page");
    assert_eq!(page.total, 3);
    assert_eq!(page.records[0].id, "afuri");
    assert_eq!(page.query, query);
}

#[tokio::test]
async fn server_error_is_retriable_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/japan-info/articles"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .query(&QueryDescriptor::default())
        .await
        .expect_err("503 must fail");
    assert_eq!(err, FetchError::Status { status: 503 });
    assert!(err.is_retriable());
}

#[tokio::test]
async fn malformed_body_is_not_retriable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/japan-info/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .query(&QueryDescriptor::default())
        .await
        .expect_err("html must fail");
    assert!(matches!(err, FetchError::InvalidResponse(_)));
    assert!(!err.is_retriable());
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/japan-info/articles"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "articles": [], "total": 0 }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let fetcher = ContentFetcher::new(Arc::new(source_for(&server)), Duration::from_millis(50));
    let err = fetcher
        .fetch(&QueryDescriptor::default())
        .await
        .expect_err("must time out");
    assert_eq!(err, FetchError::Timeout(Duration::from_millis(50)));
}

#[tokio::test]
async fn detail_loader_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/japan-info/articles/ichiran"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json("ichiran", &["ramen"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/japan-info/articles/ichiran/related"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [
                summary_json("afuri", &["ramen"]),
                summary_json("ichiran", &["ramen"]),
                summary_json("sukiyabashi", &["sushi"])
            ],
            "total": 3
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/japan-info/articles/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Article not found",
            "code": 404
        })))
        .mount(&server)
        .await;

    let config = ClientConfig::default();
    let fetcher = ContentFetcher::new(Arc::new(source_for(&server)), config.request_timeout);
    let loader = DetailLoader::new(fetcher, config.related_cap);

    let view = loader.load("ichiran").await.expect("detail");
    assert_eq!(view.article.gallery.len(), 2);
    assert_eq!(view.article.view_count, 42);
    assert_eq!(view.next.map(|s| s.id), Some("older".to_string()));
    assert_eq!(
        view.related.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        vec!["afuri"]
    );

    let missing = loader.load("missing").await.expect_err("404");
    assert_eq!(missing, DetailError::NotFound("missing".into()));
}

#[tokio::test]
async fn tags_endpoint_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/japan-info/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tags": [{ "name": "ramen", "count": 4 }, { "name": "sushi", "count": 2 }]
        })))
        .mount(&server)
        .await;

    let tags = source_for(&server).tags().await.expect("tags");
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].name, "ramen");
    assert_eq!(tags[0].count, 4);
}
