use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::{get, post},
    Router,
};
use folio::{
    app_state::AppState,
    books::handlers,
    catalog::{CatalogCache, ListingWalker},
    config::Config,
    content::ContentFetcher,
    health,
};
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const LISTING_HTML: &str = r#"<html><body><ul>
  <li class="booklink">
    <a class="link" href="/ebooks/84"><span class="title">Frankenstein</span></a>
    <span class="subtitle">by Mary Shelley</span>
    <span class="extra">12,345 downloads</span>
  </li>
</ul></body></html>"#;

const BOOK_TEXT: &str = "\
*** START OF THE PROJECT GUTENBERG EBOOK FRANKENSTEIN ***
It was on a dreary night of November.

I beheld the wretch.
*** END OF THE PROJECT GUTENBERG EBOOK FRANKENSTEIN ***";

async fn start_upstream() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subject"))
        .and(query_param("start_index", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_HTML))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/84/84-0.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BOOK_TEXT))
        .mount(&server)
        .await;

    server
}

fn build_app(upstream: &MockServer) -> Router {
    let walker = ListingWalker::new(&format!("{}/subject", upstream.uri())).unwrap();
    let state = AppState {
        config: Config::default(),
        catalog: Arc::new(CatalogCache::new(Box::new(walker))),
        content: Arc::new(ContentFetcher::with_base(upstream.uri())),
    };

    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/api/books", get(handlers::list_books))
        .route("/api/validate_selection", post(handlers::validate_selection))
        .route("/api/generate_pdf", post(handlers::generate_pdf))
        .with_state(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn list_endpoint_serves_scraped_catalog() {
    let upstream = start_upstream().await;
    let app = build_app(&upstream);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/books?page=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["books"][0]["id"], "84");
    assert_eq!(json["books"][0]["title"], "Frankenstein");
    assert_eq!(json["books"][0]["author"], "Mary Shelley");
    assert_eq!(json["books"][0]["download_count"], "12,345");
    assert_eq!(json["total_pages"], 1);
}

#[tokio::test]
async fn unreachable_upstream_serves_safe_empty_page() {
    let walker = ListingWalker::new("http://127.0.0.1:9/subject").unwrap();
    let state = AppState {
        config: Config::default(),
        catalog: Arc::new(CatalogCache::new(Box::new(walker))),
        content: Arc::new(ContentFetcher::with_base("http://127.0.0.1:9")),
    };
    let app = Router::new()
        .route("/api/books", get(handlers::list_books))
        .with_state(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/books?page=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["books"].as_array().unwrap().len(), 0);
    assert_eq!(json["total_pages"], 0);
    assert_eq!(json["has_next"], false);
    assert_eq!(json["has_prev"], false);
}

#[tokio::test]
async fn generate_endpoint_returns_pdf_attachment() {
    let upstream = start_upstream().await;
    let app = build_app(&upstream);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate_pdf")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"selected_ids": ["84"], "filename": "frankenstein.pdf"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"frankenstein.pdf\""
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn healthz_reports_catalog_refresh_time() {
    let upstream = start_upstream().await;
    let app = build_app(&upstream);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["status"], "OK");
    assert!(json["catalog_refreshed_at"].is_null());

    // Prime the catalog, then the health endpoint reports a refresh time.
    let _ = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/books")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(response).await;
    assert!(json["catalog_refreshed_at"].is_string());
}
