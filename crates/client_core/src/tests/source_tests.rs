use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use shared::{domain::ArtworkId, error::ErrorCode};
use tokio::{net::TcpListener, sync::Mutex};

use super::*;

#[derive(Clone, Default)]
struct CatalogServerState {
    queries: Arc<Mutex<Vec<Vec<(String, String)>>>>,
}

async fn handle_artworks(
    State(state): State<CatalogServerState>,
    Query(params): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    state.queries.lock().await.push(params.clone());
    let page = params
        .iter()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse::<i64>().ok())
        .unwrap_or(1);

    if page == 99 {
        return (StatusCode::FORBIDDEN, Json(json!({"status": 403}))).into_response();
    }
    if page == 98 {
        return (StatusCode::OK, "<html>not json</html>").into_response();
    }

    let data: Vec<_> = (0..12)
        .map(|offset| {
            json!({
                "id": page * 1000 + offset,
                "title": format!("Work {offset} of page {page}"),
                "place_of_origin": "France",
                "artist_display": null,
                "inscriptions": null,
                "date_start": 1880,
                "date_end": 1890,
                "thumbnail": {"alt_text": "ignored"}
            })
        })
        .collect();
    Json(json!({
        "pagination": {"total": 125000, "limit": 12, "current_page": page},
        "data": data,
    }))
    .into_response()
}

async fn spawn_catalog_server() -> Result<(String, CatalogServerState)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = CatalogServerState::default();
    let app = Router::new()
        .route("/api/v1/artworks", get(handle_artworks))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/api/v1/artworks"), state))
}

#[tokio::test]
async fn fetch_page_sends_only_the_page_parameter() {
    let (endpoint, state) = spawn_catalog_server().await.expect("spawn server");
    let source = HttpArtworkSource::new(&endpoint).expect("source");

    let page = source.fetch_page(3).await.expect("fetch page");

    assert_eq!(page.data.len(), 12);
    assert_eq!(page.data[0].id, ArtworkId(3000));
    assert_eq!(page.data[0].place_of_origin.as_deref(), Some("France"));
    assert_eq!(page.data[0].artist_display, None);
    assert_eq!(
        page.pagination.and_then(|pagination| pagination.total),
        Some(125000)
    );
    assert_eq!(
        state.queries.lock().await.clone(),
        vec![vec![("page".to_string(), "3".to_string())]]
    );
}

#[tokio::test]
async fn error_status_is_reported_as_http_error() {
    let (endpoint, _state) = spawn_catalog_server().await.expect("spawn server");
    let source = HttpArtworkSource::new(&endpoint).expect("source");

    let err = source.fetch_page(99).await.expect_err("forbidden page");

    assert!(matches!(err, BrowseError::Http(_)));
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn malformed_body_is_reported_as_upstream_error() {
    let (endpoint, _state) = spawn_catalog_server().await.expect("spawn server");
    let source = HttpArtworkSource::new(&endpoint).expect("source");

    let err = source.fetch_page(98).await.expect_err("html body");

    assert!(matches!(err, BrowseError::Http(_)));
    assert_eq!(err.code(), ErrorCode::Upstream);
}

#[tokio::test]
async fn browser_drives_http_source_end_to_end() {
    let (endpoint, state) = spawn_catalog_server().await.expect("spawn server");
    let source = HttpArtworkSource::new(&endpoint).expect("source");
    let mut browser = crate::CatalogBrowser::default();

    browser.load_page(&source, 1).await.expect("load page 2");
    let outcome = browser
        .bulk_select(&source, crate::RowCount::new(20))
        .await
        .expect("bulk select");

    assert_eq!(outcome.fetched_pages, vec![2, 3]);
    assert_eq!(browser.selection().len(), 20);
    assert!(browser.is_select_all());
    assert_eq!(state.queries.lock().await.len(), 3);
}

#[test]
fn rejects_unparseable_endpoint() {
    let err = HttpArtworkSource::new("not a url").expect_err("bad endpoint");
    assert!(matches!(err, BrowseError::InvalidEndpoint(_)));
}
