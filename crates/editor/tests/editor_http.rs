//! End-to-end tests: the editor and client against a live record service.
//!
//! Each test binds the API router (over an in-memory store) to an ephemeral
//! port and talks to it over real HTTP.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use catmander_api::config::ServerConfig;
use catmander_api::router::build_app_router;
use catmander_api::state::AppState;
use catmander_core::name_rule::NameRule;
use catmander_db::models::cat::CreateCat;
use catmander_db::store::{CatStore, InMemoryCatStore};
use catmander_editor::cache::CatListCache;
use catmander_editor::{
    CatClient, CatEditor, DraftField, EditorConfig, EditorError, EditorState, FailureKind,
};

fn server_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        name_rule: NameRule::AllowEmpty,
        database_url: None,
    }
}

/// Serve `app` on an ephemeral port and return its address.
async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start the record service over `store` and return an editor config
/// pointing at it.
async fn start_service(store: InMemoryCatStore) -> EditorConfig {
    let config = server_config();
    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
    };
    let addr = serve(build_app_router(state, &config)).await;
    EditorConfig::default()
        .with_api_url(format!("http://{addr}/api/v1"))
        .with_request_timeout(Duration::from_secs(5))
}

async fn store_with_tom() -> InMemoryCatStore {
    let store = InMemoryCatStore::new();
    store
        .insert_with_id("1", &CreateCat::new("Tom", "grey"))
        .await;
    store
}

#[tokio::test]
async fn edit_and_submit_round_trips_through_store() {
    let store = store_with_tom().await;
    let config = start_service(store.clone()).await;
    let editor = CatEditor::connect("1", config);

    editor.open().await.unwrap();
    editor.edit(DraftField::Color, "black").unwrap();
    editor.submit().await.unwrap();

    assert_matches!(editor.state(), EditorState::Success { cat } => {
        assert_eq!(cat.id, "1");
        assert_eq!(cat.name, "Tom");
        assert_eq!(cat.color, "black");

        let stored = store.find_by_id("1").await.unwrap().unwrap();
        assert_eq!(stored, cat);
    });
}

#[tokio::test]
async fn opening_unknown_cat_fails_with_not_found() {
    let config = start_service(InMemoryCatStore::new()).await;
    let editor = CatEditor::connect("ghost", config);

    editor.open().await.unwrap();

    assert_matches!(editor.state(), EditorState::Failed { error, draft: None } => {
        assert_eq!(error, EditorError::NotFound { id: "ghost".to_string() });
    });
}

#[tokio::test]
async fn deleted_cat_is_not_found_afterwards() {
    let store = store_with_tom().await;
    let config = start_service(store).await;
    let client = CatClient::from_config(&config);

    let removed = client.delete("1").await.unwrap();
    assert_eq!(removed.map(|c| c.name), Some("Tom".to_string()));
    assert!(client.delete("1").await.unwrap().is_none());

    let err = client.get("1").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);
}

#[tokio::test]
async fn client_creates_and_lists_with_filter() {
    let config = start_service(InMemoryCatStore::new()).await;
    let client = CatClient::from_config(&config);

    let mut felix = CreateCat::new("Felix", "black");
    felix.is_adopted = Some(true);
    let created = client.create(&felix).await.unwrap();
    assert!(!created.id.is_empty());
    client.create(&CreateCat::new("Tom", "grey")).await.unwrap();

    assert_eq!(client.list(None).await.unwrap().len(), 2);

    let adopted = client.list(Some(true)).await.unwrap();
    assert_eq!(adopted.len(), 1);
    assert_eq!(adopted[0].id, created.id);
}

#[tokio::test]
async fn success_updates_caller_cache_without_refetch() {
    let store = store_with_tom().await;
    let config = start_service(store).await;
    let client = CatClient::from_config(&config);

    let cache = CatListCache::new();
    cache.refresh(&client, None).await.unwrap();

    let editor = CatEditor::connect("1", config);
    editor.on_success({
        let cache = cache.clone();
        move |cat| cache.upsert(cat.clone())
    });

    editor.open().await.unwrap();
    editor.edit(DraftField::Name, "Thomas").unwrap();
    editor.submit().await.unwrap();

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("1").unwrap().name, "Thomas");
}

#[tokio::test]
async fn server_validation_failure_keeps_draft() {
    let store = store_with_tom().await;
    let mut server = server_config();
    server.name_rule = NameRule::RequireNonEmpty;
    let state = AppState {
        store: Arc::new(store.clone()),
        config: Arc::new(server.clone()),
    };
    let addr = serve(build_app_router(state, &server)).await;
    // The editor itself allows empty names, so the service rejects it.
    let config = EditorConfig::default().with_api_url(format!("http://{addr}/api/v1"));
    let editor = CatEditor::connect("1", config);

    editor.open().await.unwrap();
    editor.edit(DraftField::Name, "").unwrap();
    editor.submit().await.unwrap();

    assert_matches!(editor.state(), EditorState::Failed { error, draft: Some(draft) } => {
        assert_matches!(error, EditorError::Server { status: 400, .. });
        assert_eq!(draft.name, "");
        assert_eq!(draft.color, "grey");
    });
    assert_eq!(store.find_by_id("1").await.unwrap().unwrap().name, "Tom");
}

#[tokio::test]
async fn malformed_response_is_a_decode_failure() {
    let app = Router::new().route(
        "/api/v1/cats/{id}",
        get(|| async { "definitely not json" }).put(|| async { "{\"id\": 7}" }),
    );
    let addr = serve(app).await;
    let client = CatClient::new(format!("http://{addr}/api/v1"), Duration::from_secs(5));

    let err = client.get("1").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Decode);

    let err = client
        .update("1", &Default::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Decode);
}

#[tokio::test]
async fn malformed_submit_response_fails_with_draft() {
    let app = Router::new().route(
        "/api/v1/cats/{id}",
        get(|| async {
            axum::Json(serde_json::json!({
                "id": "1",
                "name": "Tom",
                "color": "grey",
                "is_adopted": null,
                "created_at": "2026-03-01T00:00:00Z",
                "updated_at": "2026-03-01T00:00:00Z",
            }))
        })
        .put(|| async { "nope" }),
    );
    let addr = serve(app).await;
    let config = EditorConfig::default().with_api_url(format!("http://{addr}/api/v1"));
    let editor = CatEditor::connect("1", config);

    editor.open().await.unwrap();
    editor.edit(DraftField::Color, "black").unwrap();
    editor.submit().await.unwrap();

    assert_matches!(editor.state(), EditorState::Failed { error, draft: Some(draft) } => {
        assert_eq!(error.kind(), FailureKind::Decode);
        assert_eq!(draft.name, "Tom");
        assert_eq!(draft.color, "black");
    });
}

#[tokio::test]
async fn error_status_is_a_server_failure() {
    let app = Router::new().route(
        "/api/v1/cats/{id}",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = serve(app).await;
    let config = EditorConfig::default().with_api_url(format!("http://{addr}/api/v1"));
    let editor = CatEditor::connect("1", config);

    editor.open().await.unwrap();

    assert_matches!(editor.state(), EditorState::Failed { error, draft: None } => {
        assert_eq!(error, EditorError::Server { status: 500, body: "boom".to_string() });
    });
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = EditorConfig::default().with_api_url(format!("http://{addr}/api/v1"));
    let editor = CatEditor::connect("1", config);

    editor.open().await.unwrap();

    assert_matches!(editor.state(), EditorState::Failed { error, draft: None } => {
        assert_eq!(error.kind(), FailureKind::Network);
    });
}

#[tokio::test]
async fn slow_service_times_out() {
    let app = Router::new().route(
        "/api/v1/cats/{id}",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "{}"
        }),
    );
    let addr = serve(app).await;
    let config = EditorConfig::default()
        .with_api_url(format!("http://{addr}/api/v1"))
        .with_request_timeout(Duration::from_millis(100));
    let editor = CatEditor::connect("1", config);

    editor.open().await.unwrap();

    assert_matches!(editor.state(), EditorState::Failed { error, .. } => {
        assert_eq!(error.kind(), FailureKind::Timeout);
    });
}
