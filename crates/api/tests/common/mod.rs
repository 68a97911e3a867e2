#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use indexmap::IndexMap;
use tower::ServiceExt;
use uuid::Uuid;

use pagelayout_api::auth::jwt::{generate_access_token, JwtConfig};
use pagelayout_api::config::ServerConfig;
use pagelayout_api::router::build_app_router;
use pagelayout_api::state::AppState;
use pagelayout_core::catalog::LayoutCatalog;
use pagelayout_core::content::{BlockContent, ContentType, DisplayComponent, LabelDisplay};
use pagelayout_core::engine::LayoutEngine;
use pagelayout_core::memory::MemoryBackend;
use pagelayout_core::plugin::PluginBlockRegistry;
use pagelayout_core::store::LayoutStore;
use pagelayout_core::types::DbId;

pub const BLOCK_UUID: Uuid = Uuid::from_u128(7);
pub const ARTICLE_PERMISSION: &str = "use article layout per node";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
        layout_catalog_path: None,
        block_providers: vec!["system".to_string()],
    }
}

/// The app under test plus handles for seeding and inspecting its state.
pub struct TestApp {
    pub router: Router,
    pub backend: Arc<MemoryBackend>,
    /// An `article` item (layout editor enabled) at revision 1.
    pub article_id: DbId,
    /// A `page` item whose type has the layout editor disabled.
    pub page_id: DbId,
}

fn content_type(name: &str, enabled: bool) -> ContentType {
    ContentType {
        name: name.to_string(),
        label: name.to_string(),
        default_template_id: "onecol".to_string(),
        layout_editor_enabled: enabled,
        allowed_templates: Vec::new(),
        display: vec![
            DisplayComponent {
                field: "field_body".to_string(),
                label: "Body".to_string(),
                label_display: LabelDisplay::Hidden,
            },
            DisplayComponent {
                field: "field_tags".to_string(),
                label: "Tags".to_string(),
                label_display: LabelDisplay::Above,
            },
        ],
    }
}

fn fields() -> IndexMap<String, String> {
    IndexMap::from([
        ("field_body".to_string(), "Body text".to_string()),
        ("field_tags".to_string(), "rust".to_string()),
    ])
}

/// Build the full application router over a seeded in-memory backend.
///
/// Uses the same `build_app_router` as `main.rs`, so the middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery) is exercised too.
pub async fn build_test_app() -> TestApp {
    build_test_app_with_store(|backend| {
        let store: Arc<dyn LayoutStore> = backend.clone();
        store
    })
    .await
}

/// Like [`build_test_app`], but the engine writes layouts through the store
/// returned by `store`.
pub async fn build_test_app_with_store<F>(store: F) -> TestApp
where
    F: FnOnce(&Arc<MemoryBackend>) -> Arc<dyn LayoutStore>,
{
    let backend = Arc::new(MemoryBackend::new());
    backend.add_content_type(content_type("article", true)).await;
    backend.add_content_type(content_type("page", false)).await;
    backend
        .add_block_content(BlockContent {
            uuid: BLOCK_UUID,
            label: "Promo".to_string(),
            body: "<p>Buy now</p>".to_string(),
        })
        .await;
    let article = backend
        .create_item("article", "Hello", fields())
        .await
        .unwrap();
    let page = backend.create_item("page", "About", fields()).await.unwrap();

    let config = test_config();
    let engine = LayoutEngine::new(
        Arc::new(LayoutCatalog::builtin()),
        backend.clone(),
        store(&backend),
        Arc::new(PluginBlockRegistry::builtin()),
    );
    let state = AppState {
        pool: None,
        config: Arc::new(config.clone()),
        engine,
    };

    TestApp {
        router: build_app_router(state, &config),
        backend,
        article_id: article.id,
        page_id: page.id,
    }
}

/// Issue an access token signed with the test secret.
pub fn token(role: &str, permissions: &[&str]) -> String {
    let permissions: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();
    generate_access_token(1, role, &permissions, &test_config().jwt).unwrap()
}

/// A token for an editor allowed to use the layout editor on articles.
pub fn editor_token() -> String {
    token("editor", &[ARTICLE_PERMISSION])
}

pub async fn get(app: &TestApp, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(
    app: &TestApp,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.router
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
