// carta-client/tests/tag_backend.rs
// Tag client and reconciler against an in-process axum backend

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use carta_client::{
    AssociationOp, ClientConfig, ClientError, NetworkHttpClient, TagClient, TagReconciler, TagType,
    init_logger_with_level,
};
use serde_json::{Value, json};
use shared::models::TagCreate;

const TOKEN: &str = "secret";
/// Association calls for this tag id always fail with 500
const FAILING_TAG: i64 = 666;

type Association = (String, i64, i64);

#[derive(Clone, Default)]
struct Backend {
    associations: Arc<Mutex<BTreeSet<Association>>>,
    commerces: Arc<Mutex<Vec<String>>>,
}

impl Backend {
    fn seed(self, kind: &str, entity_id: i64, tag_ids: &[i64]) -> Self {
        {
            let mut set = self.associations.lock().unwrap();
            for &tag_id in tag_ids {
                set.insert((kind.to_string(), entity_id, tag_id));
            }
        }
        self
    }

    fn tags_of(&self, kind: &str, entity_id: i64) -> BTreeSet<i64> {
        self.associations
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, e, _)| k == kind && *e == entity_id)
            .map(|(_, _, t)| *t)
            .collect()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

fn record_commerce(backend: &Backend, headers: &HeaderMap) {
    if let Some(c) = headers.get("x-commerce").and_then(|v| v.to_str().ok()) {
        backend.commerces.lock().unwrap().push(c.to_string());
    }
}

async fn list_tags(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!([
        {"id": 1, "name": "Vegan", "color": "#00aa00", "text_color": "#ffffff", "type": "product", "visible": true, "priority": 2},
        {"id": 2, "name": "Spicy", "color": "#aa0000", "textColor": "#000000", "type": "product", "visible": true, "priority": 1, "isRecommended": true},
        {"id": 3, "name": "Sold out", "color": "#999999", "type": "item", "visible": false, "disableSelection": true},
        {"id": 4, "name": "Broken", "color": "#123456"}
    ])))
}

async fn create_tag(headers: HeaderMap, Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let mut tag = body;
    tag["id"] = json!(42);
    Ok(Json(tag))
}

async fn delete_tag(Path(id): Path<i64>) -> StatusCode {
    if id == 42 {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn assign(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path((segment, entity_id, tag_id)): Path<(String, i64, i64)>,
) -> (StatusCode, String) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, String::new());
    }
    record_commerce(&backend, &headers);
    if tag_id == FAILING_TAG {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom".into());
    }
    let Some(kind) = segment.strip_prefix("assign-") else {
        return (StatusCode::NOT_FOUND, String::new());
    };
    let inserted = backend
        .associations
        .lock()
        .unwrap()
        .insert((kind.to_string(), entity_id, tag_id));
    if !inserted {
        return (
            StatusCode::CONFLICT,
            r#"{"message":"Tag already assigned"}"#.into(),
        );
    }
    (StatusCode::CREATED, String::new())
}

async fn unassign(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path((segment, entity_id, tag_id)): Path<(String, i64, i64)>,
) -> StatusCode {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    record_commerce(&backend, &headers);
    if tag_id == FAILING_TAG {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let Some(kind) = segment.strip_prefix("assign-") else {
        return StatusCode::NOT_FOUND;
    };
    let removed = backend
        .associations
        .lock()
        .unwrap()
        .remove(&(kind.to_string(), entity_id, tag_id));
    if removed {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Start the backend on a free local port, returning its base URL
async fn spawn_backend(backend: Backend) -> String {
    init_logger_with_level(Some("debug"));

    let app = Router::new()
        .route("/api/tags", get(list_tags).post(create_tag))
        .route("/api/tags/{id}", delete(delete_tag))
        .route(
            "/api/tags/{segment}/{entity_id}/{tag_id}",
            post(assign).delete(unassign),
        )
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn tag_client(base_url: &str) -> TagClient<NetworkHttpClient> {
    let http = ClientConfig::new(base_url)
        .with_token(TOKEN)
        .with_commerce("pizzeria")
        .with_timeout(5)
        .build_http_client()
        .unwrap();
    TagClient::new(http)
}

#[tokio::test]
async fn test_reconcile_updates_backend() {
    let backend = Backend::default().seed("product", 5, &[1, 2]);
    let url = spawn_backend(backend.clone()).await;
    let reconciler = TagReconciler::new(tag_client(&url));

    let report = reconciler
        .reconcile(5, TagType::Product, [1, 2], [2, 3, 4])
        .await
        .unwrap();

    assert_eq!(report.added, BTreeSet::from([3, 4]));
    assert_eq!(report.removed, BTreeSet::from([1]));
    assert_eq!(backend.tags_of("product", 5), BTreeSet::from([2, 3, 4]));

    // Every call carried the commerce header
    let commerces = backend.commerces.lock().unwrap().clone();
    assert_eq!(commerces.len(), 3);
    assert!(commerces.iter().all(|c| c == "pizzeria"));
}

#[tokio::test]
async fn test_reconcile_tolerates_stale_local_state() {
    // Tag 3 is already on the product and tag 1 is already gone
    let backend = Backend::default().seed("option", 8, &[3]);
    let url = spawn_backend(backend.clone()).await;
    let reconciler = TagReconciler::new(tag_client(&url));

    let report = reconciler
        .reconcile(8, TagType::Option, [1], [3])
        .await
        .unwrap();

    assert_eq!(report.added, BTreeSet::from([3]));
    assert_eq!(report.removed, BTreeSet::from([1]));
    assert_eq!(backend.tags_of("option", 8), BTreeSet::from([3]));
}

#[tokio::test]
async fn test_reconcile_partial_failure() {
    let backend = Backend::default().seed("item", 2, &[1]);
    let url = spawn_backend(backend.clone()).await;
    let reconciler = TagReconciler::new(tag_client(&url));

    let err = reconciler
        .reconcile(2, TagType::Item, [1], [FAILING_TAG, 7])
        .await
        .unwrap_err();

    assert_eq!(err.failures.len(), 1);
    assert_eq!(err.failures[0].tag_id, FAILING_TAG);
    assert_eq!(err.failures[0].op, AssociationOp::Add);
    assert_eq!(err.failures[0].status, Some(500));
    // The rest went through and stays applied
    assert_eq!(backend.tags_of("item", 2), BTreeSet::from([7]));

    // Retrying only what failed issues a single call
    assert_eq!(err.remaining().call_count(), 1);
}

#[tokio::test]
async fn test_list_tags_normalizes_wire_shapes() -> anyhow::Result<()> {
    let url = spawn_backend(Backend::default()).await;
    let client = tag_client(&url);

    let tags = client.list_tags().await?;
    // The entry without a type is dropped
    assert_eq!(tags.len(), 3);
    assert_eq!(tags[0].text_color.as_deref(), Some("#ffffff"));
    assert_eq!(tags[1].text_color.as_deref(), Some("#000000"));
    assert!(tags[1].is_recommended);
    assert!(tags[2].disable_selection);

    let product_tags = client.list_tags_for(TagType::Product).await?;
    let names: Vec<&str> = product_tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Spicy", "Vegan"]);
    Ok(())
}

#[tokio::test]
async fn test_create_and_delete_tag() -> anyhow::Result<()> {
    let url = spawn_backend(Backend::default()).await;
    let client = tag_client(&url);

    let created = client
        .create_tag(&TagCreate {
            name: "New".to_string(),
            color: "#ffcc00".to_string(),
            text_color: Some("#000000".to_string()),
            tag_type: TagType::Product,
            visible: true,
            priority: Some(3),
            discount: None,
            disable_selection: None,
            is_recommended: Some(true),
        })
        .await?;
    assert_eq!(created.id, 42);
    assert_eq!(created.text_color.as_deref(), Some("#000000"));
    assert!(created.is_recommended);

    client.delete_tag(42).await?;
    let err = client.delete_tag(41).await.unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let url = spawn_backend(Backend::default()).await;
    let http = ClientConfig::new(&url).build_http_client().unwrap();
    let client = TagClient::new(http);

    let err = client.list_tags().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}
