use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub name: String,
}

/// What `/echo/*` saw of the incoming request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echoed {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub token: Option<String>,
    pub content_type: Option<String>,
    /// Parsed JSON body, the raw text if it is not JSON, null if empty.
    pub body: Value,
}

/// Items kept in memory for the life of one `app()`.
#[derive(Clone, Default)]
pub struct ItemStore(Arc<RwLock<HashMap<String, Item>>>);

impl ItemStore {
    pub async fn add(&self, name: String) -> Item {
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name,
        };
        self.0.write().await.insert(item.id.clone(), item.clone());
        item
    }

    pub async fn find(&self, id: &str) -> Option<Item> {
        self.0.read().await.get(id).cloned()
    }

    pub async fn take(&self, id: &str) -> Option<Item> {
        self.0.write().await.remove(id)
    }

    pub async fn all(&self) -> Vec<Item> {
        self.0.read().await.values().cloned().collect()
    }
}

/// 404 with a JSON body, so clients see a parseable non-2xx reply.
struct ItemNotFound;

impl IntoResponse for ItemNotFound {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Json(json!({ "error": "item not found" }))).into_response()
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/items", get(all_items).post(add_item))
        .route("/items/{id}", get(find_item).delete(take_item))
        .route("/echo/{*rest}", any(echo))
        .route("/plain", get(plain))
        .route("/generate", post(generate))
        .route("/jobs", post(submit_job))
        .with_state(ItemStore::default())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn all_items(State(store): State<ItemStore>) -> Json<Vec<Item>> {
    Json(store.all().await)
}

async fn add_item(State(store): State<ItemStore>, Json(input): Json<CreateItem>) -> (StatusCode, Json<Item>) {
    (StatusCode::CREATED, Json(store.add(input.name).await))
}

async fn find_item(State(store): State<ItemStore>, Path(id): Path<String>) -> Result<Json<Item>, ItemNotFound> {
    store.find(&id).await.map(Json).ok_or(ItemNotFound)
}

async fn take_item(State(store): State<ItemStore>, Path(id): Path<String>) -> Result<StatusCode, ItemNotFound> {
    store.take(&id).await.map(|_| StatusCode::NO_CONTENT).ok_or(ItemNotFound)
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echoed> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };
    Json(Echoed {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        token: header("token"),
        content_type: header("content-type"),
        body,
    })
}

async fn plain() -> &'static str {
    "this response is not json"
}

async fn generate(Json(input): Json<Value>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match input.get("prompt").and_then(Value::as_str) {
        Some(prompt) => Ok(Json(json!({ "text": format!("generated: {prompt}") }))),
        None => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "prompt is required" })),
        )),
    }
}

async fn submit_job(Json(_payload): Json<Value>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::ACCEPTED,
        Json(json!({ "id": Uuid::new_v4().to_string(), "status": "queued" })),
    )
}
