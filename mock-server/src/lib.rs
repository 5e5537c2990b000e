use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::cors::CorsLayer;
use tracing::debug;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of both create and full-replace requests.
#[derive(Deserialize)]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct OwnerQuery {
    pub owner_id: i64,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub owner_id: i64,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

/// Ids only grow, so key order is insertion order.
#[derive(Default)]
pub struct Store {
    next_id: i64,
    tasks: BTreeMap<i64, Task>,
}

pub type Db = Arc<RwLock<Store>>;

type Rejection = (StatusCode, Json<Detail>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/v1/tasks/", get(list_tasks).post(create_task))
        .route(
            "/api/v1/tasks/{id}",
            get(get_task).put(replace_task).delete(delete_task),
        )
        .route("/api/health", get(health))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_tasks(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<Task>> {
    let store = db.read().await;
    Json(
        store
            .tasks
            .values()
            .filter(|t| t.owner_id == query.owner_id)
            .skip(query.skip)
            .take(query.limit)
            .cloned()
            .collect(),
    )
}

async fn create_task(
    State(db): State<Db>,
    Query(query): Query<OwnerQuery>,
    Json(input): Json<TaskInput>,
) -> (StatusCode, Json<Task>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let now = Utc::now();
    let task = Task {
        id: store.next_id,
        title: input.title,
        description: input.description,
        owner_id: query.owner_id,
        completed: input.completed,
        created_at: now,
        updated_at: now,
    };
    store.tasks.insert(task.id, task.clone());
    debug!(id = task.id, owner_id = task.owner_id, "task created");
    (StatusCode::CREATED, Json(task))
}

async fn get_task(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Task>, Rejection> {
    let store = db.read().await;
    store.tasks.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn replace_task(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TaskInput>,
) -> Result<Json<Task>, Rejection> {
    let mut store = db.write().await;
    let task = store.tasks.get_mut(&id).ok_or_else(not_found)?;
    task.title = input.title;
    task.description = input.description;
    task.completed = input.completed;
    task.updated_at = Utc::now();
    debug!(id, completed = task.completed, "task replaced");
    Ok(Json(task.clone()))
}

async fn delete_task(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    store.tasks.remove(&id).ok_or_else(not_found)?;
    debug!(id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found() -> Rejection {
    (
        StatusCode::NOT_FOUND,
        Json(Detail {
            detail: "Task not found".to_string(),
        }),
    )
}
