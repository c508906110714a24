//! Route handlers and router construction.

use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Json},
    routing::{get, patch},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::types::{
    MSG_COMPLETED, MSG_CREATED, MSG_DELETED, MSG_UPDATED, MessageResponse, RECENT_TASK_LIMIT,
    Task, TaskInput,
};

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Database>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}

/// Health check response.
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /tasks - the most recent pending tasks.
async fn list_recent(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.db().list_recent_tasks(RECENT_TASK_LIMIT)?;
    Ok(Json(tasks))
}

/// GET /tasks/all
async fn list_all(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.db().list_all_tasks()?;
    Ok(Json(tasks))
}

/// POST /tasks
async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<TaskInput>,
) -> ApiResult<Json<MessageResponse>> {
    let id = state
        .db()
        .create_task(input.title.as_deref(), input.description.as_deref())?;
    debug!(task_id = id, "Task created");
    Ok(Json(MessageResponse::new(MSG_CREATED)))
}

/// PATCH /tasks/{id}
///
/// Absent ids are not reported; the update simply touches no rows.
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TaskInput>,
) -> ApiResult<Json<MessageResponse>> {
    let affected = state.db().update_task(
        id,
        input.title.as_deref(),
        input.description.as_deref(),
    )?;
    debug!(task_id = id, affected, "Task updated");
    Ok(Json(MessageResponse::new(MSG_UPDATED)))
}

/// PATCH /tasks/{id}/done
async fn mark_done(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let affected = state.db().mark_task_done(id)?;
    debug!(task_id = id, affected, "Task marked done");
    Ok(Json(MessageResponse::new(MSG_COMPLETED)))
}

/// DELETE /tasks/{id}
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    if state.db().delete_task(id)? == 0 {
        return Err(ApiError::task_not_found());
    }
    debug!(task_id = id, "Task deleted");
    Ok(Json(MessageResponse::new(MSG_DELETED)))
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tasks", get(list_recent).post(create_task))
        .route("/tasks/all", get(list_all))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
        .route("/tasks/{id}/done", patch(mark_done))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            version: "0.1.0",
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("0.1.0"));
    }
}
