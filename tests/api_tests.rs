//! HTTP surface tests.
//!
//! Each test starts the service on an ephemeral port backed by an in-memory
//! database and talks to it with reqwest.

use reqwest::StatusCode;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use task_board::db::Database;
use task_board::server::{ServerHandle, start_server};
use task_board::types::Task;

struct TestServer {
    handle: ServerHandle,
    client: reqwest::Client,
}

impl TestServer {
    async fn start() -> Self {
        let db = Arc::new(Database::open_in_memory().expect("open db"));
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let handle = start_server(db, addr).await.expect("start server");
        Self {
            handle,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.handle.base_url(), path)
    }

    async fn create(&self, title: &str, description: &str) -> reqwest::Response {
        self.client
            .post(self.url("/tasks"))
            .json(&json!({ "title": title, "description": description }))
            .send()
            .await
            .unwrap()
    }

    async fn list(&self, path: &str) -> Vec<Task> {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        resp.json().await.unwrap()
    }

    async fn find(&self, title: &str) -> Task {
        self.list("/tasks/all")
            .await
            .into_iter()
            .find(|t| t.title == title)
            .expect("task should be listed")
    }
}

async fn message(resp: reqwest::Response) -> String {
    let body: Value = resp.json().await.unwrap();
    body["message"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn health_reports_version() {
    let server = TestServer::start().await;
    let body: Value = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    server.handle.shutdown().await;
}

#[tokio::test]
async fn create_then_list() {
    let server = TestServer::start().await;

    let resp = server.create("T", "D").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(message(resp).await, "Task created successfully");

    let task = server.find("T").await;
    assert_eq!(task.description.as_deref(), Some("D"));
    assert!(!task.is_completed);

    let recent = server.list("/tasks").await;
    assert!(recent.iter().any(|t| t.id == task.id));
    server.handle.shutdown().await;
}

#[tokio::test]
async fn recent_is_limited_to_five_pending() {
    let server = TestServer::start().await;
    for i in 0..7 {
        server.create(&format!("task {}", i), "").await;
    }
    let newest = server.find("task 6").await;
    server
        .client
        .patch(server.url(&format!("/tasks/{}/done", newest.id)))
        .send()
        .await
        .unwrap();

    let recent = server.list("/tasks").await;
    assert_eq!(recent.len(), 5);
    assert!(recent.iter().all(|t| !t.is_completed));
    assert_eq!(recent[0].title, "task 5");
    assert_eq!(server.list("/tasks/all").await.len(), 7);
    server.handle.shutdown().await;
}

#[tokio::test]
async fn update_keeps_identity_and_state() {
    let server = TestServer::start().await;
    server.create("before", "old").await;
    let before = server.find("before").await;

    let resp = server
        .client
        .patch(server.url(&format!("/tasks/{}", before.id)))
        .json(&json!({ "title": "after", "description": "new" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(message(resp).await, "Task updated successfully");

    let after = server.find("after").await;
    assert_eq!(after.id, before.id);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.is_completed, before.is_completed);
    assert_eq!(after.description.as_deref(), Some("new"));
    server.handle.shutdown().await;
}

#[tokio::test]
async fn update_and_done_on_missing_id_succeed_silently() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .patch(server.url("/tasks/9999"))
        .json(&json!({ "title": "x", "description": "y" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = server
        .client
        .patch(server.url("/tasks/9999/done"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(message(resp).await, "Task marked as completed");
    server.handle.shutdown().await;
}

#[tokio::test]
async fn mark_done_twice_responds_the_same() {
    let server = TestServer::start().await;
    server.create("twice", "").await;
    let task = server.find("twice").await;
    let url = server.url(&format!("/tasks/{}/done", task.id));

    for _ in 0..2 {
        let resp = server.client.patch(&url).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(message(resp).await, "Task marked as completed");
    }
    assert!(server.find("twice").await.is_completed);
    server.handle.shutdown().await;
}

#[tokio::test]
async fn delete_missing_id_is_not_found() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .delete(server.url("/tasks/9999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Task not found" }));
    server.handle.shutdown().await;
}

#[tokio::test]
async fn create_without_title_is_a_server_error() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .post(server.url("/tasks"))
        .json(&json!({ "description": "no title" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "DATABASE_ERROR");
    assert!(server.list("/tasks/all").await.is_empty());
    server.handle.shutdown().await;
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .delete(server.url("/tasks/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    server.handle.shutdown().await;
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .get(server.url("/tasks"))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    server.handle.shutdown().await;
}

#[tokio::test]
async fn end_to_end_task_lifecycle() {
    let server = TestServer::start().await;

    let resp = server.create("Test Task", "This is a test").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(message(resp).await, "Task created successfully");

    let task = server.find("Test Task").await;

    let resp = server
        .client
        .patch(server.url(&format!("/tasks/{}/done", task.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(message(resp).await, "Task marked as completed");

    assert!(server.find("Test Task").await.is_completed);
    assert!(server.list("/tasks").await.iter().all(|t| t.id != task.id));

    let resp = server
        .client
        .delete(server.url(&format!("/tasks/{}", task.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(message(resp).await, "Task deleted successfully");

    assert!(
        server
            .list("/tasks/all")
            .await
            .iter()
            .all(|t| t.id != task.id)
    );
    server.handle.shutdown().await;
}
