//! HTTP access to the task service.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{MessageResponse, Task, TaskInput};

/// Errors surfaced to the board.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Title is required!")]
    TitleRequired,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Operations the task service exposes.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Up to five most recent pending tasks.
    async fn recent_tasks(&self) -> ClientResult<Vec<Task>>;
    async fn all_tasks(&self) -> ClientResult<Vec<Task>>;
    async fn create_task(&self, input: &TaskInput) -> ClientResult<MessageResponse>;
    async fn update_task(&self, id: i64, input: &TaskInput) -> ClientResult<MessageResponse>;
    async fn mark_done(&self, id: i64) -> ClientResult<MessageResponse>;
    async fn delete_task(&self, id: i64) -> ClientResult<MessageResponse>;
}

/// reqwest-backed [`TaskApi`].
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decode a JSON body, turning non-2xx responses into [`ClientError::Status`].
async fn decode<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&body)
        .map(|m| m.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        });
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn recent_tasks(&self) -> ClientResult<Vec<Task>> {
        let resp = self.client.get(self.url("/tasks")).send().await?;
        decode(resp).await
    }

    async fn all_tasks(&self) -> ClientResult<Vec<Task>> {
        let resp = self.client.get(self.url("/tasks/all")).send().await?;
        decode(resp).await
    }

    async fn create_task(&self, input: &TaskInput) -> ClientResult<MessageResponse> {
        let resp = self
            .client
            .post(self.url("/tasks"))
            .json(input)
            .send()
            .await?;
        decode(resp).await
    }

    async fn update_task(&self, id: i64, input: &TaskInput) -> ClientResult<MessageResponse> {
        let resp = self
            .client
            .patch(self.url(&format!("/tasks/{}", id)))
            .json(input)
            .send()
            .await?;
        decode(resp).await
    }

    async fn mark_done(&self, id: i64) -> ClientResult<MessageResponse> {
        let resp = self
            .client
            .patch(self.url(&format!("/tasks/{}/done", id)))
            .send()
            .await?;
        decode(resp).await
    }

    async fn delete_task(&self, id: i64) -> ClientResult<MessageResponse> {
        let resp = self
            .client
            .delete(self.url(&format!("/tasks/{}", id)))
            .send()
            .await?;
        decode(resp).await
    }
}
