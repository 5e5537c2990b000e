//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TaskClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip. There is no retry,
//! backoff or caching at this layer.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTaskRequest, HealthStatus, OwnerId, Task, TaskId, UpdateTaskRequest};

const TASKS_PATH: &str = "/api/v1/tasks/";
const HEALTH_PATH: &str = "/api/health";

/// Synchronous, stateless client for the task API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_tasks(&self, owner_id: OwnerId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(owner_id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_task(&self, owner_id: OwnerId, input: &CreateTaskRequest) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(owner_id),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_replace_task(&self, id: TaskId, input: &UpdateTaskRequest) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_url(id),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_delete_task(&self, id: TaskId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_health(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{HEALTH_PATH}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_replace_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// The acknowledgement body is ignored.
    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<HealthStatus, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    fn collection_url(&self, owner_id: OwnerId) -> String {
        format!("{}{TASKS_PATH}?owner_id={owner_id}", self.base_url)
    }

    fn item_url(&self, id: TaskId) -> String {
        format!("{}{TASKS_PATH}{id}", self.base_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
