//! Scripted transport and fixtures shared by unit tests.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Task, TaskId};

/// Replays queued outcomes in order and records every request it sees.
pub struct ScriptedTransport {
    outcomes: VecDeque<Result<HttpResponse, ApiError>>,
    requests: Vec<HttpRequest>,
}

impl ScriptedTransport {
    pub fn new(outcomes: impl IntoIterator<Item = Result<HttpResponse, ApiError>>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
            requests: Vec::new(),
        }
    }

    pub fn requests(&self) -> &[HttpRequest] {
        &self.requests
    }
}

impl Transport for ScriptedTransport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.push(request.clone());
        self.outcomes
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted request: {} {}", request.method.as_str(), request.path))
    }
}

pub fn ok<T: Serialize + ?Sized>(status: u16, body: &T) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body: serde_json::to_string(body).unwrap(),
    })
}

pub fn status(status: u16) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body: String::new(),
    })
}

pub fn task(id: TaskId, title: &str, completed: bool) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        owner_id: Some(1),
        completed,
        created_at: None,
        updated_at: None,
    }
}
