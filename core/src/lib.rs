//! Client core for the task service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the stateless
//! `TaskClient` sit the UI-facing pieces: the `App` controller that owns the
//! task collection, the `TaskForm` entry form, the `list` view model and the
//! `HealthCheck` view.
//!
//! # Design
//! - `TaskClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - The owner is passed explicitly; `DEFAULT_OWNER_ID` is only a default.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod app;
pub mod client;
pub mod error;
pub mod form;
pub mod health;
pub mod http;
pub mod list;
pub mod types;

#[cfg(test)]
mod testing;

pub use app::{App, Operation, PendingCall, DEFAULT_OWNER_ID};
pub use client::TaskClient;
pub use error::ApiError;
pub use form::TaskForm;
pub use health::HealthCheck;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use list::{ListIntent, ListView, TaskRow};
pub use types::{CreateTaskRequest, HealthStatus, OwnerId, Task, TaskId, UpdateTaskRequest};
