//! Backend liveness indicator, independent of task data.

use tracing::warn;

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

pub const CHECKING_STATUS: &str = "checking...";
pub const OFFLINE_STATUS: &str = "offline";
pub const CONNECT_FAILURE_MESSAGE: &str = "Failed to connect to API";

/// State of the health-check view.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    client: TaskClient,
    status: String,
    loading: bool,
    error: Option<String>,
}

impl HealthCheck {
    pub fn new(client: TaskClient) -> Self {
        Self {
            client,
            status: CHECKING_STATUS.to_string(),
            loading: true,
            error: None,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn request(&self) -> HttpRequest {
        self.client.build_health()
    }

    pub fn complete(&mut self, outcome: Result<HttpResponse, ApiError>) {
        self.loading = false;
        match outcome.and_then(|r| self.client.parse_health(r)) {
            Ok(health) => {
                self.status = health.status;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "health check failed");
                self.status = OFFLINE_STATUS.to_string();
                self.error = Some(CONNECT_FAILURE_MESSAGE.to_string());
            }
        }
    }

    pub fn check<T: Transport + ?Sized>(&mut self, transport: &mut T) {
        let outcome = transport.execute(&self.request());
        self.complete(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ok, status, ScriptedTransport};
    use crate::types::HealthStatus;

    fn health() -> HealthCheck {
        HealthCheck::new(TaskClient::new("http://api.test"))
    }

    #[test]
    fn starts_checking() {
        let h = health();
        assert_eq!(h.status(), "checking...");
        assert!(h.is_loading());
        assert!(h.error().is_none());
    }

    #[test]
    fn reports_server_status() {
        let mut h = health();
        let mut transport = ScriptedTransport::new([ok(200, &HealthStatus { status: "ok".into() })]);
        h.check(&mut transport);
        assert_eq!(transport.requests()[0].path, "http://api.test/api/health");
        assert_eq!(h.status(), "ok");
        assert!(!h.is_loading());
        assert!(h.error().is_none());
    }

    #[test]
    fn failure_marks_offline() {
        let mut h = health();
        let mut transport = ScriptedTransport::new([status(503)]);
        h.check(&mut transport);
        assert_eq!(h.status(), "offline");
        assert_eq!(h.error(), Some("Failed to connect to API"));
        assert!(!h.is_loading());
    }

    #[test]
    fn recovery_clears_error() {
        let mut h = health();
        let mut transport = ScriptedTransport::new([
            Err(ApiError::Transport("refused".into())),
            ok(200, &HealthStatus { status: "ok".into() }),
        ]);
        h.check(&mut transport);
        h.check(&mut transport);
        assert_eq!(h.status(), "ok");
        assert!(h.error().is_none());
    }
}
