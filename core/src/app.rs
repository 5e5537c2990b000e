//! Root controller: the authoritative in-memory task collection.
//!
//! # Design
//! `App` holds the task sequence, a loading flag and a single error slot.
//! Only response handling mutates the collection, so the local state is
//! always the last server state seen in this session.
//!
//! Every operation comes in two halves. `begin_*` builds the request and
//! returns a `PendingCall`; `complete` merges whatever came back. Completing
//! calls in an order different from the one they were issued in is allowed:
//! there is no cancellation, deduplication or generation check, so the last
//! response merged wins. The `load_tasks` family runs both halves back to
//! back through a `Transport`.

use tracing::{debug, warn};

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::list::{self, ListIntent, ListView};
use crate::types::{CreateTaskRequest, OwnerId, Task, TaskId, UpdateTaskRequest};

/// Placeholder owner used when nothing else is configured.
pub const DEFAULT_OWNER_ID: OwnerId = 1;

/// The four task operations, each with its own fixed failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Load => "Failed to load tasks",
            Operation::Create => "Failed to create task",
            Operation::Update => "Failed to update task",
            Operation::Delete => "Failed to delete task",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Load,
    Create,
    Replace(TaskId),
    Delete(TaskId),
}

/// An issued request whose outcome has not been merged yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCall {
    pending: Pending,
    request: HttpRequest,
}

impl PendingCall {
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn operation(&self) -> Operation {
        match self.pending {
            Pending::Load => Operation::Load,
            Pending::Create => Operation::Create,
            Pending::Replace(_) => Operation::Update,
            Pending::Delete(_) => Operation::Delete,
        }
    }
}

#[derive(Debug, Clone)]
pub struct App {
    client: TaskClient,
    owner_id: OwnerId,
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
}

impl App {
    /// A freshly mounted app: nothing loaded yet, loading in progress.
    pub fn new(client: TaskClient, owner_id: OwnerId) -> Self {
        Self {
            client,
            owner_id,
            tasks: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    pub fn view(&self) -> ListView<'_> {
        list::render(&self.tasks)
    }

    pub fn begin_load(&mut self) -> PendingCall {
        self.loading = true;
        PendingCall {
            pending: Pending::Load,
            request: self.client.build_list_tasks(self.owner_id),
        }
    }

    /// Returns `None` (with the create error set) if the body cannot be
    /// encoded.
    pub fn begin_create(&mut self, input: &CreateTaskRequest) -> Option<PendingCall> {
        match self.client.build_create_task(self.owner_id, input) {
            Ok(request) => Some(PendingCall {
                pending: Pending::Create,
                request,
            }),
            Err(e) => {
                self.fail(Operation::Create, &e);
                None
            }
        }
    }

    /// Returns `None` without touching any state when `id` is not in the
    /// local collection.
    pub fn begin_toggle(&mut self, id: TaskId) -> Option<PendingCall> {
        let task = self.tasks.iter().find(|t| t.id == id)?;
        match self.client.build_replace_task(id, &UpdateTaskRequest::toggled(task)) {
            Ok(request) => Some(PendingCall {
                pending: Pending::Replace(id),
                request,
            }),
            Err(e) => {
                self.fail(Operation::Update, &e);
                None
            }
        }
    }

    /// Issued whether or not `id` is known locally.
    pub fn begin_delete(&mut self, id: TaskId) -> PendingCall {
        PendingCall {
            pending: Pending::Delete(id),
            request: self.client.build_delete_task(id),
        }
    }

    /// Merges the outcome of `call` into local state.
    pub fn complete(&mut self, call: PendingCall, outcome: Result<HttpResponse, ApiError>) {
        match call.pending {
            Pending::Load => {
                self.loading = false;
                match outcome.and_then(|r| self.client.parse_list_tasks(r)) {
                    Ok(tasks) => {
                        debug!(count = tasks.len(), "tasks loaded");
                        self.tasks = tasks;
                        self.error = None;
                    }
                    Err(e) => self.fail(Operation::Load, &e),
                }
            }
            Pending::Create => match outcome.and_then(|r| self.client.parse_create_task(r)) {
                Ok(task) => {
                    debug!(id = task.id, "task created");
                    self.upsert(task);
                }
                Err(e) => self.fail(Operation::Create, &e),
            },
            Pending::Replace(id) => match outcome.and_then(|r| self.client.parse_replace_task(r)) {
                Ok(task) => {
                    debug!(id, completed = task.completed, "task replaced");
                    if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
                        *slot = task;
                    }
                }
                Err(e) => self.fail(Operation::Update, &e),
            },
            Pending::Delete(id) => match outcome.and_then(|r| self.client.parse_delete_task(r)) {
                Ok(()) => {
                    debug!(id, "task deleted");
                    self.tasks.retain(|t| t.id != id);
                }
                Err(e) => self.fail(Operation::Delete, &e),
            },
        }
    }

    pub fn load_tasks<T: Transport + ?Sized>(&mut self, transport: &mut T) {
        let call = self.begin_load();
        self.dispatch(transport, call);
    }

    pub fn create_task<T: Transport + ?Sized>(&mut self, transport: &mut T, input: &CreateTaskRequest) {
        if let Some(call) = self.begin_create(input) {
            self.dispatch(transport, call);
        }
    }

    pub fn toggle_task<T: Transport + ?Sized>(&mut self, transport: &mut T, id: TaskId) {
        match self.begin_toggle(id) {
            Some(call) => self.dispatch(transport, call),
            None => debug!(id, "toggle ignored for unknown task"),
        }
    }

    pub fn delete_task<T: Transport + ?Sized>(&mut self, transport: &mut T, id: TaskId) {
        let call = self.begin_delete(id);
        self.dispatch(transport, call);
    }

    pub fn handle_intent<T: Transport + ?Sized>(&mut self, transport: &mut T, intent: ListIntent) {
        match intent {
            ListIntent::Toggle(id) => self.toggle_task(transport, id),
            ListIntent::Delete(id) => self.delete_task(transport, id),
        }
    }

    fn dispatch<T: Transport + ?Sized>(&mut self, transport: &mut T, call: PendingCall) {
        let outcome = transport.execute(call.request());
        self.complete(call, outcome);
    }

    // A create response can race a reload that already contains the new
    // task; identifiers stay unique either way.
    fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }

    fn fail(&mut self, operation: Operation, error: &ApiError) {
        warn!(?operation, %error, "task operation failed");
        self.error = Some(operation.failure_message().to_string());
    }
}
