//! The todo controller: local state plus every operation that mutates it.
//!
//! # Design
//! `TodoApp` owns the collection, the draft form, the loading/submitting
//! flags and the single error slot. It never performs I/O. An operation that
//! needs the server returns an [`Outgoing`] request tagged with a [`Ticket`];
//! the host executes it and feeds the outcome to [`TodoApp::complete`].
//!
//! Each call runs to completion, so handlers never interleave. Several
//! requests may be in flight at once; responses are applied in whatever order
//! they arrive, and for the same id the last one to arrive wins.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::client::TodoClient;
use crate::error::{ApiError, AppError};
use crate::form::DraftForm;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};
use crate::view::ListView;

/// Correlates an issued request with its eventual completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

/// A request the host must execute, then report back with the same ticket.
#[derive(Debug, Clone)]
#[must_use]
pub struct Outgoing {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

#[derive(Debug)]
enum Pending {
    List,
    Create,
    Update,
    Toggle,
    Delete(TodoId),
}

/// Controller for a single user's todo list.
#[derive(Debug)]
pub struct TodoApp {
    client: TodoClient,
    todos: Vec<Todo>,
    form: DraftForm,
    loading: bool,
    submitting: bool,
    error: Option<AppError>,
    pending: HashMap<Ticket, Pending>,
    next_ticket: u64,
}

impl TodoApp {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            form: DraftForm::default(),
            loading: false,
            submitting: false,
            error: None,
            pending: HashMap::new(),
            next_ticket: 0,
        }
    }

    /// Stored order (as last received), not display order. See [`Self::view`].
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    pub fn view(&self) -> ListView<'_> {
        ListView::project(&self.todos, self.loading)
    }

    pub fn form(&self) -> &DraftForm {
        &self.form
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Number of requests issued but not yet completed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Fetch the whole collection. `None` while a fetch is already running.
    pub fn refresh(&mut self) -> Option<Outgoing> {
        if self.loading {
            debug!("refresh ignored: list already in flight");
            return None;
        }
        self.error = None;
        self.loading = true;
        Some(self.issue(Pending::List, self.client.build_list_todos()))
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.set_title(title);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.set_description(description);
    }

    /// Submit the draft: update when in edit mode, create otherwise.
    ///
    /// Returns `None` without touching the network when the title is blank
    /// (the error slot then holds `TitleRequired`) or while a previous submit
    /// is still outstanding.
    pub fn submit(&mut self) -> Option<Outgoing> {
        if self.submitting {
            debug!("submit ignored: previous submit still in flight");
            return None;
        }
        self.error = None;
        let (title, description) = match self.form.validated() {
            Ok(fields) => fields,
            Err(err) => {
                debug!("submit rejected: {err}");
                self.error = Some(err);
                return None;
            }
        };

        let built = match self.form.editing() {
            Some(id) => {
                let input = UpdateTodo {
                    title: Some(title),
                    description: Some(description),
                    completed: None,
                };
                self.client
                    .build_update_todo(id, &input)
                    .map(|req| (Pending::Update, req))
            }
            None => self
                .client
                .build_create_todo(&CreateTodo { title, description })
                .map(|req| (Pending::Create, req)),
        };

        match built {
            Ok((pending, request)) => {
                self.submitting = true;
                Some(self.issue(pending, request))
            }
            Err(err) => {
                self.fail(AppError::Save(err));
                None
            }
        }
    }

    /// Enter edit mode for `id`. Returns `false` if no such todo is held.
    pub fn edit(&mut self, id: &TodoId) -> bool {
        let Some(todo) = self.todos.iter().find(|t| &t.id == id) else {
            return false;
        };
        self.form.load(todo);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.form.clear();
    }

    /// Ask the server to flip `completed`. Local state changes only when the
    /// server answers.
    pub fn toggle(&mut self, id: &TodoId) -> Option<Outgoing> {
        let completed = match self.get(id) {
            Some(todo) => !todo.completed,
            None => {
                warn!(%id, "toggle ignored: unknown todo");
                return None;
            }
        };
        self.error = None;
        match self
            .client
            .build_update_todo(id, &UpdateTodo::completion(completed))
        {
            Ok(request) => Some(self.issue(Pending::Toggle, request)),
            Err(err) => {
                self.fail(AppError::Toggle(err));
                None
            }
        }
    }

    /// Delete `id` once `confirm` agrees. A declined confirmation changes
    /// nothing, including the error slot.
    pub fn delete<F>(&mut self, id: &TodoId, confirm: F) -> Option<Outgoing>
    where
        F: FnOnce(&Todo) -> bool,
    {
        let Some(todo) = self.get(id) else {
            warn!(%id, "delete ignored: unknown todo");
            return None;
        };
        if !confirm(todo) {
            debug!(%id, "delete declined");
            return None;
        }
        self.error = None;
        let request = self.client.build_delete_todo(id);
        Some(self.issue(Pending::Delete(id.clone()), request))
    }

    // -----------------------------------------------------------------------
    // Completions
    // -----------------------------------------------------------------------

    /// Apply the outcome of a request issued earlier. Transport faults are
    /// reported as `Err(ApiError::Transport(..))`.
    pub fn complete(&mut self, ticket: Ticket, result: Result<HttpResponse, ApiError>) {
        let Some(pending) = self.pending.remove(&ticket) else {
            warn!(?ticket, "completion for unknown ticket");
            return;
        };

        match pending {
            Pending::List => {
                self.loading = false;
                match result.and_then(|r| self.client.parse_list_todos(r)) {
                    Ok(todos) => {
                        info!(count = todos.len(), "loaded todos");
                        self.todos = todos;
                        self.error = None;
                    }
                    Err(err) => self.fail(AppError::Load(err)),
                }
            }
            Pending::Create => {
                self.submitting = false;
                match result.and_then(|r| self.client.parse_create_todo(r)) {
                    Ok(todo) => {
                        info!(id = %todo.id, "created todo");
                        self.todos.insert(0, todo);
                        self.form.clear();
                        self.error = None;
                    }
                    Err(err) => self.fail(AppError::Save(err)),
                }
            }
            Pending::Update => {
                self.submitting = false;
                match result.and_then(|r| self.client.parse_update_todo(r)) {
                    Ok(todo) => {
                        info!(id = %todo.id, "updated todo");
                        self.replace(todo);
                        self.form.clear();
                        self.error = None;
                    }
                    Err(err) => self.fail(AppError::Save(err)),
                }
            }
            Pending::Toggle => match result.and_then(|r| self.client.parse_update_todo(r)) {
                Ok(todo) => {
                    info!(id = %todo.id, completed = todo.completed, "toggled todo");
                    self.replace(todo);
                    self.error = None;
                }
                Err(err) => self.fail(AppError::Toggle(err)),
            },
            Pending::Delete(id) => match result.and_then(|r| self.client.parse_delete_todo(r)) {
                Ok(()) => {
                    info!(%id, "deleted todo");
                    self.todos.retain(|t| t.id != id);
                    self.error = None;
                }
                Err(err) => self.fail(AppError::Delete(err)),
            },
        }
    }

    fn issue(&mut self, pending: Pending, request: HttpRequest) -> Outgoing {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        debug!(?ticket, method = %request.method, path = %request.path, "issuing request");
        self.pending.insert(ticket, pending);
        Outgoing { ticket, request }
    }

    /// Overwrite the entry with the same id. A record that is no longer held
    /// locally (deleted meanwhile) is dropped.
    fn replace(&mut self, todo: Todo) {
        match self.todos.iter_mut().find(|t| t.id == todo.id) {
            Some(slot) => *slot = todo,
            None => debug!(id = %todo.id, "dropping update for todo no longer held"),
        }
    }

    fn fail(&mut self, err: AppError) {
        match err.cause() {
            Some(cause) => warn!(%cause, "{err}"),
            None => warn!("{err}"),
        }
        self.error = Some(err);
    }
}
