//! The todo client controller.
//!
//! # Design
//! `TodoApp` owns all client state (screen, session, task list, row modes)
//! and never performs I/O itself. Every operation that needs the network
//! returns an [`Outgoing`] request; the host executes it and passes the
//! result to [`TodoApp::complete`], which may hand back the next request.
//! Mutations are always followed by a full list reload, and that reload is
//! only produced once the mutating response has arrived.
//!
//! A 401 from any protected call ends the session: storage is cleared and
//! the signed-out screen is shown with [`SESSION_EXPIRED`].

use std::collections::HashMap;

use crate::client::TodoClient;
use crate::dialogs::Dialogs;
use crate::error::ApiError;
use crate::http::{HttpRequest, Outcome, Transport};
use crate::session::{Session, SessionStore};
use crate::types::{Credentials, Task, TaskInput};
use crate::view::{render_row, EditKey, RowAction, RowMode, RowView, Screen};

pub const INVALID_LOGIN: &str = "Invalid login!";
pub const REGISTERED: &str = "User registered! Please login.";
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub const EMPTY_TITLE: &str = "Task title cannot be empty!";
pub const UPDATE_FAILED: &str = "Error updating task";
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this task?";

/// Which operation a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Login,
    Register,
    LoadTasks,
    CreateTask,
    UpdateTask { id: i64 },
    DeleteTask { id: i64 },
}

impl Pending {
    /// Task calls only mean something to the session that sent them.
    pub fn needs_session(self) -> bool {
        !matches!(self, Pending::Login | Pending::Register)
    }
}

/// A request the controller wants executed.
#[derive(Debug, Clone)]
pub struct Outgoing {
    pub pending: Pending,
    pub request: HttpRequest,
}

pub struct TodoApp<S, D> {
    client: TodoClient,
    store: S,
    dialogs: D,
    screen: Screen,
    session: Option<Session>,
    auth_message: Option<String>,
    tasks: Vec<Task>,
    modes: HashMap<i64, RowMode>,
    new_task: String,
}

impl<S: SessionStore, D: Dialogs> TodoApp<S, D> {
    pub fn new(client: TodoClient, store: S, dialogs: D) -> Self {
        Self {
            client,
            store,
            dialogs,
            screen: Screen::SignedOut,
            session: None,
            auth_message: None,
            tasks: Vec::new(),
            modes: HashMap::new(),
            new_task: String::new(),
        }
    }

    // --- state accessors ---

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    pub fn auth_message(&self) -> Option<&str> {
        self.auth_message.as_deref()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn row_mode(&self, id: i64) -> RowMode {
        self.modes.get(&id).cloned().unwrap_or_default()
    }

    pub fn rows(&self) -> Vec<RowView> {
        self.tasks
            .iter()
            .map(|task| render_row(task, self.modes.get(&task.id).unwrap_or(&RowMode::Display)))
            .collect()
    }

    pub fn new_task(&self) -> &str {
        &self.new_task
    }

    pub fn set_new_task(&mut self, text: impl Into<String>) {
        self.new_task = text.into();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    // --- session ---

    pub fn login(&mut self, username: &str, password: &str) -> Option<Outgoing> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.client.build_login(&credentials) {
            Ok(request) => Some(Outgoing {
                pending: Pending::Login,
                request,
            }),
            Err(e) => {
                log::warn!("could not build login request: {e}");
                self.auth_message = Some(INVALID_LOGIN.to_string());
                None
            }
        }
    }

    pub fn register(&mut self, username: &str, password: &str) -> Option<Outgoing> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.client.build_register(&credentials) {
            Ok(request) => Some(Outgoing {
                pending: Pending::Register,
                request,
            }),
            Err(e) => {
                self.auth_message = Some(e.to_string());
                None
            }
        }
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear_session() {
            log::warn!("failed to clear session storage: {e}");
        }
        if let Some(session) = self.session.take() {
            log::info!("signed out {}", session.username);
        }
        self.screen = Screen::SignedOut;
        self.auth_message = None;
        self.tasks.clear();
        self.modes.clear();
        self.new_task.clear();
    }

    /// Enters the signed-in screen straight away when storage still holds a
    /// session. The token is not checked until the first protected call.
    pub fn restore_session(&mut self) -> Option<Outgoing> {
        let session = self.store.load_session()?;
        log::info!("restored session for {}", session.username);
        self.session = Some(session);
        self.screen = Screen::SignedIn;
        Some(self.load_tasks())
    }

    // --- tasks ---

    pub fn load_tasks(&self) -> Outgoing {
        Outgoing {
            pending: Pending::LoadTasks,
            request: self.client.build_list_tasks(self.token()),
        }
    }

    pub fn add_task(&mut self, title: &str) -> Option<Outgoing> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let input = TaskInput {
            title: title.to_string(),
        };
        match self.client.build_create_task(&input, self.token()) {
            Ok(request) => Some(Outgoing {
                pending: Pending::CreateTask,
                request,
            }),
            Err(e) => {
                log::warn!("could not build create request: {e}");
                None
            }
        }
    }

    /// Adds whatever is currently in the new-task input.
    pub fn submit_new_task(&mut self) -> Option<Outgoing> {
        let title = self.new_task.clone();
        self.add_task(&title)
    }

    pub fn edit_task(&mut self, id: i64) {
        if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
            let draft = task.title.clone();
            self.modes.insert(id, RowMode::Editing { draft });
        }
    }

    pub fn set_draft(&mut self, id: i64, text: impl Into<String>) {
        if let Some(RowMode::Editing { draft }) = self.modes.get_mut(&id) {
            *draft = text.into();
        }
    }

    pub fn cancel_edit(&mut self, id: i64) {
        self.modes.remove(&id);
    }

    /// Rejects blank titles with an alert and leaves the row in editing mode.
    pub fn save_task(&mut self, id: i64, new_title: &str) -> Option<Outgoing> {
        let title = new_title.trim();
        if title.is_empty() {
            self.dialogs.alert(EMPTY_TITLE);
            return None;
        }
        let input = TaskInput {
            title: title.to_string(),
        };
        match self.client.build_update_task(id, &input, self.token()) {
            Ok(request) => Some(Outgoing {
                pending: Pending::UpdateTask { id },
                request,
            }),
            Err(e) => {
                log::warn!("could not build update request: {e}");
                self.dialogs.alert(UPDATE_FAILED);
                None
            }
        }
    }

    /// Saves the row's current draft. Does nothing unless the row is editing.
    pub fn save_draft(&mut self, id: i64) -> Option<Outgoing> {
        let draft = match self.modes.get(&id) {
            Some(RowMode::Editing { draft }) => draft.clone(),
            _ => return None,
        };
        self.save_task(id, &draft)
    }

    pub fn delete_task(&mut self, id: i64) -> Option<Outgoing> {
        if !self.dialogs.confirm(CONFIRM_DELETE) {
            return None;
        }
        Some(Outgoing {
            pending: Pending::DeleteTask { id },
            request: self.client.build_delete_task(id, self.token()),
        })
    }

    /// Runs the operation behind one of a row's buttons.
    pub fn row_action(&mut self, id: i64, action: RowAction) -> Option<Outgoing> {
        match action {
            RowAction::Edit => {
                self.edit_task(id);
                None
            }
            RowAction::Cancel => {
                self.cancel_edit(id);
                None
            }
            RowAction::Save => self.save_draft(id),
            RowAction::Delete => self.delete_task(id),
        }
    }

    /// Enter saves and Escape cancels; only meaningful inside an edit input.
    pub fn handle_edit_key(&mut self, id: i64, key: EditKey) -> Option<Outgoing> {
        match key {
            EditKey::Enter => self.save_draft(id),
            EditKey::Escape => {
                self.cancel_edit(id);
                None
            }
            EditKey::Other => None,
        }
    }

    // --- responses ---

    pub fn complete(&mut self, pending: Pending, outcome: Outcome) -> Option<Outgoing> {
        if pending.needs_session() && self.session.is_none() {
            log::debug!("dropping {pending:?} response that arrived after sign-out");
            return None;
        }
        match pending {
            Pending::Login => self.finish_login(outcome),
            Pending::Register => {
                self.finish_register(outcome);
                None
            }
            Pending::LoadTasks => {
                self.finish_load(outcome);
                None
            }
            Pending::CreateTask => {
                let result = outcome.and_then(|r| self.client.parse_create_task(r));
                if self.expired(&result) {
                    return None;
                }
                if let Err(e) = result {
                    log::warn!("create failed: {e}");
                }
                self.new_task.clear();
                Some(self.load_tasks())
            }
            Pending::UpdateTask { id } => {
                let result = outcome.and_then(|r| self.client.parse_update_task(r));
                if self.expired(&result) {
                    return None;
                }
                match result {
                    Ok(_) => Some(self.load_tasks()),
                    Err(e) => {
                        log::warn!("update of task {id} failed: {e}");
                        self.dialogs.alert(UPDATE_FAILED);
                        None
                    }
                }
            }
            Pending::DeleteTask { id } => {
                let result = outcome.and_then(|r| self.client.parse_delete_task(r));
                if self.expired(&result) {
                    return None;
                }
                if let Err(e) = result {
                    log::warn!("delete of task {id} failed: {e}");
                }
                Some(self.load_tasks())
            }
        }
    }

    /// Executes `first` and every follow-up request in order.
    pub fn run<T: Transport>(&mut self, first: Option<Outgoing>, transport: &mut T) {
        let mut next = first;
        while let Some(outgoing) = next {
            log::debug!("{} {}", outgoing.request.method.as_str(), outgoing.request.path);
            let outcome = transport.execute(&outgoing.request);
            next = self.complete(outgoing.pending, outcome);
        }
    }

    fn finish_login(&mut self, outcome: Outcome) -> Option<Outgoing> {
        let auth = match outcome.and_then(|r| self.client.parse_login(r)) {
            Ok(auth) => auth,
            Err(e) => {
                log::warn!("login failed: {e}");
                self.auth_message = Some(INVALID_LOGIN.to_string());
                return None;
            }
        };
        let session = Session {
            token: auth.token,
            username: auth.username,
        };
        if let Err(e) = self.store.save_session(&session) {
            log::warn!("could not persist session: {e}");
            self.auth_message = Some(e.to_string());
            return None;
        }
        log::info!("signed in as {}", session.username);
        self.session = Some(session);
        self.screen = Screen::SignedIn;
        self.auth_message = None;
        Some(self.load_tasks())
    }

    fn finish_register(&mut self, outcome: Outcome) {
        let message = match outcome.and_then(|r| self.client.parse_register(r)) {
            Ok(_) => REGISTERED.to_string(),
            Err(e) => e.server_text(),
        };
        self.auth_message = Some(message);
    }

    fn finish_load(&mut self, outcome: Outcome) {
        let result = outcome.and_then(|r| self.client.parse_list_tasks(r));
        if self.expired(&result) {
            return;
        }
        self.modes.clear();
        match result {
            Ok(tasks) => {
                log::debug!("loaded {} tasks", tasks.len());
                self.tasks = tasks;
            }
            Err(e) => {
                log::warn!("task list unavailable: {e}");
                self.tasks.clear();
            }
        }
    }

    /// Signs out on a 401 and reports whether it did.
    fn expired<T>(&mut self, result: &Result<T, ApiError>) -> bool {
        if !matches!(result, Err(ApiError::Unauthorized)) {
            return false;
        }
        log::warn!("token rejected, signing out");
        self.logout();
        self.auth_message = Some(SESSION_EXPIRED.to_string());
        true
    }
}
