//! Sans-IO client core for the authenticated todo list.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `TodoApp` layers the whole
//! client on top: session handling, the task list, and per-row edit modes.
//! Hosts execute the requests it hands out and render what it exposes.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only the API base URL.
//! - Each call is split into `build_*` and `parse_*` so the I/O boundary is
//!   explicit.
//! - Storage and dialogs are traits (`SessionStore`, `Dialogs`) so the
//!   browser and the tests plug in their own.
//! - Rows are rendered by a pure function of `(Task, RowMode)`.

pub mod app;
pub mod client;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod http;
pub mod session;
pub mod types;
pub mod view;

pub use app::{Outgoing, Pending, TodoApp};
pub use client::TodoClient;
pub use config::ClientConfig;
pub use dialogs::{Dialogs, RecordedDialogs};
pub use error::{ApiError, StorageError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Outcome, Transport};
pub use session::{MemoryStore, Session, SessionStore};
pub use types::{AuthResponse, Credentials, Task, TaskInput};
pub use view::{render_row, EditKey, RowAction, RowMode, RowView, Screen};
