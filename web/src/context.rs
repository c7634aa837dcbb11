//! Application Context
//!
//! The controller lives in one signal shared through the Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::{Outgoing, TodoApp};

use crate::dialogs::BrowserDialogs;
use crate::fetch;
use crate::storage::LocalStorage;

pub type Client = TodoApp<LocalStorage, BrowserDialogs>;

#[derive(Clone, Copy)]
pub struct AppContext {
    pub app: RwSignal<Client>,
}

impl AppContext {
    pub fn new(client: Client) -> Self {
        Self {
            app: RwSignal::new(client),
        }
    }

    /// Runs a controller operation and, if it wants the network, executes
    /// its request chain in the background.
    pub fn dispatch(&self, op: impl FnOnce(&mut Client) -> Option<Outgoing>) {
        if let Some(first) = self.app.try_update(op).flatten() {
            spawn_local(drive(self.app, first));
        }
    }

    /// A controller operation that never touches the network.
    pub fn update(&self, op: impl FnOnce(&mut Client)) {
        self.app.update(op);
    }
}

/// Each response is handed back before its follow-up request is sent.
async fn drive(app: RwSignal<Client>, first: Outgoing) {
    let mut next = Some(first);
    while let Some(outgoing) = next {
        log::debug!("{} {}", outgoing.request.method.as_str(), outgoing.request.path);
        let outcome = fetch::execute(&outgoing.request).await;
        next = app
            .try_update(|client| client.complete(outgoing.pending, outcome))
            .flatten();
    }
}
