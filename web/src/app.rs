//! Todo Frontend App
//!
//! Shows the auth panel or the task panel depending on the session.

use leptos::prelude::*;
use todo_core::{ClientConfig, Screen, TodoApp};

use crate::components::{AuthPanel, TodoPanel};
use crate::context::AppContext;
use crate::dialogs::BrowserDialogs;
use crate::storage::LocalStorage;

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_override(option_env!("TODO_API_BASE"));
    let ctx = AppContext::new(TodoApp::new(config.client(), LocalStorage, BrowserDialogs));
    provide_context(ctx);

    ctx.dispatch(|client| client.restore_session());

    let signed_in = move || ctx.app.with(|client| client.screen() == Screen::SignedIn);

    view! {
        <main class="app">
            <h1>"Todo"</h1>
            <Show when=signed_in fallback=|| view! { <AuthPanel /> }>
                <TodoPanel />
            </Show>
        </main>
    }
}
