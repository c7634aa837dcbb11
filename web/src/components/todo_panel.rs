//! Todo Panel Component
//!
//! Signed-in view: greeting, logout, new-task input and the task list.

use leptos::prelude::*;

use crate::components::TaskRow;
use crate::context::AppContext;

#[component]
pub fn TodoPanel() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let username = move || ctx.app.with(|client| client.username().unwrap_or_default().to_string());
    let new_task = move || ctx.app.with(|client| client.new_task().to_string());

    view! {
        <section class="todo-section">
            <header class="todo-header">
                <span>"Welcome, " <strong>{username}</strong></span>
                <button type="button" on:click=move |_| ctx.update(|client| client.logout())>
                    "Logout"
                </button>
            </header>

            <div class="new-task-row">
                <input
                    type="text"
                    placeholder="New task..."
                    prop:value=new_task
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        ctx.update(move |client| client.set_new_task(text));
                    }
                />
                <button type="button" on:click=move |_| ctx.dispatch(|client| client.submit_new_task())>
                    "Add"
                </button>
            </div>

            <ul class="task-list">
                // Keyed on mode as well as content so typing in an edit input
                // does not rebuild the row.
                <For
                    each=move || ctx.app.with(|client| client.rows())
                    key=|row| (row.id, row.title.clone(), row.completed, row.is_editing())
                    children=move |row| view! { <TaskRow row=row /> }
                />
            </ul>
        </section>
    }
}
