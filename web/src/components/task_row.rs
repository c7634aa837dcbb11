//! Task Row Component
//!
//! Draws one `RowView`: a label or a focused edit input, plus its two buttons.

use leptos::html;
use leptos::prelude::*;
use todo_core::{EditKey, RowAction, RowView};

use crate::context::AppContext;

fn button_class(action: RowAction) -> &'static str {
    match action {
        RowAction::Edit => "edit-btn",
        RowAction::Delete => "delete-btn",
        RowAction::Save => "save-btn",
        RowAction::Cancel => "cancel-btn",
    }
}

fn item_class(completed: bool) -> &'static str {
    if completed {
        "task-item completed"
    } else {
        "task-item"
    }
}

#[component]
pub fn TaskRow(row: RowView) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let id = row.id;

    let content = match row.input.clone() {
        None => view! { <span class="task-title">{row.title.clone()}</span> }.into_any(),
        Some(draft) => {
            let input_ref = NodeRef::<html::Input>::new();
            Effect::new(move |_| {
                if let Some(input) = input_ref.get() {
                    let _ = input.focus();
                    input.select();
                }
            });

            view! {
                <input
                    type="text"
                    class="edit-input"
                    node_ref=input_ref
                    value=draft
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        ctx.update(move |client| client.set_draft(id, text));
                    }
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        let key = EditKey::from_key_name(&ev.key());
                        if key != EditKey::Other {
                            ev.prevent_default();
                            ctx.dispatch(move |client| client.handle_edit_key(id, key));
                        }
                    }
                />
            }
            .into_any()
        }
    };

    let actions = row
        .actions
        .into_iter()
        .map(|action| {
            view! {
                <button
                    type="button"
                    class=button_class(action)
                    on:click=move |_| ctx.dispatch(move |client| client.row_action(id, action))
                >
                    {action.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <li class=item_class(row.completed)>
            <div class="task-content">{content}</div>
            <div class="task-actions">{actions}</div>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::{render_row, RowMode, Task};

    fn task(completed: bool) -> Task {
        Task {
            id: 7,
            title: "water plants".to_string(),
            completed,
        }
    }

    #[test]
    fn display_row_buttons_get_edit_and_delete_classes() {
        let row = render_row(&task(false), &RowMode::Display);
        let classes: Vec<_> = row.actions.into_iter().map(button_class).collect();
        assert_eq!(classes, vec!["edit-btn", "delete-btn"]);
    }

    #[test]
    fn editing_row_buttons_get_save_and_cancel_classes() {
        let mode = RowMode::Editing {
            draft: "water cactus".to_string(),
        };
        let row = render_row(&task(false), &mode);
        let classes: Vec<_> = row.actions.into_iter().map(button_class).collect();
        assert_eq!(classes, vec!["save-btn", "cancel-btn"]);
    }

    #[test]
    fn completed_tasks_carry_the_completed_class() {
        assert_eq!(item_class(task(true).completed), "task-item completed");
        assert_eq!(item_class(task(false).completed), "task-item");
    }

    #[test]
    fn stylesheet_defines_the_row_classes() {
        let css = include_str!("../../style.css");
        assert!(css.contains(".task-item"));
        assert!(css.contains(".task-item.completed"));
        assert!(css.contains(&format!(".{}", button_class(RowAction::Delete))));
    }
}
