//! Per-row view model.
//!
//! A row is either displaying its title or being edited. `render_row` maps a
//! task and its mode to everything the host needs to draw the row, so hosts
//! never decide which controls are visible.

use crate::types::Task;

/// Ephemeral UI mode of a single task row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RowMode {
    #[default]
    Display,
    /// `draft` is the current content of the row's edit input.
    Editing { draft: String },
}

impl RowMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, RowMode::Editing { .. })
    }
}

/// Buttons a row can show, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Edit,
    Delete,
    Save,
    Cancel,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            RowAction::Edit => "Edit",
            RowAction::Delete => "Delete",
            RowAction::Save => "Save",
            RowAction::Cancel => "Cancel",
        }
    }
}

/// Everything needed to draw one row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowView {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    /// `Some` with the input's contents while editing; the label is hidden then.
    pub input: Option<String>,
    pub actions: [RowAction; 2],
}

impl RowView {
    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }

    pub fn shows_label(&self) -> bool {
        self.input.is_none()
    }
}

pub fn render_row(task: &Task, mode: &RowMode) -> RowView {
    let (input, actions) = match mode {
        RowMode::Display => (None, [RowAction::Edit, RowAction::Delete]),
        RowMode::Editing { draft } => (Some(draft.clone()), [RowAction::Save, RowAction::Cancel]),
    };
    RowView {
        id: task.id,
        title: task.title.clone(),
        completed: task.completed,
        input,
        actions,
    }
}

/// Which top-level panel is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    SignedOut,
    SignedIn,
}

/// Keys the edit input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Escape,
    Other,
}

impl EditKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Enter" => EditKey::Enter,
            "Escape" | "Esc" => EditKey::Escape,
            _ => EditKey::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Task {
        Task {
            id: 1,
            title: "buy milk".to_string(),
            completed: false,
        }
    }

    #[test]
    fn display_row_shows_label_with_edit_and_delete() {
        let view = render_row(&task(), &RowMode::Display);
        assert!(view.shows_label());
        assert_eq!(view.actions, [RowAction::Edit, RowAction::Delete]);
    }

    #[test]
    fn editing_row_shows_prefilled_input_with_save_and_cancel() {
        let mode = RowMode::Editing {
            draft: "buy oat milk".to_string(),
        };
        let view = render_row(&task(), &mode);
        assert!(!view.shows_label());
        assert_eq!(view.input.as_deref(), Some("buy oat milk"));
        assert_eq!(view.title, "buy milk");
        assert_eq!(view.actions, [RowAction::Save, RowAction::Cancel]);
    }

    #[test]
    fn key_names_map_to_shortcuts() {
        assert_eq!(EditKey::from_key_name("Enter"), EditKey::Enter);
        assert_eq!(EditKey::from_key_name("Escape"), EditKey::Escape);
        assert_eq!(EditKey::from_key_name("a"), EditKey::Other);
    }
}
