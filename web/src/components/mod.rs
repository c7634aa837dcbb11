//! UI Components

mod auth_panel;
mod task_row;
mod todo_panel;

pub use auth_panel::AuthPanel;
pub use task_row::TaskRow;
pub use todo_panel::TodoPanel;
