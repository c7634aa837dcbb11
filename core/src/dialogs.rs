//! Blocking user dialogs.
//!
//! The browser host maps these onto `window.alert` and `window.confirm`.

pub trait Dialogs {
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
}

/// Dialogs for headless hosts: records every alert and answers every
/// confirmation with a fixed reply.
#[derive(Debug, Clone, Default)]
pub struct RecordedDialogs {
    pub confirm_reply: bool,
    pub alerts: Vec<String>,
    pub confirmations: Vec<String>,
}

impl RecordedDialogs {
    pub fn confirming(confirm_reply: bool) -> Self {
        Self {
            confirm_reply,
            ..Self::default()
        }
    }
}

impl Dialogs for RecordedDialogs {
    fn alert(&mut self, message: &str) {
        log::debug!("alert: {message}");
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.confirm_reply
    }
}
