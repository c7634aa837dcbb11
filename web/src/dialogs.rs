//! `window.alert` / `window.confirm`.

use todo_core::Dialogs;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn alert(&mut self, message: &str) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window, alert not shown: {message}");
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            log::warn!("alert failed: {e:?}");
        }
    }

    /// A dialog that cannot be shown counts as "no".
    fn confirm(&mut self, message: &str) -> bool {
        let Some(window) = web_sys::window() else {
            log::warn!("no window, confirm treated as no");
            return false;
        };
        window.confirm_with_message(message).unwrap_or_else(|e| {
            log::warn!("confirm failed, treated as no: {e:?}");
            false
        })
    }
}
