//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! current screen, dialogs, prompts, and visual state.

use std::time::Instant;

use super::types::{Alert, ConfirmAction, VimCommandState};
use crate::services::OverwriteReply;
use crate::Screen;

#[derive(Clone, Debug)]
pub struct UiModel {
    // ============================================
    // PREFERENCES
    // ============================================
    pub screen: Screen,

    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    /// Vim command state (for 'gg' double-key)
    pub vim_command_state: VimCommandState,

    // ============================================
    // DIALOGS & POPUPS
    // ============================================
    /// Blocking alert, drawn above everything else
    pub alert: Option<Alert>,

    pub confirm: Option<ConfirmAction>,

    /// Upload worker waiting on the overwrite question in `confirm`
    pub pending_overwrite: Option<OverwriteReply>,

    /// Question pushed aside by an overwrite question; shown again once it is answered
    pub deferred_confirm: Option<ConfirmAction>,

    /// Upload prompt text (paths or glob patterns) while the prompt is open
    pub upload_prompt: Option<String>,

    /// An upload batch is running on the worker
    pub uploading: bool,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            screen: Screen::default(),
            vim_mode,
            vim_command_state: VimCommandState::None,
            alert: None,
            confirm: None,
            pending_overwrite: None,
            deferred_confirm: None,
            upload_prompt: None,
            uploading: false,
            toast_message: None,
            should_quit: false,
        }
    }

    /// Check if any modal dialog is currently showing
    pub fn has_modal(&self) -> bool {
        self.alert.is_some() || self.confirm.is_some() || self.upload_prompt.is_some()
    }

    pub fn show_alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.alert = Some(Alert::new(title, message));
    }

    /// Close the innermost overlay. Returns false if nothing was open.
    ///
    /// Closing an overwrite question answers it with "no".
    pub fn close_top_modal(&mut self) -> bool {
        if self.alert.take().is_some() {
            return true;
        }
        if self.confirm.is_some() {
            self.answer_confirm(false);
            return true;
        }
        self.upload_prompt.take().is_some()
    }

    /// Close the confirm dialog, returning what was asked.
    ///
    /// An upload waiting on an overwrite question receives `yes`, and any
    /// question it pushed aside comes back.
    pub fn answer_confirm(&mut self, yes: bool) -> Option<ConfirmAction> {
        let action = self.confirm.take()?;
        if let ConfirmAction::OverwriteUpload { .. } = action {
            if let Some(reply) = self.pending_overwrite.take() {
                reply.send(yes);
            }
            self.confirm = self.deferred_confirm.take();
        }
        Some(action)
    }

    /// Put an overwrite question in front of whatever is being asked
    pub fn ask_overwrite(&mut self, filename: String, reply: OverwriteReply) {
        // A question left unanswered would block the worker forever
        if let Some(previous) = self.pending_overwrite.replace(reply) {
            previous.send(false);
        }
        match self.confirm.take() {
            Some(ConfirmAction::OverwriteUpload { .. }) | None => {}
            Some(other) => self.deferred_confirm = Some(other),
        }
        self.confirm = Some(ConfirmAction::OverwriteUpload { filename });
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        if let Some((_, timestamp)) = &self.toast_message {
            crate::logic::ui::should_dismiss_toast(timestamp.elapsed().as_millis())
        } else {
            false
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}
