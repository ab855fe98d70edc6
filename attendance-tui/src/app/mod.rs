use crate::poller::PollEvent;
use crate::session::{Role, Session};
use std::path::PathBuf;

pub mod employee;
pub mod hr;
mod qr;
mod state;

pub use employee::{EmployeeAction, EmployeeState};
pub use hr::{HrAction, HrState};
pub use qr::QrState;
pub use state::{
    FieldKind, Form, FormField, Menu, MenuItem, StatusLevel, StatusMessage, TextInput, View,
};

use attendance_api::RecordTable;

/// A table of backend results shown under the active form.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPanel {
    pub title: String,
    pub table: RecordTable,
    pub scroll: usize,
}

impl ResultsPanel {
    pub fn new(title: impl Into<String>, table: RecordTable) -> Self {
        Self {
            title: title.into(),
            table,
            scroll: 0,
        }
    }

    pub fn scroll_down(&mut self, rows: usize) {
        let max = self.table.len().saturating_sub(1);
        self.scroll = (self.scroll + rows).min(max);
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_sub(rows);
    }
}

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub status_message: Option<StatusMessage>,

    // Loading indicator, shown while an action awaits the backend
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    pub hr: HrState,
    pub employee: EmployeeState,
    pub qr: QrState,

    pub export_dir: PathBuf,
    pub qr_refresh_secs: u64,
}

impl App {
    pub fn new(
        start_view: View,
        scan_token: Option<String>,
        export_dir: PathBuf,
        qr_refresh_secs: u64,
    ) -> Self {
        Self {
            running: true,
            current_view: start_view,
            status_message: None,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            hr: HrState::new(),
            employee: EmployeeState::new(scan_token),
            qr: QrState::default(),
            export_dir,
            qr_refresh_secs,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        let text = text.into();
        match level {
            StatusLevel::Error => tracing::warn!(status = %text, "error shown to user"),
            _ => tracing::debug!(status = %text, "status updated"),
        }
        self.status_message = Some(StatusMessage { level, text });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Whether the active view is routing printable keys into a text field.
    /// Global single-key shortcuts are disabled while it is.
    pub fn captures_text(&self, session: &Session) -> bool {
        match self.current_view {
            View::Hr => !session.is_logged_in(Role::Hr) || self.hr.menu.is_form_open(),
            View::Employee => {
                !self.employee.is_halted()
                    && (!session.is_logged_in(Role::Employee) || self.employee.menu.is_form_open())
            }
            View::QrDisplay => false,
        }
    }

    /// Returns true when the QR poller must be stopped because the QR view
    /// is being left.
    pub fn navigate_to(&mut self, view: View) -> bool {
        let leaving_qr = self.current_view == View::QrDisplay && view != View::QrDisplay;
        self.current_view = view;
        leaving_qr && self.qr.polling.is_some()
    }

    /// Apply an event from the background poller. Events for a company the
    /// view is no longer polling are stale and dropped.
    pub fn apply_poll_event(&mut self, event: PollEvent) {
        if self.qr.polling != Some(event.company_id()) {
            return;
        }
        match event {
            PollEvent::Frame(frame) => {
                self.qr.frame = Some(frame);
                self.qr.warning = None;
            }
            PollEvent::Warning { message, .. } => {
                self.qr.warning = Some(message);
            }
        }
    }
}
