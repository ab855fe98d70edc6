use crate::app::{App, Form, View};
use crate::session::Session;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod employee;
mod hr;
mod qr;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

/// Outcome of routing a key into an open form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FormKey {
    Submit,
    Cancel,
    Handled,
    Ignored,
}

pub(super) fn handle_form_key(key: KeyEvent, form: &mut Form) -> FormKey {
    match key.code {
        KeyCode::Enter => return FormKey::Submit,
        KeyCode::Esc => return FormKey::Cancel,
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.previous_field(),
        KeyCode::Left => form.move_cursor(true),
        KeyCode::Right => form.move_cursor(false),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.input_char(c)
        }
        _ => return FormKey::Ignored,
    }
    FormKey::Handled
}

fn switch_view(app: &mut App, view: View, action_tx: &ActionTx) {
    if app.current_view != view {
        app.clear_status();
    }
    if app.navigate_to(view) {
        enqueue_action(action_tx, Action::StopQrPolling);
    }
}

pub(super) fn handle_key(key: KeyEvent, app: &mut App, session: &Session, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::F(1) => return switch_view(app, View::Hr, action_tx),
        KeyCode::F(2) => return switch_view(app, View::Employee, action_tx),
        KeyCode::F(3) => return switch_view(app, View::QrDisplay, action_tx),
        _ => {}
    }

    // Single-key shortcuts only apply while no text field is being edited.
    if !app.captures_text(session) {
        let current = app.current_view;
        match key.code {
            KeyCode::Tab => return switch_view(app, current.next(), action_tx),
            KeyCode::BackTab => return switch_view(app, current.previous(), action_tx),
            KeyCode::Char('q') | KeyCode::Char('Q') => return app.quit(),
            _ => {}
        }
    }

    match app.current_view {
        View::Hr => hr::handle_hr_key(key, app, session, action_tx),
        View::Employee => employee::handle_employee_key(key, app, session, action_tx),
        View::QrDisplay => qr::handle_qr_key(key, app, action_tx),
    }
}
