use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_qr_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => app.qr.input_digit(c),
        KeyCode::Backspace => app.qr.company_input.backspace(),
        KeyCode::Enter => match app.qr.parse_company_id() {
            Some(company_id) => {
                enqueue_action(action_tx, Action::StartQrPolling { company_id })
            }
            None => app.set_status(
                crate::app::StatusLevel::Warning,
                "Enter a company ID (1 or higher).",
            ),
        },
        KeyCode::Esc => {
            if app.qr.polling.is_some() {
                enqueue_action(action_tx, Action::StopQrPolling);
            }
        }
        _ => {}
    }
}
