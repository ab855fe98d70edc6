use crate::app::{App, HrAction, MenuItem};
use crate::session::{Role, Session};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, handle_form_key, FormKey};

fn action_for(item: HrAction) -> Action {
    match item {
        HrAction::CreateCompany => Action::CreateCompany,
        HrAction::AddEmployee => Action::AddEmployee,
        HrAction::UploadEmployees => Action::UploadEmployees,
        HrAction::ListEmployees => Action::ListEmployees,
        HrAction::FetchAttendance => Action::FetchCompanyAttendance,
        HrAction::DownloadAttendance => Action::DownloadAttendance,
        HrAction::RegenerateQr => Action::RegenerateQr,
        HrAction::Logout => Action::HrLogout,
    }
}

pub(super) fn handle_hr_key(key: KeyEvent, app: &mut App, session: &Session, action_tx: &ActionTx) {
    if !session.is_logged_in(Role::Hr) {
        match handle_form_key(key, &mut app.hr.auth_form) {
            FormKey::Submit => enqueue_action(action_tx, Action::HrSubmitAuth),
            FormKey::Cancel => app.hr.auth_form = crate::app::hr::auth_form(),
            FormKey::Handled | FormKey::Ignored => {}
        }
        return;
    }

    if let Some(open) = app.hr.menu.open {
        let Some(form) = app.hr.form_mut(open) else {
            app.hr.menu.close();
            return;
        };
        match handle_form_key(key, form) {
            FormKey::Submit => enqueue_action(action_tx, action_for(open)),
            FormKey::Cancel => app.hr.menu.close(),
            FormKey::Handled | FormKey::Ignored => {}
        }
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.hr.menu.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.hr.menu.select_next(),
        KeyCode::PageDown => {
            if let Some(results) = app.hr.results.as_mut() {
                results.scroll_down(10);
            }
        }
        KeyCode::PageUp => {
            if let Some(results) = app.hr.results.as_mut() {
                results.scroll_up(10);
            }
        }
        KeyCode::Esc => app.hr.results = None,
        KeyCode::Enter => {
            let item = app.hr.menu.current();
            if item.has_form() {
                if let Some(form) = app.hr.form_mut(item) {
                    form.error = None;
                }
                app.hr.menu.open = Some(item);
            } else {
                enqueue_action(action_tx, action_for(item));
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::action_queue::channel;
    use crate::runtime::views::tests::{app, key};
    use attendance_api::domain::BearerToken;

    fn logged_in() -> Session {
        let mut session = Session::new();
        session.login(Role::Hr, BearerToken::new("hr"));
        session
    }

    #[test]
    fn enter_on_login_form_submits() {
        let mut app = app(None);
        let (tx, mut rx) = channel();
        handle_hr_key(key(KeyCode::Enter), &mut app, &Session::new(), &tx);
        assert_eq!(rx.try_recv().ok(), Some(Action::HrSubmitAuth));
    }

    #[test]
    fn form_actions_open_their_form_first() {
        let mut app = app(None);
        let session = logged_in();
        let (tx, mut rx) = channel();

        handle_hr_key(key(KeyCode::Enter), &mut app, &session, &tx);
        assert_eq!(app.hr.menu.open, Some(HrAction::CreateCompany));
        assert!(rx.try_recv().is_err());

        handle_hr_key(key(KeyCode::Enter), &mut app, &session, &tx);
        assert_eq!(rx.try_recv().ok(), Some(Action::CreateCompany));

        handle_hr_key(key(KeyCode::Esc), &mut app, &session, &tx);
        assert!(app.hr.menu.open.is_none());
    }

    #[test]
    fn direct_actions_are_enqueued() {
        let mut app = app(None);
        let session = logged_in();
        let (tx, mut rx) = channel();

        for _ in 0..3 {
            handle_hr_key(key(KeyCode::Down), &mut app, &session, &tx);
        }
        assert_eq!(app.hr.menu.current(), HrAction::ListEmployees);
        handle_hr_key(key(KeyCode::Enter), &mut app, &session, &tx);
        assert_eq!(rx.try_recv().ok(), Some(Action::ListEmployees));
    }
}
