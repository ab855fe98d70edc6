use crate::app::{App, EmployeeAction, MenuItem};
use crate::session::{Role, Session};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, handle_form_key, FormKey};

fn action_for(item: EmployeeAction) -> Action {
    match item {
        EmployeeAction::ShareLocation => Action::ShareLocation,
        EmployeeAction::CheckIn => Action::CheckIn,
        EmployeeAction::CheckOut => Action::CheckOut,
        EmployeeAction::MyAttendance => Action::FetchMyAttendance,
        EmployeeAction::Logout => Action::EmployeeLogout,
    }
}

pub(super) fn handle_employee_key(
    key: KeyEvent,
    app: &mut App,
    session: &Session,
    action_tx: &ActionTx,
) {
    // Without a scan token the view only shows its error.
    if app.employee.is_halted() {
        return;
    }

    if !session.is_logged_in(Role::Employee) {
        match handle_form_key(key, &mut app.employee.login_form) {
            FormKey::Submit => enqueue_action(action_tx, Action::EmployeeLogin),
            FormKey::Cancel => app.employee.login_form = crate::app::employee::login_form(),
            FormKey::Handled | FormKey::Ignored => {}
        }
        return;
    }

    if let Some(open) = app.employee.menu.open {
        let Some(form) = app.employee.form_mut(open) else {
            app.employee.menu.close();
            return;
        };
        match handle_form_key(key, form) {
            FormKey::Submit => enqueue_action(action_tx, action_for(open)),
            FormKey::Cancel => app.employee.menu.close(),
            FormKey::Handled | FormKey::Ignored => {}
        }
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.employee.menu.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.employee.menu.select_next(),
        KeyCode::PageDown => {
            if let Some(results) = app.employee.results.as_mut() {
                results.scroll_down(10);
            }
        }
        KeyCode::PageUp => {
            if let Some(results) = app.employee.results.as_mut() {
                results.scroll_up(10);
            }
        }
        KeyCode::Esc => app.employee.results = None,
        KeyCode::Enter => {
            let item = app.employee.menu.current();
            if item.has_form() {
                if let Some(form) = app.employee.form_mut(item) {
                    form.error = None;
                }
                app.employee.menu.open = Some(item);
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
    use crate::app::View;
    use crate::runtime::action_queue::channel;
    use crate::runtime::views::tests::{app, key};
    use attendance_api::domain::BearerToken;

    #[test]
    fn halted_view_ignores_input() {
        let mut app = app(None);
        app.current_view = View::Employee;
        let (tx, mut rx) = channel();

        handle_employee_key(key(KeyCode::Char('a')), &mut app, &Session::new(), &tx);
        handle_employee_key(key(KeyCode::Enter), &mut app, &Session::new(), &tx);

        assert_eq!(app.employee.login_form.value(0), "");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn check_in_is_enqueued_from_menu() {
        let mut app = app(Some("qr"));
        let mut session = Session::new();
        session.login(Role::Employee, BearerToken::new("emp"));
        let (tx, mut rx) = channel();

        handle_employee_key(key(KeyCode::Down), &mut app, &session, &tx);
        handle_employee_key(key(KeyCode::Enter), &mut app, &session, &tx);

        assert_eq!(rx.try_recv().ok(), Some(Action::CheckIn));
    }
}
