use super::hr::range_form;
use super::{Form, FormField, Menu, MenuItem, ResultsPanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeAction {
    ShareLocation,
    CheckIn,
    CheckOut,
    MyAttendance,
    Logout,
}

impl MenuItem for EmployeeAction {
    const ALL: &'static [Self] = &[
        EmployeeAction::ShareLocation,
        EmployeeAction::CheckIn,
        EmployeeAction::CheckOut,
        EmployeeAction::MyAttendance,
        EmployeeAction::Logout,
    ];

    fn label(self) -> &'static str {
        match self {
            EmployeeAction::ShareLocation => "Share Location",
            EmployeeAction::CheckIn => "Check In",
            EmployeeAction::CheckOut => "Check Out",
            EmployeeAction::MyAttendance => "View My Attendance",
            EmployeeAction::Logout => "Logout Employee",
        }
    }

    fn has_form(self) -> bool {
        matches!(
            self,
            EmployeeAction::ShareLocation | EmployeeAction::MyAttendance
        )
    }
}

pub const LOGIN_EMAIL: usize = 0;
pub const LOGIN_PASSWORD: usize = 1;

pub const LOCATION: usize = 0;

pub fn login_form() -> Form {
    Form::new(vec![FormField::text("Email"), FormField::secret("Password")])
}

pub fn location_form() -> Form {
    Form::new(vec![FormField::text("Location (lat,lon)")])
}

#[derive(Debug, Clone)]
pub struct EmployeeState {
    /// Identity from the scanned QR link. Without it the view is halted.
    pub scan_token: Option<String>,
    pub login_form: Form,
    pub menu: Menu<EmployeeAction>,
    pub location_form: Form,
    pub attendance_form: Form,
    pub results: Option<ResultsPanel>,
}

impl EmployeeState {
    pub fn new(scan_token: Option<String>) -> Self {
        Self {
            scan_token,
            login_form: login_form(),
            menu: Menu::default(),
            location_form: location_form(),
            attendance_form: range_form(),
            results: None,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.scan_token.is_none()
    }

    pub fn form(&self, action: EmployeeAction) -> Option<&Form> {
        match action {
            EmployeeAction::ShareLocation => Some(&self.location_form),
            EmployeeAction::MyAttendance => Some(&self.attendance_form),
            EmployeeAction::CheckIn | EmployeeAction::CheckOut | EmployeeAction::Logout => None,
        }
    }

    pub fn form_mut(&mut self, action: EmployeeAction) -> Option<&mut Form> {
        match action {
            EmployeeAction::ShareLocation => Some(&mut self.location_form),
            EmployeeAction::MyAttendance => Some(&mut self.attendance_form),
            EmployeeAction::CheckIn | EmployeeAction::CheckOut | EmployeeAction::Logout => None,
        }
    }

    pub fn reset_after_logout(&mut self) {
        *self = Self::new(self.scan_token.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_scan_token_halts_view() {
        assert!(EmployeeState::new(None).is_halted());
        assert!(!EmployeeState::new(Some("qr".to_string())).is_halted());
    }

    #[test]
    fn logout_keeps_scan_token() {
        let mut state = EmployeeState::new(Some("qr".to_string()));
        state.menu.open = Some(EmployeeAction::MyAttendance);
        state.reset_after_logout();
        assert_eq!(state.scan_token.as_deref(), Some("qr"));
        assert!(state.menu.open.is_none());
    }

    #[test]
    fn every_form_action_has_a_form() {
        let state = EmployeeState::new(None);
        for action in EmployeeAction::ALL {
            assert_eq!(state.form(*action).is_some(), action.has_form());
        }
    }
}
