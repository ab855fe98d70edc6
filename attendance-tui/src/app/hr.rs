use attendance_api::domain::{format_date, DEFAULT_RADIUS_M};

use super::{Form, FormField, Menu, MenuItem, ResultsPanel};
use crate::time_utils::local_today;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HrAction {
    CreateCompany,
    AddEmployee,
    UploadEmployees,
    ListEmployees,
    FetchAttendance,
    DownloadAttendance,
    RegenerateQr,
    Logout,
}

impl MenuItem for HrAction {
    const ALL: &'static [Self] = &[
        HrAction::CreateCompany,
        HrAction::AddEmployee,
        HrAction::UploadEmployees,
        HrAction::ListEmployees,
        HrAction::FetchAttendance,
        HrAction::DownloadAttendance,
        HrAction::RegenerateQr,
        HrAction::Logout,
    ];

    fn label(self) -> &'static str {
        match self {
            HrAction::CreateCompany => "Create Company",
            HrAction::AddEmployee => "Add Employee",
            HrAction::UploadEmployees => "Upload Employees (Excel)",
            HrAction::ListEmployees => "Load Employee List",
            HrAction::FetchAttendance => "Company Attendance",
            HrAction::DownloadAttendance => "Download Attendance (Excel)",
            HrAction::RegenerateQr => "Regenerate QR",
            HrAction::Logout => "Logout HR",
        }
    }

    fn has_form(self) -> bool {
        matches!(
            self,
            HrAction::CreateCompany
                | HrAction::AddEmployee
                | HrAction::UploadEmployees
                | HrAction::FetchAttendance
                | HrAction::DownloadAttendance
        )
    }
}

// Field positions, shared by the key handlers, actions and renderer.
pub const AUTH_NAME: usize = 0;
pub const AUTH_PASSWORD: usize = 1;
pub const AUTH_REGISTER: usize = 2;

pub const COMPANY_NAME: usize = 0;
pub const COMPANY_LATITUDE: usize = 1;
pub const COMPANY_LONGITUDE: usize = 2;
pub const COMPANY_RADIUS: usize = 3;

pub const EMPLOYEE_NAME: usize = 0;
pub const EMPLOYEE_EMAIL: usize = 1;
pub const EMPLOYEE_PASSWORD: usize = 2;
pub const EMPLOYEE_ACTIVE: usize = 3;

pub const UPLOAD_PATH: usize = 0;

pub const RANGE_START: usize = 0;
pub const RANGE_END: usize = 1;

pub fn auth_form() -> Form {
    Form::new(vec![
        FormField::text("HR Name"),
        FormField::secret("Password"),
        FormField::toggle("Register new account", false),
    ])
}

pub fn company_form() -> Form {
    Form::new(vec![
        FormField::text("Company Name"),
        FormField::text("Latitude"),
        FormField::text("Longitude"),
        FormField::text("Radius (meters)").with_value(&DEFAULT_RADIUS_M.to_string()),
    ])
}

pub fn employee_form() -> Form {
    Form::new(vec![
        FormField::text("Employee Name"),
        FormField::text("Employee Email"),
        FormField::secret("Employee Password"),
        FormField::toggle("Active", true),
    ])
}

pub fn upload_form() -> Form {
    Form::new(vec![FormField::text("Excel file (.xlsx)")])
}

/// Start/end date pair, both defaulting to today.
pub fn range_form() -> Form {
    let today = format_date(local_today());
    Form::new(vec![
        FormField::text("Start Date").with_value(&today),
        FormField::text("End Date").with_value(&today),
    ])
}

#[derive(Debug, Clone)]
pub struct HrState {
    pub auth_form: Form,
    pub menu: Menu<HrAction>,
    pub company_form: Form,
    pub employee_form: Form,
    pub upload_form: Form,
    pub attendance_form: Form,
    pub export_form: Form,
    pub results: Option<ResultsPanel>,
}

impl HrState {
    pub fn new() -> Self {
        Self {
            auth_form: auth_form(),
            menu: Menu::default(),
            company_form: company_form(),
            employee_form: employee_form(),
            upload_form: upload_form(),
            attendance_form: range_form(),
            export_form: range_form(),
            results: None,
        }
    }

    pub fn form(&self, action: HrAction) -> Option<&Form> {
        match action {
            HrAction::CreateCompany => Some(&self.company_form),
            HrAction::AddEmployee => Some(&self.employee_form),
            HrAction::UploadEmployees => Some(&self.upload_form),
            HrAction::FetchAttendance => Some(&self.attendance_form),
            HrAction::DownloadAttendance => Some(&self.export_form),
            HrAction::ListEmployees | HrAction::RegenerateQr | HrAction::Logout => None,
        }
    }

    pub fn form_mut(&mut self, action: HrAction) -> Option<&mut Form> {
        match action {
            HrAction::CreateCompany => Some(&mut self.company_form),
            HrAction::AddEmployee => Some(&mut self.employee_form),
            HrAction::UploadEmployees => Some(&mut self.upload_form),
            HrAction::FetchAttendance => Some(&mut self.attendance_form),
            HrAction::DownloadAttendance => Some(&mut self.export_form),
            HrAction::ListEmployees | HrAction::RegenerateQr | HrAction::Logout => None,
        }
    }

    /// Drop everything tied to the logged-in account.
    pub fn reset_after_logout(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_form_action_has_a_form() {
        let state = HrState::new();
        for action in HrAction::ALL {
            assert_eq!(state.form(*action).is_some(), action.has_form(), "{:?}", action);
        }
    }

    #[test]
    fn company_radius_defaults_to_500() {
        assert_eq!(company_form().value(COMPANY_RADIUS), "500");
    }

    #[test]
    fn new_employees_default_to_active() {
        assert!(employee_form().checked(EMPLOYEE_ACTIVE));
    }
}
