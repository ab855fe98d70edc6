use attendance_api::domain::{
    parse_date, DateRange, EmployeeUpload, GeoLocation, NewCompany, NewEmployee,
};
use attendance_api::{ApiError, RecordTable};
use serde_json::Value;
use std::path::Path;

use crate::app::employee::{LOCATION, LOGIN_EMAIL, LOGIN_PASSWORD};
use crate::app::hr::{
    AUTH_NAME, AUTH_PASSWORD, AUTH_REGISTER, COMPANY_LATITUDE, COMPANY_LONGITUDE, COMPANY_NAME,
    COMPANY_RADIUS, EMPLOYEE_ACTIVE, EMPLOYEE_EMAIL, EMPLOYEE_NAME, EMPLOYEE_PASSWORD,
    RANGE_END, RANGE_START, UPLOAD_PATH,
};
use crate::app::{self, App, Form, ResultsPanel, StatusLevel};
use crate::session::{Precondition, Role};

use super::action_queue::Action;
use super::Runtime;

pub(super) const REGISTERED: &str =
    "Registered successfully! Please log in now using your credentials.";
pub(super) const REGISTRATION_FAILED: &str = "Registration failed. Try again.";
pub(super) const LOGIN_FAILED: &str = "Invalid credentials or login failed.";
pub(super) const NO_COMPANY_ATTENDANCE: &str = "No attendance found for this range.";
pub(super) const NO_OWN_ATTENDANCE: &str = "No records found.";

pub(super) async fn run_action(action: Action, app: &mut App, rt: &mut Runtime) {
    tracing::debug!(?action, "running action");
    match action {
        Action::HrSubmitAuth => hr_submit_auth(app, rt).await,
        Action::HrLogout => logout(app, rt, Role::Hr),
        Action::CreateCompany => create_company(app, rt).await,
        Action::AddEmployee => add_employee(app, rt).await,
        Action::UploadEmployees => upload_employees(app, rt).await,
        Action::ListEmployees => list_employees(app, rt).await,
        Action::FetchCompanyAttendance => fetch_company_attendance(app, rt).await,
        Action::DownloadAttendance => download_attendance(app, rt).await,
        Action::RegenerateQr => regenerate_qr(app, rt).await,
        Action::EmployeeLogin => employee_login(app, rt).await,
        Action::EmployeeLogout => logout(app, rt, Role::Employee),
        Action::ShareLocation => share_location(app, rt),
        Action::CheckIn => mark_attendance(app, rt, Mark::CheckIn).await,
        Action::CheckOut => mark_attendance(app, rt, Mark::CheckOut).await,
        Action::FetchMyAttendance => fetch_my_attendance(app, rt).await,
        Action::StartQrPolling { company_id } => start_qr_polling(app, rt, company_id),
        Action::StopQrPolling => stop_qr_polling(app, rt),
    }
}

/// The backend's own `message`, when the response carries one.
fn response_message(value: &Value, fallback: &str) -> String {
    value
        .get("message")
        .or_else(|| value.get("detail"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn blocked(app: &mut App, precondition: Precondition) {
    tracing::debug!(%precondition, "action blocked before dispatch");
    app.set_status(StatusLevel::Warning, precondition.to_string());
}

fn failed(app: &mut App, what: &str, error: &ApiError) {
    tracing::warn!(error = %error, "{} failed", what);
    app.set_status(StatusLevel::Error, error.to_string());
}

fn read_range(form: &Form) -> Result<DateRange, String> {
    let start = parse_date(form.value(RANGE_START)).map_err(|e| e.to_string())?;
    let end = parse_date(form.value(RANGE_END)).map_err(|e| e.to_string())?;
    Ok(DateRange::new(start, end))
}

// HR

async fn hr_submit_auth(app: &mut App, rt: &mut Runtime) {
    let form = &mut app.hr.auth_form;
    form.error = None;
    let name = form.value(AUTH_NAME).to_string();
    let password = form.raw_value(AUTH_PASSWORD).to_string();
    let register = form.checked(AUTH_REGISTER);

    if name.is_empty() || password.is_empty() {
        form.error = Some("HR Name and Password are required.".to_string());
        return;
    }

    if register {
        match rt.client.register_hr(&name, &password).await {
            Ok(_) => {
                tracing::info!(name = %name, "HR account registered");
                app.hr.auth_form.fields[AUTH_REGISTER].checked = false;
                app.hr.auth_form.clear_secrets();
                app.set_status(StatusLevel::Success, REGISTERED);
            }
            Err(e) => {
                tracing::warn!(error = %e, "HR registration failed");
                app.set_status(
                    StatusLevel::Error,
                    format!("{} ({})", REGISTRATION_FAILED, e),
                );
            }
        }
        return;
    }

    match rt.client.login_hr(&name, &password).await {
        Ok(token) => {
            tracing::info!(name = %name, "HR logged in");
            rt.session.login(Role::Hr, token);
            app.hr.auth_form = app::hr::auth_form();
            app.set_status(StatusLevel::Success, format!("Logged in as {}.", name));
        }
        Err(e) => {
            tracing::warn!(error = %e, "HR login failed");
            app.hr.auth_form.clear_secrets();
            app.set_status(
                StatusLevel::Error,
                format!("{} ({})", LOGIN_FAILED, e),
            );
        }
    }
}

fn logout(app: &mut App, rt: &mut Runtime, role: Role) {
    if rt.session.logout(role) {
        tracing::info!(%role, "logged out");
    }
    match role {
        Role::Hr => app.hr.reset_after_logout(),
        Role::Employee => app.employee.reset_after_logout(),
    }
    app.set_status(StatusLevel::Info, format!("{} logged out.", role));
}

fn read_company(form: &Form) -> Result<NewCompany, String> {
    let name = form.value(COMPANY_NAME);
    if name.is_empty() {
        return Err("Company Name is required.".to_string());
    }
    let latitude: f64 = form
        .value(COMPANY_LATITUDE)
        .parse()
        .map_err(|_| "Latitude must be a number.".to_string())?;
    let longitude: f64 = form
        .value(COMPANY_LONGITUDE)
        .parse()
        .map_err(|_| "Longitude must be a number.".to_string())?;
    let radius_m: i64 = form
        .value(COMPANY_RADIUS)
        .parse()
        .ok()
        .filter(|r| *r > 0)
        .ok_or_else(|| "Radius must be a positive whole number of meters.".to_string())?;

    Ok(NewCompany {
        name: name.to_string(),
        latitude,
        longitude,
        radius_m,
    })
}

async fn create_company(app: &mut App, rt: &mut Runtime) {
    let token = match rt.session.require(Role::Hr) {
        Ok(token) => token,
        Err(p) => return blocked(app, p),
    };
    let company = match read_company(&app.hr.company_form) {
        Ok(company) => company,
        Err(e) => {
            app.hr.company_form.error = Some(e);
            return;
        }
    };

    match rt.client.create_company(token, &company).await {
        Ok(response) => {
            tracing::info!(name = %company.name, "company created");
            app.hr.company_form = app::hr::company_form();
            app.hr.menu.close();
            app.hr.results = Some(ResultsPanel::new(
                "Company",
                RecordTable::from_json(&response),
            ));
            app.set_status(
                StatusLevel::Success,
                response_message(&response, "Company created."),
            );
        }
        Err(e) => failed(app, "create company", &e),
    }
}

fn read_employee(form: &Form) -> Result<NewEmployee, String> {
    let name = form.value(EMPLOYEE_NAME);
    let email = form.value(EMPLOYEE_EMAIL);
    let password = form.raw_value(EMPLOYEE_PASSWORD);
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Name, Email and Password are required.".to_string());
    }

    Ok(NewEmployee {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        is_active: form.checked(EMPLOYEE_ACTIVE),
    })
}

async fn add_employee(app: &mut App, rt: &mut Runtime) {
    let token = match rt.session.require(Role::Hr) {
        Ok(token) => token,
        Err(p) => return blocked(app, p),
    };
    let employee = match read_employee(&app.hr.employee_form) {
        Ok(employee) => employee,
        Err(e) => {
            app.hr.employee_form.error = Some(e);
            return;
        }
    };

    match rt.client.add_employee(token, &employee).await {
        Ok(response) => {
            tracing::info!(email = %employee.email, "employee added");
            app.hr.employee_form = app::hr::employee_form();
            app.hr.menu.close();
            app.set_status(
                StatusLevel::Success,
                response_message(&response, "Employee added."),
            );
        }
        Err(e) => failed(app, "add employee", &e),
    }
}

async fn read_upload(path: &str) -> Result<EmployeeUpload, String> {
    if path.is_empty() {
        return Err("Enter the path of an .xlsx file.".to_string());
    }
    let path = Path::new(path);
    let is_xlsx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
    if !is_xlsx {
        return Err("Only .xlsx files can be uploaded.".to_string());
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Could not read {}: {}", path.display(), e))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "employees.xlsx".to_string());

    Ok(EmployeeUpload { file_name, bytes })
}

async fn upload_employees(app: &mut App, rt: &mut Runtime) {
    let token = match rt.session.require(Role::Hr) {
        Ok(token) => token,
        Err(p) => return blocked(app, p),
    };
    let upload = match read_upload(app.hr.upload_form.value(UPLOAD_PATH)).await {
        Ok(upload) => upload,
        Err(e) => {
            app.hr.upload_form.error = Some(e);
            return;
        }
    };

    let file_name = upload.file_name.clone();
    match rt.client.upload_employees(token, upload).await {
        Ok(response) => {
            tracing::info!(file = %file_name, "employee sheet uploaded");
            app.hr.upload_form = app::hr::upload_form();
            app.hr.menu.close();
            app.set_status(
                StatusLevel::Success,
                response_message(&response, "Employees uploaded."),
            );
        }
        Err(e) => failed(app, "upload employees", &e),
    }
}

async fn list_employees(app: &mut App, rt: &mut Runtime) {
    let token = match rt.session.require(Role::Hr) {
        Ok(token) => token,
        Err(p) => return blocked(app, p),
    };

    match rt.client.list_employees(token).await {
        Ok(response) => {
            let table = RecordTable::from_json(&response);
            if table.is_empty() {
                app.hr.results = None;
                app.set_status(StatusLevel::Info, "No employees found.");
            } else {
                let count = table.len();
                app.hr.results = Some(ResultsPanel::new("Employees", table));
                app.set_status(StatusLevel::Success, format!("Loaded {} employees.", count));
            }
        }
        Err(e) => failed(app, "list employees", &e),
    }
}

async fn fetch_company_attendance(app: &mut App, rt: &mut Runtime) {
    let token = match rt.session.require(Role::Hr) {
        Ok(token) => token,
        Err(p) => return blocked(app, p),
    };
    let range = match read_range(&app.hr.attendance_form) {
        Ok(range) => range,
        Err(e) => {
            app.hr.attendance_form.error = Some(e);
            return;
        }
    };
    app.hr.attendance_form.error = None;

    match rt.client.company_attendance(token, range).await {
        Ok(response) => {
            let table = RecordTable::from_json(&response);
            if table.is_empty() {
                app.hr.results = None;
                app.set_status(StatusLevel::Info, NO_COMPANY_ATTENDANCE);
            } else {
                let count = table.len();
                app.hr.results = Some(ResultsPanel::new("Company Attendance", table));
                app.set_status(StatusLevel::Success, format!("Loaded {} records.", count));
            }
        }
        Err(e) => failed(app, "company attendance", &e),
    }
}

async fn download_attendance(app: &mut App, rt: &mut Runtime) {
    let token = match rt.session.require(Role::Hr) {
        Ok(token) => token,
        Err(p) => return blocked(app, p),
    };
    let range = match read_range(&app.hr.export_form) {
        Ok(range) => range,
        Err(e) => {
            app.hr.export_form.error = Some(e);
            return;
        }
    };
    app.hr.export_form.error = None;

    match crate::export::download_report(&rt.client, token, range, &app.export_dir).await {
        Ok(path) => {
            app.hr.menu.close();
            app.set_status(
                StatusLevel::Success,
                format!("Attendance saved to {}", path.display()),
            );
        }
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "attendance download failed");
            app.set_status(StatusLevel::Error, format!("{:#}", e));
        }
    }
}

async fn regenerate_qr(app: &mut App, rt: &mut Runtime) {
    let token = match rt.session.require(Role::Hr) {
        Ok(token) => token,
        Err(p) => return blocked(app, p),
    };

    match rt.client.regenerate_qr(token).await {
        Ok(response) => {
            tracing::info!("QR regenerated");
            app.set_status(
                StatusLevel::Success,
                response_message(&response, "QR regenerated."),
            );
        }
        Err(e) => failed(app, "regenerate QR", &e),
    }
}

// Employee

async fn employee_login(app: &mut App, rt: &mut Runtime) {
    if app.employee.is_halted() {
        return blocked(app, Precondition::MissingScanToken);
    }
    let form = &mut app.employee.login_form;
    form.error = None;
    let email = form.value(LOGIN_EMAIL).to_string();
    let password = form.raw_value(LOGIN_PASSWORD).to_string();
    if email.is_empty() || password.is_empty() {
        form.error = Some("Email and Password are required.".to_string());
        return;
    }

    match rt.client.login_employee(&email, &password).await {
        Ok(token) => {
            tracing::info!(email = %email, "employee logged in");
            rt.session.login(Role::Employee, token);
            app.employee.login_form = app::employee::login_form();
            app.set_status(StatusLevel::Success, format!("Logged in as {}.", email));
        }
        Err(e) => {
            tracing::warn!(error = %e, "employee login failed");
            app.employee.login_form.clear_secrets();
            app.set_status(
                StatusLevel::Error,
                format!("{} ({})", LOGIN_FAILED, e),
            );
        }
    }
}

fn share_location(app: &mut App, rt: &mut Runtime) {
    if let Err(p) = rt.session.require(Role::Employee) {
        return blocked(app, p);
    }

    match app
        .employee
        .location_form
        .value(LOCATION)
        .parse::<GeoLocation>()
    {
        Ok(location) => {
            rt.session.set_location(location);
            app.employee.menu.close();
            app.set_status(StatusLevel::Success, location.to_string());
        }
        Err(e) => app.set_status(StatusLevel::Error, e.to_string()),
    }
}

#[derive(Debug, Clone, Copy)]
enum Mark {
    CheckIn,
    CheckOut,
}

async fn mark_attendance(app: &mut App, rt: &mut Runtime, mark: Mark) {
    let Some(scan_token) = app.employee.scan_token.clone() else {
        return blocked(app, Precondition::MissingScanToken);
    };
    let token = match rt.session.require(Role::Employee) {
        Ok(token) => token,
        Err(p) => return blocked(app, p),
    };
    let location = match rt.session.require_location() {
        Ok(location) => location,
        Err(p) => return blocked(app, p),
    };

    let body = attendance_api::domain::AttendanceMark::new(&scan_token, location);
    let (result, done) = match mark {
        Mark::CheckIn => (rt.client.check_in(token, &body).await, "Checked in."),
        Mark::CheckOut => (rt.client.check_out(token, &body).await, "Checked out."),
    };

    match result {
        Ok(response) => {
            tracing::info!(?mark, "attendance marked");
            app.set_status(StatusLevel::Success, response_message(&response, done));
        }
        Err(e) => failed(app, "mark attendance", &e),
    }
}

async fn fetch_my_attendance(app: &mut App, rt: &mut Runtime) {
    let token = match rt.session.require(Role::Employee) {
        Ok(token) => token,
        Err(p) => return blocked(app, p),
    };
    let range = match read_range(&app.employee.attendance_form) {
        Ok(range) => range,
        Err(e) => {
            app.employee.attendance_form.error = Some(e);
            return;
        }
    };
    app.employee.attendance_form.error = None;

    match rt.client.my_attendance(token, range).await {
        Ok(response) => {
            let table = RecordTable::from_json(&response);
            if table.is_empty() {
                app.employee.results = None;
                app.set_status(StatusLevel::Info, NO_OWN_ATTENDANCE);
            } else {
                let count = table.len();
                app.employee.results = Some(ResultsPanel::new("My Attendance", table));
                app.set_status(StatusLevel::Success, format!("Loaded {} records.", count));
            }
        }
        Err(e) => failed(app, "my attendance", &e),
    }
}

// QR display

fn start_qr_polling(app: &mut App, rt: &mut Runtime, company_id: i64) {
    rt.start_polling(company_id);
    app.qr.start(company_id);
    app.set_status(
        StatusLevel::Info,
        format!(
            "Showing QR for company {} (refreshes every {}s).",
            company_id, app.qr_refresh_secs
        ),
    );
}

fn stop_qr_polling(app: &mut App, rt: &mut Runtime) {
    let was_polling = rt.stop_polling();
    app.qr.stop();
    if was_polling {
        app.set_status(StatusLevel::Info, "QR display stopped.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{EmployeeAction, HrAction, View};
    use attendance_api::domain::BearerToken;
    use attendance_api::AttendanceClient;
    use std::path::PathBuf;
    use crate::test_support::serve_once;
    use std::time::Duration;

    fn setup(base_url: &str, scan_token: Option<&str>) -> (App, Runtime) {
        let client = AttendanceClient::new(base_url, Duration::from_secs(5)).unwrap();
        let app = App::new(
            View::Hr,
            scan_token.map(str::to_string),
            PathBuf::from("."),
            30,
        );
        (app, Runtime::new(client, Duration::from_secs(30)))
    }

    // Nothing listens here; a blocked action must never get as far as connecting.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn status_text(app: &App) -> &str {
        app.status_message
            .as_ref()
            .map(|s| s.text.as_str())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn scoped_hr_actions_require_login() {
        let (mut app, mut rt) = setup(UNREACHABLE, None);
        for action in [
            Action::ListEmployees,
            Action::RegenerateQr,
            Action::FetchCompanyAttendance,
            Action::DownloadAttendance,
        ] {
            app.clear_status();
            run_action(action, &mut app, &mut rt).await;
            assert_eq!(status_text(&app), "Please log in as HR first.");
        }
    }

    #[tokio::test]
    async fn check_in_without_location_is_blocked() {
        let (mut app, mut rt) = setup(UNREACHABLE, Some("qr-token"));
        rt.session.login(Role::Employee, BearerToken::new("emp"));

        run_action(Action::CheckIn, &mut app, &mut rt).await;

        assert_eq!(status_text(&app), "Please share your location first.");
        assert_eq!(
            app.status_message.as_ref().map(|s| s.level),
            Some(StatusLevel::Warning)
        );
    }

    #[tokio::test]
    async fn employee_actions_blocked_without_scan_token() {
        let (mut app, mut rt) = setup(UNREACHABLE, None);
        run_action(Action::EmployeeLogin, &mut app, &mut rt).await;
        assert_eq!(status_text(&app), "Please scan the QR code to open this page.");
    }

    #[tokio::test]
    async fn unparseable_location_reports_error() {
        let (mut app, mut rt) = setup(UNREACHABLE, Some("qr-token"));
        rt.session.login(Role::Employee, BearerToken::new("emp"));
        app.employee.menu.open = Some(EmployeeAction::ShareLocation);
        app.employee.location_form.fields[LOCATION].input.set("north");

        run_action(Action::ShareLocation, &mut app, &mut rt).await;

        assert_eq!(status_text(&app), "Error parsing location data.");
        assert!(rt.session.location().is_none());
        assert!(app.employee.menu.is_form_open());
    }

    #[tokio::test]
    async fn check_in_sends_scan_token_and_location() {
        let (url, server) = serve_once("200 OK", r#"{"message":"Check-in recorded"}"#).await;
        let (mut app, mut rt) = setup(&url, Some("qr-token"));
        rt.session.login(Role::Employee, BearerToken::new("emp"));
        app.employee.location_form.fields[LOCATION].input.set("12.5, 77.25");
        run_action(Action::ShareLocation, &mut app, &mut rt).await;

        run_action(Action::CheckIn, &mut app, &mut rt).await;

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /attendance/checkin"));
        assert!(request.to_lowercase().contains("authorization: bearer emp"));
        assert!(request.contains(r#""token":"qr-token""#));
        assert!(request.contains(r#""latitude":12.5"#));
        assert_eq!(status_text(&app), "Check-in recorded");
    }

    #[tokio::test]
    async fn login_without_access_token_fails() {
        let (url, _server) = serve_once("200 OK", r#"{"detail":"ok"}"#).await;
        let (mut app, mut rt) = setup(&url, None);
        app.hr.auth_form.fields[AUTH_NAME].input.set("acme");
        app.hr.auth_form.fields[AUTH_PASSWORD].input.set("pw");

        run_action(Action::HrSubmitAuth, &mut app, &mut rt).await;

        assert!(status_text(&app).starts_with(LOGIN_FAILED));
        assert!(!rt.session.is_logged_in(Role::Hr));
        assert_eq!(app.hr.auth_form.raw_value(AUTH_PASSWORD), "");
    }

    #[tokio::test]
    async fn hr_login_stores_token() {
        let (url, _server) = serve_once("200 OK", r#"{"access_token":"hr-1"}"#).await;
        let (mut app, mut rt) = setup(&url, None);
        app.hr.auth_form.fields[AUTH_NAME].input.set("acme");
        app.hr.auth_form.fields[AUTH_PASSWORD].input.set("pw");

        run_action(Action::HrSubmitAuth, &mut app, &mut rt).await;

        assert_eq!(
            rt.session.token(Role::Hr).map(|t| t.as_str()),
            Some("hr-1")
        );
        assert!(!app.captures_text(&rt.session));
    }

    #[tokio::test]
    async fn registration_failure_message() {
        let (url, _server) = serve_once("400 Bad Request", r#"{"detail":"exists"}"#).await;
        let (mut app, mut rt) = setup(&url, None);
        app.hr.auth_form.fields[AUTH_NAME].input.set("acme");
        app.hr.auth_form.fields[AUTH_PASSWORD].input.set("pw");
        app.hr.auth_form.fields[AUTH_REGISTER].checked = true;

        run_action(Action::HrSubmitAuth, &mut app, &mut rt).await;

        assert_eq!(
            status_text(&app),
            format!("{} (Error 400: {{\"detail\":\"exists\"}})", REGISTRATION_FAILED)
        );
    }

    #[tokio::test]
    async fn login_outage_shows_status_and_body() {
        let (url, _server) =
            serve_once("503 Service Unavailable", r#"{"detail":"db down"}"#).await;
        let (mut app, mut rt) = setup(&url, None);
        app.hr.auth_form.fields[AUTH_NAME].input.set("acme");
        app.hr.auth_form.fields[AUTH_PASSWORD].input.set("pw");

        run_action(Action::HrSubmitAuth, &mut app, &mut rt).await;

        let status = status_text(&app);
        assert!(status.starts_with(LOGIN_FAILED));
        assert!(status.contains("Error 503"));
        assert!(status.contains("db down"));
        assert!(!rt.session.is_logged_in(Role::Hr));
    }

    #[tokio::test]
    async fn employee_login_rejection_shows_status() {
        let (url, _server) = serve_once("401 Unauthorized", r#"{"detail":"bad password"}"#).await;
        let (mut app, mut rt) = setup(&url, Some("qr-token"));
        app.employee.login_form.fields[LOGIN_EMAIL].input.set("a@b.c");
        app.employee.login_form.fields[LOGIN_PASSWORD].input.set("pw");

        run_action(Action::EmployeeLogin, &mut app, &mut rt).await;

        assert_eq!(
            status_text(&app),
            format!("{} (Error 401: {{\"detail\":\"bad password\"}})", LOGIN_FAILED)
        );
    }

    #[tokio::test]
    async fn empty_company_attendance_shows_message() {
        let (url, server) = serve_once("200 OK", "[]").await;
        let (mut app, mut rt) = setup(&url, None);
        rt.session.login(Role::Hr, BearerToken::new("hr"));
        app.hr.menu.open = Some(HrAction::FetchAttendance);
        app.hr.attendance_form.fields[RANGE_START].input.set("2024-01-01");
        app.hr.attendance_form.fields[RANGE_END].input.set("2024-01-31");

        run_action(Action::FetchCompanyAttendance, &mut app, &mut rt).await;

        let request = server.await.unwrap();
        assert!(request.contains("start_date=2024-01-01&end_date=2024-01-31"));
        assert_eq!(status_text(&app), NO_COMPANY_ATTENDANCE);
        assert!(app.hr.results.is_none());
    }

    #[tokio::test]
    async fn invalid_company_coordinates_stay_in_form() {
        let (mut app, mut rt) = setup(UNREACHABLE, None);
        rt.session.login(Role::Hr, BearerToken::new("hr"));
        app.hr.company_form.fields[COMPANY_NAME].input.set("Acme");
        app.hr.company_form.fields[COMPANY_LATITUDE].input.set("abc");

        run_action(Action::CreateCompany, &mut app, &mut rt).await;

        assert_eq!(
            app.hr.company_form.error.as_deref(),
            Some("Latitude must be a number.")
        );
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn logout_clears_token_and_state() {
        let (mut app, mut rt) = setup(UNREACHABLE, None);
        rt.session.login(Role::Hr, BearerToken::new("hr"));
        app.hr.menu.open = Some(HrAction::AddEmployee);

        run_action(Action::HrLogout, &mut app, &mut rt).await;

        assert!(!rt.session.is_logged_in(Role::Hr));
        assert!(app.hr.menu.open.is_none());
        assert_eq!(status_text(&app), "HR logged out.");
    }

    #[tokio::test]
    async fn stop_polling_resets_qr_state() {
        let (mut app, mut rt) = setup(UNREACHABLE, None);
        run_action(
            Action::StartQrPolling { company_id: 3 },
            &mut app,
            &mut rt,
        )
        .await;
        assert_eq!(app.qr.polling, Some(3));
        assert!(rt.poller.is_some());

        run_action(Action::StopQrPolling, &mut app, &mut rt).await;
        assert_eq!(app.qr.polling, None);
        assert!(rt.poller.is_none());
    }
}
