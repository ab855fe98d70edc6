use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Spreadsheet of employees for bulk creation.
#[derive(Debug, Clone)]
pub struct EmployeeUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
