use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work queued by key handlers and run by the event loop, one at a time.
///
/// Inputs are read from the app state when the action runs, so variants only
/// carry what the form does not hold.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    // HR
    HrSubmitAuth,
    HrLogout,
    CreateCompany,
    AddEmployee,
    UploadEmployees,
    ListEmployees,
    FetchCompanyAttendance,
    DownloadAttendance,
    RegenerateQr,
    // Employee
    EmployeeLogin,
    EmployeeLogout,
    ShareLocation,
    CheckIn,
    CheckOut,
    FetchMyAttendance,
    // QR display
    StartQrPolling { company_id: i64 },
    StopQrPolling,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
