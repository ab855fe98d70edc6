use anyhow::{Context, Result};
use attendance_api::domain::{BearerToken, DateRange};
use attendance_api::report::{build_report, report_file_name};
use attendance_api::AttendanceClient;
use std::path::{Path, PathBuf};

use crate::time_utils::local_today;

/// Fetch the CSV export for `range`, reshape it into the attendance
/// workbook and write it into `dir`. Returns the written path.
pub async fn download_report(
    client: &AttendanceClient,
    token: &BearerToken,
    range: DateRange,
    dir: &Path,
) -> Result<PathBuf> {
    let csv = client
        .export_attendance(token, range)
        .await
        .context("Attendance export failed")?;
    let workbook = build_report(&csv).context("Could not build attendance workbook")?;

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Could not create {}", dir.display()))?;
    let path = dir.join(report_file_name(local_today()));
    tokio::fs::write(&path, workbook)
        .await
        .with_context(|| format!("Could not write {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = csv.len(), "attendance report saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;
    use attendance_api::domain::parse_date;
    use std::time::Duration;

    fn range() -> DateRange {
        DateRange::single_day(parse_date("2024-01-01").unwrap())
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("attendance-tui-{}-{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn writes_workbook_named_after_today() {
        let (url, server) = serve_once(
            "200 OK",
            "ID,Date,CheckIn_Time,Status\n1,2024-01-01,2024-01-01T03:00:00Z,present\n",
        )
        .await;
        let client = AttendanceClient::new(&url, Duration::from_secs(5)).unwrap();
        let dir = scratch_dir("export");

        let path = download_report(&client, &BearerToken::new("hr"), range(), &dir)
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /export/attendance?start_date=2024-01-01"));
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(report_file_name(local_today()).as_str())
        );
        let bytes = std::fs::read(&path).unwrap();
        // xlsx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn backend_error_is_reported_with_context() {
        let (url, _server) = serve_once("401 Unauthorized", r#"{"detail":"expired"}"#).await;
        let client = AttendanceClient::new(&url, Duration::from_secs(5)).unwrap();

        let err = download_report(&client, &BearerToken::new("hr"), range(), &scratch_dir("err"))
            .await
            .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.starts_with("Attendance export failed: Error 401"));
    }
}
