//! Reshaping of the raw attendance export into the downloadable workbook.
//!
//! The backend export is CSV with arbitrary column order and casing, and
//! every `*time*` column in UTC. The report normalizes headers, shifts
//! timestamps to IST, keeps the known columns in a fixed order and writes a
//! single-sheet workbook.

use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;
use time::{
    format_description::well_known::Rfc3339,
    macros::{format_description, offset},
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
};

use crate::{domain::format_date, records::RecordTable};

/// Columns kept in the report, in output order. Anything else is dropped.
pub const REPORT_COLUMNS: [&str; 8] = [
    "id",
    "date",
    "employee_id",
    "company_id",
    "checkin_time",
    "checkout_time",
    "status",
    "total_hours",
];

pub const REPORT_OFFSET: UtcOffset = offset!(+5:30);
pub const SHEET_NAME: &str = "Attendance";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to parse attendance export: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to build workbook: {0}")]
    Workbook(#[from] XlsxError),
}

pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn is_time_column(normalized: &str) -> bool {
    normalized.contains("time")
}

/// Convert a UTC timestamp to IST as `YYYY-MM-DD HH:MM:SS`.
///
/// Anything that does not parse is returned unchanged.
pub fn convert_timestamp(value: &str) -> String {
    let Some(utc) = parse_utc(value) else {
        return value.to_string();
    };

    utc.to_offset(REPORT_OFFSET)
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| value.to_string())
}

fn parse_utc(value: &str) -> Option<OffsetDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(dt);
    }

    // Basic offsets without a colon, e.g. `+0000`.
    if let Ok(dt) = OffsetDateTime::parse(
        &value.replacen(' ', "T", 1),
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]][offset_hour sign:mandatory][offset_minute]"
        ),
    ) {
        return Some(dt);
    }

    // Naive timestamps are UTC. Accept a space separator, a trailing `Z`
    // and fractional seconds.
    let naive = value
        .strip_suffix('Z')
        .or_else(|| value.strip_suffix('z'))
        .unwrap_or(value)
        .replacen(' ', "T", 1);
    let naive = match naive.split_once('.') {
        Some((base, frac)) if !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()) => {
            base.to_string()
        }
        Some(_) => return None,
        None => naive,
    };

    PrimitiveDateTime::parse(
        &naive,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .ok()
    .map(PrimitiveDateTime::assume_utc)
}

/// Indices into `columns` (already normalized) in report order. The first
/// occurrence wins when a name repeats.
pub fn report_column_order(columns: &[String]) -> Vec<usize> {
    REPORT_COLUMNS
        .iter()
        .filter_map(|wanted| columns.iter().position(|c| c == wanted))
        .collect()
}

/// Parse, normalize, convert and reorder the raw export.
pub fn reshape(csv_text: &str) -> Result<RecordTable, ReportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
    let time_columns: Vec<bool> = headers.iter().map(|h| is_time_column(h)).collect();
    let order = report_column_order(&headers);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = order
            .iter()
            .map(|&idx| {
                let value = record.get(idx).unwrap_or_default();
                if time_columns[idx] && !value.is_empty() {
                    convert_timestamp(value)
                } else {
                    value.to_string()
                }
            })
            .collect();
        rows.push(row);
    }

    let columns = order.iter().map(|&idx| headers[idx].clone()).collect();
    Ok(RecordTable::new(columns, rows))
}

/// Serialize a table as a workbook with a single sheet and no index column.
pub fn write_workbook(table: &RecordTable) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in table.columns.iter().enumerate() {
        sheet.write_string(0, col as u16, name.as_str())?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            match numeric_cell(value) {
                Some(number) => sheet.write_number(row_num, col as u16, number)?,
                None => sheet.write_string(row_num, col as u16, value.as_str())?,
            };
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn numeric_cell(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed != value {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// The full pipeline: raw export text in, workbook bytes out.
pub fn build_report(csv_text: &str) -> Result<Vec<u8>, ReportError> {
    let table = reshape(csv_text)?;
    tracing::debug!(
        rows = table.len(),
        columns = table.columns.len(),
        "reshaped attendance export"
    );
    write_workbook(&table)
}

pub fn report_file_name(day: Date) -> String {
    format!("attendance_{}.xlsx", format_date(day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
    use std::io::Cursor;
    use time::macros::date;

    #[test]
    fn converts_z_suffixed_utc_to_ist() {
        assert_eq!(
            convert_timestamp("2024-01-01T03:00:00Z"),
            "2024-01-01 08:30:00"
        );
    }

    #[test]
    fn converts_naive_and_fractional_timestamps() {
        assert_eq!(
            convert_timestamp("2024-01-01T03:00:00"),
            "2024-01-01 08:30:00"
        );
        assert_eq!(
            convert_timestamp("2024-01-01 20:15:30.123456"),
            "2024-01-02 01:45:30"
        );
        assert_eq!(
            convert_timestamp("2024-03-31T19:00:00.5Z"),
            "2024-04-01 00:30:00"
        );
    }

    #[test]
    fn explicit_offsets_are_respected() {
        assert_eq!(
            convert_timestamp("2024-01-01T08:30:00+05:30"),
            "2024-01-01 08:30:00"
        );
    }

    #[test]
    fn basic_offsets_without_colon_are_converted() {
        assert_eq!(
            convert_timestamp("2024-01-01T03:00:00+0000"),
            "2024-01-01 08:30:00"
        );
        assert_eq!(
            convert_timestamp("2024-01-01 03:00:00.250-0130"),
            "2024-01-01 10:00:00"
        );
    }

    #[test]
    fn unparseable_values_pass_through() {
        for raw in ["", "not a time", "present", "2024-13-01T00:00:00Z", "12", "2024-01-01"] {
            assert_eq!(convert_timestamp(raw), raw);
        }
    }

    #[test]
    fn header_normalization_is_idempotent() {
        let once: Vec<String> = ["  ID", "CheckIn_Time ", "status"]
            .iter()
            .map(|h| normalize_header(h))
            .collect();
        let twice: Vec<String> = once.iter().map(|h| normalize_header(h)).collect();
        assert_eq!(once, vec!["id", "checkin_time", "status"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_columns_are_dropped_and_known_reordered() {
        let columns: Vec<String> = ["status", "id", "checkin_time", "unknown_col", "date"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let ordered: Vec<&str> = report_column_order(&columns)
            .into_iter()
            .map(|idx| columns[idx].as_str())
            .collect();
        assert_eq!(ordered, vec!["id", "date", "checkin_time", "status"]);
    }

    #[test]
    fn reshapes_export_row() {
        let csv = "ID,Date,CheckIn_Time,Status\n1,2024-01-01,2024-01-01T03:00:00Z,present\n";
        let table = reshape(csv).unwrap();

        assert_eq!(table.columns, vec!["id", "date", "checkin_time", "status"]);
        assert_eq!(
            table.rows,
            vec![vec!["1", "2024-01-01", "2024-01-01 08:30:00", "present"]]
        );
    }

    #[test]
    fn tolerates_missing_optional_fields_and_blank_times() {
        let csv = "status,checkout_time,employee_id\npresent,,7\nabsent,garbage,8\n";
        let table = reshape(csv).unwrap();

        assert_eq!(table.columns, vec!["employee_id", "checkout_time", "status"]);
        assert_eq!(
            table.rows,
            vec![vec!["7", "", "present"], vec!["8", "garbage", "absent"]]
        );
    }

    #[test]
    fn ragged_rows_fail() {
        let csv = "id,status\n1,present,extra\n";
        assert!(matches!(reshape(csv), Err(ReportError::Csv(_))));
    }

    #[test]
    fn builds_single_sheet_workbook() {
        let csv = "ID,Date,CheckIn_Time,Status\n1,2024-01-01,2024-01-01T03:00:00Z,present\n";
        let bytes = build_report(csv).unwrap();

        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);

        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.get_size(), (2, 4));

        let text = |row: u32, col: u32| match range.get_value((row, col)) {
            Some(Data::String(s)) => s.clone(),
            other => panic!("expected text at ({}, {}), got {:?}", row, col, other),
        };
        for (col, name) in ["id", "date", "checkin_time", "status"].iter().enumerate() {
            assert_eq!(text(0, col as u32), *name);
        }
        assert_eq!(range.get_value((1, 0)), Some(&Data::Float(1.0)));
        assert_eq!(text(1, 1), "2024-01-01");
        assert_eq!(text(1, 2), "2024-01-01 08:30:00");
        assert_eq!(text(1, 3), "present");
    }

    #[test]
    fn numeric_cells_are_detected() {
        assert_eq!(numeric_cell("7"), Some(7.0));
        assert_eq!(numeric_cell("8.5"), Some(8.5));
        assert_eq!(numeric_cell("2024-01-01"), None);
        assert_eq!(numeric_cell(" 7"), None);
        assert_eq!(numeric_cell("inf"), None);
        assert_eq!(numeric_cell(""), None);
    }

    #[test]
    fn file_name_uses_iso_date() {
        assert_eq!(
            report_file_name(date!(2024 - 05 - 09)),
            "attendance_2024-05-09.xlsx"
        );
    }
}
