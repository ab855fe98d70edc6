use thiserror::Error;
use time::{macros::format_description, Date};

#[derive(Error, Debug, PartialEq)]
#[error("Invalid date '{0}', expected YYYY-MM-DD")]
pub struct DateParseError(pub String);

pub fn parse_date(s: &str) -> Result<Date, DateParseError> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| DateParseError(s.to_string()))
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}

/// Inclusive range sent as `start_date` / `end_date` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    pub fn single_day(date: Date) -> Self {
        Self::new(date, date)
    }

    pub fn as_query(&self) -> [(&'static str, String); 2] {
        [
            ("start_date", format_date(self.start)),
            ("end_date", format_date(self.end)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2024-01-31"), Ok(date!(2024 - 01 - 31)));
        assert_eq!(parse_date(" 2024-02-01 "), Ok(date!(2024 - 02 - 01)));
        assert!(parse_date("31/01/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn query_uses_backend_parameter_names() {
        let range = DateRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 07));
        assert_eq!(
            range.as_query(),
            [
                ("start_date", "2024-01-01".to_string()),
                ("end_date", "2024-01-07".to_string()),
            ]
        );
    }
}
