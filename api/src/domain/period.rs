//! Month-year periods
//!
//! Subscriptions are billed per calendar month, so their boundaries are carried
//! as `MM-YYYY` text on the wire and as the first day of that month in storage.

use chrono::{Datelike, NaiveDate};

use crate::error::PeriodError;

/// Parse `MM-YYYY` into the first day of that month
pub fn parse_month_year(text: &str) -> Result<NaiveDate, PeriodError> {
    let layout_error = || PeriodError::Layout(text.to_string());

    let (month, year) = text.split_once('-').ok_or_else(layout_error)?;
    if month.len() != 2 || year.len() != 4 || !is_digits(month) || !is_digits(year) {
        return Err(layout_error());
    }

    let month_number: u32 = month.parse().map_err(|_| layout_error())?;
    if !(1..=12).contains(&month_number) {
        return Err(PeriodError::Month(month.to_string()));
    }

    if !year.starts_with("20") {
        return Err(PeriodError::Year(year.to_string()));
    }
    let year_number: i32 = year.parse().map_err(|_| layout_error())?;

    NaiveDate::from_ymd_opt(year_number, month_number, 1).ok_or_else(layout_error)
}

/// Render a date as `MM-YYYY`, dropping the day
pub fn format_month_year(date: NaiveDate) -> String {
    format!("{:02}-{:04}", date.month(), date.year())
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_to_first_of_month() {
        let date = parse_month_year("07-2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    }

    #[test]
    fn format_drops_the_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(format_month_year(date), "02-2024");
    }

    #[test]
    fn format_inverts_parse_for_every_month() {
        for year in ["2000", "2024", "2099"] {
            for month in 1..=12 {
                let text = format!("{:02}-{}", month, year);
                assert_eq!(format_month_year(parse_month_year(&text).unwrap()), text);
            }
        }
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert_eq!(
            parse_month_year("00-2024"),
            Err(PeriodError::Month("00".to_string()))
        );
        assert_eq!(
            parse_month_year("13-2024"),
            Err(PeriodError::Month("13".to_string()))
        );
    }

    #[test]
    fn rejects_two_digit_year() {
        assert!(matches!(
            parse_month_year("01-24"),
            Err(PeriodError::Layout(_))
        ));
    }

    #[test]
    fn rejects_years_outside_the_2000s() {
        assert_eq!(
            parse_month_year("01-1999"),
            Err(PeriodError::Year("1999".to_string()))
        );
        assert!(parse_month_year("01-2100").is_err());
    }

    #[test]
    fn rejects_non_numeric_and_other_layouts() {
        for input in [
            "ab-2024", "01-20x4", "", "2024-01", "1-2024", "01/2024", "01-2024-01", " 01-2024",
            "+1-2024",
        ] {
            assert!(parse_month_year(input).is_err(), "accepted {:?}", input);
        }
    }
}
