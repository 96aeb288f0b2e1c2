//! Statement dates: `DD-Mmm-YY` with Spanish month abbreviations
//! (e.g. `26-Nov-25`, `29-Ene-26`). Years are always 20YY.

use chrono::NaiveDate;

const MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Month number (1-12) for a Spanish abbreviation, case-insensitive
pub fn month_from_abbreviation(abbr: &str) -> Option<u32> {
    let abbr = abbr.to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == abbr)
        .map(|idx| idx as u32 + 1)
}

/// Parse a `DD-Mmm-YY` token. Anything else, including impossible
/// calendar dates, yields `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('-');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    if !(1..=2).contains(&day.len()) || !is_digits(day) {
        return None;
    }
    if year.len() != 2 || !is_digits(year) {
        return None;
    }
    if month.chars().count() != 3 {
        return None;
    }

    let day: u32 = day.parse().ok()?;
    let month = month_from_abbreviation(month)?;
    let year: i32 = year.parse().ok()?;

    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_statement_dates() {
        assert_eq!(parse_date("26-Nov-25"), NaiveDate::from_ymd_opt(2025, 11, 26));
        assert_eq!(parse_date("29-Ene-26"), NaiveDate::from_ymd_opt(2026, 1, 29));
        assert_eq!(parse_date("3-ago-24"), NaiveDate::from_ymd_opt(2024, 8, 3));
        assert_eq!(parse_date(" 31-DIC-25 "), NaiveDate::from_ymd_opt(2025, 12, 31));
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(parse_date("bad-date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("26-Nov-2025"), None);
        assert_eq!(parse_date("26-Dec-25"), None); // English abbreviation
        assert_eq!(parse_date("31-Feb-25"), None);
        assert_eq!(parse_date("26-Nov-25-1"), None);
    }

    #[test]
    fn test_month_lookup() {
        assert_eq!(month_from_abbreviation("ENE"), Some(1));
        assert_eq!(month_from_abbreviation("dic"), Some(12));
        assert_eq!(month_from_abbreviation("jan"), None);
    }
}
