use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Insert the missing colon into clock times charted as `1518` or `930`.
pub(crate) fn colonize_time(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.contains(':') || !trimmed.is_ascii() {
        return trimmed.to_string();
    }

    match trimmed.len() {
        4 => format!("{}:{}", &trimmed[..2], &trimmed[2..]),
        3 => format!("{}:{}", &trimmed[..1], &trimmed[1..]),
        _ => trimmed.to_string(),
    }
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

pub(crate) fn parse_time(value: &str) -> Option<NaiveTime> {
    let colonized = colonize_time(value);
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&colonized, format).ok())
}

/// Parse a charted timestamp: RFC 3339, or a date and a clock time separated
/// by whitespace or `T`.
pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    let (date, time) = trimmed
        .split_once(|c: char| c.is_whitespace() || c == 'T')
        .map(|(date, time)| (date, time.trim()))?;

    Some(parse_date(date)?.and_time(parse_time(time)?))
}

/// Gestational age in weeks from `35`, `35.5` or `35 3/7`.
pub(crate) fn parse_gestational_age(value: &str) -> Option<f64> {
    let mut parts = value.split_whitespace();
    let whole = parts.next()?;

    let weeks = match parts.next() {
        Some(fraction) => {
            let (days, per) = fraction.split_once('/')?;
            let whole: u32 = whole.parse().ok()?;
            let days: u32 = days.parse().ok()?;
            let per: u32 = per.parse().ok()?;
            if per == 0 {
                return None;
            }
            f64::from(whole) + f64::from(days) / f64::from(per)
        }
        None => whole.parse::<f64>().ok()?,
    };

    if parts.next().is_some() || !weeks.is_finite() || weeks <= 0.0 {
        return None;
    }
    Some(weeks)
}

/// Parse the leading decimal number of `value`, ignoring trailing units or
/// flags such as `3.2 kg` or `14.1*`.
pub(crate) fn leading_number(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_point = false;

    for (index, c) in trimmed.char_indices() {
        match c {
            '+' | '-' if index == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        end = index + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colonize_handles_three_and_four_digit_times() {
        assert_eq!(colonize_time("1518"), "15:18");
        assert_eq!(colonize_time("930"), "9:30");
        assert_eq!(colonize_time(" 07:45 "), "07:45");
    }

    #[test]
    fn parse_datetime_accepts_charted_formats() {
        let expected = NaiveDate::from_ymd_opt(2016, 6, 3)
            .unwrap()
            .and_hms_opt(15, 18, 0)
            .unwrap();
        assert_eq!(parse_datetime("6/3/2016 1518"), Some(expected));
        assert_eq!(parse_datetime("06/03/16 15:18"), Some(expected));
        assert_eq!(parse_datetime("2016-06-03 15:18"), Some(expected));
        assert_eq!(parse_datetime("2016-06-03T15:18:00Z"), Some(expected));
        assert_eq!(parse_datetime("2016-06-03"), None);
        assert_eq!(parse_datetime("comment row"), None);
    }

    #[test]
    fn gestational_age_accepts_fractional_weeks() {
        let weeks = parse_gestational_age("35 3/7").expect("parses");
        assert!((weeks - (35.0 + 3.0 / 7.0)).abs() < 1e-12);
        assert_eq!(parse_gestational_age("38"), Some(38.0));
        assert_eq!(parse_gestational_age(" 36.5 "), Some(36.5));
        assert_eq!(parse_gestational_age("35 3/0"), None);
        assert_eq!(parse_gestational_age("weeks"), None);
        assert_eq!(parse_gestational_age(""), None);
    }

    #[test]
    fn leading_number_drops_trailing_text() {
        assert_eq!(leading_number("3.2 kg"), Some(3.2));
        assert_eq!(leading_number("14.1*"), Some(14.1));
        assert_eq!(leading_number("  12"), Some(12.0));
        assert_eq!(leading_number("1.2.3"), Some(1.2));
        assert_eq!(leading_number("."), None);
        assert_eq!(leading_number("pending"), None);
    }
}
