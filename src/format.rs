//! Display formatting for cards

use chrono::{DateTime, NaiveDate};

pub const DEFAULT_IMAGE: &str = "/static/images/No_Image_Available.jpg";

/// `150000` -> `Rp 150.000`
pub fn rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp {}", grouped)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| value.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

/// `2025-03-03` -> `Monday, 03 March 2025`; unparseable input is returned as is
pub fn long_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%A, %d %B %Y").to_string(),
        None => value.to_string(),
    }
}

/// `2025-03-03T10:00:00Z` -> `03 Mar 2025`
pub fn short_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%d %b %Y").to_string(),
        None => value.to_string(),
    }
}

fn hhmm(time: &str) -> &str {
    time.get(..5).filter(|t| t.as_bytes().get(2) == Some(&b':')).unwrap_or(time)
}

pub fn time_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (Some(s), Some(e)) => Some(format!("{} - {}", hhmm(s), hhmm(e))),
        (Some(s), None) => Some(hhmm(s).to_string()),
        (None, Some(e)) => Some(hhmm(e).to_string()),
        (None, None) => None,
    }
}

pub fn image_or_default(url: Option<&str>) -> String {
    url.filter(|u| !u.trim().is_empty()).unwrap_or(DEFAULT_IMAGE).to_string()
}

pub fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupiah_groups_thousands_with_dots() {
        assert_eq!(rupiah(0), "Rp 0");
        assert_eq!(rupiah(950), "Rp 950");
        assert_eq!(rupiah(150000), "Rp 150.000");
        assert_eq!(rupiah(1250000), "Rp 1.250.000");
    }

    #[test]
    fn long_dates() {
        assert_eq!(long_date("2025-03-03"), "Monday, 03 March 2025");
        assert_eq!(long_date("2025-03-03T09:30:00+07:00"), "Monday, 03 March 2025");
        assert_eq!(long_date("soon"), "soon");
        assert_eq!(short_date("2025-03-03T09:30:00.123456Z"), "03 Mar 2025");
    }

    #[test]
    fn time_ranges_drop_seconds() {
        assert_eq!(time_range(Some("08:00:00"), Some("10:00")).as_deref(), Some("08:00 - 10:00"));
        assert_eq!(time_range(None, None), None);
    }

    #[test]
    fn blank_images_use_placeholder() {
        assert_eq!(image_or_default(Some(" ")), DEFAULT_IMAGE);
        assert_eq!(image_or_default(Some("/a.png")), "/a.png");
        assert_eq!(stars(3), "★★★☆☆");
    }
}
