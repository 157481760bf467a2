use chrono::NaiveDate;

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Fast parse of `"YYYY-MM-DD"` or `"YYYY/MM/DD"` → calendar date.
/// Anything after the first ten characters (e.g. a time of day) is ignored.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = clean_str(s);
    // byte slicing below needs ASCII; minimal length + separators check
    if !s.is_ascii() || s.len() < 10 {
        return None;
    }
    let sep = &s[4..5];
    if (sep != "-" && sep != "/") || &s[7..8] != sep {
        return None;
    }
    if s.len() > 10 && !matches!(&s[10..11], " " | "T") {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[5..7].parse().ok()?;
    let day: u32 = s[8..10].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}
