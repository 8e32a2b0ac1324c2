use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_MESSAGE_CHARS: usize = 1000;
const KST_OFFSET_SECS: i32 = 9 * 3600;

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^<]*(?:<[^<]*)*?</script>").expect("valid regex"));
static IFRAME_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<iframe\b[^<]*(?:<[^<]*)*?</iframe>").expect("valid regex"));
static JS_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)javascript:").expect("valid regex"));
static INLINE_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)on\w+\s*=").expect("valid regex"));

/// A chat message is acceptable when it is non-blank and at most
/// [`MAX_MESSAGE_CHARS`] characters once trimmed.
pub fn validate_message(message: &str) -> bool {
    let trimmed = message.trim();
    let len = trimmed.chars().count();
    len > 0 && len <= MAX_MESSAGE_CHARS
}

pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}

pub fn format_similarity(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

pub fn file_name_from_path(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => path,
    }
}

pub fn sanitize_html(text: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(text, "");
    let text = IFRAME_BLOCK.replace_all(&text, "");
    let text = JS_SCHEME.replace_all(&text, "");
    INLINE_HANDLER.replace_all(&text, "").into_owned()
}

/// Renders a date or timestamp as `YYYY.MM.DD`, `-` when absent or unparseable.
pub fn format_date(value: Option<&str>) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "-".to_string();
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return ts.format("%Y.%m.%d").to_string();
    }

    value
        .get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map(|day| day.format("%Y.%m.%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    const PATTERN: &str = "%Y. %m. %d. %H:%M:%S";
    match FixedOffset::east_opt(KST_OFFSET_SECS) {
        Some(kst) => value.with_timezone(&kst).format(PATTERN).to_string(),
        None => value.format(PATTERN).to_string(),
    }
}

/// Thousands separators, `0` for missing values.
pub fn format_number(value: Option<i64>) -> String {
    let value = value.unwrap_or(0);
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

pub fn format_ms(value: Option<i64>) -> String {
    match value {
        Some(ms) if ms != 0 => format!("{ms}ms"),
        _ => "0ms".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_message_bounds() {
        assert!(!validate_message(""));
        assert!(!validate_message("   \n\t"));
        assert!(validate_message("융프라우요흐 티켓 가격은?"));
        assert!(validate_message(&"가".repeat(MAX_MESSAGE_CHARS)));
        assert!(!validate_message(&"a".repeat(MAX_MESSAGE_CHARS + 1)));
        // surrounding whitespace does not count against the limit
        assert!(validate_message(&format!("  {}  ", "a".repeat(MAX_MESSAGE_CHARS))));
    }

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("스위스 여행 가이드", 3), "스위스...");
    }

    #[test]
    fn test_format_similarity() {
        assert_eq!(format_similarity(0.8734), "87.3%");
        assert_eq!(format_similarity(1.0), "100.0%");
    }

    #[test]
    fn test_file_name_from_path() {
        assert_eq!(file_name_from_path("guides/luzern/day-trip.md"), "day-trip.md");
        assert_eq!(file_name_from_path("zermatt.md"), "zermatt.md");
        assert_eq!(file_name_from_path("trailing/"), "trailing/");
    }

    #[test]
    fn test_sanitize_html_strips_active_content() {
        let dirty = r#"<p onclick="x()">hi</p><script>alert(1)</script><a href="javascript:void(0)">l</a><iframe src="e"></iframe>"#;
        let clean = sanitize_html(dirty);
        assert!(!clean.contains("<script"));
        assert!(!clean.contains("<iframe"));
        assert!(!clean.to_lowercase().contains("javascript:"));
        assert!(!clean.contains("onclick="));
        assert!(clean.contains("hi"));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2025-03-04")), "2025.03.04");
        assert_eq!(format_date(Some("2025-03-04T10:00:00+00:00")), "2025.03.04");
        assert_eq!(format_date(None), "-");
        assert_eq!(format_date(Some("")), "-");
        assert_eq!(format_date(Some("yesterday")), "-");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(None), "0");
        assert_eq!(format_number(Some(999)), "999");
        assert_eq!(format_number(Some(1234)), "1,234");
        assert_eq!(format_number(Some(1234567)), "1,234,567");
        assert_eq!(format_number(Some(-4500)), "-4,500");
    }

    #[test]
    fn test_format_timestamp_uses_korean_time() {
        let ts = DateTime::parse_from_rfc3339("2025-01-31T20:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(&ts), "2025. 02. 01. 05:30:00");
    }

    #[test]
    fn test_format_ms() {
        assert_eq!(format_ms(None), "0ms");
        assert_eq!(format_ms(Some(0)), "0ms");
        assert_eq!(format_ms(Some(532)), "532ms");
    }
}
