//! Display Formatting
//!
//! Text conventions shared by the UI and the terminal renderer. Currency is
//! always dollars with two decimals and comma grouping; there is no locale
//! negotiation.

use chrono::NaiveDate;

/// Placeholder for missing text fields
pub const NOT_AVAILABLE: &str = "N/A";

/// Pie labels longer than this get shortened
const LABEL_MAX_CHARS: usize = 20;

/// Characters kept when a pie label is shortened
const LABEL_KEEP_CHARS: usize = 14;

/// `$1,234.50`
pub fn currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}", sign, grouped(value.abs(), 2))
}

/// Number with comma grouping and a fixed number of decimals
pub fn grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut out = String::with_capacity(fixed.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Whole counts with grouping: `12,480`
pub fn count(value: u64) -> String {
    grouped(value as f64, 0)
}

/// Sentiment scores and confidences: two decimals
pub fn score(value: f64) -> String {
    format!("{:.2}", value)
}

/// Profit margin with one decimal, or `N/A`
pub fn margin(percent: Option<f64>) -> String {
    percent
        .map(|p| format!("{:.1}%", p))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Empty text becomes `fallback`
pub fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Empty text becomes `N/A`
pub fn or_na(value: &str) -> &str {
    or_fallback(value, NOT_AVAILABLE)
}

/// Shorten long chart labels to 14 characters plus an ellipsis
pub fn truncate_label(name: &str) -> String {
    if name.chars().count() > LABEL_MAX_CHARS {
        let kept: String = name.chars().take(LABEL_KEEP_CHARS).collect();
        format!("{}…", kept)
    } else {
        name.to_string()
    }
}

/// `2024-03` -> `Mar 2024`; anything unparseable is shown as-is
pub fn month_label(month: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|_| month.to_string())
}
