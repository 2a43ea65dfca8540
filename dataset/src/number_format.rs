//! FILENAME: dataset/src/number_format.rs
//! PURPOSE: Display formatting for counts and percentages.
//! CONTEXT: Metric cards show whole counts with thousands separators and
//! one-decimal percentages. Ratios go through `safe_percent` so a zero
//! denominator renders as 0% instead of NaN or infinity.

/// `part / whole * 100`, or 0 when `whole` is zero or the result is not finite.
pub fn safe_percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let pct = part / whole * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

/// Formats a count as a whole number with thousands separators.
pub fn format_count(value: f64) -> String {
    add_thousands_separator(&format!("{:.0}", value.trunc()))
}

/// Formats a percentage with one decimal place, e.g. `"12.5%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Caption under a metric card: `"66.7% of Total"`, or `"0%"` when the
/// denominator is zero.
pub fn share_caption(part: f64, whole: f64, of: &str) -> String {
    if whole > 0.0 {
        format!("{} of {}", format_percent(safe_percent(part, whole)), of)
    } else {
        "0%".to_string()
    }
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let parts: Vec<&str> = s.split('.').collect();
    let integer_part = parts[0];
    let decimal_part = parts.get(1);

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative && digits.chars().any(|c| c != '0') {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}
