//! Locale-aware number parsing and score formatting.

/// Parses a Norwegian formatted number such as `"1 234,5"`.
///
/// All whitespace (including non-breaking spaces used as thousands
/// separators) is removed and the first comma becomes the decimal point.
/// Like a lenient float parse, the longest numeric prefix is used, so
/// `"4,2%"` yields `4.2`. Returns `None` for absent, empty or non-numeric
/// input.
pub fn parse_locale_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    let cleaned = cleaned.replacen(',', ".", 1);
    let prefix = numeric_prefix(&cleaned)?;
    prefix.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
fn numeric_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    Some(&s[..end])
}

/// Score on the 1-5 scale with one decimal.
pub fn format_score(value: f64) -> String {
    format!("{value:.1}")
}

/// Percentage with the given number of decimals, e.g. `"7.5%"`.
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

/// Signed difference with one decimal, e.g. `"+0.2"` or `"-1.3"`.
pub fn format_delta(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded >= 0.0 {
        format!("+{:.1}", rounded.abs())
    } else {
        format!("{rounded:.1}")
    }
}
