//! Number formatting and lenient parsing for form values.
//!
//! Every number shown to the user goes through [`format_number`] or
//! [`format_percentage`], and every number typed by the user goes through
//! [`parse_number_or_default`].

/// Value returned by [`parse_number_or_default`] when the text is not a number.
pub const PARSE_DEFAULT: f64 = 0.0;

/// Format a number with two decimals and comma thousands separators.
///
/// `1234567.891` becomes `"1,234,567.89"`, `-5000.0` becomes `"-5,000.00"`.
/// Non-finite values are shown as Rust prints them (`inf`, `NaN`).
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" reads badly, only keep the sign when something survives rounding
    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    if negative {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// Format a fraction as a percentage with two decimals (`0.5605` -> `"56.05%"`).
pub fn format_percentage(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Format a dollar amount (`23750.0` -> `"$23,750.00"`).
pub fn format_currency(value: f64) -> String {
    format!("${}", format_number(value))
}

/// Format an already-scaled percent figure, as used for ROI (`12.5` -> `"12.50%"`).
pub fn format_percent_value(percent: f64) -> String {
    format!("{}%", format_number(percent))
}

/// Parse a user-entered number, falling back to [`PARSE_DEFAULT`].
///
/// Thousands separators are stripped before parsing. Anything that still
/// fails to parse (empty text, typos like `"5OO"`, `inf`, `NaN`) yields `0.0`
/// without an error, so a typo silently becomes a zero-valued input.
pub fn parse_number_or_default(text: &str) -> f64 {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(PARSE_DEFAULT)
}

/// Resolve a volume from a selection in millions and a free-text override.
///
/// The override wins unless it parses to zero (which includes malformed text).
pub fn resolve_volume(selected_millions: u32, override_text: &str) -> f64 {
    let typed = parse_number_or_default(override_text);
    if typed == 0.0 {
        f64::from(selected_millions) * 1_000_000.0
    } else {
        typed
    }
}
