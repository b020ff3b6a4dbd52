//! Number formatting shared by the CLI and the chart labels.

/// en-US grouping with up to three fraction digits; `N/A` when absent.
///
/// ```ignore
/// assert_eq!(format_number(Some(13_000_000.0)), "13,000,000");
/// assert_eq!(format_number(Some(1234.5)), "1,234.5");
/// ```
pub fn format_number(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "N/A".to_string();
    };
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Fixed number of decimals; `N/A` when absent.
pub fn format_decimal(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "N/A".to_string(),
    }
}
