//! Number formatting for the metric cards and chart labels.

/// Format a number with thousands separators and a fixed number of decimals.
///
/// `format_number(1234567.0, 0)` → `"1,234,567"`,
/// `format_number(-9876.5, 1)` → `"-9,876.5"`.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (formatted.as_str(), None),
    };

    let mut result = group_thousands(int_part);
    if let Some(frac) = frac_part {
        result.push('.');
        result.push_str(frac);
    }

    // "-0" after rounding is just zero.
    let is_zero = result.chars().all(|c| c == '0' || c == '.' || c == ',');
    if value < 0.0 && !is_zero {
        format!("-{result}")
    } else {
        result
    }
}

/// Whole-dollar USD amount: `120000.4` → `"$120,000"`.
pub fn format_usd(value: f64) -> String {
    let number = format_number(value, 0);
    match number.strip_prefix('-') {
        Some(abs) => format!("-${abs}"),
        None => format!("${number}"),
    }
}

/// Insert a comma every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
