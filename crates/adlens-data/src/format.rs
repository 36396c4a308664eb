//! Display formatting for metric values (en-US conventions).

/// Insert `,` thousands separators into a string of ASCII digits.
fn group_digits(digits: &str) -> String {
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

/// Format a USD amount with no fraction digits, e.g. `$12,346`.
///
/// Halves round away from zero. Negative amounts render as `-$12`.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "$∞".into() } else { "-$∞".into() };
    }

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{}${}", sign, group_digits(&digits))
}

/// Format a count with thousands separators, e.g. `1,234,567`.
pub fn format_number(value: u64) -> String {
    group_digits(&value.to_string())
}
