//! Display formatting for comparison values.
//!
//! Prices render in the Argentine locale (`$12.345,5`): `.` groups
//! thousands and `,` separates up to two decimals.

/// Format a number without trailing zeros ("15", "1.5", "0.25").
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        let s = format!("{:.3}", rounded);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Format a price as `$` + es-AR grouped digits.
pub fn format_price(value: f64) -> String {
    let negative = value < 0.0;
    let cents = format!("{:03.0}", (value.abs() * 100.0).round());
    let (digits, frac) = cents.split_at(cents.len() - 2);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('$');
    out.push_str(&grouped);
    if frac != "00" {
        out.push(',');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

pub fn format_kg(value: f64) -> String {
    format!("{} kg", format_number(value))
}

pub fn format_units(count: u32) -> String {
    if count == 1 {
        "1 unit".to_string()
    } else {
        format!("{} units", count)
    }
}

/// Signed percent difference of `actual` against `expected`.
pub fn percent_difference(actual: f64, expected: f64) -> Option<f64> {
    if expected == 0.0 || !expected.is_finite() || !actual.is_finite() {
        return None;
    }
    Some((actual - expected) / expected * 100.0)
}
