//! Number formatting for the terminal views.

/// Format `value` with `decimals` fraction digits and comma-grouped
/// thousands.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(112650.0, 0), "112,650");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let fixed = format!("{:.*}", decimals as usize, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    // No "-0.00".
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a large value in compact form for chart labels.
///
/// * `< 1 000`       → plain, no decimals (`"950"`)
/// * `< 1 000 000`   → thousands (`"12.5K"`)
/// * otherwise       → millions (`"1.2M"`)
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_compact;
///
/// assert_eq!(format_compact(950.0), "950");
/// assert_eq!(format_compact(12_500.0), "12.5K");
/// assert_eq!(format_compact(1_234_567.0), "1.2M");
/// ```
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs < 1_000.0 {
        format!("{:.0}", value)
    } else if abs < 1_000_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.1}M", value / 1_000_000.0)
    }
}

/// Format a day count with two decimals, e.g. `"12.50 days"`.
pub fn format_days(days: f64) -> String {
    format!("{:.2} days", days)
}

/// `part` as a percentage of `whole`, rounded to `decimal_places`.
///
/// Zero when `whole` is zero.
///
/// ```
/// use dashboard_core::formatting::percentage;
///
/// assert_eq!(percentage(3.0, 4.0, 2), 75.0);
/// assert_eq!(percentage(1.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let scale = 10_f64.powi(decimal_places as i32);
    (part / whole * 100.0 * scale).round() / scale
}

/// `"1234567"` → `"1,234,567"`.
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
