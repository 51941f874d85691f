//! Human-readable transfer figures.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Byte count with two decimals and a binary unit, e.g. `"1,023.00 KB"`.
///
/// Absent or zero reads as `"0 B"`. Sizes past the largest unit stay in TB.
pub fn format_bytes(value: Option<f64>) -> String {
    let Some(mut size) = value.filter(|v| v.abs() > 0.0) else {
        return "0 B".to_string();
    };

    let mut unit = UNITS[0];
    for (index, candidate) in UNITS.iter().enumerate() {
        unit = *candidate;
        if size.abs() < 1024.0 || index == UNITS.len() - 1 {
            break;
        }
        size /= 1024.0;
    }

    format!("{} {unit}", group_thousands(&format!("{size:.2}")))
}

/// Transfer rate, e.g. `"1.50 MB/s"`. Absent or zero reads as `"0 B/s"`.
pub fn format_speed(value: Option<f64>) -> String {
    format!("{}/s", format_bytes(value))
}

/// Percentage from a progress label such as `" 42.5%"`, clamped to 0..=100.
pub fn parse_percent(label: &str) -> Option<f64> {
    let value: f64 = label.trim().trim_end_matches('%').trim().parse().ok()?;
    value.is_finite().then(|| value.clamp(0.0, 100.0))
}

/// Insert `,` between groups of three integer digits.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut grouped = String::with_capacity(number.len() + int_part.len() / 3);
    for (index, digit) in int_part.chars().enumerate() {
        if index > 0 && (int_part.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
