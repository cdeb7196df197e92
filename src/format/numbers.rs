// Number formatting for human output

/// Format a count with thousands separators.
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let lead = match digits.len() % 3 {
        0 => 3,
        n => n,
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.char_indices() {
        if idx >= lead && (idx - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a float using the shortest round-trippable representation.
pub fn format_float_shortest(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let plain = value.to_string();
    let scientific = format_scientific_short(value);
    if scientific.len() < plain.len() {
        scientific
    } else {
        plain
    }
}

/// Format a value already expressed in percent, one decimal place.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format a ratio in [0, 1] as a percentage with one decimal place.
pub fn format_ratio_percent(value: f64) -> String {
    format_percent(value * 100.0)
}

/// Priority scores are shown with three decimals so close ranks stay distinct.
pub fn format_score(value: f64) -> String {
    format!("{value:.3}")
}

/// Effort in hours, e.g. `4h` or `2.5h`.
pub fn format_hours(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{}h", format_float_shortest(rounded))
}

fn format_scientific_short(value: f64) -> String {
    let raw = format!("{:e}", value);
    let (mantissa, exponent) = match raw.split_once('e') {
        Some(parts) => parts,
        None => return raw,
    };

    let mantissa = trim_mantissa(mantissa);
    let exponent = trim_exponent(exponent);
    format!("{mantissa}e{exponent}")
}

fn trim_mantissa(input: &str) -> String {
    let mut out = input.to_string();
    if let Some(dot_index) = out.find('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.len() == dot_index + 1 {
            out.pop();
        }
    }
    out
}

fn trim_exponent(input: &str) -> String {
    let (sign, digits) = match input.as_bytes().first() {
        Some(b'+') => ("", &input[1..]),
        Some(b'-') => ("-", &input[1..]),
        _ => ("", input),
    };
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        format!("{sign}0")
    } else {
        format!("{sign}{digits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_count_with_commas() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(12), "12");
        assert_eq!(format_count(123), "123");
        assert_eq!(format_count(1234), "1,234");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn formats_float_shortest() {
        assert_eq!(format_float_shortest(1.0), "1");
        assert_eq!(format_float_shortest(1.25), "1.25");
        assert_eq!(format_float_shortest(1e-9), "1e-9");
    }

    #[test]
    fn formats_percentages() {
        assert_eq!(format_percent(72.46), "72.5%");
        assert_eq!(format_percent(100.0), "100.0%");
        assert_eq!(format_ratio_percent(0.7), "70.0%");
    }

    #[test]
    fn formats_scores_and_hours() {
        assert_eq!(format_score(0.95), "0.950");
        assert_eq!(format_hours(16.0), "16h");
        assert_eq!(format_hours(2.54), "2.5h");
        assert_eq!(format_hours(0.0), "0h");
    }
}
