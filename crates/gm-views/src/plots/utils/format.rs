//! Number formatting for labels and tooltips

const SI_SUFFIXES: [&str; 7] = ["", "k", "M", "G", "T", "P", "E"];

/// Tooltip value: plain grouped integer below 500, otherwise three
/// significant digits with an SI suffix ("1.23k")
pub fn format_value(value: u64) -> String {
    if value < 500 {
        return group_thousands(value);
    }

    let mut exponent = 0;
    let mut scaled = value as f64;
    while scaled >= 1000.0 && exponent + 1 < SI_SUFFIXES.len() {
        scaled /= 1000.0;
        exponent += 1;
    }

    let mut text = with_significant_digits(scaled);
    // rounding can carry into the next power, e.g. 999_999 -> "1000k"
    if text.starts_with("1000") && exponent + 1 < SI_SUFFIXES.len() {
        exponent += 1;
        text = with_significant_digits(scaled / 1000.0);
    }
    format!("{}{}", text, SI_SUFFIXES[exponent])
}

fn with_significant_digits(scaled: f64) -> String {
    let integer_digits = |x: f64| if x >= 100.0 { 3 } else if x >= 10.0 { 2 } else { 1 };
    let factor = 10f64.powi(3 - integer_digits(scaled));
    let rounded = (scaled * factor).round() / factor;
    format!("{:.*}", (3 - integer_digits(rounded)) as usize, rounded)
}

/// Integer with comma thousands separators
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
