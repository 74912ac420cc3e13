//! Number formatting for display

/// Group an integer's digits in thousands: `150311` -> `150,311`
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole-dollar amount: `269999.6` -> `$270,000`
pub fn dollars(amount: f64) -> String {
    let rounded = amount.round() as i64;
    if rounded < 0 {
        format!("-${}", thousands(-rounded))
    } else {
        format!("${}", thousands(rounded))
    }
}

/// R² as a percentage with the given decimals: `0.8391` -> `83.9%`
pub fn r2_percent(r2: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, r2 * 100.0)
}
