//! Colombian peso formatting (`es-CO`: whole pesos, `.` thousands separator).

use crate::numbers::round_f64_to_i64;

/// Format an amount without currency symbol, e.g. `129900.4` -> `129.900`.
#[must_use]
pub fn format_amount(value: f64) -> String {
    let rounded = round_f64_to_i64(value);
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format an amount as a price, e.g. `$129.900`.
#[must_use]
pub fn format_price(value: f64) -> String {
    format!("${}", format_amount(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1.000");
        assert_eq!(format_amount(129_900.0), "129.900");
        assert_eq!(format_amount(1_234_567.6), "1.234.568");
    }

    #[test]
    fn negative_and_symbol() {
        assert_eq!(format_amount(-45_000.0), "-45.000");
        assert_eq!(format_price(59_900.0), "$59.900");
    }
}
