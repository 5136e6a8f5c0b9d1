//! Decimal rendering shared by the report tables.
//!
//! Values are rounded to two decimals and printed as the shortest decimal that reads back to
//! the same `f64`, always keeping at least one fractional digit (`500.0`, `0.25`, `12.34`).

/// Rounds to two decimal places.
///
/// The rounding is done on the exact binary value (ties go to even), then the decimal text is
/// read back so the result is the `f64` closest to the rounded decimal.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

pub fn format_decimal(value: f64) -> String {
    // -0.0 prints as 0.0
    let value = if value == 0.0 { 0.0 } else { value };
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Prefixes `+` for values >= 0 and a single `-` for negatives.
pub fn format_signed(value: f64) -> String {
    if value < 0.0 {
        format!("-{}", format_decimal(-value))
    } else {
        format!("+{}", format_decimal(value))
    }
}

#[cfg(test)]
mod tests {
    use super::{format_decimal, format_signed, round2};

    #[test]
    fn test_round2_keeps_two_decimals() {
        assert_eq!(round2(1234.5678), 1234.57);
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(round2(-3.14159), -3.14);
        assert_eq!(round2(10.000000000000002), 10.0);
    }

    #[test]
    fn test_format_decimal_always_has_fraction() {
        assert_eq!(format_decimal(500.0), "500.0");
        assert_eq!(format_decimal(0.25), "0.25");
        assert_eq!(format_decimal(12.3), "12.3");
        assert_eq!(format_decimal(-0.0), "0.0");
    }

    #[test]
    fn test_format_signed_never_doubles_sign() {
        assert_eq!(format_signed(0.0), "+0.0");
        assert_eq!(format_signed(-0.0), "+0.0");
        assert_eq!(format_signed(4.5), "+4.5");
        assert_eq!(format_signed(-4.5), "-4.5");
        for value in [-1000.25, -0.01, 0.0, 0.01, 1000.25] {
            let text = format_signed(value);
            assert!(!text.contains("+-") && !text.contains("--"), "{text}");
        }
    }
}
