//! Fixed-point scaling shared by the normalizer and the single-pair extractor
//!
//! Prices travel as decimal strings, are averaged in `f64` and end up as
//! integers scaled by `10^precision`. Plain double-precision arithmetic is
//! kept on purpose so the same input always lands on the same integer.

/// Parse an exchange decimal string into a usable price.
///
/// Returns `None` for anything that is not a finite, non-negative number.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let value = s.trim().parse::<f64>().ok()?;
    finite_price(value)
}

/// Reject NaN, infinities and negative prices
pub fn finite_price(value: f64) -> Option<f64> {
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Arithmetic mean of the daily bounds
pub fn midpoint(high: f64, low: f64) -> f64 {
    (high + low) / 2.0
}

/// `round(price * 10^precision)`, half away from zero.
///
/// Values beyond `u64::MAX` (huge precisions included) saturate; NaN and
/// negative input yield 0.
pub fn scale_to_integer(price: f64, precision: u32) -> u64 {
    let exponent = i32::try_from(precision).unwrap_or(i32::MAX);
    let multiplier = 10f64.powi(exponent);
    let scaled = (price * multiplier).round();
    if scaled.is_nan() || scaled <= 0.0 {
        return 0;
    }
    // `as` saturates at u64::MAX, +inf included
    scaled as u64
}
