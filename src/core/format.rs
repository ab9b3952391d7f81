//! Result formatting for the display.

/// Decimal places kept when rendering a result.
pub const DEFAULT_DECIMAL_PLACES: u32 = 8;

/// Round half toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Render `value` rounded to [`DEFAULT_DECIMAL_PLACES`].
///
/// # Example
///
/// ```rust
/// use reckon::core::format_result;
///
/// assert_eq!(format_result(0.1 + 0.2), "0.3");
/// assert_eq!(format_result(4.0), "4");
/// assert_eq!(format_result(2.0 / 3.0), "0.66666667");
/// ```
pub fn format_result(value: f64) -> String {
    format_with_precision(value, DEFAULT_DECIMAL_PLACES)
}

/// Render `value` rounded to `places` decimals as minimal decimal text.
///
/// Integral values have no decimal point, trailing zeros are dropped and
/// no exponent is ever produced, so the text can be fed back into the
/// evaluator. Negative zero renders as `0`.
pub fn format_with_precision(value: f64, places: u32) -> String {
    let factor = 10f64.powi(places.min(i32::MAX as u32) as i32);
    let scaled = value * factor;

    let rounded = if value.fract() == 0.0 || !scaled.is_finite() {
        value
    } else {
        round_half_up(scaled) / factor
    };

    // -0.0 == 0.0, this collapses both zeros to positive zero
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };

    format!("{rounded}")
}
