//! Fixed-precision decimal rendering.
//!
//! All comparisons and arithmetic in the engine stay on
//! [`rust_decimal::Decimal`]; strings are produced only at the
//! formatting boundary, at the instrument's configured digit counts.

use rust_decimal::Decimal;

/// Render `value` with exactly `digits` fractional digits.
///
/// The value is rounded at that scale first (banker's rounding), so the
/// precision in the format string only pads trailing zeros.
pub fn format_fixed(value: Decimal, digits: u32) -> String {
    let rounded = value.round_dp(digits);
    format!("{:.*}", digits as usize, rounded)
}
