//! Arbitrary-precision decimal helpers shared by the parser, analyzer, interpreter and generator.

use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Renders `value` without an exponent, keeping its scale: `4.00` stays `4.00`.
pub fn to_plain_string(value: &BigDecimal) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    if scale <= 0 {
        return (digits * pow10(scale.unsigned_abs())).to_string();
    }

    let scale = scale.unsigned_abs() as usize;
    let mut text = digits.abs().to_string();
    if text.len() <= scale {
        text.insert_str(0, &"0".repeat(scale + 1 - text.len()));
    }
    text.insert(text.len() - scale, '.');
    if digits.is_negative() {
        text.insert(0, '-');
    }
    text
}

/// Whether `value` is representable as a finite `f64`.
pub fn is_finite(value: &BigDecimal) -> bool {
    to_plain_string(value)
        .parse::<f64>()
        .is_ok_and(f64::is_finite)
}

/// Exact quotient rounded half-to-even to the scale of `dividend`.
///
/// Returns `None` when `divisor` is zero.
pub fn divide_half_even(dividend: &BigDecimal, divisor: &BigDecimal) -> Option<BigDecimal> {
    if divisor.is_zero() {
        return None;
    }
    let (left, scale) = dividend.as_bigint_and_exponent();
    let (right, right_scale) = divisor.as_bigint_and_exponent();

    // dividend / divisor * 10^scale == left * 10^right_scale / right
    let (numerator, denominator) = if right_scale >= 0 {
        (left * pow10(right_scale.unsigned_abs()), right)
    } else {
        (left, right * pow10(right_scale.unsigned_abs()))
    };

    let quotient = &numerator / &denominator;
    let remainder = &numerator % &denominator;
    let round_away = match (remainder.abs() * 2u32).cmp(&denominator.abs()) {
        Ordering::Greater => true,
        Ordering::Equal => !(&quotient % 2u32).is_zero(),
        Ordering::Less => false,
    };
    let quotient = match (round_away, numerator.is_negative() != denominator.is_negative()) {
        (false, _) => quotient,
        (true, false) => quotient + 1u32,
        (true, true) => quotient - 1u32,
    };
    Some(BigDecimal::new(quotient, scale))
}

fn pow10(exponent: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u32), exponent as usize)
}
