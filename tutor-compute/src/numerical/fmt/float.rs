//! Utility functions to format floating-point numbers.

use rug::{float::Round, Float};
use std::{cmp::Ordering, fmt::Formatter};
use super::{FormatOptions, NumberFormat, Scientific};

/// The number of digits written when no precision is requested.
const FULL_PRECISION: usize = 145;

/// Returns true if the given float is small or large enough that it should be formatted in
/// scientific notation.
pub fn should_use_scientific(n: &Float, precision: Option<usize>) -> bool {
    let abs = n.as_abs();
    if *abs <= 1e-6 || *abs >= 1e+12 {
        return !n.is_zero();
    }

    // more integer digits than significant digits would print misleading zeros
    let Some(digits) = precision.map(|digits| digits.max(1)) else {
        return false;
    };
    n.to_sign_string_exp_round(10, Some(digits), Round::Nearest).2
        .is_some_and(|exponent| exponent > digits as i32)
}

/// Trims trailing zeros from the fractional part of a string assumed to represent a single
/// number in decimal notation.
fn trim_trailing(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Formats a float as a standard number.
fn fmt_decimal(f: &mut Formatter<'_>, n: &Float, precision: Option<usize>) -> std::fmt::Result {
    if !n.is_normal() {
        if n.is_nan() {
            return write!(f, "NaN");
        } else if n.is_infinite() {
            return write!(f, "{}∞", if n.is_sign_negative() { "-" } else { "" });
        } else if n.is_zero() {
            return write!(f, "0");
        }
    }

    let digits = precision.unwrap_or(FULL_PRECISION);
    let (sign, mut s, exponent) = n.to_sign_string_exp_round(10, Some(digits), Round::Nearest);
    let Some(exponent) = exponent else {
        return write!(f, "0");
    };

    // add decimal point
    match exponent.cmp(&0) {
        Ordering::Less => s.insert_str(0, &format!("0.{}", "0".repeat(-exponent as usize))),
        Ordering::Equal => s.insert_str(0, "0."),
        Ordering::Greater => {
            let exponent = exponent as usize;
            match s.len().cmp(&exponent) {
                // if there are not enough digits before the decimal point, add zeros
                Ordering::Less => s.push_str(&"0".repeat(exponent - s.len())),

                // place the decimal point in the correct place
                Ordering::Greater => s.insert(exponent, '.'),

                // if len == exponent, the decimal point would be at the end of the string, so we
                // don't add anything
                Ordering::Equal => {},
            }
        },
    }

    let s = if precision.is_some() { &s } else { trim_trailing(&s) };
    write!(f, "{}{}", if sign { "-" } else { "" }, s)
}

/// Formats a float in scientific notation.
pub fn fmt_scientific(
    f: &mut Formatter<'_>,
    n: &Float,
    precision: Option<usize>,
    scientific_suffix: Scientific,
) -> std::fmt::Result {
    if !n.is_normal() {
        return fmt_decimal(f, n, precision);
    }

    let digits = precision.unwrap_or(FULL_PRECISION);
    let (sign, mut s, exponent) = n.to_sign_string_exp_round(10, Some(digits), Round::Nearest);
    let Some(mut exponent) = exponent else {
        return write!(f, "0");
    };

    // add decimal point
    if s.len() > 1 {
        s.insert(1, '.');
    }

    // subtract 1 from the exponent because we inserted a decimal point after the first digit
    exponent -= 1;

    let s = if precision.is_some() { &s } else { trim_trailing(&s) };
    write!(f, "{}{}{}{}",
        if sign { "-" } else { "" },
        s,
        match scientific_suffix {
            Scientific::Times => " × 10 ^ ",
            Scientific::E => "E",
        },
        exponent,
    )
}

/// Format a floating-point number using the given formatting options.
pub fn fmt_float(f: &mut Formatter<'_>, n: &Float, options: &FormatOptions) -> std::fmt::Result {
    match options.number {
        NumberFormat::Auto => {
            if should_use_scientific(n, options.precision) {
                fmt_scientific(f, n, options.precision, options.scientific)
            } else {
                fmt_decimal(f, n, options.precision)
            }
        },
        NumberFormat::Decimal => fmt_decimal(f, n, options.precision),
        NumberFormat::Scientific => fmt_scientific(f, n, options.precision, options.scientific),
    }
}
