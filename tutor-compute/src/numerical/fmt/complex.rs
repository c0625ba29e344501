//! Utility functions to format complex numbers.

use rug::{Complex, Float};
use std::fmt::Formatter;
use super::{float, FormatOptions, NumberFormat};

/// Helper function to format the imaginary part of the complex number, with or without
/// parentheses.
fn fmt_helper(f: &mut Formatter<'_>, n: &Float, options: &FormatOptions) -> std::fmt::Result {
    // with a fixed number of digits, `1.000i` is written out in full
    if options.precision.is_none() {
        if n == &1 {
            return write!(f, "i");
        } else if n == &-1 {
            return write!(f, "-i");
        }
    }

    // scientific notation needs parentheses around it to avoid ambiguity
    if options.number == NumberFormat::Scientific
        || options.number == NumberFormat::Auto && float::should_use_scientific(n, options.precision)
    {
        write!(f, "(")?;
        float::fmt_scientific(f, n, options.precision, options.scientific)?;
        write!(f, ")")?;
    } else {
        float::fmt_float(f, n, options)?;
    }

    write!(f, "i")
}

/// Formats a complex number as `a + bi`, `a - bi`, `bi`, or `a`.
pub fn fmt_complex(f: &mut Formatter<'_>, c: &Complex, options: &FormatOptions) -> std::fmt::Result {
    let (re, im) = (c.real(), c.imag());

    match (re.is_zero(), im.is_zero()) {
        (false, false) => {
            float::fmt_float(f, re, options)?;

            if im.is_sign_positive() {
                write!(f, " + ")?;
                fmt_helper(f, im, options)?;
            } else {
                write!(f, " - ")?;
                fmt_helper(f, &im.as_neg(), options)?;
            }

            Ok(())
        },
        (false, true) => float::fmt_float(f, re, options),
        (true, false) => fmt_helper(f, im, options),
        (true, true) => write!(f, "0"),
    }
}
