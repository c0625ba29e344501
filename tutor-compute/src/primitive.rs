//! Functions to construct [`Integer`]s, [`Rational`]s, [`Float`]s, and [`Complex`] numbers from
//! various types.

use rug::{Assign, Complex, Float, Integer, Rational};

/// The number of bits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string of decimal digits, as produced by the tokenizer.
pub fn int_from_str(s: &str) -> Integer {
    Integer::from_str_radix(s, 10).unwrap_or_default()
}

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a decimal literal such as `2.5`, `3.`, or `.25`.
pub fn float_from_str(s: &str) -> Float {
    let mut normalized = String::with_capacity(s.len() + 2);
    if s.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(s);
    if s.ends_with('.') {
        normalized.push('0');
    }

    Float::parse(&normalized)
        .map(|parsed| Float::with_val(PRECISION, parsed))
        .unwrap_or_else(|_| float(0))
}

/// Creates a [`Complex`] with the given value.
pub fn complex<T>(n: T) -> Complex
where
    Complex: Assign<T>,
{
    Complex::with_val(PRECISION, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_literals() {
        assert_eq!(float_from_str("2.5"), 2.5);
        assert_eq!(float_from_str("3."), 3.0);
        assert_eq!(float_from_str(".25"), 0.25);
    }

    #[test]
    fn integer_literals() {
        assert_eq!(int_from_str("12345678901234567890"), int(12345678901234567890u64));
    }
}
