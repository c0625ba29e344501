//! Formatting of numbers for display.

pub mod complex;
pub mod float;

use std::fmt::{Display, Formatter};
use super::Number;

/// Formatting options for numbers.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FormatOptions {
    /// How to format a number.
    pub number: NumberFormat,

    /// Which suffix notation to use for scientific notation.
    ///
    /// This option is ignored if [`number`] is [`NumberFormat::Decimal`].
    ///
    /// [`number`]: FormatOptions::number
    pub scientific: Scientific,

    /// The number of significant digits to show. If [`None`], the number is formatted with full
    /// precision and trailing zeros are trimmed.
    ///
    /// When set, exactly this many significant digits are written, including trailing zeros, so
    /// four digits renders the number four as `4.000`.
    ///
    /// This option **does not** control the precision of the number during calculation, only the
    /// number of digits to display during formatting.
    pub precision: Option<usize>,
}

impl FormatOptions {
    /// Wraps the given [`FormatOptions`] into a builder for further customization.
    pub fn into_builder(self) -> FormatOptionsBuilder {
        FormatOptionsBuilder(self)
    }
}

/// The different ways to format a number.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum NumberFormat {
    /// Chooses between decimal and scientific notation based on the magnitude of the number.
    ///
    /// Numbers that are in the ranges `[-1e-6, 1e-6]` U `[-inf, -1e+12] U [1e+12, inf]` will be
    /// represented in scientific notation, as will numbers with more integer digits than the
    /// requested [`precision`](FormatOptions::precision). All other numbers are formatted in
    /// decimal notation.
    ///
    /// This is the default option.
    #[default]
    Auto,

    /// Formats the number as a decimal, with no regard to the magnitude of the number.
    Decimal,

    /// Formats the number in scientific notation.
    Scientific,
}

/// The different ways to format the suffix of scientific notation.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Scientific {
    /// Formats the number in scientific notation, using the suffix `× 10^` to denote the exponent.
    ///
    /// This is the default option.
    #[default]
    Times,

    /// Formats the number in scientific notation, using `E` notation to denote the exponent.
    ///
    /// `E` is used instead of `e` to avoid ambiguity with Euler's number.
    E,
}

/// Helper struct to build a [`FormatOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FormatOptionsBuilder(FormatOptions);

impl FormatOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number format. See [`NumberFormat`] for more information.
    pub fn number(mut self, number: NumberFormat) -> Self {
        self.0.number = number;
        self
    }

    /// Sets the scientific notation suffix. See [`Scientific`] for more information.
    pub fn scientific(mut self, scientific: Scientific) -> Self {
        self.0.scientific = scientific;
        self
    }

    /// Sets the number of significant digits to show. See [`FormatOptions::precision`] for more
    /// information.
    pub fn precision(mut self, precision: Option<usize>) -> Self {
        self.0.precision = precision;
        self
    }

    /// Builds the [`FormatOptions`] struct.
    pub fn build(self) -> FormatOptions {
        self.0
    }
}

/// Formatter for a [`Number`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberFormatter<'a> {
    /// The number to format.
    pub number: &'a Number,

    /// The options to use when formatting.
    pub options: FormatOptions,
}

impl Display for NumberFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.number {
            Number::Rational(_) => float::fmt_float(f, &self.number.real_part(), &self.options),
            Number::Complex(c) => complex::fmt_complex(f, c, &self.options),
        }
    }
}

impl Number {
    /// Returns a formatter that displays the number with the given options.
    pub fn fmt(&self, options: FormatOptions) -> NumberFormatter<'_> {
        NumberFormatter { number: self, options }
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::{complex, rational};
    use pretty_assertions::assert_eq;
    use super::*;

    fn four_digits() -> FormatOptions {
        FormatOptionsBuilder::new()
            .precision(Some(4))
            .scientific(Scientific::E)
            .build()
    }

    fn display(n: Number) -> String {
        n.fmt(four_digits()).to_string()
    }

    #[test]
    fn significant_digits() {
        assert_eq!(display(Number::Rational(rational(4))), "4.000");
        assert_eq!(display(Number::Rational(rational((4, 3)))), "1.333");
        assert_eq!(display(Number::Rational(rational((1, 3)))), "0.3333");
        assert_eq!(display(Number::Rational(rational((-5, 2)))), "-2.500");
        assert_eq!(display(Number::Rational(rational(1234))), "1234");
        assert_eq!(display(Number::Rational(rational(9400))), "9400");
        assert_eq!(display(Number::Rational(rational(9600))), "9600");
        assert_eq!(display(Number::Rational(rational(9999))), "9999");
        assert_eq!(display(Number::Rational(rational(0))), "0");
    }

    #[test]
    fn scientific_when_too_many_digits() {
        assert_eq!(display(Number::Rational(rational(12345))), "1.235E4");
        // rounds up to five integer digits
        assert_eq!(display(Number::Rational(rational((99996, 10)))), "1.000E4");
        assert_eq!(display(Number::Rational(rational((1, 10_000_000)))), "1.000E-7");
    }

    #[test]
    fn complex_numbers() {
        assert_eq!(display(Number::Complex(complex((0, 1)))), "1.000i");
        assert_eq!(display(Number::Complex(complex((0, -1)))), "-1.000i");
        assert_eq!(display(Number::Complex(complex((1.5, -2)))), "1.500 - 2.000i");
        assert_eq!(display(Number::Complex(complex((-1, 0.5)))), "-1.000 + 0.5000i");
    }

    #[test]
    fn full_precision() {
        let n = Number::Rational(rational((5, 2)));
        assert_eq!(n.fmt(FormatOptions::default()).to_string(), "2.5");
        let i = Number::Complex(complex((0, 1)));
        assert_eq!(i.fmt(FormatOptions::default()).to_string(), "i");
    }
}
