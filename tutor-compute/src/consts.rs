//! Additional constants used in the library. This module consists of static constants that return
//! [`Float`]s and [`Complex`] numbers with the given value.

use once_cell::sync::Lazy;
use rug::{ops::Pow, Complex, Float};
use super::primitive::{complex, float};

pub static ZERO: Lazy<Float> = Lazy::new(|| float(0));

pub static ONE: Lazy<Float> = Lazy::new(|| float(1));

/// The imaginary unit.
pub static I: Lazy<Complex> = Lazy::new(|| complex((0, 1)));

/// Euler's number.
pub static E: Lazy<Float> = Lazy::new(|| float(1).exp());

pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());

/// Magnitude below which a computed number is treated as zero.
///
/// Values are computed with [`PRECISION`](crate::primitive::PRECISION) bits (about 154 decimal
/// digits), so anything this small is rounding noise.
pub static ZERO_TOLERANCE: Lazy<Float> = Lazy::new(|| float(10).pow(-60));

/// Relative distance below which two roots are considered the same root.
pub static ROOT_TOLERANCE: Lazy<Float> = Lazy::new(|| float(10).pow(-40));
