//! Fixed-point arithmetic
//!
//! Values are `i64` raw integers scaled by `2^PRECISION`. Products and
//! squares are taken in `i128` and are NOT rescaled: the force formula
//! divides an unrescaled product by an unrescaled square, and that exact
//! scaling is what the game plays like.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::consts::PRECISION;

/// A real number stored as `raw / 2^PRECISION`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fixed(i64);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(1 << PRECISION);

    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Whole units, shifted into fixed-point
    #[inline]
    pub const fn from_int(value: i64) -> Self {
        Self(value << PRECISION)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Whole units, rounded toward negative infinity
    #[inline]
    pub const fn to_int(self) -> i64 {
        self.0 >> PRECISION
    }

    /// Raw product at combined scale (`2^(2*PRECISION)`)
    #[inline]
    pub const fn wide_mul(self, rhs: Fixed) -> i128 {
        self.0 as i128 * rhs.0 as i128
    }

    #[inline]
    pub const fn square(self) -> i128 {
        self.wide_mul(self)
    }

    /// Narrow a wide raw value, saturating at the `i64` range
    pub fn from_wide(wide: i128) -> Self {
        match i64::try_from(wide) {
            Ok(raw) => Self(raw),
            Err(_) if wide < 0 => Self(i64::MIN),
            Err(_) => Self(i64::MAX),
        }
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

/// Integer division rounding toward negative infinity.
///
/// Rust's `/` truncates toward zero; the simulation needs floor semantics
/// for negative operands (`-7 // 2 == -4`, `7 // -2 == -4`).
#[inline]
pub fn floor_div(a: i128, b: i128) -> i128 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

impl Add for Fixed {
    type Output = Fixed;

    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    #[inline]
    fn neg(self) -> Fixed {
        Fixed(self.0.saturating_neg())
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Fixed) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Fixed) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 >> PRECISION;
        let frac = self.0 & ((1 << PRECISION) - 1);
        // Six decimal places is plenty for logs
        let micros = (frac as i128 * 1_000_000) >> PRECISION;
        write!(f, "{whole}+{micros:06}e-6")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_div_signs() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(7, -2), -4);
        assert_eq!(floor_div(-7, -2), 3);
        assert_eq!(floor_div(-8, 2), -4);
        assert_eq!(floor_div(0, -5), 0);
    }

    #[test]
    fn test_from_int_and_back() {
        assert_eq!(Fixed::from_int(3).raw(), 3 << 24);
        assert_eq!(Fixed::from_int(-3).to_int(), -3);
        // Floor, not truncation
        assert_eq!(Fixed::from_raw(-1).to_int(), -1);
        assert_eq!(Fixed::from_raw((1 << 24) - 1).to_int(), 0);
    }

    #[test]
    fn test_wide_mul_is_unrescaled() {
        let a = Fixed::from_int(12);
        let b = Fixed::from_int(1);
        assert_eq!(a.wide_mul(b), 12i128 << 48);
        assert_eq!(Fixed::from_int(1000).square(), (1000i128 << 24) * (1000i128 << 24));
    }

    #[test]
    fn test_from_wide_saturates() {
        assert_eq!(Fixed::from_wide(42).raw(), 42);
        assert_eq!(Fixed::from_wide(i128::MAX).raw(), i64::MAX);
        assert_eq!(Fixed::from_wide(i128::MIN).raw(), i64::MIN);
    }

    #[test]
    fn test_add_sub_exact() {
        let a = Fixed::from_raw(5);
        let b = Fixed::from_raw(-12);
        assert_eq!((a + b).raw(), -7);
        assert_eq!((a - b).raw(), 17);
        assert_eq!((-a).raw(), -5);

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn test_display() {
        assert_eq!(Fixed::from_int(2).to_string(), "2+000000e-6");
        assert_eq!(Fixed::from_raw(1 << 23).to_string(), "0+500000e-6");
    }
}
