use std::num::NonZeroI64;

use num_integer::Integer;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const ONE: NonZeroI64 = unsafe { NonZeroI64::new_unchecked(1) };

/// A numerator over a non-zero denominator, stored exactly as given.
///
/// No operation reduces the terms or normalizes the sign: `8/3 + 1/9` is
/// `75/27` and `3/-4` stays `3/-4`.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct Fraction {
    numerator: i64,
    denominator: NonZeroI64,
}

struct InnerDisplayFraction<'a>(&'a Fraction);

impl std::fmt::Debug for InnerDisplayFraction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0.numerator, self.0.denominator)
    }
}

impl std::fmt::Display for Fraction {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&InnerDisplayFraction(self), f)
    }
}

impl std::fmt::Debug for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Fraction")
            .field(&InnerDisplayFraction(self))
            .finish()
    }
}

impl Default for Fraction {
    #[inline]
    fn default() -> Self {
        Fraction {
            numerator: 0,
            denominator: ONE,
        }
    }
}

impl From<i64> for Fraction {
    #[inline]
    fn from(numerator: i64) -> Self {
        Fraction {
            numerator,
            denominator: ONE,
        }
    }
}

impl From<Fraction> for f64 {
    #[inline]
    fn from(value: Fraction) -> Self {
        value.to_f64()
    }
}

bitflags::bitflags! {
    /// Unary predicates that hold for a fraction, see [`Fraction::properties`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Properties: u8 {
        const ZERO = 1 << 0;
        const INTEGER = 1 << 1;
        const PROPER = 1 << 2;
        const UNIT = 1 << 3;
    }
}

/// Integer part and remainder of a fraction, using floor division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MixedNumber {
    /// Wide enough for `i64::MIN / -1`.
    pub integer: i128,
    /// Takes the sign of the denominator.
    pub remainder: i64,
    pub denominator: i64,
}

impl std::fmt::Display for MixedNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Le nombre mixte est {} et {}/{}",
            self.integer, self.remainder, self.denominator
        )
    }
}

#[inline(always)]
fn mul(x: i64, y: i64, op: &'static str) -> Result<i64> {
    x.checked_mul(y).ok_or(Error::Overflow(op))
}

/// `trunc(base ** exponent)` computed in floating point.
fn pow_trunc(base: i64, exponent: f64) -> Result<i64> {
    if base == 0 && exponent < 0.0 {
        return Err(Error::DivisionByZero);
    }
    let value = (base as f64).powf(exponent);
    if value.is_nan() {
        return Err(Error::NotReal);
    }
    let value = value.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(Error::Overflow("exponentiate"))
    }
}

impl Fraction {
    /// Builds `numerator/denominator` without reducing it.
    ///
    /// Fails with [`Error::DivisionByZero`] when `denominator` is zero.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self> {
        let Some(denominator) = NonZeroI64::new(denominator) else {
            tracing::trace!(numerator, "rejected zero denominator");
            return Err(Error::DivisionByZero);
        };
        Ok(Self {
            numerator,
            denominator,
        })
    }

    #[inline(always)]
    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    #[inline(always)]
    pub const fn denominator(&self) -> i64 {
        self.denominator.get()
    }

    #[inline]
    pub fn set_numerator(&mut self, numerator: i64) {
        self.numerator = numerator;
    }

    /// Replaces the denominator, leaving the fraction untouched when
    /// `denominator` is zero.
    pub fn set_denominator(&mut self, denominator: i64) -> Result<()> {
        let Some(denominator) = NonZeroI64::new(denominator) else {
            tracing::trace!(fraction = %self, "rejected zero denominator");
            return Err(Error::DivisionByZero);
        };
        self.denominator = denominator;
        Ok(())
    }

    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator.get() as f64
    }

    pub fn mixed(&self) -> MixedNumber {
        let denominator = self.denominator.get();
        let (integer, remainder) = i128::from(self.numerator).div_mod_floor(&denominator.into());
        MixedNumber {
            integer,
            // |remainder| < |denominator|
            remainder: remainder as i64,
            denominator,
        }
    }

    #[inline]
    pub fn as_mixed_number(&self) -> String {
        self.mixed().to_string()
    }

    /// `a/b + c/d = (a·d + c·b)/(b·d)`
    pub fn try_add(self, other: Self) -> Result<Self> {
        let (a, b, c, d) = (
            self.numerator,
            self.denominator(),
            other.numerator,
            other.denominator(),
        );
        (|| {
            let numerator = mul(a, d, "add")?
                .checked_add(mul(c, b, "add")?)
                .ok_or(Error::Overflow("add"))?;
            Self::new(numerator, mul(b, d, "add")?)
        })()
        .inspect_err(|err| tracing::trace!(lhs = %self, rhs = %other, %err, "add failed"))
    }

    /// `a/b - c/d = (a·d - c·b)/(b·d)`
    pub fn try_sub(self, other: Self) -> Result<Self> {
        let (a, b, c, d) = (
            self.numerator,
            self.denominator(),
            other.numerator,
            other.denominator(),
        );
        (|| {
            let numerator = mul(a, d, "subtract")?
                .checked_sub(mul(c, b, "subtract")?)
                .ok_or(Error::Overflow("subtract"))?;
            Self::new(numerator, mul(b, d, "subtract")?)
        })()
        .inspect_err(|err| tracing::trace!(lhs = %self, rhs = %other, %err, "subtract failed"))
    }

    /// `a/b * c/d = (a·c)/(b·d)`
    pub fn try_mul(self, other: Self) -> Result<Self> {
        (|| {
            Self::new(
                mul(self.numerator, other.numerator, "multiply")?,
                mul(self.denominator(), other.denominator(), "multiply")?,
            )
        })()
        .inspect_err(|err| tracing::trace!(lhs = %self, rhs = %other, %err, "multiply failed"))
    }

    /// `a/b / c/d = (a·d)/(b·c)`
    ///
    /// Fails with [`Error::DivisionByZero`] when the divisor's numerator is
    /// zero.
    pub fn try_div(self, other: Self) -> Result<Self> {
        (|| {
            if other.numerator == 0 {
                return Err(Error::DivisionByZero);
            }
            Self::new(
                mul(self.numerator, other.denominator(), "divide")?,
                mul(self.denominator(), other.numerator, "divide")?,
            )
        })()
        .inspect_err(|err| tracing::trace!(lhs = %self, rhs = %other, %err, "divide failed"))
    }

    /// Raises both terms to `exponent` as a float and truncates the results.
    ///
    /// This is an approximation: `(1/9).try_pow(7/4)` is `1/46`, since
    /// `9^1.75 ≈ 46.77`.
    pub fn try_pow(self, exponent: Self) -> Result<Self> {
        let x = exponent.to_f64();
        (|| {
            let numerator = pow_trunc(self.numerator, x)?;
            let denominator = pow_trunc(self.denominator(), x)?;
            Self::new(numerator, denominator)
        })()
        .inspect_err(|err| tracing::trace!(base = %self, %exponent, %err, "power failed"))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    pub fn is_integer(&self) -> bool {
        // only i64::MIN % -1 overflows, and it divides evenly
        self.numerator
            .checked_rem(self.denominator.get())
            .is_none_or(|r| r == 0)
    }

    #[inline]
    pub fn is_proper(&self) -> bool {
        self.to_f64().abs() < 1.0
    }

    /// Checks the stored numerator, so `2/2` is not a unit fraction.
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.numerator.unsigned_abs() == 1
    }

    /// `|a·d - c·b| == 1`, on the unreduced terms.
    pub fn is_adjacent_to(&self, other: &Self) -> bool {
        let left = i128::from(self.numerator) * i128::from(other.denominator());
        let right = i128::from(other.numerator) * i128::from(self.denominator());
        (left - right).unsigned_abs() == 1
    }

    pub fn properties(&self) -> Properties {
        let mut props = Properties::empty();
        if self.is_zero() {
            props |= Properties::ZERO;
        }
        if self.is_integer() {
            props |= Properties::INTEGER;
        }
        if self.is_proper() {
            props |= Properties::PROPER;
        }
        if self.is_unit() {
            props |= Properties::UNIT;
        }
        props
    }
}

macro_rules! binop {
    ($Op:ident::$op:ident, $OpAssign:ident::$op_assign:ident, $try:ident) => {
        impl std::ops::$Op for Fraction {
            type Output = Fraction;

            #[inline]
            fn $op(mut self, rhs: Fraction) -> Self::Output {
                std::ops::$OpAssign::$op_assign(&mut self, rhs);
                self
            }
        }

        impl std::ops::$Op<i64> for Fraction {
            type Output = Fraction;

            #[inline]
            fn $op(self, rhs: i64) -> Self::Output {
                let rhs: Fraction = rhs.into();
                std::ops::$Op::$op(self, rhs)
            }
        }

        impl std::ops::$OpAssign for Fraction {
            fn $op_assign(&mut self, rhs: Fraction) {
                match self.$try(rhs) {
                    Ok(v) => *self = v,
                    Err(err) => panic!("{err}"),
                }
            }
        }

        impl std::ops::$OpAssign<i64> for Fraction {
            #[inline]
            fn $op_assign(&mut self, rhs: i64) {
                let rhs: Fraction = rhs.into();
                std::ops::$OpAssign::$op_assign(self, rhs);
            }
        }
    };
}

binop!(Add::add, AddAssign::add_assign, try_add);
binop!(Sub::sub, SubAssign::sub_assign, try_sub);
binop!(Mul::mul, MulAssign::mul_assign, try_mul);
binop!(Div::div, DivAssign::div_assign, try_div);

impl std::ops::Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Self::Output {
        let Some(numerator) = self.numerator.checked_neg() else {
            panic!("{}", Error::Overflow("negate"));
        };
        Fraction { numerator, ..self }
    }
}

impl std::cmp::PartialEq for Fraction {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.to_f64() == other.to_f64()
    }
}

impl std::cmp::PartialEq<i64> for Fraction {
    fn eq(&self, other: &i64) -> bool {
        let other: Fraction = (*other).into();
        *self == other
    }
}

impl std::cmp::PartialOrd for Fraction {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.to_f64().partial_cmp(&other.to_f64())
    }
}

impl std::cmp::PartialOrd<i64> for Fraction {
    fn partial_cmp(&self, other: &i64) -> Option<std::cmp::Ordering> {
        let other: Fraction = (*other).into();
        std::cmp::PartialOrd::partial_cmp(self, &other)
    }
}
