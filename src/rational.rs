//! Exact arbitrary-precision rational numbers.
//!
//! A [`BigRational`] is always kept in canonical form: the denominator is
//! positive and shares no factor with the numerator. Every constructor and
//! every arithmetic result goes through [`BigRational::normalize`], so
//! derived equality and hashing are value equality.

use crate::arith;
use crate::chars::is_digit;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Errors from constructing or parsing rationals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RationalError {
    #[error("division by zero")]
    DivideByZero,

    #[error("invalid number format: {0:?}")]
    Format(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigRational {
    num: BigInt,
    den: BigInt,
}

impl BigRational {
    /// Build `num/den` in lowest terms.
    pub fn new(num: BigInt, den: BigInt) -> Result<Self, RationalError> {
        if den.is_zero() {
            return Err(RationalError::DivideByZero);
        }
        Ok(Self::normalize(num, den))
    }

    pub fn from_integer(num: BigInt) -> Self {
        Self {
            num,
            den: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(BigInt::zero())
    }

    pub fn one() -> Self {
        Self::from_integer(BigInt::one())
    }

    /// Caller guarantees `den != 0`.
    fn normalize(mut num: BigInt, mut den: BigInt) -> Self {
        debug_assert!(!den.is_zero());
        if den.is_negative() {
            num = -num;
            den = -den;
        }
        let g = num.gcd(&den);
        if !g.is_one() {
            num /= &g;
            den /= &g;
        }
        Self { num, den }
    }

    pub fn numer(&self) -> &BigInt {
        &self.num
    }

    pub fn denom(&self) -> &BigInt {
        &self.den
    }

    /// -1, 0 or 1.
    pub fn signum(&self) -> i32 {
        if self.num.is_negative() {
            -1
        } else if self.num.is_zero() {
            0
        } else {
            1
        }
    }

    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }

    pub fn checked_div(&self, b: &BigRational) -> Result<BigRational, RationalError> {
        Self::new(&self.num * &b.den, &self.den * &b.num)
    }

    pub fn floor(&self) -> BigInt {
        arith::divide_floor(&self.num, &self.den)
    }

    pub fn ceil(&self) -> BigInt {
        arith::divide_floor(&(&self.num + &self.den - 1), &self.den)
    }

    pub fn truncate(&self) -> BigInt {
        arith::divide_truncate(&self.num, &self.den)
    }

    /// Nearest integer; an exact half (reduced denominator 2) goes to the
    /// even neighbour.
    pub fn round(&self) -> BigInt {
        let n = (&self.num << 1usize) + &self.den;
        let d = &self.den << 1usize;
        let r = arith::divide_floor(&n, &d);
        if self.num.is_odd() && self.den == BigInt::from(2) && r.is_odd() {
            r - 1
        } else {
            r
        }
    }

    // Quotients and remainders of the three division conventions. The
    // quotients are integral; all panic when `b` is zero.

    pub fn divide_floor(&self, b: &BigRational) -> BigRational {
        let (n, d) = self.cross(b);
        Self::from_integer(arith::divide_floor(&n, &d))
    }

    pub fn divide_euclidean(&self, b: &BigRational) -> BigRational {
        let (n, d) = self.cross(b);
        Self::from_integer(arith::divide_euclidean(&n, &d))
    }

    pub fn divide_truncate(&self, b: &BigRational) -> BigRational {
        let (n, d) = self.cross(b);
        Self::from_integer(arith::divide_truncate(&n, &d))
    }

    pub fn remainder_floor(&self, b: &BigRational) -> BigRational {
        let (n, d) = self.cross(b);
        Self::from_integer(arith::remainder_floor(&n, &d))
    }

    pub fn remainder_euclidean(&self, b: &BigRational) -> BigRational {
        let (n, d) = self.cross(b);
        Self::from_integer(arith::remainder_euclidean(&n, &d))
    }

    pub fn remainder_truncate(&self, b: &BigRational) -> BigRational {
        let (n, d) = self.cross(b);
        Self::from_integer(arith::remainder_truncate(&n, &d))
    }

    fn cross(&self, b: &BigRational) -> (BigInt, BigInt) {
        (&self.num * &b.den, &self.den * &b.num)
    }

    /// Approximate value; may lose precision or overflow to infinity.
    ///
    /// Numerator and denominator convert separately, so when both exceed
    /// the `f64` range the result is NaN even for a value near 1.
    pub fn to_f64(&self) -> f64 {
        let n = self.num.to_f64().unwrap_or(f64::NAN);
        let d = self.den.to_f64().unwrap_or(f64::NAN);
        n / d
    }

    /// Exact value of the shortest decimal text that round-trips `value`.
    pub fn from_f64(value: f64) -> Result<Self, RationalError> {
        Self::parse_decimal(&value.to_string())
    }

    /// Parse `[+-]?\d+(\.\d+)?([eE][+-]?\d+)?` exactly.
    ///
    /// The effective power of ten is limited to [`MAX_DECIMAL_EXPONENT`] in
    /// magnitude; larger exponents are a format error.
    pub fn parse_decimal(s: &str) -> Result<Self, RationalError> {
        let err = || RationalError::Format(s.to_string());
        let bytes = s.as_bytes();
        let mut i = 0;

        let negative = match bytes.first() {
            Some(b'-') => {
                i += 1;
                true
            }
            Some(b'+') => {
                i += 1;
                false
            }
            _ => false,
        };

        let int_start = i;
        i = skip_digits(bytes, i);
        if i == int_start {
            return Err(err());
        }
        let mut mantissa = String::with_capacity(bytes.len());
        mantissa.push_str(&s[int_start..i]);

        let mut scale: i64 = 0;
        if bytes.get(i) == Some(&b'.') {
            let frac_start = i + 1;
            i = skip_digits(bytes, frac_start);
            if i == frac_start {
                return Err(err());
            }
            mantissa.push_str(&s[frac_start..i]);
            scale = (i - frac_start) as i64;
        }

        if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
            i += 1;
            let exp_start = i;
            if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
                i += 1;
            }
            let digits_start = i;
            i = skip_digits(bytes, i);
            if i == digits_start {
                return Err(err());
            }
            let exp: i64 = s[exp_start..i].parse().map_err(|_| err())?;
            scale = scale.checked_sub(exp).ok_or_else(err)?;
        }

        if i != bytes.len() {
            return Err(err());
        }

        let mut num = BigInt::from_str(&mantissa).map_err(|_| err())?;
        if negative {
            num = -num;
        }
        let power = |e: i64| -> Result<BigInt, RationalError> {
            if e > MAX_DECIMAL_EXPONENT {
                return Err(err());
            }
            let e = u32::try_from(e).map_err(|_| err())?;
            Ok(Pow::pow(BigInt::from(10u32), e))
        };
        if scale >= 0 {
            Ok(Self::normalize(num, power(scale)?))
        } else {
            Ok(Self::from_integer(num * power(-scale)?))
        }
    }
}

/// Largest power of ten `parse_decimal` will materialize.
pub const MAX_DECIMAL_EXPONENT: i64 = 100_000;

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_digit(bytes[i] as u32) {
        i += 1;
    }
    i
}

/// `[+-]?\d+` only; rejects the separators `BigInt::from_str` tolerates.
fn parse_integer(s: &str) -> Option<BigInt> {
    let digits = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| is_digit(b as u32)) {
        return None;
    }
    BigInt::from_str(s).ok()
}

impl From<BigInt> for BigRational {
    fn from(num: BigInt) -> Self {
        Self::from_integer(num)
    }
}

impl From<i64> for BigRational {
    fn from(num: i64) -> Self {
        Self::from_integer(BigInt::from(num))
    }
}

impl fmt::Display for BigRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Parses `n` or `n/d`, splitting on the first `/`.
impl FromStr for BigRational {
    type Err = RationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || RationalError::Format(s.to_string());
        match s.split_once('/') {
            None => parse_integer(s).map(Self::from_integer).ok_or_else(err),
            Some((n, d)) => {
                let n = parse_integer(n).ok_or_else(err)?;
                let d = parse_integer(d).ok_or_else(err)?;
                Self::new(n, d)
            }
        }
    }
}

impl Ord for BigRational {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.num * &other.den).cmp(&(&other.num * &self.den))
    }
}

impl PartialOrd for BigRational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> Add<&'a BigRational> for &'a BigRational {
    type Output = BigRational;

    fn add(self, b: &BigRational) -> BigRational {
        BigRational::normalize(&self.num * &b.den + &b.num * &self.den, &self.den * &b.den)
    }
}

impl<'a> Sub<&'a BigRational> for &'a BigRational {
    type Output = BigRational;

    fn sub(self, b: &BigRational) -> BigRational {
        BigRational::normalize(&self.num * &b.den - &b.num * &self.den, &self.den * &b.den)
    }
}

impl<'a> Mul<&'a BigRational> for &'a BigRational {
    type Output = BigRational;

    fn mul(self, b: &BigRational) -> BigRational {
        BigRational::normalize(&self.num * &b.num, &self.den * &b.den)
    }
}

impl<'a> Div<&'a BigRational> for &'a BigRational {
    type Output = BigRational;

    /// Panics if `b` is zero; see [`BigRational::checked_div`].
    fn div(self, b: &BigRational) -> BigRational {
        match self.checked_div(b) {
            Ok(q) => q,
            Err(e) => panic!("{} / {}: {}", self, b, e),
        }
    }
}

macro_rules! forward_owned_binop {
    ($($imp:ident $method:ident),*) => {$(
        impl $imp<BigRational> for BigRational {
            type Output = BigRational;

            fn $method(self, b: BigRational) -> BigRational {
                (&self).$method(&b)
            }
        }
    )*};
}

forward_owned_binop!(Add add, Sub sub, Mul mul, Div div);

impl Neg for &BigRational {
    type Output = BigRational;

    fn neg(self) -> BigRational {
        BigRational {
            num: -&self.num,
            den: self.den.clone(),
        }
    }
}

impl Neg for BigRational {
    type Output = BigRational;

    fn neg(self) -> BigRational {
        BigRational {
            num: -self.num,
            den: self.den,
        }
    }
}

#[cfg(test)]
#[path = "tests/rational.rs"]
mod tests;
