//! Integer division conventions over arbitrary-precision integers.
//!
//! Three families are provided and they differ only when the operands have
//! different signs or the division is inexact:
//!
//! - truncating: quotient rounded toward zero, remainder has the sign of `a`
//! - floor: quotient rounded toward negative infinity, remainder has the sign of `b`
//! - Euclidean: remainder always in `[0, |b|)`
//!
//! All functions panic if `b` is zero.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

/// Quotient rounded toward zero.
pub fn divide_truncate(a: &BigInt, b: &BigInt) -> BigInt {
    a / b
}

/// Remainder of [`divide_truncate`]; same sign as `a` or zero.
pub fn remainder_truncate(a: &BigInt, b: &BigInt) -> BigInt {
    a % b
}

/// Quotient rounded toward negative infinity.
pub fn divide_floor(a: &BigInt, b: &BigInt) -> BigInt {
    let (q, r) = a.div_rem(b);
    if a.is_negative() != b.is_negative() && !r.is_zero() {
        q - 1
    } else {
        q
    }
}

/// Remainder of [`divide_floor`]; same sign as `b` or zero.
pub fn remainder_floor(a: &BigInt, b: &BigInt) -> BigInt {
    a - divide_floor(a, b) * b
}

/// Quotient such that the remainder is never negative.
pub fn divide_euclidean(a: &BigInt, b: &BigInt) -> BigInt {
    let q = a / b;
    if a.is_negative() && &(&q * b) != a {
        q - b.signum()
    } else {
        q
    }
}

/// Remainder of [`divide_euclidean`]; always in `[0, |b|)`.
pub fn remainder_euclidean(a: &BigInt, b: &BigInt) -> BigInt {
    let r = a % b;
    if r.is_negative() {
        r + b.abs()
    } else {
        r
    }
}

#[cfg(test)]
#[path = "tests/arith.rs"]
mod tests;
