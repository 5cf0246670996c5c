use crate::arith;
use crate::rational::BigRational;
use crate::term::{Tag, TermId, TermStore};
use crate::types::Type;
use num_bigint::BigInt;
use num_traits::Zero;
use std::cmp::Ordering;

/// Literal operand of an arithmetic node.
enum Num {
    Int(BigInt),
    Rat(Type, BigRational),
}

impl TermStore {
    /// Bottom-up constant folding. Subterms that cannot be evaluated are
    /// rebuilt with their simplified children.
    pub fn simplify(&self, term: TermId) -> TermId {
        let a = self.map_children(term, |c| self.simplify(c));
        self.fold(a).unwrap_or(a)
    }

    fn num(&self, t: TermId) -> Option<Num> {
        if let Some(n) = self.integer_value(t) {
            return Some(Num::Int(n));
        }
        self.rational_value(t).map(|r| Num::Rat(self.ty(t), r))
    }

    fn fold(&self, a: TermId) -> Option<TermId> {
        let tag = self.tag(a);
        if tag.is_leaf() {
            return None;
        }
        let x = self.child(a, 0);
        match tag {
            Tag::Equals => {
                let y = self.child(a, 1);
                if x == y {
                    Some(self.boolean(true))
                } else if self.is_const(x) && self.is_const(y) {
                    Some(self.boolean(false))
                } else {
                    None
                }
            }
            Tag::Less => self.compare(x, self.child(a, 1), |o| o == Ordering::Less),
            Tag::LessEquals => self.compare(x, self.child(a, 1), |o| o != Ordering::Greater),
            Tag::Negate => match self.num(x)? {
                Num::Int(n) => Some(self.integer(-n)),
                Num::Rat(ty, r) => Some(self.rational(ty, -r)),
            },
            Tag::ToInteger => {
                if self.ty(x) == Type::Integer {
                    return Some(x);
                }
                // TPTP converts fractions by floor
                let r = self.rational_value(x)?;
                Some(self.integer(r.floor()))
            }
            Tag::ToRational => self.to_rational(x, Type::Rational),
            Tag::ToReal => self.to_rational(x, Type::Real),
            Tag::Ceiling => self.round_with(x, BigRational::ceil),
            Tag::Floor => self.round_with(x, BigRational::floor),
            Tag::Round => self.round_with(x, BigRational::round),
            Tag::Truncate => self.round_with(x, BigRational::truncate),
            Tag::IsInteger => match self.ty(x) {
                Type::Integer => Some(self.boolean(true)),
                _ => {
                    let r = self.rational_value(x)?;
                    Some(self.boolean(r.is_integer()))
                }
            },
            Tag::IsRational => match self.ty(x) {
                Type::Integer | Type::Rational => Some(self.boolean(true)),
                _ => {
                    self.rational_value(x)?;
                    Some(self.boolean(true))
                }
            },
            Tag::Add => self.binary(x, self.child(a, 1), |a, b| a + b, |a, b| a + b),
            Tag::Subtract => self.binary(x, self.child(a, 1), |a, b| a - b, |a, b| a - b),
            Tag::Multiply => self.binary(x, self.child(a, 1), |a, b| a * b, |a, b| a * b),
            Tag::Divide => {
                let xr = self.rational_value(x)?;
                let yr = self.rational_value(self.child(a, 1))?;
                let q = xr.checked_div(&yr).ok()?;
                Some(self.rational(self.ty(x), q))
            }
            Tag::DivideEuclidean => self.integer_division(x, self.child(a, 1), arith::divide_euclidean),
            Tag::DivideFloor => self.integer_division(x, self.child(a, 1), arith::divide_floor),
            Tag::DivideTruncate => self.integer_division(x, self.child(a, 1), arith::divide_truncate),
            Tag::RemainderEuclidean => {
                self.integer_division(x, self.child(a, 1), arith::remainder_euclidean)
            }
            Tag::RemainderFloor => self.integer_division(x, self.child(a, 1), arith::remainder_floor),
            Tag::RemainderTruncate => {
                self.integer_division(x, self.child(a, 1), arith::remainder_truncate)
            }
            _ => None,
        }
    }

    fn compare(&self, x: TermId, y: TermId, test: impl Fn(Ordering) -> bool) -> Option<TermId> {
        let ordering = match (self.num(x)?, self.num(y)?) {
            (Num::Int(a), Num::Int(b)) => a.cmp(&b),
            (Num::Rat(_, a), Num::Rat(_, b)) => a.cmp(&b),
            _ => return None,
        };
        Some(self.boolean(test(ordering)))
    }

    fn binary(
        &self,
        x: TermId,
        y: TermId,
        int: impl Fn(&BigInt, &BigInt) -> BigInt,
        rat: impl Fn(&BigRational, &BigRational) -> BigRational,
    ) -> Option<TermId> {
        match (self.num(x)?, self.num(y)?) {
            (Num::Int(a), Num::Int(b)) => Some(self.integer(int(&a, &b))),
            (Num::Rat(ty, a), Num::Rat(_, b)) => Some(self.rational(ty, rat(&a, &b))),
            _ => None,
        }
    }

    fn integer_division(
        &self,
        x: TermId,
        y: TermId,
        op: fn(&BigInt, &BigInt) -> BigInt,
    ) -> Option<TermId> {
        let a = self.integer_value(x)?;
        let b = self.integer_value(y)?;
        if b.is_zero() {
            return None;
        }
        Some(self.integer(op(&a, &b)))
    }

    /// Rounding keeps the operand's type.
    fn round_with(&self, x: TermId, f: fn(&BigRational) -> BigInt) -> Option<TermId> {
        let r = self.rational_value(x)?;
        Some(self.rational(self.ty(x), BigRational::from_integer(f(&r))))
    }

    fn to_rational(&self, x: TermId, ty: Type) -> Option<TermId> {
        if self.ty(x) == ty {
            return Some(x);
        }
        match self.num(x)? {
            Num::Int(n) => Some(self.rational(ty, BigRational::from_integer(n))),
            Num::Rat(_, r) => Some(self.rational(ty, r)),
        }
    }
}

#[cfg(test)]
#[path = "tests/simplify.rs"]
mod tests;
