use crate::term::{Tag, TermId, TermStore};
use crate::types::{Kind, Type};
use thiserror::Error;

/// A term that is not well typed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("{tag:?}: type error: {found} != {expected}")]
    Mismatch { tag: Tag, found: Type, expected: Type },

    #[error("{tag:?}: type error: {found} is not numeric")]
    NotNumeric { tag: Tag, found: Type },

    #[error("{tag:?}: args count: {found} != {expected}")]
    Arity {
        tag: Tag,
        found: usize,
        expected: usize,
    },

    #[error("{tag:?}: invalid {what}")]
    Invalid { tag: Tag, what: String },
}

impl TermStore {
    /// Check that `term` is well typed and has type `expected`.
    pub fn check(&self, term: TermId, expected: &Type) -> Result<(), TypeError> {
        let tag = self.tag(term);
        let children = self.children(term);
        let n = children.len();

        let ty = self.try_ty(term)?;
        if &ty != expected {
            return Err(TypeError::Mismatch {
                tag,
                found: ty,
                expected: expected.clone(),
            });
        }

        let arity = |want: usize| {
            if n == want {
                Ok(())
            } else {
                Err(TypeError::Arity {
                    tag,
                    found: n,
                    expected: want,
                })
            }
        };
        let invalid = |t: &Type| TypeError::Invalid {
            tag,
            what: format!("type {}", t),
        };

        match tag {
            Tag::Not => {
                arity(1)?;
                self.check(children[0], &Type::Bool)
            }
            Tag::Eqv => {
                arity(2)?;
                self.check_all(&children, &Type::Bool)
            }
            Tag::And | Tag::Or => self.check_all(&children, &Type::Bool),
            Tag::Rational => match ty.kind() {
                Kind::Rational | Kind::Real => Ok(()),
                _ => Err(invalid(&ty)),
            },
            Tag::GlobalVar => match ty.kind() {
                Kind::Func => Err(invalid(&ty)),
                _ => Ok(()),
            },
            Tag::Var => match ty.kind() {
                Kind::Bool | Kind::Func => Err(invalid(&ty)),
                _ => Ok(()),
            },
            Tag::False | Tag::True | Tag::Integer | Tag::DistinctObject | Tag::Function => Ok(()),
            Tag::Equals => {
                arity(2)?;
                let t = self.try_ty(children[0])?;
                match t.kind() {
                    Kind::Bool | Kind::Func => Err(invalid(&t)),
                    _ => self.check_all(&children, &t),
                }
            }
            Tag::All | Tag::Exists => {
                for &v in &children[1..] {
                    if !self.is_var(v) {
                        return Err(TypeError::Invalid {
                            tag,
                            what: format!("bound {:?}", self.tag(v)),
                        });
                    }
                    self.check(v, &self.ty(v))?;
                }
                self.check(children[0], &Type::Bool)
            }
            Tag::ToInteger
            | Tag::ToRational
            | Tag::ToReal
            | Tag::Truncate
            | Tag::Negate
            | Tag::IsInteger
            | Tag::IsRational
            | Tag::Round
            | Tag::Floor
            | Tag::Ceiling => {
                arity(1)?;
                let t = self.numeric(tag, children[0])?;
                self.check(children[0], &t)
            }
            Tag::LessEquals
            | Tag::Less
            | Tag::Add
            | Tag::Subtract
            | Tag::Multiply
            | Tag::DivideEuclidean
            | Tag::DivideFloor
            | Tag::DivideTruncate
            | Tag::RemainderEuclidean
            | Tag::RemainderFloor
            | Tag::RemainderTruncate => {
                arity(2)?;
                let t = self.numeric(tag, children[0])?;
                self.check_all(&children, &t)
            }
            Tag::Divide => {
                arity(2)?;
                let t = self.try_ty(children[0])?;
                match t {
                    Type::Rational | Type::Real => self.check_all(&children, &t),
                    _ => Err(invalid(&t)),
                }
            }
            Tag::Call => self.check_args(&children),
        }
    }

    /// Arguments of a call against the head's parameter types.
    fn check_args(&self, children: &[TermId]) -> Result<(), TypeError> {
        let ft = self.ty(children[0]);
        if children.len() != ft.len() {
            return Err(TypeError::Arity {
                tag: Tag::Call,
                found: children.len() - 1,
                expected: ft.len() - 1,
            });
        }
        for (&arg, param) in children[1..].iter().zip(ft.iter().skip(1)) {
            self.check(arg, param)?;
        }
        Ok(())
    }

    /// Like [`TermStore::ty`], but a call whose head is not a function
    /// symbol is an error instead of a panic.
    fn try_ty(&self, term: TermId) -> Result<Type, TypeError> {
        match self.tag(term) {
            Tag::Call => {
                let head = self.child(term, 0);
                match self.tag(head) {
                    Tag::Function => Ok(self.ty(head)[0].clone()),
                    other => Err(TypeError::Invalid {
                        tag: Tag::Call,
                        what: format!("call head {:?}", other),
                    }),
                }
            }
            Tag::Ceiling
            | Tag::Floor
            | Tag::Round
            | Tag::Truncate
            | Tag::Negate
            | Tag::Add
            | Tag::Subtract
            | Tag::Multiply
            | Tag::Divide
            | Tag::DivideEuclidean
            | Tag::DivideFloor
            | Tag::DivideTruncate
            | Tag::RemainderEuclidean
            | Tag::RemainderFloor
            | Tag::RemainderTruncate => self.try_ty(self.child(term, 0)),
            _ => Ok(self.ty(term)),
        }
    }

    fn check_all(&self, terms: &[TermId], expected: &Type) -> Result<(), TypeError> {
        terms.iter().try_for_each(|&t| self.check(t, expected))
    }

    fn numeric(&self, tag: Tag, operand: TermId) -> Result<Type, TypeError> {
        let t = self.try_ty(operand)?;
        if t.is_numeric() {
            Ok(t)
        } else {
            Err(TypeError::NotNumeric { tag, found: t })
        }
    }
}

#[cfg(test)]
#[path = "tests/check.rs"]
mod tests;
