use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// Sort of a type. Atomic kinds have exactly one type each; `Func` types
/// are compound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Bool,
    Individual,
    Integer,
    Rational,
    Real,
    Func,
}

/// A type: one of the atomic sorts, or a compound of a kind and an ordered
/// list of element types.
///
/// For a function or predicate signature, element 0 is the result type and
/// the remaining elements are the parameter types in declared order.
/// Compound types have value semantics: equal content means equal types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Individual,
    Integer,
    Rational,
    Real,
    Compound(Kind, Arc<[Type]>),
}

impl Type {
    pub fn of(kind: Kind, types: impl Into<Arc<[Type]>>) -> Type {
        Type::Compound(kind, types.into())
    }

    /// Signature of a function returning `result` from `params`.
    pub fn func(result: Type, params: &[Type]) -> Type {
        let mut v = Vec::with_capacity(1 + params.len());
        v.push(result);
        v.extend_from_slice(params);
        Type::of(Kind::Func, v)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Type::Bool => Kind::Bool,
            Type::Individual => Kind::Individual,
            Type::Integer => Kind::Integer,
            Type::Rational => Kind::Rational,
            Type::Real => Kind::Real,
            Type::Compound(kind, _) => *kind,
        }
    }

    /// Number of element types; 0 for atomic types.
    pub fn len(&self) -> usize {
        self.elements().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn elements(&self) -> &[Type] {
        match self {
            Type::Compound(_, v) => &v[..],
            _ => &[],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Type> {
        self.elements().iter()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Integer | Type::Rational | Type::Real)
    }
}

/// Panics if `i >= len()`.
impl Index<usize> for Type {
    type Output = Type;

    fn index(&self, i: usize) -> &Type {
        match self.elements().get(i) {
            Some(t) => t,
            None => panic!("type {} has no element {}", self, i),
        }
    }
}

/// Total order: by kind, then element count, then elements.
///
/// Not meaningful as a subtype relation; term orderings only need some
/// total order on types.
impl Ord for Type {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind()
            .cmp(&other.kind())
            .then_with(|| self.len().cmp(&other.len()))
            .then_with(|| self.elements().cmp(other.elements()))
    }
}

impl PartialOrd for Type {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Compound(kind, v) => {
                write!(f, "{:?}[", kind)?;
                for (i, t) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", t)?;
                }
                f.write_str("]")
            }
            atomic => write!(f, "{:?}", atomic.kind()),
        }
    }
}

#[cfg(test)]
#[path = "tests/types.rs"]
mod tests;
