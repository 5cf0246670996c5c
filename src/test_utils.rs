use crate::symbol::SymbolStore;
use crate::term::{TermId, TermStore};
use crate::types::Type;

pub(crate) fn setup() -> (SymbolStore, TermStore) {
    (SymbolStore::new(), TermStore::new())
}

/// Global constant of type Individual.
pub(crate) fn constant(name: &str, symbols: &SymbolStore, terms: &TermStore) -> TermId {
    terms.global_var(symbols.intern(name), Type::Individual)
}

/// Function symbol from `arity` individuals to an individual.
pub(crate) fn func(name: &str, arity: usize, symbols: &SymbolStore, terms: &TermStore) -> TermId {
    let params = vec![Type::Individual; arity];
    terms.function(symbols.intern(name), Type::Individual, &params)
}

/// Predicate symbol over `arity` individuals.
pub(crate) fn pred(name: &str, arity: usize, symbols: &SymbolStore, terms: &TermStore) -> TermId {
    let params = vec![Type::Individual; arity];
    terms.function(symbols.intern(name), Type::Bool, &params)
}

/// Fresh variable of type Individual.
pub(crate) fn ivar(terms: &TermStore) -> TermId {
    terms.var(Type::Individual)
}

/// The individuals and symbols most tests need: constants `a` and `b`,
/// functions `f1`, `f2`, `g1` and variables `x`, `y`, `z`.
pub(crate) struct Sig {
    pub a: TermId,
    pub b: TermId,
    pub f1: TermId,
    pub f2: TermId,
    pub g1: TermId,
    pub x: TermId,
    pub y: TermId,
    pub z: TermId,
}

pub(crate) fn sig(symbols: &SymbolStore, terms: &TermStore) -> Sig {
    Sig {
        a: constant("a", symbols, terms),
        b: constant("b", symbols, terms),
        f1: func("f1", 1, symbols, terms),
        f2: func("f2", 2, symbols, terms),
        g1: func("g1", 1, symbols, terms),
        x: ivar(terms),
        y: ivar(terms),
        z: ivar(terms),
    }
}
