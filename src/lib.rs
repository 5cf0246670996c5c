pub mod arith;
pub mod chars;
pub mod check;
pub mod matching;
pub mod rational;
pub mod simplify;
pub mod subst;
pub mod symbol;
pub mod term;
pub mod trace;
pub mod types;
pub mod unify;

#[cfg(test)]
pub(crate) mod test_utils;

pub use check::TypeError;
pub use matching::{match_terms, match_with};
pub use rational::{BigRational, RationalError};
pub use subst::{occurs, replace, Subst};
pub use symbol::{SymbolId, SymbolStore};
pub use term::{format_term, Tag, Term, TermId, TermStore};
pub use types::{Kind, Type};
pub use unify::{unify, unify_with};
