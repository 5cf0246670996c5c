//! One-sided matching: find bindings for the pattern's variables that make
//! it equal to the target.
//!
//! There is no occurs check. Callers must keep the variables of pattern
//! and target disjoint; variables inside the target are never bound and
//! are compared like constants.

use crate::subst::Subst;
use crate::term::{TermId, TermStore};
use smallvec::SmallVec;

#[cfg(feature = "tracing")]
use crate::trace::{debug_span, trace};

/// Match `pattern` against `target` from the empty substitution.
pub fn match_terms(pattern: TermId, target: TermId, terms: &TermStore) -> Option<Subst> {
    match_with(&Subst::new(), pattern, target, terms)
}

/// Match `pattern` against `target`, extending `subst`.
///
/// Returns `None` when no extension works; `subst` itself is never
/// modified. Children are matched left to right and the first failure
/// stops the search.
///
/// Uses an explicit worklist to avoid recursion.
pub fn match_with(
    subst: &Subst,
    pattern: TermId,
    target: TermId,
    terms: &TermStore,
) -> Option<Subst> {
    #[cfg(feature = "tracing")]
    let _span = debug_span!("match_terms", ?pattern, ?target).entered();

    let mut subst = subst.clone();
    let mut worklist: SmallVec<[(TermId, TermId); 32]> = SmallVec::new();
    worklist.push((pattern, target));

    while let Some((a, b)) = worklist.pop() {
        if a == b {
            continue;
        }

        if terms.ty(a) != terms.ty(b) {
            #[cfg(feature = "tracing")]
            trace!(?a, ?b, "match_type_mismatch");
            return None;
        }

        if terms.is_var(a) {
            match subst.get(a) {
                Some(a1) if a1 == b => continue,
                Some(_) => {
                    #[cfg(feature = "tracing")]
                    trace!(?a, "match_bound_mismatch");
                    return None;
                }
                None => {
                    subst = subst.bind(a, b);
                    continue;
                }
            }
        }

        if terms.tag(a) != terms.tag(b) {
            #[cfg(feature = "tracing")]
            trace!("match_tag_mismatch");
            return None;
        }
        let children_a = terms.children(a);
        let children_b = terms.children(b);
        if children_a.is_empty() || children_a.len() != children_b.len() {
            #[cfg(feature = "tracing")]
            trace!("match_arity_mismatch");
            return None;
        }
        // Reverse so the leftmost pair is matched first
        for (c1, c2) in children_a.iter().zip(children_b.iter()).rev() {
            worklist.push((*c1, *c2));
        }
    }

    #[cfg(feature = "tracing")]
    trace!(bindings = subst.len(), "match_success");

    Some(subst)
}

#[cfg(test)]
#[path = "tests/matching.rs"]
mod tests;
