use crate::subst::{occurs, Subst};
use crate::term::{TermId, TermStore};
use smallvec::SmallVec;

#[cfg(feature = "tracing")]
use crate::trace::{debug_span, trace};

/// Unify two terms from the empty substitution.
pub fn unify(t1: TermId, t2: TermId, terms: &TermStore) -> Option<Subst> {
    unify_with(&Subst::new(), t1, t2, terms)
}

/// Unify two terms, extending `subst` to a most general unifier.
/// Returns None if the terms cannot be unified; `subst` itself is never
/// modified.
///
/// Uses an explicit worklist to avoid recursion.
/// Implements occurs-check to prevent infinite terms.
pub fn unify_with(subst: &Subst, t1: TermId, t2: TermId, terms: &TermStore) -> Option<Subst> {
    #[cfg(feature = "tracing")]
    let _span = debug_span!("unify", ?t1, ?t2).entered();

    let mut subst = subst.clone();
    let mut worklist: SmallVec<[(TermId, TermId); 32]> = SmallVec::new();
    worklist.push((t1, t2));

    while let Some((a, b)) = worklist.pop() {
        if a == b {
            // Same term - already unified
            continue;
        }

        if terms.ty(a) != terms.ty(b) {
            #[cfg(feature = "tracing")]
            trace!(?a, ?b, "unify_type_mismatch");
            return None;
        }

        // A variable on the right is handled as if it were on the left
        let var_pair = if terms.is_var(b) {
            Some((b, a))
        } else if terms.is_var(a) {
            Some((a, b))
        } else {
            None
        };

        if let Some((var, other)) = var_pair {
            if let Some(bound) = subst.get(var) {
                worklist.push((bound, other));
            } else if let Some(bound) = subst.get(other) {
                worklist.push((var, bound));
            } else if occurs(var, other, &subst, terms) {
                #[cfg(feature = "tracing")]
                trace!(?var, "unify_occurs_check_failed");
                return None;
            } else {
                subst = subst.bind(var, other);
            }
            continue;
        }

        if terms.tag(a) != terms.tag(b) {
            #[cfg(feature = "tracing")]
            trace!("unify_tag_mismatch");
            return None;
        }
        let children_a = terms.children(a);
        let children_b = terms.children(b);
        if children_a.is_empty() || children_a.len() != children_b.len() {
            #[cfg(feature = "tracing")]
            trace!("unify_arity_mismatch");
            return None;
        }
        // Reverse so the leftmost pair is unified first
        for (c1, c2) in children_a.iter().zip(children_b.iter()).rev() {
            worklist.push((*c1, *c2));
        }
    }

    #[cfg(feature = "tracing")]
    trace!(bindings = subst.len(), "unify_success");

    Some(subst)
}

#[cfg(test)]
#[path = "tests/unify.rs"]
mod tests;
