use crate::term::{TermId, TermStore};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use crate::trace::{debug_span, trace};

struct Frame {
    key: TermId,
    value: TermId,
    next: Option<Arc<Frame>>,
}

/// A persistent substitution: an immutable chain of `key -> value`
/// bindings, newest first.
///
/// `bind` returns a new substitution sharing every older frame with the
/// receiver, so a failed match or unify leaves the caller's substitution
/// untouched and alternative branches can grow from a common ancestor.
/// A later binding of the same key shadows the earlier one.
#[derive(Clone, Default)]
pub struct Subst {
    head: Option<Arc<Frame>>,
    len: usize,
}

impl Subst {
    /// The empty substitution.
    pub fn new() -> Self {
        Self::default()
    }

    /// A substitution extending `self` with `key -> value`.
    pub fn bind(&self, key: TermId, value: TermId) -> Subst {
        Subst {
            head: Some(Arc::new(Frame {
                key,
                value,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// The newest binding of `key`, if any.
    pub fn get(&self, key: TermId) -> Option<TermId> {
        self.iter().find(|&(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_bound(&self, key: TermId) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of frames in the chain.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Bindings, newest first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            frame: self.head.as_deref(),
        }
    }
}

/// Iterator over the bindings of a [`Subst`], newest first.
pub struct Iter<'a> {
    frame: Option<&'a Frame>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (TermId, TermId);

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.frame?;
        self.frame = frame.next.as_deref();
        Some((frame.key, frame.value))
    }
}

impl<'a> IntoIterator for &'a Subst {
    type Item = (TermId, TermId);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl fmt::Debug for Subst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Unlink uniquely owned frames one at a time; the default recursive drop
// can overflow the stack on long chains.
impl Drop for Subst {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(frame) = next {
            match Arc::try_unwrap(frame) {
                Ok(mut frame) => next = frame.next.take(),
                Err(_) => break,
            }
        }
    }
}

/// Apply a substitution to a term.
///
/// Every leaf bound in `subst` is replaced by its value, itself replaced in
/// turn, so chains like `x -> f(y), y -> a` resolve fully. Unbound leaves
/// are kept. A key bound (transitively) to a term containing itself does
/// not terminate; unification's occurs check rules that out.
pub fn replace(term: TermId, subst: &Subst, terms: &TermStore) -> TermId {
    #[cfg(feature = "tracing")]
    let _span = debug_span!("replace", ?term, bindings = subst.len()).entered();

    if subst.is_empty() {
        return term;
    }
    let result = terms.map_leaves(term, |leaf| match subst.get(leaf) {
        Some(value) => {
            assert_ne!(value, leaf, "{:?} is bound to itself", leaf);
            replace(value, subst, terms)
        }
        None => leaf,
    });

    #[cfg(feature = "tracing")]
    trace!(?result, "replace_done");

    result
}

/// Does `var` occur in `term`, looking through the bindings in `subst`?
pub fn occurs(var: TermId, term: TermId, subst: &Subst, terms: &TermStore) -> bool {
    let mut stack: SmallVec<[TermId; 16]> = SmallVec::new();
    stack.push(term);

    while let Some(t) = stack.pop() {
        if t == var {
            return true;
        }
        let children = terms.children(t);
        if children.is_empty() {
            if terms.is_var(t) {
                if let Some(bound) = subst.get(t) {
                    stack.push(bound);
                }
            }
        } else {
            stack.extend(children);
        }
    }

    false
}

#[cfg(test)]
#[path = "tests/subst.rs"]
mod tests;
