use crate::rational::BigRational;
use crate::symbol::{SymbolId, SymbolStore};
use crate::types::Type;
use hashbrown::{HashMap, HashSet};
use num_bigint::BigInt;
use parking_lot::RwLock;
use rustc_hash::FxHasher;
use smallvec::{smallvec, SmallVec};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};

/// Handle to a term in a [`TermStore`].
///
/// Terms are hash-consed, so two ids are equal exactly when the terms are
/// structurally equal (compound nodes and literals) or are the same
/// identity leaf (variables and global symbols).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(u32);

impl TermId {
    /// Get the raw u32 value (for debugging/display).
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Discriminator fixing a term's operation or leaf kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    // leaves
    False,
    True,
    DistinctObject,
    Var,
    GlobalVar,
    Function,
    Integer,
    Rational,

    // logic
    All,
    Exists,
    And,
    Or,
    Not,
    Eqv,
    Equals,

    // arithmetic
    Less,
    LessEquals,
    IsInteger,
    IsRational,
    Ceiling,
    Floor,
    Round,
    Truncate,
    Negate,
    Add,
    Subtract,
    Multiply,
    Divide,
    DivideEuclidean,
    DivideFloor,
    DivideTruncate,
    RemainderEuclidean,
    RemainderFloor,
    RemainderTruncate,
    ToInteger,
    ToRational,
    ToReal,

    /// Child 0 is the called `Function`, the rest are arguments.
    Call,
}

impl Tag {
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            Tag::False
                | Tag::True
                | Tag::DistinctObject
                | Tag::Var
                | Tag::GlobalVar
                | Tag::Function
                | Tag::Integer
                | Tag::Rational
        )
    }
}

/// A term node. Compound nodes refer to their children by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    False,
    True,
    Integer(BigInt),
    /// Same payload for `Rational` and `Real`; the attached type tells them apart.
    Rational(Type, BigRational),
    DistinctObject(SymbolId),
    Var { id: u32, ty: Type },
    GlobalVar { id: u32, name: SymbolId, ty: Type },
    Function { id: u32, name: SymbolId, ty: Type },
    App(Tag, SmallVec<[TermId; 4]>),
}

impl Term {
    pub fn tag(&self) -> Tag {
        match self {
            Term::False => Tag::False,
            Term::True => Tag::True,
            Term::Integer(_) => Tag::Integer,
            Term::Rational(..) => Tag::Rational,
            Term::DistinctObject(_) => Tag::DistinctObject,
            Term::Var { .. } => Tag::Var,
            Term::GlobalVar { .. } => Tag::GlobalVar,
            Term::Function { .. } => Tag::Function,
            Term::App(tag, _) => *tag,
        }
    }

    pub fn children(&self) -> &[TermId] {
        match self {
            Term::App(_, children) => children,
            _ => &[],
        }
    }
}

/// Number of shards for hashcons maps (power of 2 for fast modulo).
const NUM_SHARDS: usize = 16;

/// Thread-safe term store with hashconsing.
///
/// Guarantees:
/// - Structurally equal terms get the same TermId
/// - Every identity leaf (Var, GlobalVar, Function) gets a fresh TermId
/// - Nodes are never modified once interned
pub struct TermStore {
    /// Central storage of all terms, indexed by TermId.
    nodes: RwLock<Vec<Term>>,
    /// Sharded hashcons maps for reducing contention.
    shards: [RwLock<HashMap<Term, TermId>>; NUM_SHARDS],
    /// Counter for generating unique TermIds.
    next_id: AtomicU32,
    /// Counter for identities of variables and global symbols.
    next_leaf: AtomicU32,
}

impl TermStore {
    pub fn new() -> Self {
        let shards = std::array::from_fn(|_| RwLock::new(HashMap::new()));
        Self {
            nodes: RwLock::new(Vec::new()),
            shards,
            next_id: AtomicU32::new(0),
            next_leaf: AtomicU32::new(0),
        }
    }

    /// Intern a term, returning its TermId.
    /// If the term already exists, returns the existing TermId.
    fn intern(&self, term: Term) -> TermId {
        let shard = &self.shards[Self::shard_index(&term)];

        // Fast path: check if term exists (read lock)
        if let Some(&id) = shard.read().get(&term) {
            return id;
        }

        let mut map = shard.write();
        // Double-check after acquiring write lock
        if let Some(&id) = map.get(&term) {
            return id;
        }

        let id = TermId(self.next_id.fetch_add(1, Ordering::Relaxed));
        {
            let mut nodes = self.nodes.write();
            let idx = id.0 as usize;
            if nodes.len() <= idx {
                nodes.resize(idx + 1, Term::False); // placeholder
            }
            nodes[idx] = term.clone();
        }
        map.insert(term, id);
        id
    }

    fn fresh_leaf(&self) -> u32 {
        self.next_leaf.fetch_add(1, Ordering::Relaxed)
    }

    fn shard_index(term: &Term) -> usize {
        let mut hasher = FxHasher::default();
        term.hash(&mut hasher);
        (hasher.finish() as usize) % NUM_SHARDS
    }

    // ========== FACTORIES ==========

    pub fn boolean(&self, value: bool) -> TermId {
        self.intern(if value { Term::True } else { Term::False })
    }

    pub fn integer(&self, value: impl Into<BigInt>) -> TermId {
        self.intern(Term::Integer(value.into()))
    }

    /// Panics unless `ty` is `Rational` or `Real`.
    pub fn rational(&self, ty: Type, value: BigRational) -> TermId {
        assert!(
            matches!(ty, Type::Rational | Type::Real),
            "rational literal of type {}",
            ty
        );
        self.intern(Term::Rational(ty, value))
    }

    /// Distinct objects are equal exactly when their names are.
    pub fn distinct_object(&self, name: SymbolId) -> TermId {
        self.intern(Term::DistinctObject(name))
    }

    /// A fresh logic variable, distinct from every other term.
    pub fn var(&self, ty: Type) -> TermId {
        let id = self.fresh_leaf();
        self.intern(Term::Var { id, ty })
    }

    /// A fresh global constant of the given type.
    pub fn global_var(&self, name: SymbolId, ty: Type) -> TermId {
        let id = self.fresh_leaf();
        self.intern(Term::GlobalVar { id, name, ty })
    }

    /// A fresh function or predicate symbol; its type is
    /// `Func[result, params...]`.
    pub fn function(&self, name: SymbolId, result: Type, params: &[Type]) -> TermId {
        let id = self.fresh_leaf();
        let ty = Type::func(result, params);
        self.intern(Term::Function { id, name, ty })
    }

    /// Build a compound node. Panics on a leaf tag or no children.
    pub fn app(&self, tag: Tag, children: impl Into<SmallVec<[TermId; 4]>>) -> TermId {
        let children = children.into();
        assert!(!tag.is_leaf(), "{:?} is not a compound tag", tag);
        assert!(!children.is_empty(), "{:?} with no children", tag);
        self.intern(Term::App(tag, children))
    }

    pub fn app1(&self, tag: Tag, a: TermId) -> TermId {
        self.app(tag, smallvec![a])
    }

    pub fn app2(&self, tag: Tag, a: TermId, b: TermId) -> TermId {
        self.app(tag, smallvec![a, b])
    }

    pub fn app3(&self, tag: Tag, a: TermId, b: TermId, c: TermId) -> TermId {
        self.app(tag, smallvec![a, b, c])
    }

    /// `f(args...)`, stored as `Call[f, args...]`.
    pub fn call(&self, f: TermId, args: &[TermId]) -> TermId {
        debug_assert!(!args.is_empty(), "calls need arguments; use a GlobalVar");
        let mut v: SmallVec<[TermId; 4]> = SmallVec::with_capacity(1 + args.len());
        v.push(f);
        v.extend_from_slice(args);
        self.app(Tag::Call, v)
    }

    /// `Or(Not(a), b)`.
    pub fn implies(&self, a: TermId, b: TermId) -> TermId {
        let not_a = self.app1(Tag::Not, a);
        self.app2(Tag::Or, not_a, b)
    }

    // ========== ACCESS ==========

    /// Resolve a TermId to its term.
    /// Returns None if the TermId is invalid.
    pub fn resolve(&self, id: TermId) -> Option<Term> {
        self.nodes.read().get(id.0 as usize).cloned()
    }

    /// Run `f` on the node under the read lock. `f` must not call back
    /// into the store.
    fn with_node<R>(&self, id: TermId, f: impl FnOnce(&Term) -> R) -> R {
        let nodes = self.nodes.read();
        match nodes.get(id.0 as usize) {
            Some(term) => f(term),
            None => panic!("unknown term id {:?}", id),
        }
    }

    pub fn tag(&self, id: TermId) -> Tag {
        self.with_node(id, Term::tag)
    }

    /// Number of immediate children.
    pub fn arity(&self, id: TermId) -> usize {
        self.with_node(id, |t| t.children().len())
    }

    /// Panics if `i >= arity(id)`.
    pub fn child(&self, id: TermId, i: usize) -> TermId {
        self.with_node(id, |t| match t.children().get(i) {
            Some(&c) => c,
            None => panic!("{:?}: no child {}", t.tag(), i),
        })
    }

    /// Immediate children, in order.
    pub fn children(&self, id: TermId) -> SmallVec<[TermId; 4]> {
        self.with_node(id, |t| SmallVec::from_slice(t.children()))
    }

    pub fn is_var(&self, id: TermId) -> bool {
        self.tag(id) == Tag::Var
    }

    pub fn is_leaf(&self, id: TermId) -> bool {
        self.arity(id) == 0
    }

    /// Literal constants: booleans, numbers and distinct objects.
    pub fn is_const(&self, id: TermId) -> bool {
        matches!(
            self.tag(id),
            Tag::DistinctObject | Tag::Integer | Tag::Rational | Tag::True | Tag::False
        )
    }

    pub fn integer_value(&self, id: TermId) -> Option<BigInt> {
        self.with_node(id, |t| match t {
            Term::Integer(n) => Some(n.clone()),
            _ => None,
        })
    }

    pub fn rational_value(&self, id: TermId) -> Option<BigRational> {
        self.with_node(id, |t| match t {
            Term::Rational(_, r) => Some(r.clone()),
            _ => None,
        })
    }

    /// Name of a global symbol or distinct object.
    pub fn name(&self, id: TermId) -> Option<SymbolId> {
        self.with_node(id, |t| match t {
            Term::DistinctObject(name)
            | Term::GlobalVar { name, .. }
            | Term::Function { name, .. } => Some(*name),
            _ => None,
        })
    }

    // ========== TYPES ==========

    /// Type of a term, derived from its tag.
    ///
    /// Panics on an ill-formed call whose head is not a function symbol.
    pub fn ty(&self, id: TermId) -> Type {
        let (tag, first) = match self.resolve(id) {
            Some(Term::False) | Some(Term::True) => return Type::Bool,
            Some(Term::Integer(_)) => return Type::Integer,
            Some(Term::Rational(ty, _)) => return ty,
            Some(Term::DistinctObject(_)) => return Type::Individual,
            Some(Term::Var { ty, .. })
            | Some(Term::GlobalVar { ty, .. })
            | Some(Term::Function { ty, .. }) => return ty,
            Some(Term::App(tag, children)) => (tag, children[0]),
            None => panic!("unknown term id {:?}", id),
        };
        match tag {
            Tag::Not
            | Tag::And
            | Tag::Or
            | Tag::Eqv
            | Tag::All
            | Tag::Exists
            | Tag::Equals
            | Tag::Less
            | Tag::LessEquals
            | Tag::IsInteger
            | Tag::IsRational => Type::Bool,
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
            | Tag::RemainderTruncate => self.ty(first),
            Tag::ToInteger => Type::Integer,
            Tag::ToRational => Type::Rational,
            Tag::ToReal => Type::Real,
            Tag::Call => match self.resolve(first) {
                Some(Term::Function { ty, .. }) => ty[0].clone(),
                _ => panic!("Call head {:?} is not a function", self.tag(first)),
            },
            leaf => panic!("{:?} has no type rule for compound nodes", leaf),
        }
    }

    // ========== TRAVERSAL ==========

    /// Does `term` contain the variable `var` (or is it `var`)?
    /// Bindings are not followed; see [`crate::subst::occurs`].
    pub fn contains(&self, term: TermId, var: TermId) -> bool {
        let mut stack: SmallVec<[TermId; 16]> = smallvec![term];
        while let Some(t) = stack.pop() {
            if t == var {
                return true;
            }
            stack.extend(self.children(t));
        }
        false
    }

    /// Rebuild `term` with the same tag and new children. A leaf is
    /// returned unchanged.
    pub fn remake(&self, term: TermId, children: SmallVec<[TermId; 4]>) -> TermId {
        let tag = self.tag(term);
        if tag.is_leaf() {
            debug_assert!(children.is_empty());
            return term;
        }
        self.app(tag, children)
    }

    /// Replace every leaf with `f(leaf)`, rebuilding the ancestors.
    /// `f` sees the leaves left to right.
    ///
    /// Uses explicit stack to avoid recursion.
    pub fn map_leaves(&self, term: TermId, mut f: impl FnMut(TermId) -> TermId) -> TermId {
        let mut work_stack: Vec<(TermId, bool)> = vec![(term, false)];
        let mut result_stack: Vec<TermId> = Vec::new();

        while let Some((tid, children_done)) = work_stack.pop() {
            let children = self.children(tid);
            if children_done {
                let n = children.len();
                let new_children: SmallVec<[TermId; 4]> =
                    result_stack.drain(result_stack.len() - n..).collect();
                result_stack.push(self.remake(tid, new_children));
            } else if children.is_empty() {
                result_stack.push(f(tid));
            } else {
                work_stack.push((tid, true));
                // Reverse so the leftmost child is processed first
                for &child in children.iter().rev() {
                    work_stack.push((child, false));
                }
            }
        }

        debug_assert_eq!(result_stack.len(), 1);
        result_stack[0]
    }

    /// Apply `f` to the immediate children only.
    pub fn map_children(&self, term: TermId, mut f: impl FnMut(TermId) -> TermId) -> TermId {
        let children = self.children(term);
        if children.is_empty() {
            return term;
        }
        let mapped: SmallVec<[TermId; 4]> = children.iter().map(|&c| f(c)).collect();
        self.remake(term, mapped)
    }

    /// Visit every leaf, left to right.
    pub fn walk_leaves(&self, term: TermId, mut f: impl FnMut(TermId)) {
        let mut stack: Vec<TermId> = vec![term];
        while let Some(t) = stack.pop() {
            let children = self.children(t);
            if children.is_empty() {
                f(t);
            } else {
                stack.extend(children.iter().rev());
            }
        }
    }

    /// Operands of nested `tag` nodes, e.g. `And(And(a, b), c)` gives
    /// `[a, b, c]`. A term with another tag gives itself.
    pub fn flatten(&self, term: TermId, tag: Tag) -> Vec<TermId> {
        let mut out = Vec::new();
        let mut stack = vec![term];
        while let Some(t) = stack.pop() {
            if self.tag(t) == tag {
                stack.extend(self.children(t).iter().rev());
            } else {
                out.push(t);
            }
        }
        out
    }

    /// Free variables in order of first occurrence. `All` and `Exists`
    /// bind their children 1.. over the body in child 0.
    pub fn free_vars(&self, term: TermId) -> Vec<TermId> {
        let mut free = Vec::new();
        let mut seen = HashSet::new();
        self.collect_free_vars(term, &mut Vec::new(), &mut seen, &mut free);
        free
    }

    fn collect_free_vars(
        &self,
        term: TermId,
        bound: &mut Vec<TermId>,
        seen: &mut HashSet<TermId>,
        free: &mut Vec<TermId>,
    ) {
        let children = self.children(term);
        match self.tag(term) {
            Tag::Var => {
                if !bound.contains(&term) && seen.insert(term) {
                    free.push(term);
                }
            }
            Tag::All | Tag::Exists => {
                let mark = bound.len();
                bound.extend_from_slice(&children[1..]);
                self.collect_free_vars(children[0], bound, seen, free);
                bound.truncate(mark);
            }
            _ => {
                for &c in children.iter() {
                    self.collect_free_vars(c, bound, seen, free);
                }
            }
        }
    }

    /// Universally close over the free variables, if there are any.
    pub fn quantify(&self, term: TermId) -> TermId {
        let free = self.free_vars(term);
        if free.is_empty() {
            return term;
        }
        let mut v: SmallVec<[TermId; 4]> = smallvec![term];
        v.extend(free);
        self.app(Tag::All, v)
    }

    /// Size measure: one per node, not counting the head of a `Call`.
    pub fn symbol_count(&self, term: TermId) -> u64 {
        let mut n = 0;
        let mut stack = vec![term];
        while let Some(t) = stack.pop() {
            n += 1;
            let children = self.children(t);
            let skip = usize::from(self.tag(t) == Tag::Call);
            stack.extend(children.iter().skip(skip));
        }
        n
    }

    /// Replace the subterm at `position` (child indices from the root).
    /// Panics if the position does not exist.
    pub fn splice(&self, term: TermId, position: &[usize], replacement: TermId) -> TermId {
        match position.split_first() {
            None => replacement,
            Some((&i, rest)) => {
                let mut children = self.children(term);
                assert!(i < children.len(), "{:?}: no child {}", self.tag(term), i);
                children[i] = self.splice(children[i], rest, replacement);
                self.remake(term, children)
            }
        }
    }
}

impl Default for TermStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a term as `Tag[children...]`, calls as `f(args...)` and
/// variables as `_N`.
pub fn format_term(
    term: TermId,
    terms: &TermStore,
    symbols: &SymbolStore,
) -> Result<String, String> {
    fn render(
        term: TermId,
        terms: &TermStore,
        symbols: &SymbolStore,
        out: &mut String,
    ) -> Result<(), String> {
        let name = |id: SymbolId| {
            symbols
                .resolve(id)
                .ok_or_else(|| format!("Unknown symbol {:?}", id))
        };
        match terms.resolve(term) {
            Some(Term::False) => out.push_str("false"),
            Some(Term::True) => out.push_str("true"),
            Some(Term::Integer(n)) => out.push_str(&n.to_string()),
            Some(Term::Rational(_, r)) => out.push_str(&r.to_string()),
            Some(Term::DistinctObject(id)) => {
                out.push('"');
                out.push_str(name(id)?);
                out.push('"');
            }
            Some(Term::Var { id, .. }) => {
                out.push('_');
                out.push_str(&id.to_string());
            }
            Some(Term::GlobalVar { name: id, .. }) | Some(Term::Function { name: id, .. }) => {
                out.push_str(name(id)?)
            }
            Some(Term::App(Tag::Call, children)) => {
                render(children[0], terms, symbols, out)?;
                out.push('(');
                for (i, child) in children[1..].iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    render(*child, terms, symbols, out)?;
                }
                out.push(')');
            }
            Some(Term::App(tag, children)) => {
                out.push_str(&format!("{:?}[", tag));
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    render(*child, terms, symbols, out)?;
                }
                out.push(']');
            }
            None => return Err(format!("Unknown term id {}", term.raw())),
        }
        Ok(())
    }

    let mut out = String::new();
    render(term, terms, symbols, &mut out)?;
    Ok(out)
}

#[cfg(test)]
#[path = "tests/term.rs"]
mod tests;
