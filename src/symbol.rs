use lasso::{Spur, ThreadedRodeo};

/// Interned name of a global symbol or distinct object.
pub type SymbolId = Spur;

/// Thread-safe interner for the names carried by named leaves.
///
/// Names are only labels: a `GlobalVar` or `Function` is identified by the
/// fresh identity its factory allocates, not by its name, so two globals
/// may share a `SymbolId`. Distinct objects, by contrast, are equal exactly
/// when their `SymbolId`s are.
pub struct SymbolStore {
    rodeo: ThreadedRodeo,
}

impl SymbolStore {
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Intern a name, returning the existing id if already present.
    pub fn intern(&self, name: &str) -> SymbolId {
        self.rodeo.get_or_intern(name)
    }

    /// Returns None if the id was not created by this store.
    pub fn resolve(&self, id: SymbolId) -> Option<&str> {
        self.rodeo.try_resolve(&id)
    }

    /// Look up a name without interning it.
    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.rodeo.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rodeo.contains(name)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for SymbolStore {
    fn default() -> Self {
        Self::new()
    }
}
