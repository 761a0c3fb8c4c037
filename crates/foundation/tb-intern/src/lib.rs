//! String interning for identifiers held in the renaming tables

pub use lasso::Spur as Symbol;
use lasso::Rodeo;

/// Interner owned by a single pipeline run
#[derive(Debug, Default)]
pub struct Interner {
    inner: Rodeo,
}

impl Interner {
    /// Create an empty interner
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its symbol
    pub fn intern(&mut self, text: &str) -> Symbol {
        self.inner.get_or_intern(text)
    }

    /// Look up a string without interning it
    #[must_use]
    pub fn get(&self, text: &str) -> Option<Symbol> {
        self.inner.get(text)
    }

    /// Resolve a symbol back to its string
    #[must_use]
    pub fn resolve(&self, sym: &Symbol) -> &str {
        self.inner.resolve(sym)
    }

    /// Resolve a symbol that may come from another interner
    #[must_use]
    pub fn try_resolve(&self, sym: &Symbol) -> Option<&str> {
        self.inner.try_resolve(sym)
    }

    /// Number of distinct strings interned so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether nothing has been interned yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
