//! String interning for symbol names.
//!
//! Fully qualified C++ symbol names are long and repeat heavily between
//! declarations, so the symbol registry stores them once and compares
//! integer handles.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// A handle to an interned symbol name. Comparing two handles is an O(1)
/// integer comparison.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    #[inline]
    fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    #[inline]
    fn as_spur(self) -> Spur {
        self.0
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Thread-safe string interner. Clones share the same storage.
#[derive(Clone)]
pub struct StringInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern a string, returning the existing handle if it was seen before.
    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern(s))
    }

    /// Look up an already-interned string without interning it if absent.
    ///
    /// Membership queries go through this so that probing for unknown names
    /// never grows the interner.
    #[inline]
    pub fn get(&self, s: &str) -> Option<InternedString> {
        self.rodeo.get(s).map(InternedString::from_spur)
    }

    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.rodeo.resolve(&key.as_spur())
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_qualified_names() {
        let interner = StringInterner::new();
        let a = interner.intern("Urho3D::Node");
        let b = interner.intern("Urho3D::Node");
        let c = interner.intern("Urho3D::Scene");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "Urho3D::Node");
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_get_does_not_intern() {
        let interner = StringInterner::new();
        assert!(interner.get("Urho3D::Node").is_none());
        assert!(interner.is_empty());
        let a = interner.intern("Urho3D::Node");
        assert_eq!(interner.get("Urho3D::Node"), Some(a));
    }

    #[test]
    fn test_clones_share_storage() {
        let interner = StringInterner::new();
        let other = interner.clone();
        let a = interner.intern("Urho3D::Component");
        assert_eq!(other.get("Urho3D::Component"), Some(a));
    }
}
