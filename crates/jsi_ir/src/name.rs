//! Interned identifier.
//!
//! The teacher's `Name` shards its index across sixteen concurrently-locked
//! tables because its interner is shared across parallel compilation
//! threads. This interpreter runs a single program on a single thread
//! (spec: concurrency model), so the sharding buys nothing here; `Name` is
//! a plain interned index into one `FxHashMap`-backed table.

use std::fmt;

use rustc_hash::FxHashMap;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string, always index 0.
    pub const EMPTY: Name = Name(0);

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Interns identifier text to compact, cheaply-comparable `Name`s.
///
/// Not `Sync`; the interpreter is single-threaded end to end, so interior
/// mutability here is a plain `Vec`/`FxHashMap`, not a lock.
pub struct StringInterner {
    map: FxHashMap<Box<str>, u32>,
    strings: Vec<Box<str>>,
}

impl StringInterner {
    #[must_use]
    pub fn new() -> Self {
        let mut interner = Self {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        let empty = interner.intern("");
        debug_assert_eq!(empty, Name::EMPTY);
        interner
    }

    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&idx) = self.map.get(s) {
            return Name(idx);
        }
        let idx = self.strings.len() as u32;
        let boxed: Box<str> = s.into();
        self.strings.push(boxed.clone());
        self.map.insert(boxed, idx);
        Name(idx)
    }

    #[must_use]
    pub fn lookup(&self, name: Name) -> &str {
        &self.strings[name.0 as usize]
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let mut interner = StringInterner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        assert_eq!(a, b);
        assert_eq!(interner.lookup(a), "foo");
    }

    #[test]
    fn distinct_strings_get_distinct_names() {
        let mut interner = StringInterner::new();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn empty_string_is_preinterned() {
        let mut interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }
}
