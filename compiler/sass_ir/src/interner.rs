//! Sharded string interner for identifiers, units, selector text and paths.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use super::Name;

/// Strings every stylesheet is likely to mention.
const PRE_INTERNED: &[&str] = &[
    // Directives
    "media", "import", "charset", "font-face", "keyframes", "supports", "page",
    "mixin", "function", "include", "content", "return", "extend", "warn", "debug",
    "error", "if", "else", "for", "each", "while",
    // Control-flow words
    "from", "through", "to", "in", "default", "global", "optional",
    // Literals and logical operators
    "true", "false", "null", "and", "or", "not",
    // Units
    "px", "em", "rem", "ex", "ch", "vw", "vh", "vmin", "vmax", "cm", "mm",
    "pt", "pc", "deg", "rad", "grad", "turn", "s", "ms", "hz", "khz", "dpi",
    "dpcm", "dppx", "%",
    // Selector atoms
    "&", "*",
];

/// One shard: leaked strings plus the reverse index.
#[derive(Default)]
struct Shard {
    index: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Shard {
    fn find(&self, s: &str) -> Option<u32> {
        self.index.get(s).copied()
    }

    /// Store `s`, returning its local index.
    ///
    /// # Panics
    /// Panics once the shard holds `Name::MAX_LOCAL + 1` strings.
    fn insert(&mut self, s: &str) -> u32 {
        let local = u32::try_from(self.strings.len())
            .ok()
            .filter(|&local| local <= Name::MAX_LOCAL)
            .unwrap_or_else(|| panic!("interner shard is full ({} strings)", self.strings.len()));
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        self.strings.push(leaked);
        self.index.insert(leaked, local);
        local
    }
}

/// Sharded string interner.
///
/// Each shard sits behind its own `RwLock`, so one interner can be shared
/// by the parser and the evaluator through [`SharedInterner`]. Strings are
/// leaked and live for the rest of the process.
pub struct StringInterner {
    shards: [RwLock<Shard>; Name::NUM_SHARDS],
}

impl StringInterner {
    /// Create an interner with Sass keywords and CSS units already in it.
    pub fn new() -> Self {
        let interner = StringInterner {
            shards: std::array::from_fn(|_| RwLock::new(Shard::default())),
        };
        // `Name::EMPTY` is shard 0, local 0.
        interner.shards[0].write().insert("");
        for s in PRE_INTERNED {
            interner.intern(s);
        }
        interner
    }

    fn shard_of(s: &str) -> u32 {
        let mut hasher = FxHasher::default();
        s.hash(&mut hasher);
        // NUM_SHARDS is a power of two, so masking keeps the value below it.
        let mask = Name::NUM_SHARDS as u64 - 1;
        u32::try_from(hasher.finish() & mask).unwrap_or(0)
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if a shard exceeds `Name::MAX_LOCAL` strings.
    pub fn intern(&self, s: &str) -> Name {
        if s.is_empty() {
            return Name::EMPTY;
        }
        let shard = Self::shard_of(s);
        let lock = &self.shards[shard as usize];

        if let Some(local) = lock.read().find(s) {
            return Name::new(shard, local);
        }

        let mut guard = lock.write();
        // Another writer may have won the race.
        let local = match guard.find(s) {
            Some(local) => local,
            None => guard.insert(s),
        };
        Name::new(shard, local)
    }

    /// Look up the string for a Name.
    ///
    /// # Panics
    /// Panics if `name` was not produced by this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.shards[name.shard()].read().strings[name.local()]
    }

    /// Number of distinct strings, including the empty string.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().strings.len()).sum()
    }

    /// True if nothing but the empty string has been interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Clonable handle to one interner shared by every phase that builds or
/// reads the tree.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn intern_is_idempotent() {
        let interner = StringInterner::new();

        let primary = interner.intern("$primary");
        let gutter = interner.intern("$gutter");

        assert_eq!(primary, interner.intern("$primary"));
        assert_ne!(primary, gutter);
        assert_eq!(interner.lookup(primary), "$primary");
        assert_eq!(interner.lookup(gutter), "$gutter");
    }

    #[test]
    fn empty_string_is_name_empty() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn keywords_and_units_are_pre_interned() {
        let interner = StringInterner::new();
        let before = interner.len();

        let px = interner.intern("px");
        let media = interner.intern("media");
        let amp = interner.intern("&");

        assert_eq!(interner.len(), before);
        assert_eq!(interner.lookup(px), "px");
        assert_eq!(interner.lookup(media), "media");
        assert_eq!(interner.lookup(amp), "&");
        assert!(!interner.is_empty());
    }

    #[test]
    fn many_strings_spread_across_shards() {
        let interner = StringInterner::new();
        let names: Vec<_> = (0..200).map(|i| interner.intern(&format!("$v{i}"))).collect();
        for (i, name) in names.iter().enumerate() {
            assert_eq!(interner.lookup(*name), format!("$v{i}"));
        }
        let shards: std::collections::HashSet<_> = names.iter().map(|n| n.shard()).collect();
        assert!(shards.len() > 1);
    }

    #[test]
    fn shared_handles_see_one_table() {
        let interner = SharedInterner::new();
        let other = interner.clone();

        let a = interner.intern("styles/main.scss");
        let b = other.intern("styles/main.scss");

        assert_eq!(a, b);
        assert_eq!(other.lookup(a), "styles/main.scss");
    }
}
