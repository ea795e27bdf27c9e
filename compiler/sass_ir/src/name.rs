//! Interned string identifier.
//!
//! Variable names, directive keywords, units, selector text and source
//! paths are all stored as compact 32-bit `Name`s.

use std::fmt;

/// Handle to a string owned by a `StringInterner`.
///
/// The high `SHARD_BITS` select the interner shard, the rest index into it.
/// Two names from the same interner are equal iff their strings are equal.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    const SHARD_BITS: u32 = 4;
    const LOCAL_BITS: u32 = u32::BITS - Self::SHARD_BITS;

    /// The empty string, pre-interned at shard 0, index 0.
    pub const EMPTY: Name = Name(0);

    /// Largest index a single shard can hand out.
    pub const MAX_LOCAL: u32 = (1 << Self::LOCAL_BITS) - 1;

    /// Shards in every interner.
    pub const NUM_SHARDS: usize = 1 << Self::SHARD_BITS;

    #[inline]
    pub const fn new(shard: u32, local: u32) -> Self {
        debug_assert!((shard as usize) < Self::NUM_SHARDS);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << Self::LOCAL_BITS) | local)
    }

    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> Self::LOCAL_BITS) as usize
    }

    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == Self::EMPTY.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Name(<empty>)")
        } else {
            write!(f, "Name({}:{})", self.shard(), self.local())
        }
    }
}
