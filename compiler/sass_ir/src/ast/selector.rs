//! Selector Types
//!
//! CSS selector structure:
//! - `SimpleSelector`: one atom (`div`, `.foo`, `:hover`, `&`, `%foo`)
//! - `Sequence`: atoms written without whitespace (`a.foo&:hover`)
//! - `Combination`: a sequence joined to the chain on its left by a
//!   combinator. The chain is left-associative: `a > b c` is
//!   `Combination(AncestorOf, Combination(ParentOf, Combination(a), b), c)`.
//! - `Group`: comma-separated alternatives.
//!
//! # Flags
//! `SelectorFlags` record whether a parent reference or a placeholder is
//! reachable. They propagate Sequence -> Combination -> Group so the
//! expander and extender can test them without re-scanning.

use std::ops::Index;

use bitflags::bitflags;

use super::operators::Combinator;
use crate::traits::impl_has_origin;
use crate::{CombinationId, GroupId, Name, Origin, SequenceId, StringId};

bitflags! {
    /// What a selector contains, transitively.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct SelectorFlags: u8 {
        /// Contains a parent reference `&`.
        const HAS_REFERENCE = 1 << 0;
        /// Contains a placeholder `%name`.
        const HAS_PLACEHOLDER = 1 << 1;
    }
}

impl SelectorFlags {
    #[inline]
    pub const fn has_reference(self) -> bool {
        self.contains(Self::HAS_REFERENCE)
    }

    #[inline]
    pub const fn has_placeholder(self) -> bool {
        self.contains(Self::HAS_PLACEHOLDER)
    }
}

// Atoms

/// Atomic selector kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SimpleSelectorKind {
    /// Type, class, id, attribute or pseudo selector text, e.g. `.foo`.
    Simple(Name),
    /// Parent reference `&`.
    Reference,
    /// Extend-only placeholder, e.g. `%foo`. Holds the name without `%`.
    Placeholder(Name),
}

/// One atomic selector.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SimpleSelector {
    pub kind: SimpleSelectorKind,
    pub origin: Origin,
}

impl_has_origin!(SimpleSelector);

impl SimpleSelector {
    pub fn simple(origin: Origin, text: Name) -> Self {
        SimpleSelector {
            kind: SimpleSelectorKind::Simple(text),
            origin,
        }
    }

    pub fn reference(origin: Origin) -> Self {
        SimpleSelector {
            kind: SimpleSelectorKind::Reference,
            origin,
        }
    }

    pub fn placeholder(origin: Origin, name: Name) -> Self {
        SimpleSelector {
            kind: SimpleSelectorKind::Placeholder(name),
            origin,
        }
    }

    /// Flags this atom contributes to its sequence.
    pub const fn flags(&self) -> SelectorFlags {
        match self.kind {
            SimpleSelectorKind::Simple(_) => SelectorFlags::empty(),
            SimpleSelectorKind::Reference => SelectorFlags::HAS_REFERENCE,
            SimpleSelectorKind::Placeholder(_) => SelectorFlags::HAS_PLACEHOLDER,
        }
    }
}

// Sequence

/// Simple selectors in textual order.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Sequence {
    pub origin: Origin,
    selectors: Vec<SimpleSelector>,
    flags: SelectorFlags,
}

impl_has_origin!(Sequence);

impl Sequence {
    pub fn new(origin: Origin) -> Self {
        Self::with_capacity(origin, 0)
    }

    pub fn with_capacity(origin: Origin, capacity: usize) -> Self {
        Sequence {
            origin,
            selectors: Vec::with_capacity(capacity),
            flags: SelectorFlags::empty(),
        }
    }

    /// Append an atom; references and placeholders set the matching flag.
    pub fn push(&mut self, selector: SimpleSelector) -> &mut Self {
        self.flags |= selector.flags();
        self.selectors.push(selector);
        self
    }

    /// Append every atom of `other`, updating flags as repeated `push` would.
    pub fn append(&mut self, other: Sequence) -> &mut Self {
        for selector in other.selectors {
            self.push(selector);
        }
        self
    }

    #[inline]
    pub fn flags(&self) -> SelectorFlags {
        self.flags
    }

    #[inline]
    pub fn has_reference(&self) -> bool {
        self.flags.has_reference()
    }

    #[inline]
    pub fn has_placeholder(&self) -> bool {
        self.flags.has_placeholder()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&SimpleSelector> {
        self.selectors.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimpleSelector> {
        self.selectors.iter()
    }
}

impl Index<usize> for Sequence {
    type Output = SimpleSelector;

    #[track_caller]
    fn index(&self, index: usize) -> &SimpleSelector {
        &self.selectors[index]
    }
}

// Combination

/// A sequence combined with the chain to its left.
///
/// Built only through `StyleArena::alloc_combination`, which computes the
/// flags from the context and the sequence. The flags are not recomputed
/// if either is later changed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Combination {
    pub origin: Origin,
    pub combinator: Combinator,
    /// Left-hand side of the chain; `None` for the first link.
    pub context: Option<CombinationId>,
    pub selector: SequenceId,
    flags: SelectorFlags,
}

impl_has_origin!(Combination);

impl Combination {
    pub(crate) fn new(
        origin: Origin,
        combinator: Combinator,
        context: Option<CombinationId>,
        selector: SequenceId,
        flags: SelectorFlags,
    ) -> Self {
        Combination {
            origin,
            combinator,
            context,
            selector,
            flags,
        }
    }

    #[inline]
    pub fn flags(&self) -> SelectorFlags {
        self.flags
    }

    #[inline]
    pub fn has_reference(&self) -> bool {
        self.flags.has_reference()
    }

    #[inline]
    pub fn has_placeholder(&self) -> bool {
        self.flags.has_placeholder()
    }
}

// Group

/// Comma-separated alternatives.
///
/// Members are added through `StyleArena::push_combination` and
/// `StyleArena::append_group`, which keep the flags in sync.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Group {
    pub origin: Origin,
    selectors: Vec<CombinationId>,
    flags: SelectorFlags,
}

impl_has_origin!(Group);

impl Group {
    pub fn new(origin: Origin) -> Self {
        Self::with_capacity(origin, 0)
    }

    pub fn with_capacity(origin: Origin, capacity: usize) -> Self {
        Group {
            origin,
            selectors: Vec::with_capacity(capacity),
            flags: SelectorFlags::empty(),
        }
    }

    pub(crate) fn push(&mut self, id: CombinationId, flags: SelectorFlags) {
        self.flags |= flags;
        self.selectors.push(id);
    }

    pub(crate) fn take_members(&mut self) -> Vec<CombinationId> {
        self.flags = SelectorFlags::empty();
        std::mem::take(&mut self.selectors)
    }

    #[inline]
    pub fn flags(&self) -> SelectorFlags {
        self.flags
    }

    #[inline]
    pub fn has_reference(&self) -> bool {
        self.flags.has_reference()
    }

    #[inline]
    pub fn has_placeholder(&self) -> bool {
        self.flags.has_placeholder()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<CombinationId> {
        self.selectors.get(index).copied()
    }

    pub fn members(&self) -> &[CombinationId] {
        &self.selectors
    }

    pub fn iter(&self) -> impl Iterator<Item = CombinationId> + '_ {
        self.selectors.iter().copied()
    }
}

impl Index<usize> for Group {
    type Output = CombinationId;

    #[track_caller]
    fn index(&self, index: usize) -> &CombinationId {
        &self.selectors[index]
    }
}

// Selector

/// A selector in statement position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Selector {
    pub kind: SelectorKind,
    pub origin: Origin,
}

impl_has_origin!(Selector);

impl Selector {
    pub fn new(kind: SelectorKind, origin: Origin) -> Self {
        Selector { kind, origin }
    }
}

/// Selector shapes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SelectorKind {
    /// Contains `#{...}`; the expanded string is re-parsed later.
    Interpolated(StringId),
    Simple(SimpleSelector),
    Sequence(SequenceId),
    Combination(CombinationId),
    Group(GroupId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(local: u32) -> SimpleSelector {
        SimpleSelector::simple(Origin::SYNTHETIC, Name::new(0, local))
    }

    #[test]
    fn plain_sequence_has_no_flags() {
        let mut seq = Sequence::new(Origin::SYNTHETIC);
        seq.push(atom(1)).push(atom(2));
        assert_eq!(seq.len(), 2);
        assert!(!seq.has_reference());
        assert!(!seq.has_placeholder());
    }

    #[test]
    fn reference_sets_flag() {
        let mut seq = Sequence::new(Origin::SYNTHETIC);
        seq.push(SimpleSelector::reference(Origin::SYNTHETIC)).push(atom(1));
        assert!(seq.has_reference());
        assert!(!seq.has_placeholder());
        assert_eq!(seq[0].kind, SimpleSelectorKind::Reference);
    }

    #[test]
    fn placeholder_sets_flag() {
        let mut seq = Sequence::new(Origin::SYNTHETIC);
        seq.push(SimpleSelector::placeholder(Origin::SYNTHETIC, Name::new(0, 3)));
        assert!(seq.has_placeholder());
        assert!(!seq.has_reference());
    }

    #[test]
    fn sequence_append_merges_flags() {
        let mut left = Sequence::new(Origin::SYNTHETIC);
        left.push(atom(1));
        let mut right = Sequence::new(Origin::SYNTHETIC);
        right.push(SimpleSelector::reference(Origin::SYNTHETIC));

        left.append(right);

        assert_eq!(left.len(), 2);
        assert!(left.has_reference());
        assert_eq!(left.get(1).map(|s| s.kind), Some(SimpleSelectorKind::Reference));
    }

    #[test]
    fn group_flags_accumulate() {
        let mut group = Group::new(Origin::SYNTHETIC);
        group.push(CombinationId::new(0), SelectorFlags::empty());
        assert!(!group.has_reference());
        group.push(CombinationId::new(1), SelectorFlags::HAS_REFERENCE);
        group.push(CombinationId::new(2), SelectorFlags::empty());
        assert!(group.has_reference());
        assert!(!group.has_placeholder());
        assert_eq!(group.len(), 3);
    }
}
