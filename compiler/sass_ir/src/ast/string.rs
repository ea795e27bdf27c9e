//! String values.
//!
//! A string is a sequence of fragments. A fragment is any value: usually a
//! `Token` holding literal text, or an expression spliced in by `#{...}`.

use std::ops::Index;

use crate::traits::impl_has_origin;
use crate::{Origin, ValueId};

/// Quoted or unquoted string, identifier, interpolation or concatenation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StringValue {
    pub origin: Origin,
    fragments: Vec<ValueId>,
    pub is_quoted: bool,
    pub is_interpolated: bool,
}

impl_has_origin!(StringValue);

impl StringValue {
    /// Unquoted, uninterpolated string.
    pub fn new(origin: Origin) -> Self {
        Self::with_capacity(origin, 0)
    }

    pub fn with_capacity(origin: Origin, capacity: usize) -> Self {
        StringValue {
            origin,
            fragments: Vec::with_capacity(capacity),
            is_quoted: false,
            is_interpolated: false,
        }
    }

    /// A string written between quotes.
    pub fn quoted(origin: Origin) -> Self {
        StringValue {
            is_quoted: true,
            ..Self::new(origin)
        }
    }

    #[must_use]
    pub fn interpolated(mut self) -> Self {
        self.is_interpolated = true;
        self
    }

    /// Append one fragment.
    pub fn push(&mut self, fragment: ValueId) -> &mut Self {
        self.fragments.push(fragment);
        self
    }

    /// Append every fragment of `other`, flattened into this string.
    ///
    /// The quoting and interpolation flags of `self` are kept.
    pub fn append(&mut self, other: StringValue) -> &mut Self {
        self.fragments.extend(other.fragments);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<ValueId> {
        self.fragments.get(index).copied()
    }

    pub fn fragments(&self) -> &[ValueId] {
        &self.fragments
    }

    pub fn iter(&self) -> impl Iterator<Item = ValueId> + '_ {
        self.fragments.iter().copied()
    }

    pub(crate) fn take_fragments(&mut self) -> Vec<ValueId> {
        std::mem::take(&mut self.fragments)
    }

    pub(crate) fn extend_fragments(&mut self, fragments: Vec<ValueId>) {
        self.fragments.extend(fragments);
    }
}

impl Index<usize> for StringValue {
    type Output = ValueId;

    #[track_caller]
    fn index(&self, index: usize) -> &ValueId {
        &self.fragments[index]
    }
}
