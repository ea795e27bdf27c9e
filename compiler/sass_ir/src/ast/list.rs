//! List values.

use std::ops::Index;

use crate::traits::impl_has_origin;
use crate::{Origin, ValueId};

/// How list elements are joined.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Separator {
    #[default]
    Space,
    Comma,
}

impl Separator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::Comma => ", ",
        }
    }
}

/// Ordered values joined by a separator.
///
/// Also used for the evaluated form of a rest argument (`is_arglist`).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct List {
    pub origin: Origin,
    elements: Vec<ValueId>,
    pub separator: Separator,
    pub is_arglist: bool,
}

impl_has_origin!(List);

impl List {
    pub fn new(origin: Origin, separator: Separator) -> Self {
        Self::with_capacity(origin, separator, 0)
    }

    pub fn with_capacity(origin: Origin, separator: Separator, capacity: usize) -> Self {
        List {
            origin,
            elements: Vec::with_capacity(capacity),
            separator,
            is_arglist: false,
        }
    }

    /// An argument-splat list.
    pub fn arglist(origin: Origin, separator: Separator) -> Self {
        List {
            is_arglist: true,
            ..Self::new(origin, separator)
        }
    }

    /// Append one element.
    pub fn push(&mut self, value: ValueId) -> &mut Self {
        self.elements.push(value);
        self
    }

    /// Append every element of `other`.
    ///
    /// The separator of `self` is kept and `other`'s is dropped, even when
    /// they differ. Callers decide beforehand whether that merge makes sense.
    pub fn append(&mut self, other: List) -> &mut Self {
        self.elements.extend(other.elements);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<ValueId> {
        self.elements.get(index).copied()
    }

    pub fn elements(&self) -> &[ValueId] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = ValueId> + '_ {
        self.elements.iter().copied()
    }

    /// Remove and return every element, leaving the list empty.
    pub(crate) fn take_elements(&mut self) -> Vec<ValueId> {
        std::mem::take(&mut self.elements)
    }

    pub(crate) fn extend_elements(&mut self, elements: Vec<ValueId>) {
        self.elements.extend(elements);
    }
}

impl Index<usize> for List {
    type Output = ValueId;

    #[track_caller]
    fn index(&self, index: usize) -> &ValueId {
        &self.elements[index]
    }
}

impl Extend<ValueId> for List {
    fn extend<I: IntoIterator<Item = ValueId>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}
