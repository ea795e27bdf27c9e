//! Statement Types
//!
//! Statement node, its variants, and statement blocks.
//!
//! Statements are the expansion side of the tree: they exist to be
//! rewritten and macro-expanded, while values exist to be evaluated.

use std::fmt;
use std::ops::Index;

use crate::traits::impl_has_origin;
use crate::{
    ArgumentsId, BlockId, ListId, Name, Origin, ParametersId, SelectorId, StmtId, StringId,
    ValueId,
};

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub origin: Origin,
    /// Used when nested rulesets are rearranged for output.
    /// True for rulesets, false for everything else.
    pub is_unnestable: bool,
}

impl_has_origin!(Stmt);

impl Stmt {
    pub fn new(kind: StmtKind, origin: Origin) -> Self {
        let is_unnestable = matches!(kind, StmtKind::Ruleset { .. });
        Stmt {
            kind,
            origin,
            is_unnestable,
        }
    }

    pub fn ruleset(origin: Origin, selector: SelectorId, block: BlockId) -> Self {
        Self::new(StmtKind::Ruleset { selector, block }, origin)
    }

    pub fn propset(origin: Origin, property_fragment: StringId, block: BlockId) -> Self {
        Self::new(
            StmtKind::Propset {
                property_fragment,
                block,
            },
            origin,
        )
    }

    pub fn media_query(origin: Origin, query: ValueId, block: BlockId) -> Self {
        Self::new(StmtKind::MediaQuery { query, block }, origin)
    }

    pub fn directive(origin: Origin, keyword: Name, selector: SelectorId, block: BlockId) -> Self {
        Self::new(
            StmtKind::Directive {
                keyword,
                selector,
                block,
            },
            origin,
        )
    }

    pub fn declaration(origin: Origin, property: StringId, values: ListId) -> Self {
        Self::new(StmtKind::Declaration { property, values }, origin)
    }

    /// `$variable: value` or, when guarded, `$variable: value !default`.
    pub fn assignment(origin: Origin, variable: Name, value: ValueId, is_guarded: bool) -> Self {
        Self::new(
            StmtKind::Assignment {
                variable,
                value,
                is_guarded,
            },
            origin,
        )
    }

    pub fn import(origin: Origin, location: StringId) -> Self {
        Self::new(StmtKind::Import { location }, origin)
    }

    pub fn warning(origin: Origin, message: StringId) -> Self {
        Self::new(StmtKind::Warning { message }, origin)
    }

    pub fn comment(origin: Origin, text: StringId) -> Self {
        Self::new(StmtKind::Comment { text }, origin)
    }

    pub fn if_(
        origin: Origin,
        predicate: ValueId,
        consequent: BlockId,
        alternative: Option<BlockId>,
    ) -> Self {
        Self::new(
            StmtKind::If {
                predicate,
                consequent,
                alternative,
            },
            origin,
        )
    }

    /// `@for $variable from lower through upper` (inclusive) or `to upper`.
    pub fn for_(
        origin: Origin,
        variable: Name,
        lower_bound: ValueId,
        upper_bound: ValueId,
        block: BlockId,
        is_inclusive: bool,
    ) -> Self {
        Self::new(
            StmtKind::For {
                variable,
                lower_bound,
                upper_bound,
                block,
                is_inclusive,
            },
            origin,
        )
    }

    pub fn each(origin: Origin, variable: Name, list: ValueId, block: BlockId) -> Self {
        Self::new(
            StmtKind::Each {
                variable,
                list,
                block,
            },
            origin,
        )
    }

    pub fn while_(origin: Origin, predicate: ValueId, block: BlockId) -> Self {
        Self::new(StmtKind::While { predicate, block }, origin)
    }

    pub fn extend(origin: Origin, selector: SelectorId) -> Self {
        Self::new(StmtKind::Extend { selector }, origin)
    }

    pub fn definition(
        origin: Origin,
        kind: DefinitionKind,
        name: Name,
        parameters: ParametersId,
        block: BlockId,
    ) -> Self {
        Self::new(
            StmtKind::Definition {
                kind,
                name,
                parameters,
                block,
            },
            origin,
        )
    }

    /// `@include name(args)`, optionally with a content block.
    pub fn mixin_call(
        origin: Origin,
        name: Name,
        arguments: ArgumentsId,
        block: Option<BlockId>,
    ) -> Self {
        Self::new(
            StmtKind::MixinCall {
                name,
                arguments,
                block,
            },
            origin,
        )
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.origin)
    }
}

/// Whether a definition is a mixin or a function.
///
/// Both share one shape; they differ only in how the evaluator runs them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DefinitionKind {
    Mixin,
    Function,
}

impl DefinitionKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Mixin => "mixin",
            Self::Function => "function",
        }
    }
}

/// Statement kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// `selector { ... }`
    Ruleset { selector: SelectorId, block: BlockId },

    /// Namespaced properties: `font: { family: x; size: y; }`
    Propset {
        property_fragment: StringId,
        block: BlockId,
    },

    /// `@media query { ... }`
    MediaQuery { query: ValueId, block: BlockId },

    /// Any other `@keyword selector { ... }` rule.
    Directive {
        keyword: Name,
        selector: SelectorId,
        block: BlockId,
    },

    /// `property: values;`
    Declaration { property: StringId, values: ListId },

    /// `$variable: value [!default];`
    Assignment {
        variable: Name,
        value: ValueId,
        is_guarded: bool,
    },

    /// `@import location;`
    Import { location: StringId },

    /// `@warn message;`
    Warning { message: StringId },

    /// CSS comment, possibly interpolated.
    Comment { text: StringId },

    /// `@if predicate { ... } @else { ... }`
    If {
        predicate: ValueId,
        consequent: BlockId,
        /// `None` = no else branch.
        alternative: Option<BlockId>,
    },

    /// `@for $variable from lower through|to upper { ... }`
    For {
        variable: Name,
        lower_bound: ValueId,
        upper_bound: ValueId,
        block: BlockId,
        is_inclusive: bool,
    },

    /// `@each $variable in list { ... }`
    Each {
        variable: Name,
        list: ValueId,
        block: BlockId,
    },

    /// `@while predicate { ... }`
    While { predicate: ValueId, block: BlockId },

    /// `@extend selector;`
    Extend { selector: SelectorId },

    /// `@mixin` / `@function` definition.
    Definition {
        kind: DefinitionKind,
        name: Name,
        parameters: ParametersId,
        block: BlockId,
    },

    /// `@include name(args) [{ ... }]`
    MixinCall {
        name: Name,
        arguments: ArgumentsId,
        /// `None` = no content block.
        block: Option<BlockId>,
    },
}

impl StmtKind {
    /// The body of a has-block statement.
    ///
    /// `If` is not a has-block statement; use its `consequent` and
    /// `alternative` fields.
    pub fn block(&self) -> Option<BlockId> {
        match *self {
            Self::Ruleset { block, .. }
            | Self::Propset { block, .. }
            | Self::MediaQuery { block, .. }
            | Self::Directive { block, .. }
            | Self::For { block, .. }
            | Self::Each { block, .. }
            | Self::While { block, .. }
            | Self::Definition { block, .. } => Some(block),
            Self::MixinCall { block, .. } => block,
            Self::Declaration { .. }
            | Self::Assignment { .. }
            | Self::Import { .. }
            | Self::Warning { .. }
            | Self::Comment { .. }
            | Self::If { .. }
            | Self::Extend { .. } => None,
        }
    }

    /// True for the kinds that own a body block, even if a mixin call
    /// happens to have none.
    pub fn is_has_block(&self) -> bool {
        matches!(
            self,
            Self::Ruleset { .. }
                | Self::Propset { .. }
                | Self::MediaQuery { .. }
                | Self::Directive { .. }
                | Self::For { .. }
                | Self::Each { .. }
                | Self::While { .. }
                | Self::Definition { .. }
                | Self::MixinCall { .. }
        )
    }

    /// Blocks owned directly by this statement, in source order.
    pub fn child_blocks(&self) -> impl Iterator<Item = BlockId> {
        let (first, second) = match *self {
            Self::If {
                consequent,
                alternative,
                ..
            } => (Some(consequent), alternative),
            _ => (self.block(), None),
        };
        first.into_iter().chain(second)
    }
}

/// Ordered statements.
///
/// The root block is the whole stylesheet; every other block is the body
/// of a statement.
///
/// Once stored, a block grows through `StyleArena::push_stmt` and
/// `StyleArena::append_block`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Block {
    pub origin: Origin,
    statements: Vec<StmtId>,
    pub is_root: bool,
}

impl_has_origin!(Block);

impl Block {
    /// A nested block.
    pub fn new(origin: Origin) -> Self {
        Self::with_capacity(origin, 0)
    }

    pub fn with_capacity(origin: Origin, capacity: usize) -> Self {
        Block {
            origin,
            statements: Vec::with_capacity(capacity),
            is_root: false,
        }
    }

    /// The stylesheet-level block.
    pub fn root(origin: Origin) -> Self {
        Block {
            is_root: true,
            ..Self::new(origin)
        }
    }

    pub fn push(&mut self, stmt: StmtId) -> &mut Self {
        self.statements.push(stmt);
        self
    }

    /// Move every statement of `other` onto the end of this block.
    pub fn append(&mut self, other: Block) -> &mut Self {
        self.statements.extend(other.statements);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<StmtId> {
        self.statements.get(index).copied()
    }

    pub fn statements(&self) -> &[StmtId] {
        &self.statements
    }

    pub fn iter(&self) -> impl Iterator<Item = StmtId> + '_ {
        self.statements.iter().copied()
    }

    /// Replace the statement at `index`, returning the previous one.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[track_caller]
    pub fn set(&mut self, index: usize, stmt: StmtId) -> StmtId {
        std::mem::replace(&mut self.statements[index], stmt)
    }

    pub(crate) fn take_statements(&mut self) -> Vec<StmtId> {
        std::mem::take(&mut self.statements)
    }

    pub(crate) fn extend_statements(&mut self, statements: Vec<StmtId>) {
        self.statements.extend(statements);
    }
}

impl Index<usize> for Block {
    type Output = StmtId;

    #[track_caller]
    fn index(&self, index: usize) -> &StmtId {
        &self.statements[index]
    }
}

#[cfg(test)]
mod tests;
