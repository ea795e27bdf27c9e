//! Parent links between arena nodes.
//!
//! Every node has at most one parent, and no node may sit beneath itself.
//! Linking checks both before anything is recorded.

use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};

use crate::ast::{
    Arguments, Block, Combination, Group, List, Parameters, Selector, SelectorKind, Sequence,
    Stmt, StmtKind, StringValue, Value, ValueKind,
};
use crate::{
    ArgumentsId, BlockId, CombinationId, GroupId, ListId, ParametersId, SelectorId, SequenceId,
    StmtId, StringId, ValueId,
};

/// Any node stored in a `StyleArena`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) enum Node {
    Value(ValueId),
    List(ListId),
    String(StringId),
    Stmt(StmtId),
    Block(BlockId),
    Selector(SelectorId),
    Sequence(SequenceId),
    Combination(CombinationId),
    Group(GroupId),
    Parameters(ParametersId),
    Arguments(ArgumentsId),
}

/// Direct children of one node, in source order.
pub(crate) type Children = SmallVec<[Node; 4]>;

/// Why a link was refused.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum LinkError {
    /// The child is the parent or one of its ancestors.
    Cycle(Node),
    /// The child already hangs under another node.
    Shared(Node),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle(node) => write!(f, "{node:?} would contain itself"),
            Self::Shared(node) => write!(f, "{node:?} already has a parent"),
        }
    }
}

/// Parent of every linked node.
#[derive(Clone, Default, Eq, PartialEq)]
pub(crate) struct Owners {
    parents: FxHashMap<Node, Node>,
}

impl Owners {
    /// Check that `children` may be linked under `parent`.
    ///
    /// A child currently linked to `keep` counts as free. Replacements pass
    /// the node being rewritten, merges pass the operand being drained.
    pub(crate) fn check(
        &self,
        parent: Node,
        children: &[Node],
        keep: Option<Node>,
    ) -> Result<(), LinkError> {
        for (i, &child) in children.iter().enumerate() {
            if children[..i].contains(&child) {
                return Err(LinkError::Shared(child));
            }
            if let Some(&owner) = self.parents.get(&child) {
                if Some(owner) != keep {
                    return Err(LinkError::Shared(child));
                }
            }
        }

        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if children.contains(&node) {
                return Err(LinkError::Cycle(node));
            }
            cursor = self.parents.get(&node).copied();
        }
        Ok(())
    }

    pub(crate) fn link(&mut self, parent: Node, children: &[Node]) {
        for &child in children {
            self.parents.insert(child, parent);
        }
    }

    /// Detach `children`; each becomes a root again.
    pub(crate) fn unlink(&mut self, children: &[Node]) {
        for child in children {
            self.parents.remove(child);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.parents.clear();
    }
}

// Child enumeration, one function per family.

pub(crate) fn value_children(value: &Value) -> Children {
    match value.kind {
        ValueKind::List(list) => smallvec![Node::List(list)],
        ValueKind::String(string) => smallvec![Node::String(string)],
        ValueKind::Binary { left, right, .. } => smallvec![Node::Value(left), Node::Value(right)],
        ValueKind::Negation(operand) => smallvec![Node::Value(operand)],
        ValueKind::FunctionCall { name, arguments } => {
            smallvec![Node::String(name), Node::Arguments(arguments)]
        }
        ValueKind::Number(_)
        | ValueKind::Percentage(_)
        | ValueKind::Dimension(_)
        | ValueKind::Color(_)
        | ValueKind::Boolean(_)
        | ValueKind::Textual { .. }
        | ValueKind::Token(_)
        | ValueKind::Variable(_) => Children::new(),
    }
}

pub(crate) fn list_children(list: &List) -> Children {
    list.iter().map(Node::Value).collect()
}

pub(crate) fn string_children(string: &StringValue) -> Children {
    string.iter().map(Node::Value).collect()
}

pub(crate) fn stmt_children(stmt: &Stmt) -> Children {
    let mut children: Children = match stmt.kind {
        StmtKind::Ruleset { selector, .. }
        | StmtKind::Directive { selector, .. }
        | StmtKind::Extend { selector } => smallvec![Node::Selector(selector)],
        StmtKind::Propset {
            property_fragment, ..
        } => smallvec![Node::String(property_fragment)],
        StmtKind::MediaQuery { query, .. } => smallvec![Node::Value(query)],
        StmtKind::Declaration { property, values } => {
            smallvec![Node::String(property), Node::List(values)]
        }
        StmtKind::Assignment { value, .. } => smallvec![Node::Value(value)],
        StmtKind::Import { location } => smallvec![Node::String(location)],
        StmtKind::Warning { message } => smallvec![Node::String(message)],
        StmtKind::Comment { text } => smallvec![Node::String(text)],
        StmtKind::If { predicate, .. } | StmtKind::While { predicate, .. } => {
            smallvec![Node::Value(predicate)]
        }
        StmtKind::For {
            lower_bound,
            upper_bound,
            ..
        } => smallvec![Node::Value(lower_bound), Node::Value(upper_bound)],
        StmtKind::Each { list, .. } => smallvec![Node::Value(list)],
        StmtKind::Definition { parameters, .. } => smallvec![Node::Parameters(parameters)],
        StmtKind::MixinCall { arguments, .. } => smallvec![Node::Arguments(arguments)],
    };
    children.extend(stmt.kind.child_blocks().map(Node::Block));
    children
}

pub(crate) fn block_children(block: &Block) -> Children {
    block.iter().map(Node::Stmt).collect()
}

pub(crate) fn selector_children(selector: &Selector) -> Children {
    match selector.kind {
        SelectorKind::Interpolated(text) => smallvec![Node::String(text)],
        SelectorKind::Simple(_) => Children::new(),
        SelectorKind::Sequence(seq) => smallvec![Node::Sequence(seq)],
        SelectorKind::Combination(comb) => smallvec![Node::Combination(comb)],
        SelectorKind::Group(group) => smallvec![Node::Group(group)],
    }
}

pub(crate) fn sequence_children(_sequence: &Sequence) -> Children {
    Children::new()
}

pub(crate) fn combination_children(combination: &Combination) -> Children {
    combination
        .context
        .map(Node::Combination)
        .into_iter()
        .chain([Node::Sequence(combination.selector)])
        .collect()
}

pub(crate) fn group_children(group: &Group) -> Children {
    group.members().iter().copied().map(Node::Combination).collect()
}

pub(crate) fn parameters_children(params: &Parameters) -> Children {
    params
        .iter()
        .filter_map(|param| param.default_value)
        .map(Node::Value)
        .collect()
}

pub(crate) fn arguments_children(args: &Arguments) -> Children {
    args.iter().map(|arg| Node::Value(arg.value)).collect()
}
