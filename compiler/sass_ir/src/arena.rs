//! Arena storage for the stylesheet tree.
//!
//! - One contiguous table per node family
//! - Children referenced by typed ids, never by pointer
//! - Bulk deallocation when the arena is dropped or reset
//!
//! A node is owned by at most one parent and never sits beneath itself.
//! The arena records each node's parent as it is linked:
//! - `alloc_*` links the new node's children, which must already be stored
//! - `push_*` and `append_*` refuse a child that already has a parent or
//!   that is an ancestor of the target
//! - `replace_*` may reuse the old node's children but no other linked node
//!
//! Merges move ids from the right operand into the left and leave the
//! right operand empty.

use std::fmt;

use tracing::{debug, trace};

use self::owners::{
    arguments_children, block_children, combination_children, group_children, list_children,
    parameters_children, selector_children, sequence_children, stmt_children, string_children,
    value_children, LinkError, Node, Owners,
};

use crate::ast::{
    Argument, Arguments, Block, Combination, Combinator, Group, List, Parameter, Parameters,
    Selector, SelectorFlags, SelectorKind, Sequence, Stmt, StringValue, Value, ValueKind,
};
use crate::{
    ArgumentsId, BlockId, CombinationId, GroupId, IrError, IrResult, ListId, Origin, ParametersId,
    SelectorId, SequenceId, StmtId, StringId, ValueId,
};

mod owners;

/// Next id for a table of `len` nodes.
///
/// # Panics
/// Panics if the table already holds `u32::MAX` nodes.
#[inline]
#[track_caller]
fn next_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena table overflow: {len} nodes"))
}

/// Contiguous storage for every node of one stylesheet.
#[derive(Clone, Default, PartialEq)]
pub struct StyleArena {
    values: Vec<Value>,
    lists: Vec<List>,
    strings: Vec<StringValue>,
    stmts: Vec<Stmt>,
    blocks: Vec<Block>,
    selectors: Vec<Selector>,
    sequences: Vec<Sequence>,
    combinations: Vec<Combination>,
    groups: Vec<Group>,
    parameters: Vec<Parameters>,
    arguments: Vec<Arguments>,
    owners: Owners,
}

/// `alloc_*` and `get_*` for one table.
macro_rules! table_access {
    (
        $field:ident,
        $node:ty,
        $id:ident,
        $variant:ident,
        $children:ident,
        $alloc:ident,
        $get:ident $(,)?
    ) => {
        #[doc = concat!("Store a `", stringify!($node), "`, returning its id.")]
        ///
        /// # Panics
        /// Panics if a child id is not stored yet or is already linked.
        #[inline]
        #[track_caller]
        pub fn $alloc(&mut self, node: $node) -> $id {
            let id = $id::new(next_index(self.$field.len()));
            self.adopt(Node::$variant(id), &$children(&node), node.origin);
            self.$field.push(node);
            id
        }

        #[doc = concat!("Get a `", stringify!($node), "` by id.")]
        ///
        /// # Panics
        /// Panics if `id` is out of bounds.
        #[inline]
        #[track_caller]
        pub fn $get(&self, id: $id) -> &$node {
            &self.$field[id.index()]
        }
    };
}

/// `get_*_mut` for tables whose nodes hold no child ids.
macro_rules! table_access_mut {
    ($field:ident, $node:ty, $id:ident, $get_mut:ident) => {
        #[doc = concat!("Get a mutable `", stringify!($node), "` by id.")]
        ///
        /// # Panics
        /// Panics if `id` is out of bounds.
        #[inline]
        #[track_caller]
        pub fn $get_mut(&mut self, id: $id) -> &mut $node {
            &mut self.$field[id.index()]
        }
    };
}

impl StyleArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with estimated capacity based on source size.
    /// Heuristic: ~1 value per 20 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 20;
        StyleArena {
            values: Vec::with_capacity(estimated),
            lists: Vec::with_capacity(estimated / 4),
            strings: Vec::with_capacity(estimated / 4),
            stmts: Vec::with_capacity(estimated / 4),
            blocks: Vec::with_capacity(estimated / 8),
            selectors: Vec::with_capacity(estimated / 8),
            sequences: Vec::with_capacity(estimated / 8),
            combinations: Vec::with_capacity(estimated / 8),
            groups: Vec::with_capacity(estimated / 16),
            parameters: Vec::with_capacity(estimated / 32),
            arguments: Vec::with_capacity(estimated / 16),
            owners: Owners::default(),
        }
    }

    // ===== Links =====

    fn contains(&self, node: Node) -> bool {
        match node {
            Node::Value(id) => id.index() < self.values.len(),
            Node::List(id) => id.index() < self.lists.len(),
            Node::String(id) => id.index() < self.strings.len(),
            Node::Stmt(id) => id.index() < self.stmts.len(),
            Node::Block(id) => id.index() < self.blocks.len(),
            Node::Selector(id) => id.index() < self.selectors.len(),
            Node::Sequence(id) => id.index() < self.sequences.len(),
            Node::Combination(id) => id.index() < self.combinations.len(),
            Node::Group(id) => id.index() < self.groups.len(),
            Node::Parameters(id) => id.index() < self.parameters.len(),
            Node::Arguments(id) => id.index() < self.arguments.len(),
        }
    }

    /// Check that `children` may hang under `parent`; see `Owners::check`.
    ///
    /// # Panics
    /// Panics if a child is not stored in this arena.
    #[track_caller]
    fn check_link(
        &self,
        parent: Node,
        children: &[Node],
        keep: Option<Node>,
        origin: Origin,
    ) -> IrResult<()> {
        for &child in children {
            assert!(self.contains(child), "{parent:?} refers to {child:?}, which is not stored");
        }
        self.owners.check(parent, children, keep).map_err(|err| {
            debug!(line = origin.line, ?parent, %err, "rejected link");
            match err {
                LinkError::Cycle(_) => IrError::CyclicNode { origin },
                LinkError::Shared(_) => IrError::SharedNode { origin },
            }
        })
    }

    /// Link the children of a node being allocated.
    #[track_caller]
    fn adopt(&mut self, parent: Node, children: &[Node], origin: Origin) {
        if let Err(err) = self.check_link(parent, children, None, origin) {
            panic!("cannot store {parent:?}: {err}");
        }
        self.owners.link(parent, children);
    }

    /// Move the links of `moved` from `from` to `to`.
    #[track_caller]
    fn relink(&mut self, to: Node, from: Node, moved: &[Node], origin: Origin) -> IrResult<()> {
        self.check_link(to, moved, Some(from), origin)?;
        self.owners.link(to, moved);
        Ok(())
    }

    // ===== Values =====

    table_access!(values, Value, ValueId, Value, value_children, alloc_value, get_value);

    /// Replace a value in place, returning the previous one.
    ///
    /// Values are immutable once stored; the evaluator rewrites a subtree by
    /// building the new value and swapping it in under the old id. The new
    /// value may keep the old one's children. The old value's other
    /// children are detached.
    ///
    /// # Errors
    /// - `CyclicNode` if `value` refers to `id` or to one of its ancestors
    /// - `SharedNode` if `value` refers to a node owned elsewhere
    ///
    /// # Panics
    /// Panics if `id` or a child of `value` is out of bounds.
    #[track_caller]
    pub fn replace_value(&mut self, id: ValueId, value: Value) -> IrResult<Value> {
        let node = Node::Value(id);
        let children = value_children(&value);
        self.check_link(node, &children, Some(node), value.origin)?;
        let old = std::mem::replace(&mut self.values[id.index()], value);
        self.owners.unlink(&value_children(&old));
        self.owners.link(node, &children);
        Ok(old)
    }

    #[inline]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    // ===== Lists =====

    table_access!(lists, List, ListId, List, list_children, alloc_list, get_list);

    /// Add `value` as the last element of `list`.
    ///
    /// # Errors
    /// `SharedNode` if `value` already has a parent, `CyclicNode` if it
    /// wraps `list`.
    ///
    /// # Panics
    /// Panics if either id is out of bounds.
    #[track_caller]
    pub fn push_list(&mut self, list: ListId, value: ValueId) -> IrResult<&mut List> {
        let node = Node::List(list);
        let child = [Node::Value(value)];
        self.check_link(node, &child, None, self.get_value(value).origin)?;
        self.owners.link(node, &child);
        let list = &mut self.lists[list.index()];
        list.push(value);
        Ok(list)
    }

    /// Store a list and a value wrapping it.
    pub fn alloc_list_value(&mut self, list: List) -> ValueId {
        let origin = list.origin;
        let id = self.alloc_list(list);
        self.alloc_value(Value::new(ValueKind::List(id), origin))
    }

    /// Move every element of `right` onto the end of `left`.
    ///
    /// `left` keeps its own separator; `right` is left empty.
    ///
    /// # Errors
    /// `CyclicNode` if an element of `right` wraps `left`; nothing moves.
    ///
    /// # Panics
    /// Panics if either id is out of bounds.
    #[track_caller]
    pub fn append_list(&mut self, left: ListId, right: ListId) -> IrResult<&mut List> {
        let moved = list_children(self.get_list(right));
        let origin = self.get_list(left).origin;
        self.relink(Node::List(left), Node::List(right), &moved, origin)?;
        let moved = self.lists[right.index()].take_elements();
        trace!(?left, ?right, moved = moved.len(), "append list");
        let list = &mut self.lists[left.index()];
        list.extend_elements(moved);
        Ok(list)
    }

    // ===== Strings =====

    table_access!(
        strings,
        StringValue,
        StringId,
        String,
        string_children,
        alloc_string,
        get_string,
    );

    /// Add `fragment` as the last fragment of `string`.
    ///
    /// # Errors
    /// `SharedNode` if `fragment` already has a parent, `CyclicNode` if it
    /// wraps `string`.
    ///
    /// # Panics
    /// Panics if either id is out of bounds.
    #[track_caller]
    pub fn push_string(
        &mut self,
        string: StringId,
        fragment: ValueId,
    ) -> IrResult<&mut StringValue> {
        let node = Node::String(string);
        let child = [Node::Value(fragment)];
        self.check_link(node, &child, None, self.get_value(fragment).origin)?;
        self.owners.link(node, &child);
        let string = &mut self.strings[string.index()];
        string.push(fragment);
        Ok(string)
    }

    /// Store a string and a value wrapping it.
    pub fn alloc_string_value(&mut self, string: StringValue) -> ValueId {
        let origin = string.origin;
        let id = self.alloc_string(string);
        self.alloc_value(Value::new(ValueKind::String(id), origin))
    }

    /// Move every fragment of `right` onto the end of `left`.
    ///
    /// # Errors
    /// `CyclicNode` if a fragment of `right` wraps `left`; nothing moves.
    ///
    /// # Panics
    /// Panics if either id is out of bounds.
    #[track_caller]
    pub fn append_string(
        &mut self,
        left: StringId,
        right: StringId,
    ) -> IrResult<&mut StringValue> {
        let moved = string_children(self.get_string(right));
        let origin = self.get_string(left).origin;
        self.relink(Node::String(left), Node::String(right), &moved, origin)?;
        let moved = self.strings[right.index()].take_fragments();
        trace!(?left, ?right, moved = moved.len(), "append string");
        let string = &mut self.strings[left.index()];
        string.extend_fragments(moved);
        Ok(string)
    }

    // ===== Statements =====

    table_access!(stmts, Stmt, StmtId, Stmt, stmt_children, alloc_stmt, get_stmt);

    /// Replace a statement in place, returning the previous one.
    ///
    /// Same linking rules as [`StyleArena::replace_value`].
    ///
    /// # Errors
    /// - `CyclicNode` if a block of `stmt` is one `id` already sits in
    /// - `SharedNode` if `stmt` refers to a node owned elsewhere
    ///
    /// # Panics
    /// Panics if `id` or a child of `stmt` is out of bounds.
    #[track_caller]
    pub fn replace_stmt(&mut self, id: StmtId, stmt: Stmt) -> IrResult<Stmt> {
        let node = Node::Stmt(id);
        let children = stmt_children(&stmt);
        self.check_link(node, &children, Some(node), stmt.origin)?;
        let old = std::mem::replace(&mut self.stmts[id.index()], stmt);
        self.owners.unlink(&stmt_children(&old));
        self.owners.link(node, &children);
        Ok(old)
    }

    #[inline]
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    // ===== Blocks =====

    table_access!(blocks, Block, BlockId, Block, block_children, alloc_block, get_block);

    /// Add `stmt` as the last statement of `block`.
    ///
    /// # Errors
    /// `SharedNode` if `stmt` already sits in a block, `CyclicNode` if
    /// `block` is nested anywhere inside `stmt`.
    ///
    /// # Panics
    /// Panics if either id is out of bounds.
    #[track_caller]
    pub fn push_stmt(&mut self, block: BlockId, stmt: StmtId) -> IrResult<&mut Block> {
        let node = Node::Block(block);
        let child = [Node::Stmt(stmt)];
        self.check_link(node, &child, None, self.get_stmt(stmt).origin)?;
        self.owners.link(node, &child);
        let block = &mut self.blocks[block.index()];
        block.push(stmt);
        Ok(block)
    }

    /// Move every statement of `right` onto the end of `left`.
    ///
    /// # Errors
    /// `CyclicNode` if `left` is nested inside a statement of `right`;
    /// nothing moves.
    ///
    /// # Panics
    /// Panics if either id is out of bounds.
    #[track_caller]
    pub fn append_block(&mut self, left: BlockId, right: BlockId) -> IrResult<&mut Block> {
        let moved = block_children(self.get_block(right));
        let origin = self.get_block(left).origin;
        self.relink(Node::Block(left), Node::Block(right), &moved, origin)?;
        let moved = self.blocks[right.index()].take_statements();
        trace!(?left, ?right, moved = moved.len(), "append block");
        let block = &mut self.blocks[left.index()];
        block.extend_statements(moved);
        Ok(block)
    }

    // ===== Selectors =====

    table_access!(
        selectors,
        Selector,
        SelectorId,
        Selector,
        selector_children,
        alloc_selector,
        get_selector,
    );
    table_access!(
        sequences,
        Sequence,
        SequenceId,
        Sequence,
        sequence_children,
        alloc_sequence,
        get_sequence,
    );
    table_access_mut!(sequences, Sequence, SequenceId, get_sequence_mut);

    /// Move every atom of `right` onto the end of `left`, updating flags.
    ///
    /// # Panics
    /// Panics if either id is out of bounds.
    #[track_caller]
    pub fn append_sequence(&mut self, left: SequenceId, right: SequenceId) -> &mut Sequence {
        let origin = self.sequences[right.index()].origin;
        let moved = std::mem::replace(&mut self.sequences[right.index()], Sequence::new(origin));
        trace!(?left, ?right, moved = moved.len(), "append sequence");
        let sequence = &mut self.sequences[left.index()];
        sequence.append(moved);
        sequence
    }

    /// Link `selector` to the chain on its left.
    ///
    /// The combination's flags are the union of the context's and the
    /// sequence's, computed here once.
    ///
    /// # Panics
    /// Panics if `context` or `selector` is out of bounds or already has a
    /// parent.
    #[track_caller]
    pub fn alloc_combination(
        &mut self,
        origin: Origin,
        combinator: Combinator,
        context: Option<CombinationId>,
        selector: SequenceId,
    ) -> CombinationId {
        let context_flags = context.map_or(SelectorFlags::empty(), |id| {
            self.get_combination(id).flags()
        });
        let flags = context_flags | self.get_sequence(selector).flags();
        let id = CombinationId::new(next_index(self.combinations.len()));
        let combination = Combination::new(origin, combinator, context, selector, flags);
        self.adopt(Node::Combination(id), &combination_children(&combination), origin);
        self.combinations.push(combination);
        id
    }

    /// Get a `Combination` by id.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_combination(&self, id: CombinationId) -> &Combination {
        &self.combinations[id.index()]
    }

    table_access!(groups, Group, GroupId, Group, group_children, alloc_group, get_group);

    /// Add `member` as the last alternative of `group`.
    ///
    /// # Errors
    /// `SharedNode` if `member` already has a parent.
    ///
    /// # Panics
    /// Panics if either id is out of bounds.
    #[track_caller]
    pub fn push_combination(
        &mut self,
        group: GroupId,
        member: CombinationId,
    ) -> IrResult<&mut Group> {
        let node = Node::Group(group);
        let child = [Node::Combination(member)];
        let combination = self.get_combination(member);
        let flags = combination.flags();
        self.check_link(node, &child, None, combination.origin)?;
        self.owners.link(node, &child);
        let group = &mut self.groups[group.index()];
        group.push(member, flags);
        Ok(group)
    }

    /// Move every alternative of `right` onto the end of `left`.
    ///
    /// Combinations never contain groups, so this cannot fail.
    ///
    /// # Panics
    /// Panics if either id is out of bounds.
    #[track_caller]
    pub fn append_group(&mut self, left: GroupId, right: GroupId) -> &mut Group {
        let moved = self.groups[right.index()].take_members();
        trace!(?left, ?right, moved = moved.len(), "append group");
        let links: Vec<Node> = moved.iter().copied().map(Node::Combination).collect();
        self.owners.link(Node::Group(left), &links);
        for member in moved {
            let flags = self.get_combination(member).flags();
            self.groups[left.index()].push(member, flags);
        }
        &mut self.groups[left.index()]
    }

    /// Flags of any selector shape.
    ///
    /// Interpolated selectors report none until they are re-parsed.
    ///
    /// # Panics
    /// Panics if `id` or the node it wraps is out of bounds.
    #[track_caller]
    pub fn selector_flags(&self, id: SelectorId) -> SelectorFlags {
        match self.get_selector(id).kind {
            SelectorKind::Interpolated(_) => SelectorFlags::empty(),
            SelectorKind::Simple(simple) => simple.flags(),
            SelectorKind::Sequence(seq) => self.get_sequence(seq).flags(),
            SelectorKind::Combination(comb) => self.get_combination(comb).flags(),
            SelectorKind::Group(group) => self.get_group(group).flags(),
        }
    }

    // ===== Parameters and arguments =====

    table_access!(
        parameters,
        Parameters,
        ParametersId,
        Parameters,
        parameters_children,
        alloc_parameters,
        get_parameters,
    );
    table_access!(
        arguments,
        Arguments,
        ArgumentsId,
        Arguments,
        arguments_children,
        alloc_arguments,
        get_arguments,
    );

    /// Append `param` to a stored parameter list.
    ///
    /// # Errors
    /// The ordering errors of [`Parameters::push`], or `SharedNode` if the
    /// default value already has a parent. The list is unchanged on error.
    ///
    /// # Panics
    /// Panics if `params` or the default value is out of bounds.
    #[track_caller]
    pub fn push_parameter(
        &mut self,
        params: ParametersId,
        param: Parameter,
    ) -> IrResult<&mut Parameters> {
        let node = Node::Parameters(params);
        let child = param.default_value.map(Node::Value);
        self.check_link(node, child.as_slice(), None, param.origin)?;
        self.parameters[params.index()].push(param)?;
        self.owners.link(node, child.as_slice());
        Ok(&mut self.parameters[params.index()])
    }

    /// Append `arg` to a stored argument list.
    ///
    /// # Errors
    /// The ordering errors of [`Arguments::push`], or `SharedNode` if the
    /// value already has a parent. The list is unchanged on error.
    ///
    /// # Panics
    /// Panics if `args` or the argument's value is out of bounds.
    #[track_caller]
    pub fn push_argument(
        &mut self,
        args: ArgumentsId,
        arg: Argument,
    ) -> IrResult<&mut Arguments> {
        let node = Node::Arguments(args);
        let child = [Node::Value(arg.value)];
        self.check_link(node, &child, None, arg.origin)?;
        self.arguments[args.index()].push(arg)?;
        self.owners.link(node, &child);
        Ok(&mut self.arguments[args.index()])
    }

    // ===== Utility =====

    /// Reset arena for reuse (keeps capacity).
    pub fn reset(&mut self) {
        self.values.clear();
        self.lists.clear();
        self.strings.clear();
        self.stmts.clear();
        self.blocks.clear();
        self.selectors.clear();
        self.sequences.clear();
        self.combinations.clear();
        self.groups.clear();
        self.parameters.clear();
        self.arguments.clear();
        self.owners.clear();
    }

    /// True if no node of any family is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
            && self.lists.is_empty()
            && self.strings.is_empty()
            && self.stmts.is_empty()
            && self.blocks.is_empty()
            && self.selectors.is_empty()
            && self.sequences.is_empty()
            && self.combinations.is_empty()
            && self.groups.is_empty()
            && self.parameters.is_empty()
            && self.arguments.is_empty()
    }
}

impl fmt::Debug for StyleArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StyleArena {{ {} values, {} lists, {} strings, {} stmts, {} blocks, {} selectors }}",
            self.values.len(),
            self.lists.len(),
            self.strings.len(),
            self.stmts.len(),
            self.blocks.len(),
            self.selectors.len()
        )
    }
}
