//! Tree Visitor
//!
//! Read-only traversal of a stylesheet stored in a `StyleArena`.
//!
//! # Design
//!
//! The visitor can mutate its own state during traversal, but the tree
//! remains immutable. Default `visit_*` implementations call the matching
//! `walk_*` function, which visits children. Override a `visit_*` method to
//! act on a node and call `walk_*` from it to keep descending.
//!
//! # Example
//!
//! ```text
//! struct CountVariables {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountVariables {
//!     fn visit_value(&mut self, value: &'ast Value, arena: &'ast StyleArena) {
//!         if matches!(value.kind, ValueKind::Variable(_)) {
//!             self.count += 1;
//!         }
//!         walk_value(self, value, arena);
//!     }
//! }
//! ```

use crate::ast::{
    Argument, Arguments, Block, Combination, Group, List, Parameter, Parameters, Selector,
    SelectorKind, Sequence, SimpleSelector, Stmt, StmtKind, StringValue, Value, ValueKind,
};
use crate::{BlockId, StmtId, StringId, StyleArena, ValueId};

/// Stylesheet visitor.
///
/// Override `visit_*` methods to add behavior at specific nodes.
/// Call `walk_*` functions to continue traversal into children.
pub trait Visitor<'ast> {
    fn visit_block(&mut self, block: &'ast Block, arena: &'ast StyleArena) {
        walk_block(self, block, arena);
    }

    fn visit_block_id(&mut self, id: BlockId, arena: &'ast StyleArena) {
        self.visit_block(arena.get_block(id), arena);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast StyleArena) {
        walk_stmt(self, stmt, arena);
    }

    fn visit_stmt_id(&mut self, id: StmtId, arena: &'ast StyleArena) {
        self.visit_stmt(arena.get_stmt(id), arena);
    }

    fn visit_value(&mut self, value: &'ast Value, arena: &'ast StyleArena) {
        walk_value(self, value, arena);
    }

    fn visit_value_id(&mut self, id: ValueId, arena: &'ast StyleArena) {
        self.visit_value(arena.get_value(id), arena);
    }

    fn visit_list(&mut self, list: &'ast List, arena: &'ast StyleArena) {
        for value in list.iter() {
            self.visit_value_id(value, arena);
        }
    }

    fn visit_string(&mut self, string: &'ast StringValue, arena: &'ast StyleArena) {
        for fragment in string.iter() {
            self.visit_value_id(fragment, arena);
        }
    }

    fn visit_string_id(&mut self, id: StringId, arena: &'ast StyleArena) {
        self.visit_string(arena.get_string(id), arena);
    }

    fn visit_selector(&mut self, selector: &'ast Selector, arena: &'ast StyleArena) {
        walk_selector(self, selector, arena);
    }

    fn visit_sequence(&mut self, sequence: &'ast Sequence, _arena: &'ast StyleArena) {
        for simple in sequence.iter() {
            self.visit_simple_selector(simple);
        }
    }

    /// Atoms have no children.
    fn visit_simple_selector(&mut self, _simple: &'ast SimpleSelector) {}

    fn visit_combination(&mut self, combination: &'ast Combination, arena: &'ast StyleArena) {
        walk_combination(self, combination, arena);
    }

    fn visit_group(&mut self, group: &'ast Group, arena: &'ast StyleArena) {
        for member in group.iter() {
            self.visit_combination(arena.get_combination(member), arena);
        }
    }

    fn visit_parameters(&mut self, parameters: &'ast Parameters, arena: &'ast StyleArena) {
        for param in parameters {
            self.visit_parameter(param, arena);
        }
    }

    /// Visits the default value, if any.
    fn visit_parameter(&mut self, param: &'ast Parameter, arena: &'ast StyleArena) {
        if let Some(default) = param.default_value {
            self.visit_value_id(default, arena);
        }
    }

    fn visit_arguments(&mut self, arguments: &'ast Arguments, arena: &'ast StyleArena) {
        for arg in arguments {
            self.visit_argument(arg, arena);
        }
    }

    fn visit_argument(&mut self, arg: &'ast Argument, arena: &'ast StyleArena) {
        self.visit_value_id(arg.value, arena);
    }
}

// Walk Functions
//
// All walk functions traverse children depth-first, left to right, in the
// order the children appear in the source.

/// Walk every statement of a block.
pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    block: &'ast Block,
    arena: &'ast StyleArena,
) {
    for stmt in block.iter() {
        visitor.visit_stmt_id(stmt, arena);
    }
}

/// Walk a statement's children: header first, then body.
pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    stmt: &'ast Stmt,
    arena: &'ast StyleArena,
) {
    match stmt.kind {
        StmtKind::Ruleset { selector, block } | StmtKind::Directive { selector, block, .. } => {
            visitor.visit_selector(arena.get_selector(selector), arena);
            visitor.visit_block_id(block, arena);
        }
        StmtKind::Propset {
            property_fragment,
            block,
        } => {
            visitor.visit_string_id(property_fragment, arena);
            visitor.visit_block_id(block, arena);
        }
        StmtKind::MediaQuery { query, block } => {
            visitor.visit_value_id(query, arena);
            visitor.visit_block_id(block, arena);
        }
        StmtKind::Declaration { property, values } => {
            visitor.visit_string_id(property, arena);
            visitor.visit_list(arena.get_list(values), arena);
        }
        StmtKind::Assignment { value, .. } => {
            visitor.visit_value_id(value, arena);
        }
        StmtKind::Import { location: text }
        | StmtKind::Warning { message: text }
        | StmtKind::Comment { text } => {
            visitor.visit_string_id(text, arena);
        }
        StmtKind::If {
            predicate,
            consequent,
            alternative,
        } => {
            visitor.visit_value_id(predicate, arena);
            visitor.visit_block_id(consequent, arena);
            if let Some(alternative) = alternative {
                visitor.visit_block_id(alternative, arena);
            }
        }
        StmtKind::For {
            lower_bound,
            upper_bound,
            block,
            ..
        } => {
            visitor.visit_value_id(lower_bound, arena);
            visitor.visit_value_id(upper_bound, arena);
            visitor.visit_block_id(block, arena);
        }
        StmtKind::Each { list, block, .. } => {
            visitor.visit_value_id(list, arena);
            visitor.visit_block_id(block, arena);
        }
        StmtKind::While { predicate, block } => {
            visitor.visit_value_id(predicate, arena);
            visitor.visit_block_id(block, arena);
        }
        StmtKind::Extend { selector } => {
            visitor.visit_selector(arena.get_selector(selector), arena);
        }
        StmtKind::Definition {
            parameters, block, ..
        } => {
            visitor.visit_parameters(arena.get_parameters(parameters), arena);
            visitor.visit_block_id(block, arena);
        }
        StmtKind::MixinCall {
            arguments, block, ..
        } => {
            visitor.visit_arguments(arena.get_arguments(arguments), arena);
            if let Some(block) = block {
                visitor.visit_block_id(block, arena);
            }
        }
    }
}

/// Walk a value's children.
pub fn walk_value<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    value: &'ast Value,
    arena: &'ast StyleArena,
) {
    match value.kind {
        // Atoms - no children
        ValueKind::Number(_)
        | ValueKind::Percentage(_)
        | ValueKind::Dimension(_)
        | ValueKind::Color(_)
        | ValueKind::Boolean(_)
        | ValueKind::Textual { .. }
        | ValueKind::Token(_)
        | ValueKind::Variable(_) => {}

        ValueKind::List(list) => visitor.visit_list(arena.get_list(list), arena),
        ValueKind::String(string) => visitor.visit_string_id(string, arena),
        ValueKind::Binary { left, right, .. } => {
            visitor.visit_value_id(left, arena);
            visitor.visit_value_id(right, arena);
        }
        ValueKind::Negation(operand) => visitor.visit_value_id(operand, arena),
        ValueKind::FunctionCall { name, arguments } => {
            visitor.visit_string_id(name, arena);
            visitor.visit_arguments(arena.get_arguments(arguments), arena);
        }
    }
}

/// Walk the shape wrapped by a selector.
pub fn walk_selector<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    selector: &'ast Selector,
    arena: &'ast StyleArena,
) {
    match &selector.kind {
        SelectorKind::Interpolated(string) => visitor.visit_string_id(*string, arena),
        SelectorKind::Simple(simple) => visitor.visit_simple_selector(simple),
        SelectorKind::Sequence(seq) => visitor.visit_sequence(arena.get_sequence(*seq), arena),
        SelectorKind::Combination(comb) => {
            visitor.visit_combination(arena.get_combination(*comb), arena);
        }
        SelectorKind::Group(group) => visitor.visit_group(arena.get_group(*group), arena),
    }
}

/// Walk a combinator chain, leftmost link first.
pub fn walk_combination<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    combination: &'ast Combination,
    arena: &'ast StyleArena,
) {
    if let Some(context) = combination.context {
        visitor.visit_combination(arena.get_combination(context), arena);
    }
    visitor.visit_sequence(arena.get_sequence(combination.selector), arena);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        BinaryOp, Combinator, DefinitionKind, Separator, SimpleSelectorKind, TextualKind,
    };
    use crate::{Name, Origin, StringInterner};
    use pretty_assertions::assert_eq;

    fn at(line: u32) -> Origin {
        Origin::new(Name::EMPTY, line)
    }

    /// Counts every value reached.
    struct ValueCounter {
        count: usize,
    }

    impl<'ast> Visitor<'ast> for ValueCounter {
        fn visit_value(&mut self, value: &'ast Value, arena: &'ast StyleArena) {
            self.count += 1;
            walk_value(self, value, arena);
        }
    }

    /// Records statement lines in visit order.
    struct LineRecorder {
        lines: Vec<u32>,
    }

    impl<'ast> Visitor<'ast> for LineRecorder {
        fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast StyleArena) {
            self.lines.push(stmt.origin.line);
            walk_stmt(self, stmt, arena);
        }
    }

    /// Records atom names in visit order.
    struct AtomRecorder<'i> {
        interner: &'i StringInterner,
        atoms: Vec<&'static str>,
    }

    impl<'ast> Visitor<'ast> for AtomRecorder<'_> {
        fn visit_simple_selector(&mut self, simple: &'ast SimpleSelector) {
            let text = match simple.kind {
                SimpleSelectorKind::Simple(name) | SimpleSelectorKind::Placeholder(name) => {
                    self.interner.lookup(name)
                }
                SimpleSelectorKind::Reference => "&",
            };
            self.atoms.push(text);
        }
    }

    #[test]
    fn visit_binary_value() {
        let mut arena = StyleArena::new();
        let left = arena.alloc_value(Value::number(at(1), 1.0));
        let right = arena.alloc_value(Value::variable(at(1), Name::new(0, 1)));
        let sum = arena.alloc_value(Value::binary(at(1), BinaryOp::Add, left, right));

        let mut counter = ValueCounter { count: 0 };
        counter.visit_value_id(sum, &arena);
        assert_eq!(counter.count, 3);
    }

    #[test]
    fn visit_list_and_string_children() {
        let mut arena = StyleArena::new();
        let a = arena.alloc_value(Value::textual(at(1), TextualKind::Dimension, Name::new(0, 1)));
        let b = arena.alloc_value(Value::token(at(1), Name::new(0, 2)));
        let mut string = StringValue::new(at(1));
        string.push(b);
        let s = arena.alloc_string_value(string);
        let mut list = List::new(at(1), Separator::Space);
        list.push(a).push(s);
        let l = arena.alloc_list_value(list);

        let mut counter = ValueCounter { count: 0 };
        counter.visit_value_id(l, &arena);
        // list, textual, string, token
        assert_eq!(counter.count, 4);
    }

    #[test]
    fn statements_visited_in_source_order() {
        let mut arena = StyleArena::new();
        let mut text = |line| arena.alloc_string(StringValue::new(at(line)));
        let texts = [text(1), text(3), text(5), text(6)];
        let predicate = arena.alloc_value(Value::boolean(at(2), true));

        let then_stmt = arena.alloc_stmt(Stmt::comment(at(3), texts[1]));
        let mut then_block = Block::new(at(2));
        then_block.push(then_stmt);
        let then_block = arena.alloc_block(then_block);

        let else_stmt = arena.alloc_stmt(Stmt::comment(at(5), texts[2]));
        let mut else_block = Block::new(at(4));
        else_block.push(else_stmt);
        let else_block = arena.alloc_block(else_block);

        let first = arena.alloc_stmt(Stmt::comment(at(1), texts[0]));
        let cond = arena.alloc_stmt(Stmt::if_(at(2), predicate, then_block, Some(else_block)));
        let last = arena.alloc_stmt(Stmt::warning(at(6), texts[3]));

        let mut root = Block::root(at(1));
        root.push(first).push(cond).push(last);
        let root = arena.alloc_block(root);

        let mut recorder = LineRecorder { lines: Vec::new() };
        recorder.visit_block_id(root, &arena);
        assert_eq!(recorder.lines, vec![1, 2, 3, 5, 6]);
    }

    #[test]
    fn combination_chain_visited_left_to_right() {
        let interner = StringInterner::new();
        let mut arena = StyleArena::new();

        let mut links = Vec::new();
        for text in ["a", "b", "c"] {
            let mut seq = Sequence::new(at(1));
            seq.push(SimpleSelector::simple(at(1), interner.intern(text)));
            links.push(arena.alloc_sequence(seq));
        }
        let mut amp = Sequence::new(at(1));
        amp.push(SimpleSelector::reference(at(1)));
        let amp = arena.alloc_sequence(amp);

        let c0 = arena.alloc_combination(at(1), Combinator::AncestorOf, None, links[0]);
        let c1 = arena.alloc_combination(at(1), Combinator::ParentOf, Some(c0), links[1]);
        let c2 = arena.alloc_combination(at(1), Combinator::AncestorOf, Some(c1), links[2]);
        let alt = arena.alloc_combination(at(1), Combinator::AncestorOf, None, amp);

        let group = arena.alloc_group(Group::new(at(1)));
        assert!(arena.push_combination(group, c2).is_ok());
        assert!(arena.push_combination(group, alt).is_ok());
        let selector = arena.alloc_selector(Selector::new(SelectorKind::Group(group), at(1)));

        let mut recorder = AtomRecorder {
            interner: &interner,
            atoms: Vec::new(),
        };
        recorder.visit_selector(arena.get_selector(selector), &arena);
        assert_eq!(recorder.atoms, vec!["a", "b", "c", "&"]);
    }

    #[test]
    fn default_selector_walk_reaches_interpolated_fragments() {
        let mut arena = StyleArena::new();

        let mut atoms = Sequence::new(at(1));
        atoms
            .push(SimpleSelector::simple(at(1), Name::new(0, 1)))
            .push(SimpleSelector::reference(at(1)));
        let atoms = arena.alloc_sequence(atoms);
        let plain = arena.alloc_selector(Selector::new(SelectorKind::Sequence(atoms), at(1)));

        let fragment = arena.alloc_value(Value::variable(at(2), Name::new(0, 2)));
        let mut text = StringValue::new(at(2));
        text.push(fragment);
        let text = arena.alloc_string(text);
        let interpolated =
            arena.alloc_selector(Selector::new(SelectorKind::Interpolated(text), at(2)));

        let mut counter = ValueCounter { count: 0 };
        counter.visit_selector(arena.get_selector(plain), &arena);
        assert_eq!(counter.count, 0);
        counter.visit_selector(arena.get_selector(interpolated), &arena);
        assert_eq!(counter.count, 1);
    }

    #[test]
    fn definition_and_call_reach_defaults_and_arguments() {
        let mut arena = StyleArena::new();
        let default = arena.alloc_value(Value::number(at(1), 0.0));
        let mut params = Parameters::new(at(1));
        assert!(params
            .push(Parameter::optional(at(1), Name::new(0, 1), default))
            .is_ok());
        let params = arena.alloc_parameters(params);
        let body = arena.alloc_block(Block::new(at(1)));
        let def = arena.alloc_stmt(Stmt::definition(
            at(1),
            DefinitionKind::Mixin,
            Name::new(0, 2),
            params,
            body,
        ));

        let arg = arena.alloc_value(Value::number(at(2), 4.0));
        let mut args = Arguments::new(at(2));
        assert!(args.push(Argument::positional(at(2), arg)).is_ok());
        let args = arena.alloc_arguments(args);
        let call = arena.alloc_stmt(Stmt::mixin_call(at(2), Name::new(0, 2), args, None));

        let mut root = Block::root(at(1));
        root.push(def).push(call);
        let root = arena.alloc_block(root);

        let mut counter = ValueCounter { count: 0 };
        counter.visit_block_id(root, &arena);
        assert_eq!(counter.count, 2);
    }
}
