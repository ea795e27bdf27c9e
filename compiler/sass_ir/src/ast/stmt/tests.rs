use super::*;
use crate::HasOrigin;
use pretty_assertions::assert_eq;

fn at(line: u32) -> Origin {
    Origin::new(Name::new(3, 3), line)
}

#[test]
fn ruleset_is_unnestable() {
    let stmt = Stmt::ruleset(at(1), SelectorId::new(0), BlockId::new(0));
    assert!(stmt.is_unnestable);
}

#[test]
fn other_statements_are_not_unnestable() {
    let stmts = [
        Stmt::declaration(at(1), StringId::new(0), ListId::new(0)),
        Stmt::media_query(at(1), ValueId::new(0), BlockId::new(0)),
        Stmt::directive(at(1), Name::new(0, 1), SelectorId::new(0), BlockId::new(0)),
        Stmt::extend(at(1), SelectorId::new(0)),
        Stmt::comment(at(1), StringId::new(0)),
    ];
    assert!(stmts.iter().all(|s| !s.is_unnestable));
}

#[test]
fn has_block_statements_expose_their_body() {
    let body = BlockId::new(7);
    let stmts = [
        Stmt::ruleset(at(1), SelectorId::new(0), body),
        Stmt::propset(at(1), StringId::new(0), body),
        Stmt::media_query(at(1), ValueId::new(0), body),
        Stmt::directive(at(1), Name::new(0, 1), SelectorId::new(0), body),
        Stmt::for_(at(1), Name::new(0, 2), ValueId::new(0), ValueId::new(1), body, true),
        Stmt::each(at(1), Name::new(0, 2), ValueId::new(0), body),
        Stmt::while_(at(1), ValueId::new(0), body),
        Stmt::definition(
            at(1),
            DefinitionKind::Mixin,
            Name::new(0, 3),
            ParametersId::new(0),
            body,
        ),
        Stmt::mixin_call(at(1), Name::new(0, 3), ArgumentsId::new(0), Some(body)),
    ];
    for stmt in stmts {
        assert!(stmt.kind.is_has_block(), "{stmt:?}");
        assert_eq!(stmt.kind.block(), Some(body), "{stmt:?}");
    }
}

#[test]
fn mixin_call_without_content_block() {
    let stmt = Stmt::mixin_call(at(2), Name::new(0, 3), ArgumentsId::new(0), None);
    assert!(stmt.kind.is_has_block());
    assert_eq!(stmt.kind.block(), None);
    assert_eq!(stmt.kind.child_blocks().count(), 0);
}

#[test]
fn flat_statements_have_no_body() {
    let stmts = [
        Stmt::declaration(at(1), StringId::new(0), ListId::new(0)),
        Stmt::assignment(at(1), Name::new(0, 1), ValueId::new(0), false),
        Stmt::import(at(1), StringId::new(0)),
        Stmt::warning(at(1), StringId::new(0)),
        Stmt::comment(at(1), StringId::new(0)),
        Stmt::extend(at(1), SelectorId::new(0)),
        Stmt::if_(at(1), ValueId::new(0), BlockId::new(0), None),
    ];
    for stmt in stmts {
        assert!(!stmt.kind.is_has_block(), "{stmt:?}");
        assert_eq!(stmt.kind.block(), None, "{stmt:?}");
    }
}

#[test]
fn if_child_blocks() {
    let with_else = Stmt::if_(at(1), ValueId::new(0), BlockId::new(1), Some(BlockId::new(2)));
    let blocks: Vec<_> = with_else.kind.child_blocks().collect();
    assert_eq!(blocks, vec![BlockId::new(1), BlockId::new(2)]);

    let without_else = Stmt::if_(at(1), ValueId::new(0), BlockId::new(1), None);
    let blocks: Vec<_> = without_else.kind.child_blocks().collect();
    assert_eq!(blocks, vec![BlockId::new(1)]);
}

#[test]
fn assignment_guard_flag() {
    let stmt = Stmt::assignment(at(4), Name::new(0, 1), ValueId::new(0), true);
    assert!(matches!(stmt.kind, StmtKind::Assignment { is_guarded: true, .. }));
    assert_eq!(stmt.origin().line, 4);
}

#[test]
fn definition_kinds() {
    assert_eq!(DefinitionKind::Mixin.keyword(), "mixin");
    assert_eq!(DefinitionKind::Function.keyword(), "function");
}

// === Block ===

#[test]
fn block_push_and_index() {
    let mut block = Block::new(at(1));
    block.push(StmtId::new(0)).push(StmtId::new(1));
    assert_eq!(block.len(), 2);
    assert_eq!(block[1], StmtId::new(1));
    assert_eq!(block.get(2), None);
    assert!(!block.is_root);
}

#[test]
fn root_block() {
    let block = Block::root(at(1));
    assert!(block.is_root);
    assert!(block.is_empty());
}

#[test]
fn block_append_concatenates() {
    let mut left = Block::root(at(1));
    left.push(StmtId::new(0));
    let mut right = Block::new(at(5));
    right.push(StmtId::new(1)).push(StmtId::new(2));

    left.append(right);

    assert_eq!(
        left.statements(),
        &[StmtId::new(0), StmtId::new(1), StmtId::new(2)]
    );
    assert!(left.is_root);
}

#[test]
fn block_set_replaces_statement() {
    let mut block = Block::new(at(1));
    block.push(StmtId::new(0));
    let old = block.set(0, StmtId::new(9));
    assert_eq!(old, StmtId::new(0));
    assert_eq!(block[0], StmtId::new(9));
}
