use super::*;
use crate::HasOrigin;

fn origin(line: u32) -> Origin {
    Origin::new(Name::new(1, 1), line)
}

#[test]
fn markers_default_to_false() {
    let value = Value::number(origin(1), 2.0);
    assert!(!value.is_delayed());
    assert!(!value.is_parenthesized());
    assert!(value.flags.is_empty());
}

#[test]
fn markers_set_by_producer() {
    let value = Value::binary(origin(3), BinaryOp::Div, ValueId::new(0), ValueId::new(1))
        .delayed()
        .parenthesized();
    assert!(value.is_delayed());
    assert!(value.is_parenthesized());
    assert_eq!(value.origin().line, 3);
}

#[test]
fn dimension_starts_with_one_numerator_unit() {
    let px = Name::new(2, 5);
    let value = Value::dimension(origin(1), 12.0, px);
    let ValueKind::Dimension(dim) = &value.kind else {
        panic!("expected dimension, got {:?}", value.kind);
    };
    assert_eq!(dim.value, 12.0);
    assert_eq!(dim.numerator_units.as_slice(), &[px]);
    assert!(dim.denominator_units.is_empty());
    assert!(!dim.is_compound());
}

#[test]
fn compound_dimension() {
    let mut dim = Dimension::new(3.0, Name::new(2, 5));
    dim.denominator_units.push(Name::new(3, 1));
    assert!(dim.is_compound());
}

#[test]
fn color_alpha_defaults_to_one() {
    assert_eq!(Color::rgb(255.0, 0.0, 0.0).a, 1.0);
    assert_eq!(Color::rgba(0.0, 0.0, 0.0, 0.5).a, 0.5);
}

#[test]
fn atomic_versus_composite() {
    assert!(Value::boolean(origin(1), true).is_atomic());
    assert!(Value::variable(origin(1), Name::new(0, 9)).is_atomic());
    assert!(Value::textual(origin(1), TextualKind::Hex, Name::new(0, 3)).is_atomic());
    assert!(!Value::negation(origin(1), ValueId::new(0)).is_atomic());
    assert!(!Value::new(ValueKind::List(ListId::new(0)), origin(1)).is_atomic());
    assert!(
        !Value::function_call(origin(1), StringId::new(0), ArgumentsId::new(0)).is_atomic()
    );
}

#[test]
fn describe_kinds() {
    assert_eq!(Value::percentage(origin(1), 50.0).kind.describe(), "percentage");
    assert_eq!(
        Value::binary(origin(1), BinaryOp::Add, ValueId::new(0), ValueId::new(1))
            .kind
            .describe(),
        "binary expression"
    );
}
