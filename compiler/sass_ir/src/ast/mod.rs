//! Node types for the three tree families.
//!
//! - Values are evaluated (`value`, `list`, `string`, `operators`)
//! - Statements are expanded (`stmt`)
//! - Selectors are matched and extended (`selector`)
//!
//! Parameter and argument lists (`params`) sit between definitions/calls
//! and the values they carry.
//!
//! Every family is a closed enum matched exhaustively; children are typed
//! arena indices.

mod list;
mod operators;
mod params;
mod selector;
mod stmt;
mod string;
mod value;

pub use list::{List, Separator};
pub use operators::{BinaryOp, Combinator, OpCategory};
pub use params::{Argument, Arguments, Parameter, Parameters};
pub use selector::{
    Combination, Group, Selector, SelectorFlags, SelectorKind, Sequence, SimpleSelector,
    SimpleSelectorKind,
};
pub use stmt::{Block, DefinitionKind, Stmt, StmtKind};
pub use string::StringValue;
pub use value::{Color, Dimension, TextualKind, Value, ValueFlags, ValueKind};
