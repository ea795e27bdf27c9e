//! Sass IR - Stylesheet Tree Types
//!
//! This crate contains the tree a Sass-like stylesheet compiler builds and
//! rewrites:
//! - Origins for source locations (path + line)
//! - Names for interned identifiers
//! - Value nodes (numbers, colors, lists, strings, expressions)
//! - Selector nodes (atoms, sequences, combinator chains, groups)
//! - Statement nodes and blocks
//! - Parameter and argument lists with ordering checks
//! - Arena allocation for all of the above
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32)
//! - **Flatten Everything**: No `Box<Value>`, use `ValueId(u32)` indices
//! - **Interface Segregation**: Focused traits (`HasOrigin`, `Named`)
//! - **One Parent Each**: `StyleArena` refuses any link that would give a
//!   node a second parent or put it beneath itself
//!
//! Derived flags (value markers, selector reference/placeholder flags) are
//! computed once when a node is built and never recomputed.

use std::sync::Once;

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod error;
mod ids;
mod interner;
mod name;
mod origin;
mod traits;
pub mod visitor;

pub use arena::StyleArena;
pub use ast::{
    Argument, Arguments, BinaryOp, Block, Color, Combination, Combinator, DefinitionKind,
    Dimension, Group, List, OpCategory, Parameter, Parameters, Selector, SelectorFlags,
    SelectorKind, Separator, Sequence, SimpleSelector, SimpleSelectorKind, Stmt, StmtKind,
    StringValue, TextualKind, Value, ValueFlags, ValueKind,
};
pub use error::{IrError, IrResult, OrderViolation};
pub use ids::{
    ArgumentsId, BlockId, CombinationId, GroupId, ListId, ParametersId, SelectorId, SequenceId,
    StmtId, StringId, ValueId,
};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use origin::Origin;
pub use traits::{HasOrigin, Named};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=sass_ir=debug` or `RUST_LOG=sass_ir=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
    }
}
