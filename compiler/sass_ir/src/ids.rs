//! Typed node indices.
//!
//! Each node family lives in its own table inside [`StyleArena`](crate::StyleArena),
//! so every family gets its own index type. A `ListId` can never be used
//! where a `StmtId` is expected.

/// Macro to define index types for arena-allocated nodes.
///
/// Each generated type has:
/// - a private `u32` payload
/// - `new()`, `index()`, `raw()` methods
/// - `Debug` implementation showing the index as `TypeName(n)`
macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Position in the owning arena table.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    )* };
}

define_id!(
    /// Any value expression.
    ValueId,
    /// A list value (also reachable through `ValueKind::List`).
    ListId,
    /// A string value (also reachable through `ValueKind::String`).
    StringId,
    /// A statement.
    StmtId,
    /// A block of statements.
    BlockId,
    /// A top-level selector attached to a ruleset, directive or `@extend`.
    SelectorId,
    /// A simple selector sequence.
    SequenceId,
    /// A combinator chain link.
    CombinationId,
    /// A comma-separated selector group.
    GroupId,
    /// A parameter list of a mixin or function definition.
    ParametersId,
    /// An argument list of a mixin or function call.
    ArgumentsId,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_index() {
        let id = ValueId::new(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id.raw(), 42);
    }

    #[test]
    fn test_id_debug() {
        assert_eq!(format!("{:?}", BlockId::new(3)), "BlockId(3)");
        assert_eq!(format!("{:?}", CombinationId::new(0)), "CombinationId(0)");
    }

    #[test]
    fn test_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(StmtId::new(1));
        set.insert(StmtId::new(1));
        set.insert(StmtId::new(2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_memory_size() {
        assert_eq!(std::mem::size_of::<ValueId>(), 4);
        assert_eq!(std::mem::size_of::<Option<GroupId>>(), 8);
    }
}
