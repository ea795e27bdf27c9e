//! Focused access traits.
//!
//! - `HasOrigin` - just origin access
//! - `Named` - just name access

use crate::{Name, Origin};

/// Trait for nodes that record where they came from.
pub trait HasOrigin {
    /// Get the source origin.
    fn origin(&self) -> Origin;

    /// Source line, shorthand for `self.origin().line`.
    fn line(&self) -> u32 {
        self.origin().line
    }
}

/// Trait for nodes that have a name.
pub trait Named {
    /// Get the name.
    fn name(&self) -> Name;
}

/// Implements `HasOrigin` for structs with an `origin: Origin` field.
macro_rules! impl_has_origin {
    ($($ty:ty),* $(,)?) => { $(
        impl $crate::HasOrigin for $ty {
            #[inline]
            fn origin(&self) -> $crate::Origin {
                self.origin
            }
        }
    )* };
}

pub(crate) use impl_has_origin;

#[cfg(test)]
mod tests {
    use super::*;

    struct MockNode {
        origin: Origin,
        name: Name,
    }

    impl_has_origin!(MockNode);

    impl Named for MockNode {
        fn name(&self) -> Name {
            self.name
        }
    }

    #[test]
    fn test_has_origin_trait() {
        let node = MockNode {
            origin: Origin::new(Name::new(2, 9), 14),
            name: Name::new(0, 10),
        };
        assert_eq!(node.origin().line, 14);
        assert_eq!(node.line(), 14);
    }

    #[test]
    fn test_named_trait_equality() {
        let a = MockNode {
            origin: Origin::SYNTHETIC,
            name: Name::new(0, 10),
        };
        let b = MockNode {
            origin: Origin::SYNTHETIC,
            name: Name::new(0, 20),
        };
        assert_ne!(a.name(), b.name());
    }

    #[test]
    fn test_has_origin_via_dyn() {
        let node = MockNode {
            origin: Origin::new(Name::EMPTY, 5),
            name: Name::EMPTY,
        };
        let dynamic: &dyn HasOrigin = &node;
        assert_eq!(dynamic.line(), 5);
    }
}
