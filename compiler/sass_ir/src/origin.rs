//! Source origins.
//!
//! Every node records the file it came from and the 1-based line it starts
//! on. Origins are set once at construction and only read for diagnostics.

use std::fmt;

use crate::{Name, StringInterner};

/// Source path and line of a node.
///
/// Layout: 8 bytes total
/// - path: `Name` - interned source path
/// - line: u32 - 1-based line number (0 for synthesized nodes)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct Origin {
    pub path: Name,
    pub line: u32,
}

impl Origin {
    /// Origin for nodes synthesized by the evaluator with no source location.
    pub const SYNTHETIC: Origin = Origin {
        path: Name::EMPTY,
        line: 0,
    };

    /// Create a new origin.
    #[inline]
    pub const fn new(path: Name, line: u32) -> Self {
        Origin { path, line }
    }

    /// Same file, different line.
    #[inline]
    #[must_use]
    pub const fn with_line(self, line: u32) -> Self {
        Origin {
            path: self.path,
            line,
        }
    }

    /// True for origins that do not point into a source file.
    #[inline]
    pub const fn is_synthetic(&self) -> bool {
        self.line == 0
    }

    /// Render as `path:line` using the interner that owns `path`.
    pub fn display(self, interner: &StringInterner) -> String {
        if self.is_synthetic() {
            "<generated>".to_owned()
        } else {
            format!("{}:{}", interner.lookup(self.path), self.line)
        }
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.path, self.line)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.line)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Origin;
    crate::static_assert_size!(Origin, 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_basic() {
        let origin = Origin::new(Name::new(1, 7), 12);
        assert_eq!(origin.line, 12);
        assert!(!origin.is_synthetic());
        assert_eq!(origin.with_line(40).line, 40);
        assert_eq!(origin.with_line(40).path, origin.path);
    }

    #[test]
    fn test_synthetic() {
        assert!(Origin::SYNTHETIC.is_synthetic());
        assert_eq!(Origin::default(), Origin::SYNTHETIC);
    }

    #[test]
    fn test_display_with_interner() {
        let interner = StringInterner::new();
        let origin = Origin::new(interner.intern("src/_buttons.scss"), 3);
        assert_eq!(origin.display(&interner), "src/_buttons.scss:3");
        assert_eq!(Origin::SYNTHETIC.display(&interner), "<generated>");
        assert_eq!(origin.to_string(), "line 3");
    }

    #[test]
    fn test_origin_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Origin::new(Name::EMPTY, 1));
        set.insert(Origin::new(Name::EMPTY, 1));
        set.insert(Origin::new(Name::EMPTY, 2));
        assert_eq!(set.len(), 2);
    }
}
