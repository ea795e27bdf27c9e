//! Binary operators and selector combinators.
//!
//! Both sets are closed. The tag is fixed when the node is built; what an
//! operator does is the evaluator's business.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Logical
    And,
    Or,

    // Relational
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
}

/// Operator families.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OpCategory {
    Logical,
    Relational,
    Arithmetic,
}

impl BinaryOp {
    /// Every operator, in declaration order.
    pub const ALL: [BinaryOp; 12] = [
        Self::And,
        Self::Or,
        Self::Eq,
        Self::Neq,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
    ];

    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    pub const fn category(self) -> OpCategory {
        match self {
            Self::And | Self::Or => OpCategory::Logical,
            Self::Eq | Self::Neq | Self::Gt | Self::Gte | Self::Lt | Self::Lte => {
                OpCategory::Relational
            }
            Self::Add | Self::Sub | Self::Mul | Self::Div => OpCategory::Arithmetic,
        }
    }
}

/// CSS combinators joining two simple selector sequences.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Combinator {
    /// Descendant, written as whitespace.
    AncestorOf,
    /// Child, `>`.
    ParentOf,
    /// General sibling, `~`.
    Precedes,
    /// Adjacent sibling, `+`.
    AdjacentTo,
}

impl Combinator {
    /// Source-level symbol; the descendant combinator is a single space.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::AncestorOf => " ",
            Self::ParentOf => ">",
            Self::Precedes => "~",
            Self::AdjacentTo => "+",
        }
    }
}
