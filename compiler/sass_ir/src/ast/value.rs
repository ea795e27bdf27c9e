//! Value Types
//!
//! Expression nodes: everything that is evaluated to produce a result.
//!
//! # Design Notes
//! - Children are indices (`ValueId`, `ListId`, `StringId`, `ArgumentsId`),
//!   never boxes.
//! - A value is immutable once allocated. The evaluator rewrites by
//!   allocating a new value and calling `StyleArena::replace_value`.
//! - Lists and strings live in their own arena tables so statements can
//!   refer to them by a typed index; `ValueKind::List`/`ValueKind::String`
//!   put them in value position.

use std::fmt;

use bitflags::bitflags;
use smallvec::{smallvec, SmallVec};

use super::operators::BinaryOp;
use crate::traits::impl_has_origin;
use crate::{ArgumentsId, ListId, Name, Origin, StringId, ValueId};

bitflags! {
    /// Behavioral markers shared by every value.
    ///
    /// Set by the producer when the node is built, never changed afterwards.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ValueFlags: u8 {
        /// The node is a computation the evaluator may postpone.
        const DELAYED = 1 << 0;
        /// The node was written inside parentheses.
        const PARENTHESIZED = 1 << 1;
    }
}

/// Value node.
#[derive(Clone, PartialEq)]
pub struct Value {
    pub kind: ValueKind,
    pub origin: Origin,
    pub flags: ValueFlags,
}

impl_has_origin!(Value);

impl Value {
    pub fn new(kind: ValueKind, origin: Origin) -> Self {
        Value {
            kind,
            origin,
            flags: ValueFlags::empty(),
        }
    }

    pub fn number(origin: Origin, value: f64) -> Self {
        Self::new(ValueKind::Number(value), origin)
    }

    pub fn percentage(origin: Origin, value: f64) -> Self {
        Self::new(ValueKind::Percentage(value), origin)
    }

    /// A dimension with one numerator unit, e.g. `12px`.
    pub fn dimension(origin: Origin, value: f64, unit: Name) -> Self {
        Self::new(ValueKind::Dimension(Dimension::new(value, unit)), origin)
    }

    pub fn color(origin: Origin, color: Color) -> Self {
        Self::new(ValueKind::Color(color), origin)
    }

    pub fn boolean(origin: Origin, value: bool) -> Self {
        Self::new(ValueKind::Boolean(value), origin)
    }

    /// Raw numeric source text kept for re-emission.
    pub fn textual(origin: Origin, kind: TextualKind, text: Name) -> Self {
        Self::new(ValueKind::Textual { kind, text }, origin)
    }

    pub fn token(origin: Origin, text: Name) -> Self {
        Self::new(ValueKind::Token(text), origin)
    }

    pub fn variable(origin: Origin, name: Name) -> Self {
        Self::new(ValueKind::Variable(name), origin)
    }

    pub fn binary(origin: Origin, op: BinaryOp, left: ValueId, right: ValueId) -> Self {
        Self::new(ValueKind::Binary { op, left, right }, origin)
    }

    /// Arithmetic negation. Logical `not` is an ordinary function call.
    pub fn negation(origin: Origin, operand: ValueId) -> Self {
        Self::new(ValueKind::Negation(operand), origin)
    }

    pub fn function_call(origin: Origin, name: StringId, arguments: ArgumentsId) -> Self {
        Self::new(ValueKind::FunctionCall { name, arguments }, origin)
    }

    /// Mark as delayed.
    #[must_use]
    pub fn delayed(mut self) -> Self {
        self.flags |= ValueFlags::DELAYED;
        self
    }

    /// Mark as parenthesized.
    #[must_use]
    pub fn parenthesized(mut self) -> Self {
        self.flags |= ValueFlags::PARENTHESIZED;
        self
    }

    #[inline]
    pub fn is_delayed(&self) -> bool {
        self.flags.contains(ValueFlags::DELAYED)
    }

    #[inline]
    pub fn is_parenthesized(&self) -> bool {
        self.flags.contains(ValueFlags::PARENTHESIZED)
    }

    /// True for values with no child values.
    pub fn is_atomic(&self) -> bool {
        self.kind.is_atomic()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.origin)?;
        if !self.flags.is_empty() {
            write!(f, " {:?}", self.flags)?;
        }
        Ok(())
    }
}

/// Value variants.
#[derive(Clone, PartialEq, Debug)]
pub enum ValueKind {
    /// Unitless number: `1.5`
    Number(f64),

    /// Percentage: `50%`
    Percentage(f64),

    /// Number with units: `12px`, `3px/s`
    Dimension(Dimension),

    /// Color: `#fff`, `rgba(0, 0, 0, 0.5)`
    Color(Color),

    /// Boolean: `true`, `false`
    Boolean(bool),

    /// Unevaluated numeric text, kept verbatim.
    Textual { kind: TextualKind, text: Name },

    /// Raw textual data, the lowest level of string content.
    Token(Name),

    /// Variable reference: `$name`
    Variable(Name),

    /// Space- or comma-separated list.
    List(ListId),

    /// Quoted or unquoted string, possibly interpolated.
    String(StringId),

    /// Binary operation: left op right
    Binary {
        op: BinaryOp,
        left: ValueId,
        right: ValueId,
    },

    /// Arithmetic negation: `-$x`
    Negation(ValueId),

    /// Function call: `name(args)`
    FunctionCall {
        name: StringId,
        arguments: ArgumentsId,
    },
}

impl ValueKind {
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            Self::Number(_)
                | Self::Percentage(_)
                | Self::Dimension(_)
                | Self::Color(_)
                | Self::Boolean(_)
                | Self::Textual { .. }
                | Self::Token(_)
                | Self::Variable(_)
        )
    }

    /// Short lowercase description for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Percentage(_) => "percentage",
            Self::Dimension(_) => "dimension",
            Self::Color(_) => "color",
            Self::Boolean(_) => "boolean",
            Self::Textual { .. } => "textual",
            Self::Token(_) => "token",
            Self::Variable(_) => "variable",
            Self::List(_) => "list",
            Self::String(_) => "string",
            Self::Binary { .. } => "binary expression",
            Self::Negation(_) => "negation",
            Self::FunctionCall { .. } => "function call",
        }
    }
}

/// A number with compound units.
///
/// Built with exactly one numerator unit; unit arithmetic in the evaluator
/// grows the unit lists.
#[derive(Clone, PartialEq, Debug)]
pub struct Dimension {
    pub value: f64,
    pub numerator_units: SmallVec<[Name; 2]>,
    pub denominator_units: SmallVec<[Name; 2]>,
}

impl Dimension {
    pub fn new(value: f64, unit: Name) -> Self {
        Dimension {
            value,
            numerator_units: smallvec![unit],
            denominator_units: SmallVec::new(),
        }
    }

    /// True when more than one unit is involved, e.g. `px*em` or `px/s`.
    pub fn is_compound(&self) -> bool {
        self.numerator_units.len() + self.denominator_units.len() > 1
    }
}

/// RGBA color. Alpha is conceptually in `[0, 1]`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Opaque color.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color { r, g, b, a }
    }
}

/// What kind of numeric literal a `Textual` value holds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TextualKind {
    Number,
    Percentage,
    Dimension,
    Hex,
}

#[cfg(test)]
mod tests;
