//! Parameter and argument lists.
//!
//! Both lists enforce their ordering at append time:
//! - parameters: required, then optional (defaulted), then at most one rest
//! - arguments: positional, then keyword, then at most one rest
//!
//! A rejected item is not stored and the list keeps its previous state.

use std::ops::Index;

use tracing::debug;

use crate::error::OrderViolation;
use crate::traits::impl_has_origin;
use crate::{IrError, IrResult, Name, Named, Origin, ValueId};

/// Where an item sits in the required/optional/rest ordering.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Slot {
    Required,
    Optional,
    Rest,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Rejection {
    DuplicateRest,
    Order(OrderViolation),
}

/// Ordering state shared by `Parameters` and `Arguments`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
struct OrderState {
    seen_optional: bool,
    seen_rest: bool,
}

impl OrderState {
    /// State after admitting an item in `slot`, or why it cannot follow.
    fn admit(self, slot: Slot) -> Result<OrderState, Rejection> {
        if self.seen_rest {
            return Err(match slot {
                Slot::Rest => Rejection::DuplicateRest,
                Slot::Required | Slot::Optional => Rejection::Order(OrderViolation::AfterRest),
            });
        }
        match slot {
            Slot::Rest if self.seen_optional => {
                Err(Rejection::Order(OrderViolation::RestAfterOptional))
            }
            Slot::Rest => Ok(OrderState {
                seen_rest: true,
                ..self
            }),
            Slot::Optional => Ok(OrderState {
                seen_optional: true,
                ..self
            }),
            Slot::Required if self.seen_optional => {
                Err(Rejection::Order(OrderViolation::RequiredAfterOptional))
            }
            Slot::Required => Ok(self),
        }
    }
}

// Parameters

/// One parameter of a mixin or function definition.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Parameter {
    pub origin: Origin,
    pub name: Name,
    pub default_value: Option<ValueId>,
    pub is_rest: bool,
}

impl_has_origin!(Parameter);

impl Named for Parameter {
    fn name(&self) -> Name {
        self.name
    }
}

impl Parameter {
    /// Build a parameter, rejecting a rest parameter with a default value.
    pub fn new(
        origin: Origin,
        name: Name,
        default_value: Option<ValueId>,
        is_rest: bool,
    ) -> IrResult<Self> {
        let param = Parameter {
            origin,
            name,
            default_value,
            is_rest,
        };
        param.check_shape()?;
        Ok(param)
    }

    /// `$name`
    pub fn required(origin: Origin, name: Name) -> Self {
        Parameter {
            origin,
            name,
            default_value: None,
            is_rest: false,
        }
    }

    /// `$name: default`
    pub fn optional(origin: Origin, name: Name, default_value: ValueId) -> Self {
        Parameter {
            origin,
            name,
            default_value: Some(default_value),
            is_rest: false,
        }
    }

    /// `$name...`
    pub fn rest(origin: Origin, name: Name) -> Self {
        Parameter {
            origin,
            name,
            default_value: None,
            is_rest: true,
        }
    }

    #[inline]
    pub fn is_optional(&self) -> bool {
        self.default_value.is_some()
    }

    /// Fields are public, so `Parameters` re-runs this on every push.
    fn check_shape(&self) -> IrResult<()> {
        if self.is_rest && self.default_value.is_some() {
            debug!(line = self.origin.line, name = ?self.name, "rest parameter with default value");
            return Err(IrError::RestParameterWithDefault {
                origin: self.origin,
                name: self.name,
            });
        }
        Ok(())
    }

    fn slot(&self) -> Slot {
        if self.is_rest {
            Slot::Rest
        } else if self.is_optional() {
            Slot::Optional
        } else {
            Slot::Required
        }
    }
}

/// Parameter list of a definition.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Parameters {
    pub origin: Origin,
    list: Vec<Parameter>,
    state: OrderState,
}

impl_has_origin!(Parameters);

impl Parameters {
    pub fn new(origin: Origin) -> Self {
        Parameters {
            origin,
            list: Vec::new(),
            state: OrderState::default(),
        }
    }

    /// Append a parameter.
    ///
    /// # Errors
    /// - `RestParameterWithDefault` for a rest parameter carrying a default
    /// - `DuplicateRestParameter` for a second rest parameter
    /// - `ParameterOrder` for a required parameter after an optional one,
    ///   a rest parameter after an optional one, or anything after the rest
    ///   parameter
    pub fn push(&mut self, param: Parameter) -> IrResult<&mut Self> {
        self.state = Self::admit(self.state, &param)?;
        self.list.push(param);
        Ok(self)
    }

    /// Append every parameter of `other`.
    ///
    /// All-or-nothing: on error no parameter of `other` is added.
    pub fn append(&mut self, other: Parameters) -> IrResult<&mut Self> {
        let state = other
            .list
            .iter()
            .try_fold(self.state, |state, param| Self::admit(state, param))?;
        self.state = state;
        self.list.extend(other.list);
        Ok(self)
    }

    fn admit(state: OrderState, param: &Parameter) -> IrResult<OrderState> {
        param.check_shape()?;
        state.admit(param.slot()).map_err(|rejection| {
            debug!(line = param.origin.line, name = ?param.name, ?rejection, "rejected parameter");
            match rejection {
                Rejection::DuplicateRest => IrError::DuplicateRestParameter {
                    origin: param.origin,
                    name: param.name,
                },
                Rejection::Order(violation) => IrError::ParameterOrder {
                    origin: param.origin,
                    name: param.name,
                    violation,
                },
            }
        })
    }

    /// True once a defaulted parameter has been added.
    #[inline]
    pub fn has_optional(&self) -> bool {
        self.state.seen_optional
    }

    #[inline]
    pub fn has_rest(&self) -> bool {
        self.state.seen_rest
    }

    /// Number of parameters without a default value or rest marker.
    pub fn required_count(&self) -> usize {
        self.list
            .iter()
            .filter(|p| p.slot() == Slot::Required)
            .count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Parameter> {
        self.list.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.list.iter()
    }

    pub fn as_slice(&self) -> &[Parameter] {
        &self.list
    }
}

impl Index<usize> for Parameters {
    type Output = Parameter;

    #[track_caller]
    fn index(&self, index: usize) -> &Parameter {
        &self.list[index]
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

// Arguments

/// One argument of a mixin include or function call.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Argument {
    pub origin: Origin,
    pub value: ValueId,
    /// Keyword name; `None` for positional and rest arguments.
    pub name: Option<Name>,
    pub is_rest: bool,
}

impl_has_origin!(Argument);

impl Argument {
    /// Build an argument, rejecting a keyword argument marked as rest.
    ///
    /// # Errors
    /// `InvalidNamedRestArgument` when `name` is set and `is_rest` is true.
    pub fn new(origin: Origin, value: ValueId, name: Option<Name>, is_rest: bool) -> IrResult<Self> {
        let arg = Argument {
            origin,
            value,
            name,
            is_rest,
        };
        arg.check_shape()?;
        Ok(arg)
    }

    pub fn positional(origin: Origin, value: ValueId) -> Self {
        Argument {
            origin,
            value,
            name: None,
            is_rest: false,
        }
    }

    /// `$name: value`
    pub fn named(origin: Origin, name: Name, value: ValueId) -> Self {
        Argument {
            origin,
            value,
            name: Some(name),
            is_rest: false,
        }
    }

    /// `value...`
    pub fn rest(origin: Origin, value: ValueId) -> Self {
        Argument {
            origin,
            value,
            name: None,
            is_rest: true,
        }
    }

    #[inline]
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    /// Fields are public, so `Arguments` re-runs this on every push.
    fn check_shape(&self) -> IrResult<()> {
        if let (Some(name), true) = (self.name, self.is_rest) {
            debug!(line = self.origin.line, ?name, "keyword argument marked as rest");
            return Err(IrError::InvalidNamedRestArgument {
                origin: self.origin,
                name,
            });
        }
        Ok(())
    }

    fn slot(&self) -> Slot {
        if self.is_rest {
            Slot::Rest
        } else if self.is_named() {
            Slot::Optional
        } else {
            Slot::Required
        }
    }
}

/// Argument list of a call.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Arguments {
    pub origin: Origin,
    list: Vec<Argument>,
    state: OrderState,
}

impl_has_origin!(Arguments);

impl Arguments {
    pub fn new(origin: Origin) -> Self {
        Arguments {
            origin,
            list: Vec::new(),
            state: OrderState::default(),
        }
    }

    /// Append an argument.
    ///
    /// # Errors
    /// - `InvalidNamedRestArgument` for a keyword argument marked as rest
    /// - `DuplicateRestArgument` for a second rest argument
    /// - `ArgumentOrder` for a positional argument after a keyword one,
    ///   a rest argument after a keyword one, or anything after the rest
    ///   argument
    pub fn push(&mut self, arg: Argument) -> IrResult<&mut Self> {
        self.state = Self::admit(self.state, &arg)?;
        self.list.push(arg);
        Ok(self)
    }

    /// Append every argument of `other`.
    ///
    /// All-or-nothing: on error no argument of `other` is added.
    pub fn append(&mut self, other: Arguments) -> IrResult<&mut Self> {
        let state = other
            .list
            .iter()
            .try_fold(self.state, |state, arg| Self::admit(state, arg))?;
        self.state = state;
        self.list.extend(other.list);
        Ok(self)
    }

    fn admit(state: OrderState, arg: &Argument) -> IrResult<OrderState> {
        arg.check_shape()?;
        state.admit(arg.slot()).map_err(|rejection| {
            debug!(line = arg.origin.line, ?rejection, "rejected argument");
            match rejection {
                Rejection::DuplicateRest => IrError::DuplicateRestArgument { origin: arg.origin },
                Rejection::Order(violation) => IrError::ArgumentOrder {
                    origin: arg.origin,
                    violation,
                },
            }
        })
    }

    /// True once a keyword argument has been added.
    #[inline]
    pub fn has_named(&self) -> bool {
        self.state.seen_optional
    }

    #[inline]
    pub fn has_rest(&self) -> bool {
        self.state.seen_rest
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.list.get(index)
    }

    /// Look up a keyword argument by name.
    pub fn find_named(&self, name: Name) -> Option<&Argument> {
        self.list.iter().find(|arg| arg.name == Some(name))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.list.iter()
    }

    pub fn as_slice(&self) -> &[Argument] {
        &self.list
    }
}

impl Index<usize> for Arguments {
    type Output = Argument;

    #[track_caller]
    fn index(&self, index: usize) -> &Argument {
        &self.list[index]
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}
