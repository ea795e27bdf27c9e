//! Construction errors.
//!
//! These are contract violations detected at the exact point a parameter or
//! argument is built or appended, or a node is linked under a new parent.
//! The rejected item is never stored; the producer decides how to recover.

use thiserror::Error;

use crate::{Name, Origin};

/// Why an ordering check failed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OrderViolation {
    /// A required parameter or positional argument after an optional/named one.
    RequiredAfterOptional,
    /// A rest parameter or argument after an optional/named one.
    RestAfterOptional,
    /// Anything after a rest parameter or argument.
    AfterRest,
}

impl OrderViolation {
    /// Short description used in parameter error messages.
    pub const fn parameter_message(self) -> &'static str {
        match self {
            Self::RequiredAfterOptional => "required parameter follows an optional parameter",
            Self::RestAfterOptional => "rest parameter follows an optional parameter",
            Self::AfterRest => "parameter follows the rest parameter",
        }
    }

    /// Short description used in argument error messages.
    pub const fn argument_message(self) -> &'static str {
        match self {
            Self::RequiredAfterOptional => "positional argument follows a keyword argument",
            Self::RestAfterOptional => "rest argument follows a keyword argument",
            Self::AfterRest => "argument follows the rest argument",
        }
    }
}

/// Errors raised while building IR nodes.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum IrError {
    #[error("{}: {}", .origin, .violation.parameter_message())]
    ParameterOrder {
        origin: Origin,
        name: Name,
        violation: OrderViolation,
    },

    #[error("{origin}: a parameter list may only have one rest parameter")]
    DuplicateRestParameter { origin: Origin, name: Name },

    #[error("{origin}: a rest parameter cannot have a default value")]
    RestParameterWithDefault { origin: Origin, name: Name },

    #[error("{}: {}", .origin, .violation.argument_message())]
    ArgumentOrder {
        origin: Origin,
        violation: OrderViolation,
    },

    #[error("{origin}: an argument list may only have one rest argument")]
    DuplicateRestArgument { origin: Origin },

    #[error("{origin}: a keyword argument cannot be a rest argument")]
    InvalidNamedRestArgument { origin: Origin, name: Name },

    #[error("{origin}: a node cannot contain itself")]
    CyclicNode { origin: Origin },

    #[error("{origin}: node already belongs to another parent")]
    SharedNode { origin: Origin },
}

impl IrError {
    /// Where the offending node was written.
    pub fn origin(&self) -> Origin {
        match self {
            Self::ParameterOrder { origin, .. }
            | Self::DuplicateRestParameter { origin, .. }
            | Self::RestParameterWithDefault { origin, .. }
            | Self::ArgumentOrder { origin, .. }
            | Self::DuplicateRestArgument { origin }
            | Self::InvalidNamedRestArgument { origin, .. }
            | Self::CyclicNode { origin }
            | Self::SharedNode { origin } => *origin,
        }
    }

    /// Short uppercase title for diagnostic headlines.
    pub fn title(&self) -> &'static str {
        match self {
            Self::ParameterOrder { .. } => "PARAMETER ORDER",
            Self::DuplicateRestParameter { .. } => "DUPLICATE REST PARAMETER",
            Self::RestParameterWithDefault { .. } => "REST PARAMETER WITH DEFAULT",
            Self::ArgumentOrder { .. } => "ARGUMENT ORDER",
            Self::DuplicateRestArgument { .. } => "DUPLICATE REST ARGUMENT",
            Self::InvalidNamedRestArgument { .. } => "NAMED REST ARGUMENT",
            Self::CyclicNode { .. } => "CYCLIC NODE",
            Self::SharedNode { .. } => "SHARED NODE",
        }
    }
}

pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_origin() {
        let origin = Origin::new(Name::new(1, 1), 8);
        let err = IrError::DuplicateRestArgument { origin };
        assert_eq!(err.origin(), origin);
        assert_eq!(err.title(), "DUPLICATE REST ARGUMENT");
    }

    #[test]
    fn test_error_display() {
        let err = IrError::ParameterOrder {
            origin: Origin::new(Name::EMPTY, 4),
            name: Name::EMPTY,
            violation: OrderViolation::RequiredAfterOptional,
        };
        assert_eq!(
            err.to_string(),
            "line 4: required parameter follows an optional parameter"
        );

        let err = IrError::InvalidNamedRestArgument {
            origin: Origin::new(Name::EMPTY, 2),
            name: Name::EMPTY,
        };
        assert_eq!(err.to_string(), "line 2: a keyword argument cannot be a rest argument");

        let err = IrError::CyclicNode {
            origin: Origin::new(Name::EMPTY, 9),
        };
        assert_eq!(err.to_string(), "line 9: a node cannot contain itself");
        assert_eq!(err.title(), "CYCLIC NODE");
    }

    #[test]
    fn test_argument_messages() {
        assert_eq!(
            OrderViolation::AfterRest.argument_message(),
            "argument follows the rest argument"
        );
        assert_eq!(
            OrderViolation::RestAfterOptional.parameter_message(),
            "rest parameter follows an optional parameter"
        );
    }
}
