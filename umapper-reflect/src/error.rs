use owo_colors::OwoColorize;
use umapper_core::{ConstructError, Shape};

/// Errors that can occur when mapping between types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MapperError {
    /// A non-nullable target constructor parameter received no value: no
    /// source field of that name existed, or the matched source value was
    /// absent.
    MissingRequiredField {
        /// The target shape being constructed.
        shape: &'static Shape,
        /// The name of the parameter that went unfilled.
        param: &'static str,
    },

    /// No field names matched at all between source and target, and the
    /// target registered no zero-argument constructor to fall back to.
    NoDefaultConstructor {
        /// The target shape being constructed.
        shape: &'static Shape,
    },

    /// An unexpected introspection or construction failure. Cannot occur
    /// for derive-generated shapes fed through the public API.
    Internal {
        /// The shape involved in the failing operation.
        shape: &'static Shape,
        /// What went wrong.
        cause: InternalCause,
    },
}

/// The underlying cause of a [`MapperError::Internal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InternalCause {
    /// A value accessor or ancestor projection was handed an instance of
    /// the wrong type.
    NotAnInstance {
        /// The type the operation expected.
        expected: &'static str,
    },

    /// An ancestor level was requested beyond the end of the chain.
    MissingAncestor {
        /// The first missing level.
        depth: usize,
    },

    /// A generated constructor rejected its argument set.
    Construct(ConstructError),

    /// The constructed value was not of the requested target type.
    WrongResultType {
        /// The type the caller requested.
        expected: &'static str,
    },
}

impl core::fmt::Display for MapperError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MapperError::MissingRequiredField { shape, param } => {
                write!(
                    f,
                    "Required parameter '{}::{}' has no matched source value",
                    shape.blue(),
                    param.yellow()
                )
            }
            MapperError::NoDefaultConstructor { shape } => {
                write!(
                    f,
                    "No fields matched and '{}' has no zero-argument constructor",
                    shape.red()
                )
            }
            MapperError::Internal { shape, cause } => {
                write!(f, "Internal failure while mapping '{}': {}", shape.red(), cause)
            }
        }
    }
}

impl core::fmt::Display for InternalCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InternalCause::NotAnInstance { expected } => {
                write!(f, "value is not an instance of {}", expected.green())
            }
            InternalCause::MissingAncestor { depth } => {
                write!(f, "ancestor chain ends before depth {}", depth)
            }
            InternalCause::Construct(cause) => write!(f, "{}", cause),
            InternalCause::WrongResultType { expected } => {
                write!(f, "constructed value is not a {}", expected.green())
            }
        }
    }
}

impl core::error::Error for MapperError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            MapperError::Internal {
                cause: InternalCause::Construct(cause),
                ..
            } => Some(cause),
            _ => None,
        }
    }
}
