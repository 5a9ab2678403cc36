use alloc::string::String;

use crate::policy::ConvertError;

// -----------------------------------------------------------------------------
// SerializeError

/// A fatal error while turning a graph into a tree.
///
/// After one of these, the [`IdentityContext`](crate::IdentityContext)
/// used for the call is poisoned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SerializeError {
    /// The value has no persisted representation.
    #[error("`{type_path}` at {path} cannot be persisted")]
    Unsupported { type_path: &'static str, path: String },
    /// A shared object was mutably borrowed during the walk.
    #[error("shared `{type_path}` at {path} is mutably borrowed")]
    Borrowed { type_path: &'static str, path: String },
    /// The context was poisoned by an earlier failure.
    #[error("the identity context was poisoned by an earlier failure")]
    PoisonedContext,
    /// More objects than identities.
    #[error("ran out of object identities")]
    IdentityOverflow,
    /// A scalar whose value has no primitive of its persisted kind.
    #[error("at {path}: {source}")]
    Convert {
        #[source]
        source: ConvertError,
        path: String,
    },
    /// Raised by a manual serialization hook.
    #[error("{0}")]
    Custom(String),
}

impl SerializeError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

// -----------------------------------------------------------------------------
// DeserializeError

/// A fatal error while rebuilding a graph from a tree.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeserializeError {
    /// The node kind does not fit the target value.
    #[error("expected {expected} at {path}, found {found}")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
        path: String,
    },
    /// A list too long or too short for a fixed-length target.
    #[error("expected {expected} elements at {path}, found {found}")]
    LengthMismatch {
        expected: usize,
        found: usize,
        path: String,
    },
    /// The object named by a compound cannot be stored in the target
    /// reference.
    #[error("object of type `{declared}` at {path} does not fit `{expected}`")]
    TypeMismatch {
        declared: String,
        expected: &'static str,
        path: String,
    },
    /// A primitive that does not convert to the target type.
    #[error("at {path}: {source}")]
    Convert {
        #[source]
        source: ConvertError,
        path: String,
    },
    /// A shared object was already borrowed when it had to be filled.
    #[error("shared `{type_path}` at {path} is already borrowed")]
    Borrowed { type_path: &'static str, path: String },
    /// The target has no persisted representation.
    #[error("`{type_path}` at {path} cannot be persisted")]
    Unsupported { type_path: &'static str, path: String },
    /// The context was poisoned by an earlier failure.
    #[error("the identity context was poisoned by an earlier failure")]
    PoisonedContext,
    /// Raised by a manual deserialization hook.
    #[error("{0}")]
    Custom(String),
}

impl DeserializeError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}
