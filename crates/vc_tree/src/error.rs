use alloc::string::String;

use thiserror::Error;

use crate::NodeKind;

/// An error produced by structural access into a property tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TreeError {
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("compound has no entry named `{key}`")]
    MissingKey { key: String },
    #[error("expected a list node, found {found}")]
    NotAList { found: NodeKind },
    #[error("expected a compound node, found {found}")]
    NotACompound { found: NodeKind },
}
