use alloc::string::String;

use vc_tree::Identity;

/// A non-fatal problem met while reading a tree.
///
/// The affected value is left null and the conversion goes on; the
/// diagnostics are collected in the [`IdentityContext`](crate::IdentityContext).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
    /// The declared type of a compound is not registered.
    #[error("unresolved type `{type_path}` for object {identity} at {path}, left null")]
    UnresolvedType {
        type_path: String,
        identity: Identity,
        path: String,
    },
    /// A back-reference to an identity never defined before it.
    #[error("reference to undefined object {identity} at {path}, left null")]
    DanglingReference { identity: Identity, path: String },
    /// A compound for a polymorphic slot without a declared type.
    #[error("object {identity} at {path} has no declared type, left null")]
    MissingDeclaredType { identity: Identity, path: String },
}
