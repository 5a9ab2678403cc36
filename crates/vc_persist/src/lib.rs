//! Identity-preserving persistence of object graphs into property trees.
//!
//! `vc_persist` walks a graph of reflected values and turns it into a
//! [`vc_tree::Node`] tree, and rebuilds graphs from such trees. Shared
//! objects keep their identity: an object reachable from several places is
//! written once, later occurrences become back-references, and reading the
//! tree yields one instance again. Cycles are fine.
//!
//! ## Menu
//!
//! - [`Reflect`]: the reflection surface every persisted value implements.
//! - [`derive::Persist`]: derives it for structs and C-like enums.
//! - [`Shared`] / [`WeakShared`]: the identity-tracked reference types.
//! - [`serialize`] / [`deserialize`] / [`deserialize_into`]: entry points.
//! - [`IdentityContext`]: identity tables of one conversion, shareable
//!   across a batch of calls.
//! - [`registry::TypeRegistry`]: resolves declared type paths to constructors.
//! - [`hooks`]: lifecycle callbacks and manual (de)serialization.
//!
//! ## Example
//!
//! ```
//! use vc_persist::{Shared, deserialize, derive::Persist, registry::TypeRegistry, serialize};
//!
//! #[derive(Persist, Default)]
//! pub struct Leaf {
//!     pub weight: f32,
//! }
//!
//! #[derive(Persist, Default)]
//! pub struct Pair {
//!     pub left: Shared<Leaf>,
//!     pub right: Shared<Leaf>,
//! }
//!
//! let leaf = Shared::new(Leaf { weight: 2.5 });
//! let pair = Pair { left: leaf.clone(), right: leaf };
//!
//! let tree = serialize(&pair).unwrap();
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Pair>();
//!
//! let back: Pair = deserialize(&tree, &registry).unwrap().unwrap();
//! assert!(back.left.ptr_eq(&back.right));
//! assert_eq!(back.left.borrow().unwrap().weight, 2.5);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// Lets the derive expand to `::vc_persist::...` inside this crate.
extern crate self as vc_persist;

// -----------------------------------------------------------------------------
// Modules

mod asset;
mod context;
mod diagnostic;
mod error;
mod hash;
mod path;
mod reflection;
mod shared;

pub mod de;
pub mod hooks;
pub mod impls;
pub mod info;
pub mod kinds;
pub mod policy;
pub mod registry;
pub mod ser;

#[cfg(test)]
mod tests;

#[doc(hidden)]
pub mod __macro_exports;

pub mod derive {
    //! Derive macros.
    pub use vc_persist_derive::Persist;
}

// -----------------------------------------------------------------------------
// Exports

pub use vc_tree as tree;

pub use asset::AssetRef;
pub use context::IdentityContext;
pub use diagnostic::Diagnostic;
pub use error::{DeserializeError, SerializeError};
pub use reflection::{Reflect, ReflectMut, ReflectRef};
pub use shared::{Object, ObjectHandle, Shared, SharedTarget, WeakShared};

pub use de::{
    Outcome, deserialize, deserialize_dynamic, deserialize_into, deserialize_into_with,
    deserialize_with,
};
pub use ser::{serialize, serialize_with};
