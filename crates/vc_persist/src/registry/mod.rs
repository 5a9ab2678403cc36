//! Type registry: resolves persisted type paths to constructors.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: a capability attached to a registered type.
//! - [`FromType`]: builds a `TypeTrait` for a concrete type.
//! - [`TypeMeta`]: a [`TypeInfo`] plus a table of type traits.
//! - [`GetTypeMeta`]: builds the `TypeMeta` of a type.
//! - [`TypeRegistry`]: the store, indexed by `TypeId`, type path and type name.
//! - Type traits:
//!     - [`TypeTraitDefault`]: creates a boxed default value.
//!     - [`TypeTraitShared`]: creates a fresh shared object, used when a
//!       persisted compound declares its concrete type.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`]. Types annotated with
//! `#[persist(auto_register)]` are collected at link time through
//! the [`inventory`](https://docs.rs/inventory) crate.
//!
//! [`TypeInfo`]: crate::info::TypeInfo

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::{TypeTraitDefault, TypeTraitShared};
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::TypeRegistry;
pub use type_trait::TypeTrait;
