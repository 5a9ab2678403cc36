use alloc::boxed::Box;
use core::any::{Any, TypeId};

use vc_tree::Node;

use crate::AssetRef;
use crate::kinds::{Array, List, Map, OptionValue, Scalar, SharedValue, Struct};
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// Reflect

/// The reflection surface of every value the drivers can walk.
///
/// A type exposes itself as exactly one *kind* through [`Reflect::reflect_ref`]
/// and [`Reflect::reflect_mut`]; the kind decides its persisted representation.
///
/// Implementations exist for primitives, strings, byte buffers, tree nodes,
/// standard collections, `Option`, [`Shared`](crate::Shared) and
/// [`WeakShared`](crate::WeakShared). User types get one from
/// [`#[derive(Persist)]`](crate::derive::Persist).
pub trait Reflect: Any {
    /// The path persisted as the declared type, or used in error messages.
    fn reflect_type_path(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Registers the object types reachable through values of this type.
    fn register_type_dependencies(_registry: &mut TypeRegistry)
    where
        Self: Sized,
    {
    }
}

impl dyn Reflect {
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        (self as &dyn Any).type_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut()
    }

    /// Moves the value out of the box if it is a `T`.
    pub fn take<T: Any>(self: Box<Self>) -> Option<T> {
        let any: Box<dyn Any> = self;
        any.downcast::<T>().ok().map(|boxed| *boxed)
    }
}

impl core::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "dyn Reflect<{}>", self.reflect_type_path())
    }
}

// -----------------------------------------------------------------------------
// ReflectRef / ReflectMut

/// An immutable view of a value through its reflection kind.
pub enum ReflectRef<'a> {
    /// A property tree node, persisted as a deep copy.
    Node(&'a Node),
    Scalar(&'a dyn Scalar),
    /// A reference to an external asset, recorded as a dependency.
    Asset(&'a AssetRef),
    /// A fixed-length sequence.
    Array(&'a dyn Array),
    /// A string-keyed mapping.
    Map(&'a dyn Map),
    /// A growable sequence.
    List(&'a dyn List),
    Option(&'a dyn OptionValue),
    /// An identity-tracked reference.
    Shared(&'a dyn SharedValue),
    /// A general object with named fields.
    Struct(&'a dyn Struct),
    /// A value with no persisted representation.
    Opaque(&'a dyn Reflect),
}

/// A mutable view of a value through its reflection kind.
pub enum ReflectMut<'a> {
    Node(&'a mut Node),
    Scalar(&'a mut dyn Scalar),
    Asset(&'a mut AssetRef),
    Array(&'a mut dyn Array),
    Map(&'a mut dyn Map),
    List(&'a mut dyn List),
    Option(&'a mut dyn OptionValue),
    Shared(&'a mut dyn SharedValue),
    Struct(&'a mut dyn Struct),
    Opaque(&'a mut dyn Reflect),
}

impl ReflectRef<'_> {
    /// A short name of the kind, used in shape errors.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Node(_) => "node",
            Self::Scalar(_) => "primitive",
            Self::Asset(_) => "asset",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::List(_) => "list",
            Self::Option(_) => "option",
            Self::Shared(_) => "shared object",
            Self::Struct(_) => "object",
            Self::Opaque(_) => "opaque value",
        }
    }
}

impl ReflectMut<'_> {
    /// A short name of the kind, used in shape errors.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Node(_) => "node",
            Self::Scalar(_) => "primitive",
            Self::Asset(_) => "asset",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::List(_) => "list",
            Self::Option(_) => "option",
            Self::Shared(_) => "shared object",
            Self::Struct(_) => "object",
            Self::Opaque(_) => "opaque value",
        }
    }
}
