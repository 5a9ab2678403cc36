use alloc::boxed::Box;
use core::any::TypeId;

use crate::hash::TypeIdMap;
use crate::info::{TypeInfo, Typed};
use crate::registry::{TypeRegistry, TypeTrait};

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime metadata of a registered type: its [`TypeInfo`] and a table of
/// [`TypeTrait`]s.
///
/// Usually produced by [`GetTypeMeta`], which `#[derive(Persist)]`
/// implements.
///
/// # Example
///
/// ```
/// use vc_persist::registry::{FromType, TypeMeta, TypeTraitDefault};
///
/// let mut meta = TypeMeta::of::<u16>();
/// meta.insert_trait::<TypeTraitDefault>(FromType::<u16>::from_type());
///
/// let value = meta.get_trait::<TypeTraitDefault>().unwrap().default();
/// assert_eq!(value.take::<u16>(), Some(0));
/// ```
pub struct TypeMeta {
    type_id: TypeId,
    type_info: &'static TypeInfo,
    traits: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// Creates a meta without any type trait.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self::with_capacity::<T>(0)
    }

    pub fn with_capacity<T: Typed>(capacity: usize) -> Self {
        let mut traits = TypeIdMap::default();
        traits.reserve(capacity);
        Self {
            type_id: TypeId::of::<T>(),
            type_info: T::type_info(),
            traits,
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_info.type_path()
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_info.type_name()
    }

    /// Inserts a type trait, replacing one of the same type.
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.traits.insert(TypeId::of::<T>(), Box::new(data));
    }

    pub fn remove_trait<T: TypeTrait>(&mut self) -> bool {
        self.traits.remove(&TypeId::of::<T>()).is_some()
    }

    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.traits
            .get(&TypeId::of::<T>())
            .and_then(|data| (**data).downcast_ref())
    }

    pub fn get_trait_mut<T: TypeTrait>(&mut self) -> Option<&mut T> {
        self.traits
            .get_mut(&TypeId::of::<T>())
            .and_then(|data| (**data).downcast_mut())
    }

    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.traits.contains_key(&TypeId::of::<T>())
    }

    #[inline]
    pub fn trait_len(&self) -> usize {
        self.traits.len()
    }
}

impl core::fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_path", &self.type_path())
            .field("traits", &self.traits.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// Builds the [`TypeMeta`] of a type for registration into a
/// [`TypeRegistry`].
///
/// Implemented by `#[derive(Persist)]` and for every built-in type the
/// crate can persist.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so cannot be registered",
    note = "consider annotating `{Self}` with `#[derive(Persist)]`"
)]
pub trait GetTypeMeta: Typed {
    fn get_type_meta() -> TypeMeta;

    /// Registers other types reachable from this type.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
