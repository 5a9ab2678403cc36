use alloc::string::String;
use core::any::TypeId;

use vc_tree::{Bytes, Decimal};

use crate::hash::{FixedHashState, HashMap, HashSet, TypeIdMap};
use crate::info::Typed;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait};

// -----------------------------------------------------------------------------
// TypeRegistry

/// The store of registered types, consulted when a persisted compound
/// declares its concrete type.
///
/// A type can be looked up by [`TypeId`], by its full
/// [type path](crate::info::TypePath::type_path) or by its short
/// [type name](crate::info::TypePath::type_name). A short name shared by
/// several registered types is *ambiguous* and no longer resolves.
///
/// # Example
///
/// ```
/// use core::any::TypeId;
/// use vc_persist::{derive::Persist, registry::{TypeRegistry, TypeTraitShared}};
///
/// #[derive(Persist, Default)]
/// pub struct Node {
///     pub name: Option<String>,
///     pub weight: i32,
/// }
///
/// let mut registry = TypeRegistry::default();
/// registry.register::<Node>();
///
/// assert!(registry.contains(TypeId::of::<Node>()));
/// // Field types come along.
/// assert!(registry.contains(TypeId::of::<i32>()));
///
/// let meta = registry.get_with_type_name("Node").unwrap();
/// assert!(meta.has_trait::<TypeTraitShared>());
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::with_hasher(FixedHashState),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    /// Creates a registry with the primitive types registered.
    ///
    /// - `bool`
    /// - `i8 - i64` `isize`
    /// - `u8 - u64` `usize`
    /// - `f32` `f64`
    /// - `String` `Decimal` `Bytes`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<isize>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<usize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<Decimal>();
        registry.register::<Bytes>();
        registry
    }

    // The type must not be in the table yet.
    fn add_new_type_indices(
        type_meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let type_name = type_meta.type_name();
        let type_id = type_meta.type_id();

        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                log::debug!("type name `{type_name}` is now ambiguous");
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, type_id);
            }
        }

        if let Some(previous) = type_path_to_id.insert(type_meta.type_path(), type_id)
            && previous != type_id
        {
            log::warn!(
                "type path `{}` is used by two distinct types, the later registration wins",
                type_meta.type_path(),
            );
        }
    }

    /// Inserts the meta unless its type is already registered.
    ///
    /// Returns whether it was inserted. Dependencies are not registered,
    /// see [`register`](Self::register).
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        if self.type_meta_table.contains_key(&type_meta.type_id()) {
            return false;
        }
        Self::add_new_type_indices(
            &type_meta,
            &mut self.type_path_to_id,
            &mut self.type_name_to_id,
            &mut self.ambiguous_names,
        );
        self.type_meta_table.insert(type_meta.type_id(), type_meta);
        true
    }

    /// Inserts the meta, replacing the one of an already registered type.
    ///
    /// Dependencies are not registered, see [`register`](Self::register).
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        if !self.type_meta_table.contains_key(&type_meta.type_id()) {
            Self::add_new_type_indices(
                &type_meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
        }
        self.type_meta_table.insert(type_meta.type_id(), type_meta);
    }

    /// Registers `T` and, the first time, the types it depends on.
    pub fn register<T: GetTypeMeta>(&mut self) {
        let type_id = TypeId::of::<T>();
        if self.type_meta_table.contains_key(&type_id) {
            return;
        }
        let meta = T::get_type_meta();
        Self::add_new_type_indices(
            &meta,
            &mut self.type_path_to_id,
            &mut self.type_name_to_id,
            &mut self.ambiguous_names,
        );
        self.type_meta_table.insert(type_id, meta);
        T::register_dependencies(self);
    }

    /// Registers every type annotated with `#[persist(auto_register)]`.
    ///
    /// Equivalent to calling [`register`](Self::register) for each of
    /// them, so repeated calls do not insert duplicates.
    ///
    /// Returns `false` without doing anything when the `auto_register`
    /// feature is disabled.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use core::any::TypeId;
    /// use vc_persist::{derive::Persist, registry::TypeRegistry};
    ///
    /// #[derive(Persist, Default)]
    /// #[persist(auto_register)]
    /// pub struct Foo {
    ///     pub value: i32,
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains(TypeId::of::<Foo>()));
    /// ```
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::{AutoRegistration, inventory};

            let before = self.type_meta_table.len();
            for registration in inventory::iter::<AutoRegistration> {
                (registration.0)(self);
            }
            log::debug!(
                "auto registration added {} types",
                self.type_meta_table.len() - before,
            );
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Attaches the type trait `D` to the already registered type `T`.
    ///
    /// Returns `false` when `T` is not registered.
    pub fn register_type_trait<T: Typed, D: TypeTrait + FromType<T>>(&mut self) -> bool {
        match self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            Some(type_meta) => {
                type_meta.insert_trait(D::from_type());
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains_key(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        self.type_meta_table.get_mut(&type_id)
    }

    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        self.type_path_to_id
            .get(type_path)
            .and_then(|id| self.get(*id))
    }

    /// Looks a type up by its short name.
    ///
    /// Returns `None` when the name is ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        self.type_name_to_id
            .get(type_name)
            .and_then(|id| self.get(*id))
    }

    /// Whether the short name matches several registered types.
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        self.get(type_id).and_then(TypeMeta::get_trait::<T>)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_meta_table.is_empty()
    }

    /// The registered types, in no particular order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeRegistry;
    use crate::registry::TypeTraitDefault;

    mod first {
        #[derive(crate::derive::Persist, Default)]
        pub struct Twin {
            pub a: i32,
        }
    }

    mod second {
        #[derive(crate::derive::Persist, Default)]
        pub struct Twin {
            pub b: i32,
        }
    }

    #[test]
    fn primitives_are_preregistered() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<u8>()));
        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.get_with_type_name("f64").is_some());
        assert!(TypeRegistry::empty().is_empty());
    }

    #[test]
    fn short_names_become_ambiguous() {
        let mut registry = TypeRegistry::new();
        registry.register::<first::Twin>();
        assert!(registry.get_with_type_name("Twin").is_some());

        registry.register::<second::Twin>();
        assert!(registry.is_ambiguous("Twin"));
        assert!(registry.get_with_type_name("Twin").is_none());

        let path = <second::Twin as crate::info::TypePath>::type_path();
        let meta = registry.get_with_type_path(path).unwrap();
        assert_eq!(meta.type_id(), TypeId::of::<second::Twin>());
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = TypeRegistry::new();
        let len = registry.len();
        registry.register::<first::Twin>();
        registry.register::<first::Twin>();
        assert_eq!(registry.len(), len + 1);

        let generator = registry
            .get_type_trait::<TypeTraitDefault>(TypeId::of::<first::Twin>())
            .unwrap();
        assert!(generator.default().is::<first::Twin>());
    }
}
