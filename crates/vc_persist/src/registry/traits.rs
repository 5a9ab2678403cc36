use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use crate::info::Typed;
use crate::registry::FromType;
use crate::{Object, ObjectHandle, Reflect};

// -----------------------------------------------------------------------------
// TypeTraitDefault

/// Creates a default value of the registered type.
///
/// # Examples
///
/// ```
/// use vc_persist::registry::{TypeRegistry, TypeTraitDefault};
///
/// let registry = TypeRegistry::new();
///
/// let generator = registry
///     .get_with_type_name("String")
///     .unwrap()
///     .get_trait::<TypeTraitDefault>()
///     .unwrap();
///
/// assert_eq!(generator.default().take::<String>().unwrap(), "");
/// ```
#[derive(Clone)]
pub struct TypeTraitDefault {
    func: fn() -> Box<dyn Reflect>,
}

impl TypeTraitDefault {
    #[inline]
    pub fn default(&self) -> Box<dyn Reflect> {
        (self.func)()
    }
}

impl<T: Reflect + Default + Typed> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            func: || Box::<T>::default(),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeTraitShared

/// Creates a fresh default object behind a new shared reference.
///
/// The deserializer uses it when a compound declares a concrete type that
/// differs from the static type of the slot it fills.
#[derive(Clone)]
pub struct TypeTraitShared {
    func: fn() -> ObjectHandle,
}

impl TypeTraitShared {
    #[inline]
    pub fn construct(&self) -> ObjectHandle {
        (self.func)()
    }
}

impl<T: Object> FromType<T> for TypeTraitShared {
    fn from_type() -> Self {
        Self {
            func: || ObjectHandle::new(Rc::new(RefCell::new(T::default()))),
        }
    }
}
