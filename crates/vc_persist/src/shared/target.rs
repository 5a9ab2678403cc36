use alloc::rc::Rc;
use core::cell::RefCell;

use crate::info::Typed;
use crate::kinds::Struct;
use crate::registry::{GetTypeMeta, TypeRegistry};
use crate::{ObjectHandle, Reflect};

// -----------------------------------------------------------------------------
// Object

/// A concrete object type that can live behind a [`Shared`](crate::Shared).
///
/// Implemented by `#[derive(Persist)]` for structs. `Default` provides the
/// bare instance the deserializer registers before populating it.
pub trait Object: Struct + Typed + GetTypeMeta + Default {}

// -----------------------------------------------------------------------------
// SharedTarget

/// What a [`Shared`](crate::Shared) or [`WeakShared`](crate::WeakShared)
/// may point at: an [`Object`] type, or `dyn Reflect`.
pub trait SharedTarget: 'static {
    fn to_handle(rc: &Rc<RefCell<Self>>) -> ObjectHandle;

    /// The typed reference inside `handle`, if it has a compatible type.
    fn from_handle(handle: &ObjectHandle) -> Option<Rc<RefCell<Self>>>;

    fn target_type_path() -> &'static str;

    /// A fresh default instance, for concrete targets.
    fn construct() -> Option<ObjectHandle>;

    fn register_target(registry: &mut TypeRegistry);
}

impl<T: Object> SharedTarget for T {
    fn to_handle(rc: &Rc<RefCell<Self>>) -> ObjectHandle {
        ObjectHandle::new(rc.clone())
    }

    fn from_handle(handle: &ObjectHandle) -> Option<Rc<RefCell<Self>>> {
        handle.downcast::<T>()
    }

    fn target_type_path() -> &'static str {
        T::type_path()
    }

    fn construct() -> Option<ObjectHandle> {
        Some(ObjectHandle::new(Rc::new(RefCell::new(T::default()))))
    }

    fn register_target(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

impl SharedTarget for dyn Reflect {
    fn to_handle(rc: &Rc<RefCell<Self>>) -> ObjectHandle {
        ObjectHandle::from_dyn(rc.clone())
    }

    fn from_handle(handle: &ObjectHandle) -> Option<Rc<RefCell<Self>>> {
        Some(handle.object().clone())
    }

    fn target_type_path() -> &'static str {
        "dyn vc_persist::Reflect"
    }

    fn construct() -> Option<ObjectHandle> {
        None
    }

    fn register_target(_registry: &mut TypeRegistry) {}
}
