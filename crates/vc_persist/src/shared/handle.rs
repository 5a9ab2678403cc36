use alloc::rc::Rc;
use core::any::Any;
use core::cell::RefCell;
use core::fmt;

use crate::Reflect;

// -----------------------------------------------------------------------------
// ObjectHandle

/// A type-erased strong reference to a shared object.
///
/// The handle keeps the object alive and exposes it as `dyn Reflect`. When
/// created from a typed reference it can also be turned back into one.
///
/// Two handles name the same object when their [`address`](Self::address)
/// is equal; that address is what identity tables are keyed by.
#[derive(Clone)]
pub struct ObjectHandle {
    object: Rc<RefCell<dyn Reflect>>,
    typed: Option<Rc<dyn Any>>,
}

impl ObjectHandle {
    /// Creates a handle that can be downcast back to `T`.
    pub fn new<T: Reflect>(object: Rc<RefCell<T>>) -> Self {
        let typed: Rc<dyn Any> = object.clone();
        Self {
            object,
            typed: Some(typed),
        }
    }

    /// Creates a handle from an already erased object.
    ///
    /// Such a handle can only be attached to `Shared<dyn Reflect>` slots.
    pub fn from_dyn(object: Rc<RefCell<dyn Reflect>>) -> Self {
        Self {
            object,
            typed: None,
        }
    }

    #[inline]
    pub fn object(&self) -> &Rc<RefCell<dyn Reflect>> {
        &self.object
    }

    /// The allocation address, stable for as long as the handle lives.
    #[inline]
    pub fn address(&self) -> usize {
        Rc::as_ptr(&self.object).cast::<()>() as usize
    }

    /// Recovers the typed reference if the object is a `T`.
    pub fn downcast<T: Reflect>(&self) -> Option<Rc<RefCell<T>>> {
        self.typed.clone()?.downcast::<RefCell<T>>().ok()
    }

    /// Whether both handles point at the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }

    /// The type path of the object, unless it is mutably borrowed.
    pub fn type_path(&self) -> Option<&'static str> {
        self.object
            .try_borrow()
            .ok()
            .map(|object| object.reflect_type_path())
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHandle")
            .field("address", &format_args!("{:#x}", self.address()))
            .field("type_path", &self.type_path())
            .finish()
    }
}
