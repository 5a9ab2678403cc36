//! Identity-tracked references.
//!
//! Only objects behind a [`Shared`] or [`WeakShared`] can be aliased, so
//! only those get an identity when persisted. Everything else is written
//! by value.

// -----------------------------------------------------------------------------
// Modules

mod handle;
mod target;

// -----------------------------------------------------------------------------
// Exports

pub use handle::ObjectHandle;
pub use target::{Object, SharedTarget};

// -----------------------------------------------------------------------------
// Shared

use alloc::rc::{Rc, Weak};
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use crate::kinds::SharedValue;
use crate::registry::TypeRegistry;
use crate::{Reflect, ReflectMut, ReflectRef};

/// A nullable, shared, mutable reference to an object.
///
/// `Shared<T>` is `Option<Rc<RefCell<T>>>` with identity semantics: clones
/// point at the same object, and the persistence drivers write that object
/// once and restore the aliasing on read. The default value is null.
///
/// `T` is either an object type (`#[derive(Persist)]` on a struct) or
/// `dyn Reflect` for polymorphic references.
///
/// Only struct objects carry an identity. A `Shared<dyn Reflect>` holding
/// any other value, such as a number or a `Vec`, fails to write with
/// [`SerializeError::Unsupported`](crate::SerializeError::Unsupported).
///
/// # Examples
///
/// ```
/// use vc_persist::{Shared, derive::Persist};
///
/// #[derive(Persist, Default)]
/// pub struct Unit {
///     pub hp: u32,
/// }
///
/// let a = Shared::new(Unit { hp: 10 });
/// let b = a.clone();
/// b.borrow_mut().unwrap().hp = 7;
///
/// assert!(a.ptr_eq(&b));
/// assert_eq!(a.borrow().unwrap().hp, 7);
/// assert!(Shared::<Unit>::default().is_null());
/// ```
pub struct Shared<T: ?Sized + 'static>(Option<Rc<RefCell<T>>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Some(Rc::new(RefCell::new(value))))
    }
}

impl<T: ?Sized> Shared<T> {
    #[inline]
    pub const fn null() -> Self {
        Self(None)
    }

    #[inline]
    pub fn from_rc(rc: Rc<RefCell<T>>) -> Self {
        Self(Some(rc))
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0.is_none()
    }

    #[inline]
    pub fn as_rc(&self) -> Option<&Rc<RefCell<T>>> {
        self.0.as_ref()
    }

    /// Borrows the object, `None` when null.
    ///
    /// # Panics
    ///
    /// Panics if the object is currently mutably borrowed.
    pub fn borrow(&self) -> Option<Ref<'_, T>> {
        self.0.as_deref().map(RefCell::borrow)
    }

    /// Mutably borrows the object, `None` when null.
    ///
    /// # Panics
    ///
    /// Panics if the object is currently borrowed.
    pub fn borrow_mut(&self) -> Option<RefMut<'_, T>> {
        self.0.as_deref().map(RefCell::borrow_mut)
    }

    /// Whether both point at the same object, or both are null.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn downgrade(&self) -> WeakShared<T> {
        WeakShared(self.0.as_ref().map(Rc::downgrade))
    }

    /// Points this reference at nothing.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

impl<T: Reflect> Shared<T> {
    /// Erases the type, keeping the object.
    pub fn into_dyn(self) -> Shared<dyn Reflect> {
        match self.0 {
            Some(rc) => {
                let rc: Rc<RefCell<dyn Reflect>> = rc;
                Shared(Some(rc))
            }
            None => Shared(None),
        }
    }
}

impl Shared<dyn Reflect> {
    /// Creates a polymorphic reference to a fresh object.
    pub fn new_dyn<T: Reflect>(value: T) -> Self {
        let rc: Rc<RefCell<dyn Reflect>> = Rc::new(RefCell::new(value));
        Self(Some(rc))
    }
}

impl<T: ?Sized> Default for Shared<T> {
    #[inline]
    fn default() -> Self {
        Self(None)
    }
}

impl<T: ?Sized> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: ?Sized> fmt::Debug for Shared<T> {
    // Never prints the target, graphs may be cyclic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(rc) => write!(f, "Shared({:p})", Rc::as_ptr(rc).cast::<()>()),
            None => f.write_str("Shared(null)"),
        }
    }
}

// -----------------------------------------------------------------------------
// WeakShared

/// A nullable, non-owning reference to a shared object.
///
/// Persisted exactly like [`Shared`]; a dangling reference is written as null.
pub struct WeakShared<T: ?Sized + 'static>(Option<Weak<RefCell<T>>>);

impl<T: ?Sized> WeakShared<T> {
    #[inline]
    pub const fn null() -> Self {
        Self(None)
    }

    /// Upgrades to a strong reference, null when dangling.
    pub fn upgrade(&self) -> Shared<T> {
        Shared(self.0.as_ref().and_then(Weak::upgrade))
    }

    /// Whether the reference is null or its object is gone.
    pub fn is_dangling(&self) -> bool {
        self.0.as_ref().is_none_or(|weak| weak.strong_count() == 0)
    }
}

impl<T: ?Sized> Default for WeakShared<T> {
    #[inline]
    fn default() -> Self {
        Self(None)
    }
}

impl<T: ?Sized> Clone for WeakShared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: ?Sized> fmt::Debug for WeakShared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(weak) if weak.strong_count() > 0 => {
                write!(f, "WeakShared({:p})", Weak::as_ptr(weak).cast::<()>())
            }
            Some(_) => f.write_str("WeakShared(dangling)"),
            None => f.write_str("WeakShared(null)"),
        }
    }
}

// -----------------------------------------------------------------------------
// Reflect

impl<T: SharedTarget + ?Sized> Reflect for Shared<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Shared(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Shared(self)
    }

    fn register_type_dependencies(registry: &mut TypeRegistry) {
        T::register_target(registry);
    }
}

impl<T: SharedTarget + ?Sized> SharedValue for Shared<T> {
    fn handle(&self) -> Option<ObjectHandle> {
        self.0.as_ref().map(T::to_handle)
    }

    fn set_handle(&mut self, handle: Option<&ObjectHandle>) -> bool {
        match handle {
            None => {
                self.0 = None;
                true
            }
            Some(handle) => match T::from_handle(handle) {
                Some(rc) => {
                    self.0 = Some(rc);
                    true
                }
                None => false,
            },
        }
    }

    fn target_type_path(&self) -> &'static str {
        T::target_type_path()
    }

    fn construct_target(&self) -> Option<ObjectHandle> {
        T::construct()
    }
}

impl<T: SharedTarget + ?Sized> Reflect for WeakShared<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Shared(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Shared(self)
    }

    fn register_type_dependencies(registry: &mut TypeRegistry) {
        T::register_target(registry);
    }
}

impl<T: SharedTarget + ?Sized> SharedValue for WeakShared<T> {
    fn handle(&self) -> Option<ObjectHandle> {
        let rc = self.0.as_ref()?.upgrade()?;
        Some(T::to_handle(&rc))
    }

    fn set_handle(&mut self, handle: Option<&ObjectHandle>) -> bool {
        match handle {
            None => {
                self.0 = None;
                true
            }
            Some(handle) => match T::from_handle(handle) {
                Some(rc) => {
                    self.0 = Some(Rc::downgrade(&rc));
                    true
                }
                None => false,
            },
        }
    }

    fn target_type_path(&self) -> &'static str {
        T::target_type_path()
    }

    fn construct_target(&self) -> Option<ObjectHandle> {
        T::construct()
    }
}
