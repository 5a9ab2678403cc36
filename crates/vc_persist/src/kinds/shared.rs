use crate::{ObjectHandle, Reflect};

/// An identity-tracked reference to an object.
///
/// See [`Shared`](crate::Shared) and [`WeakShared`](crate::WeakShared).
pub trait SharedValue: Reflect {
    /// The referenced object, or `None` when null (or dangling, for weak
    /// references).
    fn handle(&self) -> Option<ObjectHandle>;

    /// Points this reference at `handle`, or clears it with `None`.
    ///
    /// Returns `false`, leaving the reference untouched, when the object is
    /// not of a type this reference can hold.
    fn set_handle(&mut self, handle: Option<&ObjectHandle>) -> bool;

    /// The type path of the referenced type, or of the trait object.
    fn target_type_path(&self) -> &'static str;

    /// Creates a fresh default object of the referenced type, if it is
    /// concrete.
    fn construct_target(&self) -> Option<ObjectHandle>;
}
