use crate::Reflect;
use crate::hooks::{Callbacks, ManualPersist};
use crate::info::StructInfo;

/// A general object with named fields.
///
/// Fields are addressed by their index in [`StructInfo::fields`], which
/// lists the fields of an embedded base first.
///
/// Usually implemented by [`#[derive(Persist)]`](crate::derive::Persist).
pub trait Struct: Reflect {
    /// The static descriptor of the type.
    fn struct_info() -> &'static StructInfo
    where
        Self: Sized;

    /// Same as [`Struct::struct_info`], through a trait object.
    fn info(&self) -> &'static StructInfo;

    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Lifecycle callbacks, when the type declares them.
    fn callbacks(&self) -> Option<&dyn Callbacks> {
        None
    }

    fn callbacks_mut(&mut self) -> Option<&mut dyn Callbacks> {
        None
    }

    /// Manual (de)serialization, when the type declares it.
    fn manual(&self) -> Option<&dyn ManualPersist> {
        None
    }

    fn manual_mut(&mut self) -> Option<&mut dyn ManualPersist> {
        None
    }
}
