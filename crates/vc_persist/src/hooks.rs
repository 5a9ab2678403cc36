//! Capabilities an object type can opt into.
//!
//! Declared on the type with `#[persist(callbacks)]` and
//! `#[persist(manual)]`; the drivers query them through
//! [`Struct::callbacks`](crate::kinds::Struct::callbacks) and
//! [`Struct::manual`](crate::kinds::Struct::manual).

use vc_tree::Compound;

use crate::de::DeserializeDriver;
use crate::ser::SerializeDriver;
use crate::{DeserializeError, SerializeError};

/// Lifecycle notifications around the conversion of one object.
///
/// # Examples
///
/// ```
/// use vc_persist::{derive::Persist, hooks::Callbacks};
///
/// #[derive(Persist, Default)]
/// #[persist(callbacks)]
/// pub struct Mesh {
///     pub vertices: Vec<f32>,
///     bounds: f32,
/// }
///
/// impl Callbacks for Mesh {
///     fn post_deserialize(&mut self) {
///         self.bounds = self.vertices.iter().copied().fold(0.0, f32::max);
///     }
/// }
/// ```
pub trait Callbacks {
    /// Before any field is written.
    fn pre_serialize(&self) {}

    /// After every field is written.
    fn post_serialize(&self) {}

    /// On the bare default instance, before any field is read.
    fn pre_deserialize(&mut self) {}

    /// After every field is read.
    fn post_deserialize(&mut self) {}
}

/// Hand-written conversion replacing field discovery for a type.
///
/// The compound passed to [`write`](Self::write) already carries the
/// identity and declared type of the object; the writer only adds entries.
/// Nested values go through the driver so they keep identity tracking.
///
/// # Examples
///
/// ```
/// use vc_persist::de::DeserializeDriver;
/// use vc_persist::hooks::ManualPersist;
/// use vc_persist::ser::SerializeDriver;
/// use vc_persist::tree::Compound;
/// use vc_persist::{DeserializeError, SerializeError, derive::Persist};
///
/// #[derive(Persist, Default)]
/// #[persist(manual)]
/// pub struct Range {
///     pub start: i32,
///     pub end: i32,
/// }
///
/// impl ManualPersist for Range {
///     fn write(&self, out: &mut Compound, ser: &mut SerializeDriver<'_>) -> Result<(), SerializeError> {
///         ser.write_field(out, "span", &[self.start, self.end])
///     }
///
///     fn read(&mut self, input: &Compound, de: &mut DeserializeDriver<'_>) -> Result<(), DeserializeError> {
///         let mut span = [0_i32; 2];
///         de.read_field(input, "span", &mut span)?;
///         [self.start, self.end] = span;
///         Ok(())
///     }
/// }
/// ```
pub trait ManualPersist {
    fn write(
        &self,
        out: &mut Compound,
        driver: &mut SerializeDriver<'_>,
    ) -> Result<(), SerializeError>;

    fn read(
        &mut self,
        input: &Compound,
        driver: &mut DeserializeDriver<'_>,
    ) -> Result<(), DeserializeError>;
}
