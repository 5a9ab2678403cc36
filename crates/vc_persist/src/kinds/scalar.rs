use vc_tree::Primitive;

use crate::Reflect;
use crate::policy::ConvertError;

/// A value persisted as a single [`Primitive`].
///
/// Reading goes through [`FromPrimitive`](crate::policy::FromPrimitive),
/// so a scalar accepts any primitive kind that converts losslessly.
///
/// Writing fails with [`ConvertError::Unrepresentable`] when the value
/// lies outside the range of its persisted kind.
pub trait Scalar: Reflect {
    fn to_primitive(&self) -> Result<Primitive, ConvertError>;

    fn set_primitive(&mut self, value: &Primitive) -> Result<(), ConvertError>;
}
