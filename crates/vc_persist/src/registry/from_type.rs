use crate::info::Typed;

/// Builds a [`TypeTrait`](crate::registry::TypeTrait) for the type `T`.
///
/// # Example
///
/// ```
/// use vc_persist::registry::{FromType, TypeMeta, TypeTraitDefault};
///
/// let mut meta = TypeMeta::of::<String>();
/// meta.insert_trait::<TypeTraitDefault>(FromType::<String>::from_type());
/// assert!(meta.has_trait::<TypeTraitDefault>());
/// ```
pub trait FromType<T: Typed> {
    fn from_type() -> Self;
}
